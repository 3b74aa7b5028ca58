//! SVG generation for 2-D plots

use crate::encode::{self, format_f32, format_f64};
use crate::plot::{PlotError, PlotGeometry, PlotParams, PlotSeries};

use super::PlotConfig;

/// One class suffix per curve; curves beyond the sixteenth wrap around
pub const CURVE_IDS: &[u8; 16] = b"0123456789abcdef";

/// Horizontal gap between the y labels and the axis box
const Y_LABEL_GAP: f64 = 2.0;

/// Where a label sits relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Centered below the anchor, used for x ticks
    Below,
    /// Right-aligned and vertically centered, used for y ticks
    Left,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: PlotConfig,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            elements: vec![],
        }
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the polyline of one curve, points given in screen space
    pub fn add_curve(&mut self, index: usize, points: &[(f64, f64)]) {
        let points_str = points
            .iter()
            .map(|&(x, y)| format!("{},{}", format_f64(x), format_f64(y)))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<polyline class="{}" stroke-width="1" fill="none" points="{}"/>"#,
            self.indent_str(),
            curve_class(index),
            points_str
        ));
    }

    /// Add a point marker belonging to curve `index`
    pub fn add_marker(&mut self, index: usize, x: f64, y: f64) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"/>"#,
            self.indent_str(),
            curve_class(index),
            format_f64(x),
            format_f64(y),
            format_f64(self.config.marker_radius)
        ));
    }

    /// Add a two-point grid line
    pub fn add_grid_line(&mut self, class: &str, from: (f64, f64), to: (f64, f64)) {
        self.elements.push(format!(
            r#"{}<polyline class="{}" stroke-width="1" fill="none" points="{},{} {},{}"/>"#,
            self.indent_str(),
            class,
            format_f64(from.0),
            format_f64(from.1),
            format_f64(to.0),
            format_f64(to.1)
        ));
    }

    /// Add a tick label
    pub fn add_label(&mut self, placement: LabelPlacement, x: f64, y: f64, text: &str) {
        let (classes, anchor, baseline) = match placement {
            LabelPlacement::Below => ("x_labels", "middle", "hanging"),
            LabelPlacement::Left => ("x_labels y_labels", "end", "middle"),
        };

        self.elements.push(format!(
            r#"{}<text class="{}" style="font-size:{}px" text-anchor="{}" dominant-baseline="{}" x="{}" y="{}">{}</text>"#,
            self.indent_str(),
            classes,
            format_f64(self.config.text_height),
            anchor,
            baseline,
            format_f64(x),
            format_f64(y),
            encode::escape(text)
        ));
    }

    /// Add the frame around the plot area
    pub fn add_axis_box(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            r#"{}<rect class="axis_box" fill="none" stroke-width="1" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            format_f64(x),
            format_f64(y),
            format_f64(w),
            format_f64(h)
        ));
    }

    /// Build the final SVG string around the plot area of `geometry`
    pub fn build(self, geometry: &PlotGeometry) -> String {
        let text_height = self.config.text_height;
        let vb_x = geometry.scaled_x.min - 4.0 * text_height;
        let vb_y = geometry.scaled_y.min - text_height;
        let vb_w = geometry.width + 8.0 * text_height;
        let vb_h = geometry.height + 2.5 * text_height;

        let nl = self.newline();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            format_f64(vb_x),
            format_f64(vb_y),
            format_f64(vb_w),
            format_f64(vb_h)
        );
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

fn curve_class(index: usize) -> String {
    format!("curve_{}", CURVE_IDS[index % CURVE_IDS.len()] as char)
}

/// Render `series` as a complete SVG figure
///
/// ```rust
/// use pretty_render::plot::{PlotParams, PlotSeries};
/// use pretty_render::renderer::{render_plot, PlotConfig};
///
/// let series = vec![PlotSeries::from_points([(0, 0), (1, 1), (2, 4)])];
/// let svg = render_plot(&series, &PlotParams::default(), &PlotConfig::default()).unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains(r#"class="curve_0""#));
/// ```
pub fn render_plot(
    series: &[PlotSeries],
    params: &PlotParams,
    config: &PlotConfig,
) -> Result<String, PlotError> {
    let geometry = PlotGeometry::compute_with_target(series, params, config.target_size)?;
    let mut builder = SvgBuilder::new(config.clone());

    for (index, curve) in series.iter().enumerate() {
        let screen: Vec<(f64, f64)> = curve
            .points()
            .iter()
            .map(|&(x, y)| geometry.to_screen(x, y))
            .collect();
        builder.add_curve(index, &screen);
        for &(x, y) in &screen {
            builder.add_marker(index, x, y);
        }
    }

    let (left, right) = (geometry.scaled_x.min, geometry.scaled_x.max);
    let (top, bottom) = (geometry.scaled_y.min, geometry.scaled_y.max);

    for (_, x) in geometry.x_ticks() {
        let sx = geometry.screen_x(x);
        builder.add_grid_line("x_grid", (sx, top), (sx, bottom));
    }
    for (_, y) in geometry.y_ticks() {
        let sy = geometry.screen_y(y);
        builder.add_grid_line("y_grid", (left, sy), (right, sy));
    }

    for (_, x) in geometry.x_ticks() {
        builder.add_label(
            LabelPlacement::Below,
            geometry.screen_x(x),
            bottom,
            &format_f32(x as f32),
        );
    }
    for (_, y) in geometry.y_ticks() {
        builder.add_label(
            LabelPlacement::Left,
            left - Y_LABEL_GAP,
            geometry.screen_y(y),
            &format_f32(y as f32),
        );
    }

    builder.add_axis_box(left, top, geometry.width, geometry.height);

    tracing::trace!(curves = series.len(), "rendered plot");

    Ok(builder.build(&geometry))
}
