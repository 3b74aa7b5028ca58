//! Axis ranges, tick selection and the data-to-screen transform

use super::error::{Axis, PlotError};
use super::series::PlotSeries;
use super::PlotParams;

/// Default side length of the longer plot axis, in SVG user units
pub const TARGET_SIZE: f64 = 512.0;

/// Smallest accepted tick base
pub const MIN_TICK_BASE: u32 = 2;

/// Largest accepted tick base; keeps the tick count per axis in the hundreds
pub const MAX_TICK_BASE: u32 = 36;

/// Closed interval of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range is empty when it collapses to a single value
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Scale both bounds by `factor`
    pub fn scaled(&self, factor: f64) -> AxisRange {
        AxisRange::new(factor * self.min, factor * self.max)
    }

    /// Smallest range containing both `self` and `other`
    pub fn union(&self, other: &AxisRange) -> AxisRange {
        AxisRange::new(self.min.min(other.min), self.max.max(other.max))
    }

    fn validate(self, axis: Axis) -> Result<Self, PlotError> {
        if self.is_empty() {
            return Err(PlotError::degenerate(axis, self.min));
        }
        if !self.length().is_finite() {
            return Err(PlotError::NonFiniteRange { axis });
        }
        if self.min > self.max {
            return Err(PlotError::InvertedRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }
}

/// Min/max of one coordinate over every point of every series
pub fn compute_range(series: &[PlotSeries], axis: Axis) -> Result<AxisRange, PlotError> {
    series
        .iter()
        .flat_map(|s| s.points().iter())
        .map(|&(x, y)| match axis {
            Axis::X => x,
            Axis::Y => y,
        })
        .fold(None, |range: Option<AxisRange>, v| {
            Some(match range {
                Some(r) => r.union(&AxisRange::new(v, v)),
                None => AxisRange::new(v, v),
            })
        })
        .ok_or(PlotError::EmptySeries)
}

/// Distance between ticks for `range`
///
/// The result is the power of `tick_base` that puts on the order of
/// `tick_base` gridlines across the range:
/// `tick_base ^ (round(log_tick_base(length)) - 1)`.
///
/// ```rust
/// use pretty_render::plot::{compute_tick_pitch, AxisRange};
///
/// assert_eq!(compute_tick_pitch(&AxisRange::new(0.0, 100.0), 10), 10.0);
/// ```
pub fn compute_tick_pitch(range: &AxisRange, tick_base: u32) -> f64 {
    let base = f64::from(tick_base);
    let exponent = (range.length().ln() / base.ln()).round();
    base.powf(exponent - 1.0)
}

/// Ticks `start + k * pitch` for k = 0, 1, … up to and including `max`
///
/// Cloning restarts the sequence.
#[derive(Debug, Clone)]
pub struct TickSteps {
    start: f64,
    pitch: f64,
    max: f64,
    k: usize,
}

impl TickSteps {
    pub fn new(range: &AxisRange, pitch: f64) -> Self {
        Self {
            start: (range.min / pitch).ceil() * pitch,
            pitch,
            max: range.max,
            k: 0,
        }
    }
}

impl Iterator for TickSteps {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if !(self.pitch.is_finite() && self.pitch > 0.0) {
            return None;
        }
        let value = self.start + self.k as f64 * self.pitch;
        if !value.is_finite() || value > self.max {
            return None;
        }
        let item = (self.k, value);
        self.k += 1;
        Some(item)
    }
}

fn check_tick_base(axis: Axis, base: u32) -> Result<(), PlotError> {
    if (MIN_TICK_BASE..=MAX_TICK_BASE).contains(&base) {
        Ok(())
    } else {
        Err(PlotError::InvalidTickBase { axis, base })
    }
}

/// Everything the SVG emitter needs to place a figure
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGeometry {
    /// Data-space x range
    pub x_range: AxisRange,
    /// Data-space y range
    pub y_range: AxisRange,
    /// Uniform data-to-screen scale factor
    pub scale: f64,
    /// Scaled width of the axis box
    pub width: f64,
    /// Scaled height of the axis box
    pub height: f64,
    /// Screen-space x range
    pub scaled_x: AxisRange,
    /// Screen-space y range
    pub scaled_y: AxisRange,
    pub x_tick_pitch: f64,
    pub y_tick_pitch: f64,
}

impl PlotGeometry {
    /// Compute the geometry of a figure with the default target size
    pub fn compute(series: &[PlotSeries], params: &PlotParams) -> Result<Self, PlotError> {
        Self::compute_with_target(series, params, TARGET_SIZE)
    }

    /// Compute the geometry of a figure whose longer axis spans `target_size`
    pub fn compute_with_target(
        series: &[PlotSeries],
        params: &PlotParams,
        target_size: f64,
    ) -> Result<Self, PlotError> {
        check_tick_base(Axis::X, params.x_tick_base)?;
        check_tick_base(Axis::Y, params.y_tick_base)?;

        let x_range = match params.x_range {
            Some(range) => range,
            None => compute_range(series, Axis::X)?,
        }
        .validate(Axis::X)?;
        let y_range = match params.y_range {
            Some(range) => range,
            None => compute_range(series, Axis::Y)?,
        }
        .validate(Axis::Y)?;

        let scale = target_size / x_range.length().max(y_range.length());
        let geometry = Self {
            x_range,
            y_range,
            scale,
            width: scale * x_range.length(),
            height: scale * y_range.length(),
            scaled_x: x_range.scaled(scale),
            scaled_y: y_range.scaled(scale),
            x_tick_pitch: compute_tick_pitch(&x_range, params.x_tick_base),
            y_tick_pitch: compute_tick_pitch(&y_range, params.y_tick_base),
        };

        tracing::debug!(
            x_min = x_range.min,
            x_max = x_range.max,
            y_min = y_range.min,
            y_max = y_range.max,
            scale,
            x_pitch = geometry.x_tick_pitch,
            y_pitch = geometry.y_tick_pitch,
            "computed plot geometry"
        );

        Ok(geometry)
    }

    /// Map a data point to screen space, flipping y so larger values go up
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (self.screen_x(x), self.screen_y(y))
    }

    pub fn screen_x(&self, x: f64) -> f64 {
        self.scale * x
    }

    pub fn screen_y(&self, y: f64) -> f64 {
        self.scale * (self.y_range.max + self.y_range.min - y)
    }

    /// Inverse of [`PlotGeometry::to_screen`]
    pub fn to_data(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            sx / self.scale,
            self.y_range.max + self.y_range.min - sy / self.scale,
        )
    }

    pub fn x_ticks(&self) -> TickSteps {
        TickSteps::new(&self.x_range, self.x_tick_pitch)
    }

    pub fn y_ticks(&self) -> TickSteps {
        TickSteps::new(&self.y_range, self.y_tick_pitch)
    }
}
