//! Execution of preview scripts against an [`OutputSink`]

use crate::annotations::{Block, Inline};
use crate::error::ScriptError;
use crate::parser::{parse, Document, Expr, InlineExpr, PlotDecl, Spanned, Statement};
use crate::plot::{
    compute_range, Axis, AxisRange, PlotParams, PlotSeries, MAX_TICK_BASE, MIN_TICK_BASE,
};
use crate::renderer::render_html;
use crate::sink::{OutputSink, Section};
use crate::value::{RenderableValue, Scalar};
use crate::Error;

/// Parse and execute `source`
///
/// ```rust
/// use pretty_render::{run_script, OutputSink, SharedBuffer};
///
/// let buffer = SharedBuffer::default();
/// let sink = OutputSink::new(buffer.clone());
/// run_script("print [1, 2]", &sink).unwrap();
/// assert_eq!(
///     buffer.contents(),
///     r#"<ol start="0" class="range_content"><li>1</li><li>2</li></ol>"#
/// );
/// ```
pub fn run_script(source: &str, sink: &OutputSink) -> Result<(), Error> {
    let document = parse(source)?;
    execute(&document, sink)
}

/// Execute a parsed script
///
/// Each top-level statement is written in its own scoped section, so a
/// `box` and everything inside it stays contiguous even when other threads
/// share the sink.
pub fn execute(document: &Document, sink: &OutputSink) -> Result<(), Error> {
    tracing::debug!(statements = document.statements.len(), "executing script");
    for statement in &document.statements {
        sink.scoped_section(|section| execute_statement(section, statement))?;
    }
    Ok(())
}

fn execute_statement(section: &mut Section<'_>, statement: &Spanned<Statement>) -> Result<(), Error> {
    match &statement.node {
        Statement::Print(expr) => section.write_markup(&render_html(&renderable(&expr.node))),
        Statement::Let { name, value } => {
            section.print_labeled(name.node.as_str(), &renderable(&value.node))
        }
        Statement::Annotation { block, content } => {
            let inlines: Vec<Inline<'_>> = content.iter().map(|i| inline(&i.node)).collect();
            match block {
                Block::Paragraph => section.paragraph(&inlines),
                Block::Section => section.section(&inlines),
                Block::Subsection => section.subsection(&inlines),
                Block::Subsubsection => section.subsubsection(&inlines),
            }
        }
        Statement::Box(children) => section.boxed(|inner| {
            children
                .iter()
                .try_for_each(|child| execute_statement(inner, child))
        }),
        Statement::Plot(decl) => {
            let series = decl
                .series
                .iter()
                .map(series_from)
                .collect::<Result<Vec<_>, _>>()?;
            let params = params_from(decl, &series, &statement.span)?;
            match section.plot(&series, &params) {
                Err(Error::Plot(source)) => Err(ScriptError::Plot {
                    span: statement.span.clone(),
                    source,
                }
                .into()),
                other => other,
            }
        }
    }
}

/// Build the renderable view of a literal expression
pub fn renderable(expr: &Expr) -> RenderableValue<'_> {
    match expr {
        Expr::Int(n) => RenderableValue::Scalar(Scalar::Signed(*n)),
        Expr::Float(x) => RenderableValue::Scalar(Scalar::Float(*x)),
        Expr::Str(s) => RenderableValue::text(s.as_str()),
        Expr::Char(c) => RenderableValue::Scalar(Scalar::Char(*c)),
        Expr::Bool(b) => RenderableValue::Scalar(Scalar::Bool(*b)),
        Expr::Byte(b) => RenderableValue::Byte(*b),
        Expr::None => RenderableValue::absent(),
        Expr::Some(inner) => RenderableValue::present(renderable(&inner.node)),
        Expr::List(items) => {
            RenderableValue::sequence_of(items.iter().map(|i| renderable(&i.node)).collect())
        }
        Expr::Tuple(members) => {
            RenderableValue::tuple(members.iter().map(|m| renderable(&m.node)).collect())
        }
    }
}

fn inline(expr: &InlineExpr) -> Inline<'_> {
    match expr {
        InlineExpr::Text(s) => Inline::text(s.as_str()),
        InlineExpr::Emph(s) => Inline::emph(s.as_str()),
        InlineExpr::Code(s) => Inline::code(s.as_str()),
        InlineExpr::Samp(s) => Inline::samp(s.as_str()),
        InlineExpr::Link { href, caption } => Inline::link(href.as_str(), caption.as_str()),
    }
}

fn series_from(expr: &Spanned<Expr>) -> Result<PlotSeries, ScriptError> {
    let Expr::List(points) = &expr.node else {
        return Err(ScriptError::InvalidSeries {
            span: expr.span.clone(),
        });
    };
    points.iter().map(point_from).collect()
}

fn point_from(expr: &Spanned<Expr>) -> Result<(f64, f64), ScriptError> {
    let invalid = || ScriptError::InvalidPoint {
        span: expr.span.clone(),
    };
    let members = match &expr.node {
        Expr::Tuple(members) | Expr::List(members) => members,
        _ => return Err(invalid()),
    };
    match members.as_slice() {
        [x, y] => match (x.node.as_number(), y.node.as_number()) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

fn params_from(
    decl: &PlotDecl,
    series: &[PlotSeries],
    span: &std::ops::Range<usize>,
) -> Result<PlotParams, ScriptError> {
    let mut params = PlotParams::default();
    let mut bounds: [Option<f64>; 4] = [None; 4];

    for option in &decl.options {
        let key = option.node.key.node.as_str();
        let value = option.node.value.node;
        match key {
            "x_min" => bounds[0] = Some(value),
            "x_max" => bounds[1] = Some(value),
            "y_min" => bounds[2] = Some(value),
            "y_max" => bounds[3] = Some(value),
            "x_tick_base" => params.x_tick_base = tick_base(option.node.value.clone(), key)?,
            "y_tick_base" => params.y_tick_base = tick_base(option.node.value.clone(), key)?,
            _ => {
                return Err(ScriptError::UnknownOption {
                    span: option.node.key.span.clone(),
                    key: key.to_string(),
                })
            }
        }
    }

    params.x_range = axis_range(bounds[0], bounds[1], series, Axis::X, span)?;
    params.y_range = axis_range(bounds[2], bounds[3], series, Axis::Y, span)?;
    Ok(params)
}

/// An explicit range, with a missing bound taken from the data
fn axis_range(
    min: Option<f64>,
    max: Option<f64>,
    series: &[PlotSeries],
    axis: Axis,
    span: &std::ops::Range<usize>,
) -> Result<Option<AxisRange>, ScriptError> {
    match (min, max) {
        (None, None) => Ok(None),
        (Some(min), Some(max)) => Ok(Some(AxisRange::new(min, max))),
        _ => {
            let data = compute_range(series, axis).map_err(|source| ScriptError::Plot {
                span: span.clone(),
                source,
            })?;
            Ok(Some(AxisRange::new(
                min.unwrap_or(data.min),
                max.unwrap_or(data.max),
            )))
        }
    }
}

fn tick_base(value: Spanned<f64>, key: &str) -> Result<u32, ScriptError> {
    let base = value.node;
    let allowed = f64::from(MIN_TICK_BASE)..=f64::from(MAX_TICK_BASE);
    if base.fract() == 0.0 && allowed.contains(&base) {
        Ok(base as u32)
    } else {
        Err(ScriptError::InvalidTickBase {
            span: value.span,
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotError;
    use crate::sink::SharedBuffer;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Result<String, Error> {
        let buffer = SharedBuffer::default();
        let sink = OutputSink::new(buffer.clone());
        run_script(source, &sink)?;
        Ok(buffer.contents())
    }

    #[test]
    fn test_print_scalars() {
        assert_eq!(run("print 42").unwrap(), "42");
        assert_eq!(run("print '<'").unwrap(), "&lt;");
        assert_eq!(run("print none").unwrap(), r#"<span class="empty">(no value)</span>"#);
        assert_eq!(run("print 0x0a").unwrap(), r#"<code class="byte">0a</code>"#);
    }

    #[test]
    fn test_print_pair_and_matrix() {
        assert_eq!(
            run(r#"print ("pi", 3)"#).unwrap(),
            r#"<ol start="0" class="tuple_content"><li>pi</li><li>3</li></ol>"#
        );
        assert_eq!(
            run("print [[1, 2, 3], [4, 5, 6]]").unwrap(),
            concat!(
                r#"<table class="range_content">"#,
                "<tr><td>1</td><td>2</td><td>3</td></tr>",
                "<tr><td>4</td><td>5</td><td>6</td></tr>",
                "</table>"
            )
        );
    }

    #[test]
    fn test_ragged_list_falls_back() {
        assert_eq!(
            run("print [[1, 2], [3, 4, 5]]").unwrap(),
            concat!(
                r#"<ol start="0" class="range_content">"#,
                r#"<li><ol start="0" class="range_content"><li>1</li><li>2</li></ol></li>"#,
                r#"<li><ol start="0" class="range_content"><li>3</li><li>4</li><li>5</li></ol></li>"#,
                "</ol>"
            )
        );
    }

    #[test]
    fn test_let_prints_labeled_value() {
        assert_eq!(
            run("let answer = some(42)").unwrap(),
            r#"<table class="single_row"><tr><td>answer</td><td>=</td><td>42</td></tr></table>"#
        );
    }

    #[test]
    fn test_annotations_and_box() {
        assert_eq!(
            run(r#"section "Demo" box { paragraph "x is " code "1" print 1 }"#).unwrap(),
            r#"<h3>Demo</h3><div class="box"><p>x is <code>1</code></p>1</div>"#
        );
    }

    #[test]
    fn test_plot() {
        let svg = run("plot [(0, 0), (1, 1), (2, 4)], [[0, 4], [2, 0]]").unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"class="curve_0""#));
        assert!(svg.contains(r#"class="curve_1""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_plot_partial_range_uses_data() {
        let source = "plot [(0, 0), (4, 4)] [x_min: -4]";
        let document = parse(source).unwrap();
        let Statement::Plot(decl) = &document.statements[0].node else {
            panic!("Expected plot");
        };
        let series: Vec<_> = decl.series.iter().map(|s| series_from(s).unwrap()).collect();
        let params = params_from(decl, &series, &document.statements[0].span).unwrap();
        assert_eq!(params.x_range, Some(AxisRange::new(-4.0, 4.0)));
        assert_eq!(params.y_range, None);
    }

    #[test]
    fn test_invalid_point() {
        let err = run("plot [(0, 0), (1, \"a\")]").unwrap_err();
        match err {
            Error::Script(ScriptError::InvalidPoint { span }) => assert_eq!(span, 14..22),
            other => panic!("Expected invalid point, got {:?}", other),
        }
    }

    #[test]
    fn test_series_must_be_list() {
        let err = run("plot 5").unwrap_err();
        assert!(matches!(err, Error::Script(ScriptError::InvalidSeries { .. })));
    }

    #[test]
    fn test_unknown_option() {
        let err = run("plot [(0, 0), (1, 1)] [x_low: 0]").unwrap_err();
        assert!(matches!(
            err,
            Error::Script(ScriptError::UnknownOption { ref key, .. }) if key == "x_low"
        ));
    }

    #[test]
    fn test_invalid_tick_base() {
        let err = run("plot [(0, 0), (1, 1)] [x_tick_base: 1.5]").unwrap_err();
        assert!(matches!(
            err,
            Error::Script(ScriptError::InvalidTickBase { .. })
        ));
    }

    #[test]
    fn test_huge_tick_base_is_rejected() {
        for source in [
            "plot [(0, 0), (10, 10)] [x_tick_base: 4294967295]",
            "plot [(0, 0), (10, 10)] [y_tick_base: 37]",
        ] {
            let err = run(source).unwrap_err();
            assert!(
                matches!(err, Error::Script(ScriptError::InvalidTickBase { .. })),
                "{}: {:?}",
                source,
                err
            );
        }
        assert!(run("plot [(0, 0), (10, 10)] [x_tick_base: 36]").is_ok());
    }

    #[test]
    fn test_partial_bound_beyond_data_is_inverted() {
        let source = "plot [(0, 0), (4, 4)] [x_min: 10]";
        let err = run(source).unwrap_err();
        match err {
            Error::Script(ScriptError::Plot { span, source: plot }) => {
                assert_eq!(span, 0..source.len());
                assert_eq!(
                    plot,
                    PlotError::InvertedRange {
                        axis: Axis::X,
                        min: 10.0,
                        max: 4.0
                    }
                );
            }
            other => panic!("Expected plot error, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_plot_carries_span() {
        let err = run("print 1\nplot [(0, 1), (1, 1)]").unwrap_err();
        match err {
            Error::Script(ScriptError::Plot { span, source }) => {
                assert_eq!(span, 8..29);
                assert_eq!(source, PlotError::degenerate(Axis::Y, 1.0));
            }
            other => panic!("Expected plot error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_before_error_is_kept() {
        let buffer = SharedBuffer::default();
        let sink = OutputSink::new(buffer.clone());
        let result = run_script("print 1 plot 2 print 3", &sink);
        assert!(result.is_err());
        assert_eq!(buffer.contents(), "1");
    }

    #[test]
    fn test_parse_errors_are_returned() {
        assert!(matches!(run("print [1"), Err(Error::Parse(_))));
    }
}
