//! pretty-render - HTML and SVG rendering of program values
//!
//! This library turns arbitrary values into HTML fragments for a host page
//! and 2-D point series into SVG figures, writing both to a shared output
//! stream without interleaving between threads.
//!
//! # Example
//!
//! ```rust
//! use pretty_render::render_to_string;
//!
//! let html = render_to_string(&vec![vec![1, 2], vec![3, 4]]);
//! assert!(html.starts_with(r#"<table class="range_content">"#));
//! ```

pub mod annotations;
pub mod classify;
pub mod encode;
pub mod error;
pub mod parser;
pub mod plot;
pub mod renderer;
pub mod script;
pub mod sink;
pub mod stylesheet;
pub mod value;

pub use annotations::Inline;
pub use error::{ParseError, ScriptError};
pub use plot::{AxisRange, PlotError, PlotGeometry, PlotParams, PlotSeries};
pub use renderer::PlotConfig;
pub use script::run_script;
pub use sink::{OutputSink, Section, SharedBuffer};
pub use stylesheet::{Stylesheet, StylesheetError};
pub use value::{Byte, Render, RenderableValue, RowHint};

use thiserror::Error;

/// Errors that can occur while producing output
#[derive(Debug, Error)]
pub enum Error {
    /// Writing or flushing the output stream failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// A plot precondition was violated
    #[error("plot error: {0}")]
    Plot(#[from] PlotError),

    /// Error while parsing a script
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while running a script
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// The stylesheet could not be loaded
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),
}

impl From<Vec<ParseError>> for Error {
    fn from(errors: Vec<ParseError>) -> Self {
        Error::Parse(errors)
    }
}

impl Error {
    /// Format the error against the script it came from
    ///
    /// Parse and script errors get an annotated source excerpt; everything
    /// else falls back to the plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            Error::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join(""),
            Error::Script(err) => err.format(source, filename),
            other => other.to_string(),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a value into an HTML fragment
pub fn render_to_string<T: Render + ?Sized>(value: &T) -> String {
    renderer::render_html(&value.renderable())
}

/// Print an expression as a `source text = value` row
///
/// Works on anything with a `print_labeled` method, i.e. an [`OutputSink`]
/// or a [`Section`].
///
/// ```rust
/// use pretty_render::{print_expr, OutputSink, SharedBuffer};
///
/// let buffer = SharedBuffer::default();
/// let sink = OutputSink::new(buffer.clone());
/// print_expr!(sink, 4 * 5).unwrap();
/// assert_eq!(
///     buffer.contents(),
///     r#"<table class="single_row"><tr><td>4 * 5</td><td>=</td><td>20</td></tr></table>"#
/// );
/// ```
#[macro_export]
macro_rules! print_expr {
    ($sink:expr, $value:expr) => {
        $sink.print_labeled(stringify!($value), &$value)
    };
}
