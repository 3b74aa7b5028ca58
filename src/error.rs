//! Error types for parsing and running preview scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::plot::PlotError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                report(
                    source,
                    filename,
                    span,
                    message,
                    &format!("{}{}", message, expected_str),
                )
            }
        }
    }
}

/// Failures while executing a parsed script
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("plot series must be a list of points")]
    InvalidSeries { span: Span },

    #[error("plot point must be a pair of numbers")]
    InvalidPoint { span: Span },

    #[error("unknown plot option '{key}'")]
    UnknownOption { span: Span, key: String },

    #[error("plot option '{key}' must be an integer between 2 and 36")]
    InvalidTickBase { span: Span, key: String },

    #[error("{source}")]
    Plot {
        span: Span,
        #[source]
        source: PlotError,
    },
}

impl ScriptError {
    pub fn span(&self) -> &Span {
        match self {
            ScriptError::InvalidSeries { span }
            | ScriptError::InvalidPoint { span }
            | ScriptError::UnknownOption { span, .. }
            | ScriptError::InvalidTickBase { span, .. }
            | ScriptError::Plot { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        report(source, filename, self.span(), &self.to_string(), &self.label())
    }

    /// Label text; plot failures point at the options of the offending axis
    fn label(&self) -> String {
        let message = self.to_string();
        match self {
            ScriptError::Plot { source, .. } => match source.axis() {
                Some(axis) => format!(
                    "{message}; check the {axis} coordinates or the {axis}_min and {axis}_max options"
                ),
                None => message,
            },
            _ => message,
        }
    }
}

fn report(source: &str, filename: &str, span: &Span, message: &str, label: &str) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);
    if written.is_err() {
        return format!("{filename}: {message}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                if found.as_deref().is_some_and(is_keyword) {
                    format!("Unexpected {} - it is reserved", found_str)
                } else {
                    format!("Unexpected {}", found_str)
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn is_keyword(tok: &crate::parser::lexer::Token) -> bool {
    use crate::parser::lexer::Token;
    matches!(
        tok,
        Token::Print
            | Token::Let
            | Token::Plot
            | Token::Box
            | Token::Section
            | Token::Subsection
            | Token::Subsubsection
            | Token::Paragraph
            | Token::Emph
            | Token::Code
            | Token::Samp
            | Token::Link
            | Token::None
            | Token::Some
            | Token::True
            | Token::False
    )
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Char(c) => format!("char {:?}", c),
        Token::Int(n) => format!("number {}", n),
        Token::Float(x) => format!("number {}", x),
        Token::Byte(b) => format!("byte 0x{:02x}", b),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Equals => "'='".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Print => "keyword 'print'".to_string(),
        Token::Let => "keyword 'let'".to_string(),
        Token::Plot => "keyword 'plot'".to_string(),
        Token::Box => "keyword 'box'".to_string(),
        Token::Section => "keyword 'section'".to_string(),
        Token::Subsection => "keyword 'subsection'".to_string(),
        Token::Subsubsection => "keyword 'subsubsection'".to_string(),
        Token::Paragraph => "keyword 'paragraph'".to_string(),
        Token::None => "keyword 'none'".to_string(),
        Token::Some => "keyword 'some'".to_string(),
        Token::True => "keyword 'true'".to_string(),
        Token::False => "keyword 'false'".to_string(),
        // Other
        _ => format!("{:?}", tok),
    }
}
