//! Abstract Syntax Tree types for preview scripts

use crate::annotations::Block;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete script
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub statements: Vec<Spanned<Statement>>,
}

/// One statement of a script
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `print <expr>`
    Print(Spanned<Expr>),
    /// `let name = <expr>`
    Let {
        name: Spanned<Identifier>,
        value: Spanned<Expr>,
    },
    /// `paragraph …`, `section …`, `subsection …`, `subsubsection …`
    Annotation {
        block: Block,
        content: Vec<Spanned<InlineExpr>>,
    },
    /// `box { … }`
    Box(Vec<Spanned<Statement>>),
    /// `plot <series>, … [options]`
    Plot(PlotDecl),
}

/// An inline element of an annotation
#[derive(Debug, Clone, PartialEq)]
pub enum InlineExpr {
    Text(String),
    Emph(String),
    Code(String),
    Samp(String),
    Link { href: String, caption: String },
}

/// A value expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i128),
    Float(f64),
    Str(String),
    Char(char),
    Bool(bool),
    Byte(u8),
    None,
    Some(Box<Spanned<Expr>>),
    List(Vec<Spanned<Expr>>),
    /// Two or more members
    Tuple(Vec<Spanned<Expr>>),
}

impl Expr {
    /// Numeric value of a literal, if it is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Int(n) => Some(*n as f64),
            Expr::Float(x) => Some(*x),
            _ => None,
        }
    }
}

/// Plot statement
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDecl {
    pub series: Vec<Spanned<Expr>>,
    pub options: Vec<Spanned<PlotOption>>,
}

/// A `key: number` entry of a plot option block
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOption {
    pub key: Spanned<Identifier>,
    pub value: Spanned<f64>,
}
