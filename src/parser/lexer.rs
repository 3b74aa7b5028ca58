//! Lexer for preview scripts using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Statement keywords
    #[token("print")]
    Print,
    #[token("let")]
    Let,
    #[token("plot")]
    Plot,
    #[token("box")]
    Box,

    // Annotation keywords
    #[token("section")]
    Section,
    #[token("subsection")]
    Subsection,
    #[token("subsubsection")]
    Subsubsection,
    #[token("paragraph")]
    Paragraph,
    #[token("emph")]
    Emph,
    #[token("code")]
    Code,
    #[token("samp")]
    Samp,
    #[token("link")]
    Link,

    // Value keywords
    #[token("none")]
    None,
    #[token("some")]
    Some,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("-")]
    Minus,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1])
    })]
    String(String),

    #[regex(r"'([^'\\]|\\.)'", |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len()-1]).chars().next()
    })]
    Char(char),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i128>().ok())]
    Int(i128),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"0x[0-9a-fA-F]{2}", |lex| u8::from_str_radix(&lex.slice()[2..], 16).ok())]
    Byte(u8),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Resolve backslash escapes in a quoted literal
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
