//! Prose around rendered values: headings, paragraphs and boxes

use std::borrow::Cow;

use crate::encode::escape_into;

/// Opening tag of a boxed group
pub const BOX_OPEN: &str = r#"<div class="box">"#;
/// Closing tag of a boxed group
pub const BOX_CLOSE: &str = "</div>";

/// An inline run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    Text(Cow<'a, str>),
    Emph(Cow<'a, str>),
    Link {
        href: Cow<'a, str>,
        caption: Cow<'a, str>,
    },
    Code(Cow<'a, str>),
    Samp(Cow<'a, str>),
}

impl<'a> Inline<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Inline::Text(text.into())
    }

    pub fn emph(text: impl Into<Cow<'a, str>>) -> Self {
        Inline::Emph(text.into())
    }

    pub fn link(href: impl Into<Cow<'a, str>>, caption: impl Into<Cow<'a, str>>) -> Self {
        Inline::Link {
            href: href.into(),
            caption: caption.into(),
        }
    }

    pub fn code(text: impl Into<Cow<'a, str>>) -> Self {
        Inline::Code(text.into())
    }

    pub fn samp(text: impl Into<Cow<'a, str>>) -> Self {
        Inline::Samp(text.into())
    }
}

impl<'a> From<&'a str> for Inline<'a> {
    fn from(text: &'a str) -> Self {
        Inline::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Inline<'_> {
    fn from(text: String) -> Self {
        Inline::Text(Cow::Owned(text))
    }
}

/// Block-level containers for inline content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Paragraph,
    Section,
    Subsection,
    Subsubsection,
}

impl Block {
    fn tag(self) -> &'static str {
        match self {
            Block::Paragraph => "p",
            Block::Section => "h3",
            Block::Subsection => "h4",
            Block::Subsubsection => "h5",
        }
    }
}

/// Append one inline element
pub fn inline_into(out: &mut String, inline: &Inline<'_>) {
    match inline {
        Inline::Text(text) => escape_into(out, text),
        Inline::Emph(text) => wrap(out, "em", text),
        Inline::Link { href, caption } => {
            out.push_str(r#"<a target="_blank" href=""#);
            escape_into(out, href);
            out.push_str(r#"">"#);
            escape_into(out, caption);
            out.push_str("</a>");
        }
        Inline::Code(text) => wrap(out, "code", text),
        Inline::Samp(text) => wrap(out, "samp", text),
    }
}

/// Append `content` wrapped in the element for `block`
pub fn block_into(out: &mut String, block: Block, content: &[Inline<'_>]) {
    let tag = block.tag();
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for inline in content {
        inline_into(out, inline);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn wrap(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    escape_into(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
