//! Recursive HTML emission for renderable values

use crate::classify::{members_layout, sequence_layout, Layout};
use crate::encode;
use crate::value::{RenderableValue, Scalar, Sequence};

/// Markup emitted for an absent optional
pub const EMPTY_PLACEHOLDER: &str = r#"<span class="empty">(no value)</span>"#;

const RANGE_CLASS: &str = "range_content";
const TUPLE_CLASS: &str = "tuple_content";

/// Append the markup for `value` to `out`
pub fn render_into(out: &mut String, value: &RenderableValue<'_>) {
    match value {
        RenderableValue::Scalar(scalar) => write_scalar(out, scalar),
        RenderableValue::Byte(byte) => encode::write_byte(out, *byte),
        RenderableValue::Pointer(address) => encode::write_pointer(out, *address),
        RenderableValue::Optional(Some(inner)) => render_into(out, inner),
        RenderableValue::Optional(None) => out.push_str(EMPTY_PLACEHOLDER),
        RenderableValue::Sum(active) => render_into(out, active),
        RenderableValue::Pair(first, second) => {
            write_members(out, [first.as_ref(), second.as_ref()])
        }
        RenderableValue::Tuple(members) => write_members(out, members.iter()),
        RenderableValue::Sequence(seq) => write_sequence(out, seq),
    }
}

/// Render `value` into a fresh string
pub fn render_html(value: &RenderableValue<'_>) -> String {
    let mut out = String::new();
    render_into(&mut out, value);
    out
}

/// Append a single-row `label = value` table
pub fn labeled_into(out: &mut String, label: &str, value: &RenderableValue<'_>) {
    out.push_str(r#"<table class="single_row"><tr>"#);
    write_cell(out, |out| encode::escape_into(out, label));
    write_cell(out, |out| out.push('='));
    write_cell(out, |out| render_into(out, value));
    out.push_str("</tr></table>");
}

fn write_scalar(out: &mut String, scalar: &Scalar<'_>) {
    match scalar {
        Scalar::Text(text) => encode::escape_into(out, text),
        Scalar::Char(ch) => encode::escape_char_into(out, *ch),
        Scalar::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Scalar::Signed(n) => encode::write_signed(out, *n),
        Scalar::Unsigned(n) => encode::write_unsigned(out, *n),
        Scalar::Float(x) => encode::write_f64(out, *x),
        Scalar::Float32(x) => encode::write_f32(out, *x),
    }
}

fn write_members<'v, 'a: 'v, I>(out: &mut String, members: I)
where
    I: IntoIterator<Item = &'v RenderableValue<'a>>,
    I::IntoIter: Clone,
{
    let members = members.into_iter();
    match members_layout(members.clone()) {
        Layout::Table => write_table(out, TUPLE_CLASS, members),
        Layout::List => write_list(out, TUPLE_CLASS, members),
    }
}

fn write_sequence(out: &mut String, seq: &Sequence<'_>) {
    match sequence_layout(seq) {
        Layout::Table => write_table(out, RANGE_CLASS, seq.items.iter()),
        Layout::List => write_list(out, RANGE_CLASS, seq.items.iter()),
    }
}

fn write_list<'v, 'a: 'v>(
    out: &mut String,
    class: &str,
    items: impl Iterator<Item = &'v RenderableValue<'a>>,
) {
    out.push_str(r#"<ol start="0" class=""#);
    out.push_str(class);
    out.push_str(r#"">"#);
    for item in items {
        out.push_str("<li>");
        render_into(out, item);
        out.push_str("</li>");
    }
    out.push_str("</ol>");
}

fn write_table<'v, 'a: 'v>(
    out: &mut String,
    class: &str,
    rows: impl Iterator<Item = &'v RenderableValue<'a>>,
) {
    out.push_str(r#"<table class=""#);
    out.push_str(class);
    out.push_str(r#"">"#);
    for row in rows {
        write_row(out, row);
    }
    out.push_str("</table>");
}

/// Emit a row-capable value as `<tr>` with one `<td>` per member
///
/// Callers only pass values the layout heuristics accepted as rows; anything
/// else degrades to a single cell.
fn write_row(out: &mut String, row: &RenderableValue<'_>) {
    out.push_str("<tr>");
    match active_alternative(row) {
        RenderableValue::Sequence(seq) => {
            for item in &seq.items {
                write_cell(out, |out| render_into(out, item));
            }
        }
        RenderableValue::Pair(first, second) => {
            write_cell(out, |out| render_into(out, first));
            write_cell(out, |out| render_into(out, second));
        }
        RenderableValue::Tuple(members) => {
            for member in members {
                write_cell(out, |out| render_into(out, member));
            }
        }
        other => write_cell(out, |out| render_into(out, other)),
    }
    out.push_str("</tr>");
}

fn active_alternative<'v, 'a>(mut value: &'v RenderableValue<'a>) -> &'v RenderableValue<'a> {
    while let RenderableValue::Sum(active) = value {
        value = active;
    }
    value
}

fn write_cell(out: &mut String, body: impl FnOnce(&mut String)) {
    out.push_str("<td>");
    body(out);
    out.push_str("</td>");
}
