//! Primitive encoding of atomic values into markup-safe text
//!
//! Every leaf of a rendered value ends up here. Numbers are first turned into
//! their decimal text and then go through the same character escaping as
//! strings, so there is no separate "trusted" path for numeric output.

use std::fmt::Write;

/// Append `ch` to `out`, escaping the four markup-significant characters
pub fn escape_char_into(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        other => out.push(other),
    }
}

/// Append `text` to `out` one character at a time through [`escape_char_into`]
pub fn escape_into(out: &mut String, text: &str) {
    out.reserve(text.len());
    for ch in text.chars() {
        escape_char_into(out, ch);
    }
}

/// Escape `text` into a new string
///
/// ```rust
/// use pretty_render::encode::escape;
///
/// assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

/// Shortest round-trip decimal text for a double
///
/// Values with a magnitude outside `[1e-5, 1e16)` switch to exponent form so
/// that physical constants stay readable.
pub fn format_f64(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Shortest round-trip decimal text for a single precision float
pub fn format_f32(value: f32) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Append a double as escaped decimal text
pub fn write_f64(out: &mut String, value: f64) {
    escape_into(out, &format_f64(value));
}

/// Append a single precision float as escaped decimal text
pub fn write_f32(out: &mut String, value: f32) {
    escape_into(out, &format_f32(value));
}

/// Append a signed integer as escaped decimal text
pub fn write_signed(out: &mut String, value: i128) {
    escape_into(out, &value.to_string());
}

/// Append an unsigned integer as escaped decimal text
pub fn write_unsigned(out: &mut String, value: u128) {
    escape_into(out, &value.to_string());
}

/// Append a raw byte as `<code class="byte">xx</code>`
pub fn write_byte(out: &mut String, value: u8) {
    // Writing into a String cannot fail
    let _ = write!(out, "<code class=\"byte\">{value:02x}</code>");
}

/// Append an address as `<code class="pointer">0x…</code>`
///
/// The address is shown as a bit pattern only; nothing is ever read through it.
pub fn write_pointer(out: &mut String, address: usize) {
    let _ = write!(out, "<code class=\"pointer\">{address:#x}</code>");
}
