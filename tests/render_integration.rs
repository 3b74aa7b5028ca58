//! Integration tests for value rendering through the public API

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use pretty_assertions::assert_eq;
use pretty_render::{
    print_expr, render_to_string, Byte, OutputSink, Render, RenderableValue, RowHint,
    SharedBuffer,
};

/// A user type that renders as one of two alternatives
enum Reading {
    Celsius(f64),
    Missing,
}

impl Render for Reading {
    fn renderable(&self) -> RenderableValue<'_> {
        match self {
            Reading::Celsius(t) => RenderableValue::sum(t.renderable()),
            Reading::Missing => RenderableValue::sum(RenderableValue::absent()),
        }
    }
}

/// A user type with a statically known row width
struct Point3 {
    x: i32,
    y: i32,
    z: i32,
}

impl Render for Point3 {
    const ROW_HINT: RowHint = RowHint::Fixed(3);

    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::tuple(vec![
            self.x.renderable(),
            self.y.renderable(),
            self.z.renderable(),
        ])
    }
}

#[test]
fn test_scalar_values() {
    assert_eq!(render_to_string(&42), "42");
    assert_eq!(render_to_string(&'<'), "&lt;");
    assert_eq!(render_to_string(&-17_i64), "-17");
    assert_eq!(render_to_string(&u128::MAX), u128::MAX.to_string());
    assert_eq!(render_to_string(&false), "false");
}

#[test]
fn test_escaping_is_not_idempotent() {
    let once = render_to_string("a & b");
    assert_eq!(once, "a &amp; b");
    assert_eq!(render_to_string(once.as_str()), "a &amp;amp; b");
}

#[test]
fn test_plain_text_passes_through() {
    let text = "plain text, with 'quotes' and unicode: \u{3c0}";
    assert_eq!(render_to_string(text), text);
}

#[test]
fn test_floats() {
    insta::assert_snapshot!(render_to_string(&std::f64::consts::PI), @"3.141592653589793");
    insta::assert_snapshot!(render_to_string(&std::f32::consts::PI), @"3.1415927");
    insta::assert_snapshot!(render_to_string(&6.02214076e23), @"6.02214076e23");
    insta::assert_snapshot!(render_to_string(&0.5), @"0.5");
}

#[test]
fn test_pair_list() {
    insta::assert_snapshot!(
        render_to_string(&("pi", 3)),
        @r#"<ol start="0" class="tuple_content"><li>pi</li><li>3</li></ol>"#
    );
}

#[test]
fn test_flat_sequence() {
    insta::assert_snapshot!(
        render_to_string(&vec![1, 2, 3]),
        @r#"<ol start="0" class="range_content"><li>1</li><li>2</li><li>3</li></ol>"#
    );
}

#[test]
fn test_matrix_is_table() {
    assert_eq!(
        render_to_string(&vec![vec![1, 2, 3], vec![4, 5, 6]]),
        concat!(
            r#"<table class="range_content">"#,
            "<tr><td>1</td><td>2</td><td>3</td></tr>",
            "<tr><td>4</td><td>5</td><td>6</td></tr>",
            "</table>"
        )
    );
}

#[test]
fn test_ragged_matrix_is_nested_list() {
    assert_eq!(
        render_to_string(&vec![vec![1, 2], vec![3, 4, 5]]),
        concat!(
            r#"<ol start="0" class="range_content">"#,
            r#"<li><ol start="0" class="range_content"><li>1</li><li>2</li></ol></li>"#,
            r#"<li><ol start="0" class="range_content"><li>3</li><li>4</li><li>5</li></ol></li>"#,
            "</ol>"
        )
    );
}

#[test]
fn test_absent_optional() {
    insta::assert_snapshot!(
        render_to_string(&None::<i32>),
        @r#"<span class="empty">(no value)</span>"#
    );
}

#[test]
fn test_user_sum_type() {
    assert_eq!(render_to_string(&Reading::Celsius(21.5)), "21.5");
    assert_eq!(
        render_to_string(&Reading::Missing),
        r#"<span class="empty">(no value)</span>"#
    );
}

#[test]
fn test_user_fixed_width_rows() {
    let points = vec![Point3 { x: 1, y: 2, z: 3 }, Point3 { x: 4, y: 5, z: 6 }];
    assert_eq!(
        render_to_string(&points),
        concat!(
            r#"<table class="range_content">"#,
            "<tr><td>1</td><td>2</td><td>3</td></tr>",
            "<tr><td>4</td><td>5</td><td>6</td></tr>",
            "</table>"
        )
    );
}

#[test]
fn test_fixed_width_arrays() {
    let rows = [[1, 2], [3, 4], [5, 6]];
    assert_eq!(
        render_to_string(&rows),
        concat!(
            r#"<table class="range_content">"#,
            "<tr><td>1</td><td>2</td></tr>",
            "<tr><td>3</td><td>4</td></tr>",
            "<tr><td>5</td><td>6</td></tr>",
            "</table>"
        )
    );
}

#[test]
fn test_map_is_table_of_pairs() {
    let mut map = BTreeMap::new();
    map.insert("Key 1", 12);
    map.insert("Key 2", 45);
    assert_eq!(
        render_to_string(&map),
        concat!(
            r#"<table class="range_content">"#,
            "<tr><td>Key 1</td><td>12</td></tr>",
            "<tr><td>Key 2</td><td>45</td></tr>",
            "</table>"
        )
    );
}

#[test]
fn test_other_collections() {
    let set: BTreeSet<_> = [3, 1, 2].into_iter().collect();
    let deque: VecDeque<_> = [7, 8].into_iter().collect();
    assert_eq!(
        render_to_string(&set),
        r#"<ol start="0" class="range_content"><li>1</li><li>2</li><li>3</li></ol>"#
    );
    assert_eq!(
        render_to_string(&deque),
        r#"<ol start="0" class="range_content"><li>7</li><li>8</li></ol>"#
    );
}

#[test]
fn test_bytes_and_pointers() {
    let bytes = [Byte(0x00), Byte(0xab)];
    assert_eq!(
        render_to_string(&bytes),
        concat!(
            r#"<ol start="0" class="range_content">"#,
            r#"<li><code class="byte">00</code></li>"#,
            r#"<li><code class="byte">ab</code></li>"#,
            "</ol>"
        )
    );

    let value = 5;
    let pointer: *const i32 = &value;
    let html = render_to_string(&pointer);
    assert!(html.starts_with(r#"<code class="pointer">0x"#), "{}", html);
    assert!(html.ends_with("</code>"));
}

#[test]
fn test_empty_shells() {
    let empty: Vec<String> = vec![];
    assert_eq!(
        render_to_string(&empty),
        r#"<ol start="0" class="range_content"></ol>"#
    );
}

#[test]
fn test_print_expr_labels_with_source() {
    let buffer = SharedBuffer::default();
    let sink = OutputSink::new(buffer.clone());
    let values = vec![1.5, 2.5];
    print_expr!(sink, values.len() * 2).unwrap();
    assert_eq!(
        buffer.contents(),
        r#"<table class="single_row"><tr><td>values.len() * 2</td><td>=</td><td>4</td></tr></table>"#
    );
}
