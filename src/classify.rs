//! Shape classification and the table-vs-list heuristics

use crate::value::{RenderableValue, RowHint, Sequence};

/// The structural capability a value exhibits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Optional,
    Sum,
    Pair,
    Tuple,
    Sequence,
    Scalar,
}

/// How a group of members is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One `<tr>` per member
    Table,
    /// One `<li>` per member
    List,
}

/// Classify a value by its tag
///
/// Bytes and pointers are atomic and classify as [`Shape::Scalar`]; the
/// primitive encoder picks their markers.
pub fn classify(value: &RenderableValue<'_>) -> Shape {
    match value {
        RenderableValue::Optional(_) => Shape::Optional,
        RenderableValue::Sum(_) => Shape::Sum,
        RenderableValue::Pair(..) => Shape::Pair,
        RenderableValue::Tuple(_) => Shape::Tuple,
        RenderableValue::Sequence(_) => Shape::Sequence,
        RenderableValue::Scalar(_) | RenderableValue::Byte(_) | RenderableValue::Pointer(_) => {
            Shape::Scalar
        }
    }
}

/// Number of cells `value` produces when emitted as a table row
///
/// Only sequences, pairs and tuples can be rows. A sum is resolved to its
/// active alternative first.
pub fn row_width(value: &RenderableValue<'_>) -> Option<usize> {
    match value {
        RenderableValue::Sequence(seq) => Some(seq.items.len()),
        RenderableValue::Pair(..) => Some(2),
        RenderableValue::Tuple(members) => Some(members.len()),
        RenderableValue::Sum(active) => row_width(active),
        _ => None,
    }
}

/// Layout for the members of a pair or tuple
///
/// A table is chosen only when every member is row-capable and all members
/// have the same width.
pub fn members_layout<'v, 'a: 'v>(
    members: impl IntoIterator<Item = &'v RenderableValue<'a>>,
) -> Layout {
    let mut width = None;
    for member in members {
        match (row_width(member), width) {
            (None, _) => return Layout::List,
            (Some(w), None) => width = Some(w),
            (Some(w), Some(first)) if w != first => return Layout::List,
            _ => {}
        }
    }
    if width.is_some() {
        Layout::Table
    } else {
        Layout::List
    }
}

/// Layout for the elements of a sequence
///
/// Widths are compared between adjacent elements and the scan stops at the
/// first mismatch. An element that turns out not to be row-capable also
/// falls back to the list.
pub fn sequence_layout(seq: &Sequence<'_>) -> Layout {
    match seq.hint {
        RowHint::None => Layout::List,
        RowHint::Fixed(_) => Layout::Table,
        RowHint::Measured => {
            let uniform = seq.items.iter().try_fold(None, |previous, item| {
                match (row_width(item)?, previous) {
                    (width, Some(first)) if width != first => None,
                    (width, _) => Some(Some(width)),
                }
            });
            if uniform.is_some() {
                Layout::Table
            } else {
                Layout::List
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Render;

    #[test]
    fn test_classify_each_tag() {
        let number = 42;
        let text = "pi";
        let pair = (text, number);
        let triple = (1, 2, 3);
        let list = vec![1, 2];
        let maybe: Option<i32> = None;
        let either: Result<i32, i32> = Err(1);

        assert_eq!(classify(&number.renderable()), Shape::Scalar);
        assert_eq!(classify(&text.renderable()), Shape::Scalar);
        assert_eq!(classify(&pair.renderable()), Shape::Pair);
        assert_eq!(classify(&triple.renderable()), Shape::Tuple);
        assert_eq!(classify(&list.renderable()), Shape::Sequence);
        assert_eq!(classify(&maybe.renderable()), Shape::Optional);
        assert_eq!(classify(&either.renderable()), Shape::Sum);
        assert_eq!(classify(&RenderableValue::Byte(1)), Shape::Scalar);
        assert_eq!(classify(&RenderableValue::Pointer(16)), Shape::Scalar);
    }

    #[test]
    fn test_row_width() {
        let row = vec![1, 2, 3];
        let pair = ("a", 1);
        assert_eq!(row_width(&row.renderable()), Some(3));
        assert_eq!(row_width(&pair.renderable()), Some(2));
        assert_eq!(row_width(&RenderableValue::text("abc")), None);
        assert_eq!(row_width(&RenderableValue::absent()), None);
        assert_eq!(
            row_width(&RenderableValue::sum(pair.renderable())),
            Some(2)
        );
    }

    #[test]
    fn test_members_layout() {
        let a = vec![1, 2];
        let b = vec![3, 4];
        let c = vec![5];
        let equal = [a.renderable(), b.renderable()];
        let unequal = [a.renderable(), c.renderable()];
        let scalars = [RenderableValue::text("pi"), RenderableValue::text("3")];

        assert_eq!(members_layout(&equal), Layout::Table);
        assert_eq!(members_layout(&unequal), Layout::List);
        assert_eq!(members_layout(&scalars), Layout::List);
        let nothing: [RenderableValue<'_>; 0] = [];
        assert_eq!(members_layout(&nothing), Layout::List);
    }

    #[test]
    fn test_sequence_layout_follows_hint() {
        let ragged = vec![vec![1, 2], vec![3, 4, 5]];
        let square = vec![vec![1, 2], vec![3, 4]];
        let fixed = vec![[1, 2], [3, 4]];
        let flat = vec![1, 2, 3];

        let layout = |value: RenderableValue<'_>| match value {
            RenderableValue::Sequence(seq) => sequence_layout(&seq),
            other => panic!("Expected sequence, got {:?}", other),
        };

        assert_eq!(layout(ragged.renderable()), Layout::List);
        assert_eq!(layout(square.renderable()), Layout::Table);
        assert_eq!(layout(fixed.renderable()), Layout::Table);
        assert_eq!(layout(flat.renderable()), Layout::List);
    }

    #[test]
    fn test_measured_scan_stops_at_first_mismatch() {
        let (a, b, c) = (vec![1, 2], vec![3], vec![4, 5]);
        let seq = Sequence {
            items: vec![a.renderable(), b.renderable(), c.renderable()],
            hint: RowHint::Measured,
        };
        assert_eq!(sequence_layout(&seq), Layout::List);

        let mixed = Sequence {
            items: vec![a.renderable(), RenderableValue::text("x")],
            hint: RowHint::Measured,
        };
        assert_eq!(sequence_layout(&mixed), Layout::List);

        let pair = ("p", 1);
        let square = Sequence {
            items: vec![a.renderable(), c.renderable(), pair.renderable()],
            hint: RowHint::Measured,
        };
        assert_eq!(sequence_layout(&square), Layout::Table);
    }

    #[test]
    fn test_empty_measured_sequence_is_table_shell() {
        let empty: Vec<Vec<i32>> = vec![];
        match empty.renderable() {
            RenderableValue::Sequence(seq) => assert_eq!(sequence_layout(&seq), Layout::Table),
            other => panic!("Expected sequence, got {:?}", other),
        }
    }
}
