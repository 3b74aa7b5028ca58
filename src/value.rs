//! The renderable value model
//!
//! A [`RenderableValue`] is a transient, tagged view of some program value.
//! Rust types opt in through the [`Render`] trait, which states the shape of a
//! type and, for sequence elements, whether its width is known statically.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// An atomic value emitted through the primitive encoder
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Text(Cow<'a, str>),
    Char(char),
    Bool(bool),
    Signed(i128),
    Unsigned(u128),
    Float(f64),
    Float32(f32),
}

/// How the width of a sequence's elements is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHint {
    /// Elements cannot be rendered as table rows
    None,
    /// Elements are row-capable, but their widths are only known at runtime
    Measured,
    /// Every element has this width by construction
    Fixed(usize),
}

/// Elements of a sequence together with how their widths are known
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<'a> {
    pub items: Vec<RenderableValue<'a>>,
    pub hint: RowHint,
}

/// A tagged view of a value, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableValue<'a> {
    Scalar(Scalar<'a>),
    Byte(u8),
    Pointer(usize),
    Optional(Option<Box<RenderableValue<'a>>>),
    Sum(Box<RenderableValue<'a>>),
    Pair(Box<RenderableValue<'a>>, Box<RenderableValue<'a>>),
    Tuple(Vec<RenderableValue<'a>>),
    Sequence(Sequence<'a>),
}

impl<'a> RenderableValue<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }

    pub fn absent() -> Self {
        Self::Optional(None)
    }

    pub fn present(value: RenderableValue<'a>) -> Self {
        Self::Optional(Some(Box::new(value)))
    }

    pub fn sum(active: RenderableValue<'a>) -> Self {
        Self::Sum(Box::new(active))
    }

    pub fn pair(first: RenderableValue<'a>, second: RenderableValue<'a>) -> Self {
        Self::Pair(Box::new(first), Box::new(second))
    }

    /// Build a fixed-arity group of members
    ///
    /// Exactly two members always form a [`RenderableValue::Pair`].
    pub fn tuple(members: Vec<RenderableValue<'a>>) -> Self {
        match <[RenderableValue<'a>; 2]>::try_from(members) {
            Ok([first, second]) => Self::pair(first, second),
            Err(members) => Self::Tuple(members),
        }
    }

    /// Build a sequence with an explicit element hint
    pub fn sequence(items: Vec<RenderableValue<'a>>, hint: RowHint) -> Self {
        Self::Sequence(Sequence { items, hint })
    }

    /// Build a sequence whose element hint is derived from the items
    ///
    /// Used for values assembled at runtime, where no element type exists to
    /// carry a static hint. An empty sequence has no row-capable elements.
    pub fn sequence_of(items: Vec<RenderableValue<'a>>) -> Self {
        let row_capable =
            !items.is_empty() && items.iter().all(|item| crate::classify::row_width(item).is_some());
        let hint = if row_capable {
            RowHint::Measured
        } else {
            RowHint::None
        };
        Self::sequence(items, hint)
    }
}

/// Types that can be turned into a [`RenderableValue`]
///
/// Implement this for your own types to make them printable. Enums usually map
/// their active variant through [`RenderableValue::sum`]:
///
/// ```rust
/// use pretty_render::{Render, RenderableValue, render_to_string};
///
/// enum Reading {
///     Celsius(f64),
///     Missing,
/// }
///
/// impl Render for Reading {
///     fn renderable(&self) -> RenderableValue<'_> {
///         match self {
///             Reading::Celsius(t) => RenderableValue::sum(t.renderable()),
///             Reading::Missing => RenderableValue::sum(RenderableValue::absent()),
///         }
///     }
/// }
///
/// assert_eq!(render_to_string(&Reading::Celsius(21.5)), "21.5");
/// ```
pub trait Render {
    /// How this type behaves as the element of a sequence
    const ROW_HINT: RowHint = RowHint::None;

    fn renderable(&self) -> RenderableValue<'_>;
}

impl<T: Render + ?Sized> Render for &T {
    const ROW_HINT: RowHint = T::ROW_HINT;

    fn renderable(&self) -> RenderableValue<'_> {
        (**self).renderable()
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    const ROW_HINT: RowHint = T::ROW_HINT;

    fn renderable(&self) -> RenderableValue<'_> {
        (**self).renderable()
    }
}

impl<'v> Render for RenderableValue<'v> {
    /// Widths are only known per value, so sequences of prebuilt values
    /// measure their rows
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        self.clone()
    }
}

impl Render for str {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::text(self)
    }
}

impl Render for String {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::text(self.as_str())
    }
}

impl Render for Cow<'_, str> {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::text(self.as_ref())
    }
}

impl Render for char {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Scalar(Scalar::Char(*self))
    }
}

impl Render for bool {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Scalar(Scalar::Bool(*self))
    }
}

impl Render for f64 {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Scalar(Scalar::Float(*self))
    }
}

impl Render for f32 {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Scalar(Scalar::Float32(*self))
    }
}

macro_rules! render_signed {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn renderable(&self) -> RenderableValue<'_> {
                    RenderableValue::Scalar(Scalar::Signed(*self as i128))
                }
            }
        )*
    };
}

macro_rules! render_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn renderable(&self) -> RenderableValue<'_> {
                    RenderableValue::Scalar(Scalar::Unsigned(*self as u128))
                }
            }
        )*
    };
}

render_signed!(i8, i16, i32, i64, i128, isize);
render_unsigned!(u8, u16, u32, u64, u128, usize);

/// A raw byte, rendered as two hex digits rather than as a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Byte(pub u8);

impl Render for Byte {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Byte(self.0)
    }
}

impl<T: ?Sized> Render for *const T {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Pointer(self.cast::<()>() as usize)
    }
}

impl<T: ?Sized> Render for *mut T {
    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::Pointer(self.cast::<()>() as usize)
    }
}

impl<T: Render> Render for Option<T> {
    fn renderable(&self) -> RenderableValue<'_> {
        match self {
            Some(value) => RenderableValue::present(value.renderable()),
            None => RenderableValue::absent(),
        }
    }
}

/// Element hint for a sum: row-capable only when every alternative is
const fn sum_hint(a: RowHint, b: RowHint) -> RowHint {
    match (a, b) {
        (RowHint::Fixed(x), RowHint::Fixed(y)) if x == y => RowHint::Fixed(x),
        (RowHint::None, _) | (_, RowHint::None) => RowHint::None,
        _ => RowHint::Measured,
    }
}

impl<T: Render, E: Render> Render for Result<T, E> {
    const ROW_HINT: RowHint = sum_hint(T::ROW_HINT, E::ROW_HINT);

    fn renderable(&self) -> RenderableValue<'_> {
        match self {
            Ok(value) => RenderableValue::sum(value.renderable()),
            Err(error) => RenderableValue::sum(error.renderable()),
        }
    }
}

impl<A: Render, B: Render> Render for (A, B) {
    const ROW_HINT: RowHint = RowHint::Fixed(2);

    fn renderable(&self) -> RenderableValue<'_> {
        RenderableValue::pair(self.0.renderable(), self.1.renderable())
    }
}

macro_rules! render_tuple {
    ($len:expr; $($name:ident : $idx:tt),+) => {
        impl<$($name: Render),+> Render for ($($name,)+) {
            const ROW_HINT: RowHint = RowHint::Fixed($len);

            fn renderable(&self) -> RenderableValue<'_> {
                RenderableValue::Tuple(vec![$(self.$idx.renderable()),+])
            }
        }
    };
}

render_tuple!(1; A: 0);
render_tuple!(3; A: 0, B: 1, C: 2);
render_tuple!(4; A: 0, B: 1, C: 2, D: 3);
render_tuple!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
render_tuple!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
render_tuple!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
render_tuple!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
render_tuple!(9; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
render_tuple!(10; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
render_tuple!(11; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
render_tuple!(12; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);
render_tuple!(13; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12);

fn sequence_from<'a, T: Render + 'a>(items: impl Iterator<Item = &'a T>) -> RenderableValue<'a> {
    RenderableValue::sequence(items.map(T::renderable).collect(), T::ROW_HINT)
}

impl<T: Render> Render for [T] {
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        sequence_from(self.iter())
    }
}

impl<T: Render, const N: usize> Render for [T; N] {
    const ROW_HINT: RowHint = RowHint::Fixed(N);

    fn renderable(&self) -> RenderableValue<'_> {
        sequence_from(self.iter())
    }
}

impl<T: Render> Render for Vec<T> {
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        sequence_from(self.iter())
    }
}

impl<T: Render> Render for VecDeque<T> {
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        sequence_from(self.iter())
    }
}

impl<T: Render> Render for BTreeSet<T> {
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        sequence_from(self.iter())
    }
}

/// A map is a sequence of key/value pairs, so it always renders as a table
impl<K: Render, V: Render> Render for BTreeMap<K, V> {
    const ROW_HINT: RowHint = RowHint::Measured;

    fn renderable(&self) -> RenderableValue<'_> {
        let items = self
            .iter()
            .map(|(key, value)| RenderableValue::pair(key.renderable(), value.renderable()))
            .collect();
        RenderableValue::sequence(items, RowHint::Fixed(2))
    }
}
