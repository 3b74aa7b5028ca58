//! Plot input data: coordinates, points and series

/// A numeric type usable as a plot coordinate
pub trait Coordinate: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! coordinate {
    ($($ty:ty),*) => {
        $(
            impl Coordinate for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

coordinate!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Anything with an x and a y coordinate
pub trait PlotPoint {
    fn coords(&self) -> (f64, f64);
}

impl<X: Coordinate, Y: Coordinate> PlotPoint for (X, Y) {
    fn coords(&self) -> (f64, f64) {
        (self.0.to_f64(), self.1.to_f64())
    }
}

impl<T: Coordinate> PlotPoint for [T; 2] {
    fn coords(&self) -> (f64, f64) {
        (self[0].to_f64(), self[1].to_f64())
    }
}

impl<P: PlotPoint + ?Sized> PlotPoint for &P {
    fn coords(&self) -> (f64, f64) {
        (**self).coords()
    }
}

/// One curve of a figure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSeries {
    points: Vec<(f64, f64)>,
}

impl PlotSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the points of a curve
    ///
    /// ```rust
    /// use pretty_render::PlotSeries;
    ///
    /// let series = PlotSeries::from_points([(0, 0.0), (1, 0.5), (2, 2.0)]);
    /// assert_eq!(series.len(), 3);
    /// ```
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: PlotPoint,
    {
        Self {
            points: points.into_iter().map(|p| p.coords()).collect(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<P: PlotPoint> FromIterator<P> for PlotSeries {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_coordinate_types() {
        let series = PlotSeries::from_points([(1_u8, 2.5_f32), (3, -1.0)]);
        assert_eq!(series.points(), &[(1.0, 2.5), (3.0, -1.0)]);
    }

    #[test]
    fn test_array_points() {
        let series: PlotSeries = [[0, 1], [2, 3]].into_iter().collect();
        assert_eq!(series.points(), &[(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_push() {
        let mut series = PlotSeries::new();
        assert!(series.is_empty());
        series.push(1.0, 2.0);
        assert_eq!(series.len(), 1);
    }
}
