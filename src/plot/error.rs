//! Error types for the plot geometry engine

use thiserror::Error;

/// Which axis an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Precondition violations detected while computing plot geometry
#[derive(Debug, Error, PartialEq)]
pub enum PlotError {
    /// No series, or only empty series, were given
    #[error("cannot infer axis ranges: the plot contains no points")]
    EmptySeries,

    /// The axis range collapses to a single value
    #[error("degenerate {axis} range: min and max are both {value}")]
    DegenerateRange { axis: Axis, value: f64 },

    /// The axis extent is infinite or NaN
    #[error("{axis} range is not finite")]
    NonFiniteRange { axis: Axis },

    /// The lower bound lies above the upper bound
    #[error("inverted {axis} range: min {min} is greater than max {max}")]
    InvertedRange { axis: Axis, min: f64, max: f64 },

    /// Tick bases outside 2..=36 either have no meaningful logarithm or
    /// produce an unbounded number of ticks
    #[error("invalid {axis} tick base {base}: must be between 2 and 36")]
    InvalidTickBase { axis: Axis, base: u32 },
}

impl PlotError {
    /// Create a degenerate range error
    pub fn degenerate(axis: Axis, value: f64) -> Self {
        Self::DegenerateRange { axis, value }
    }

    /// The axis the error refers to, if any
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::EmptySeries => None,
            Self::DegenerateRange { axis, .. }
            | Self::NonFiniteRange { axis }
            | Self::InvertedRange { axis, .. }
            | Self::InvalidTickBase { axis, .. } => Some(*axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_display() {
        let err = PlotError::degenerate(Axis::Y, 3.0);
        assert_eq!(err.to_string(), "degenerate y range: min and max are both 3");
        assert_eq!(err.axis(), Some(Axis::Y));
    }

    #[test]
    fn test_empty_display() {
        assert!(PlotError::EmptySeries.to_string().contains("no points"));
        assert_eq!(PlotError::EmptySeries.axis(), None);
    }

    #[test]
    fn test_inverted_display() {
        let err = PlotError::InvertedRange {
            axis: Axis::X,
            min: 10.0,
            max: 4.0,
        };
        assert_eq!(
            err.to_string(),
            "inverted x range: min 10 is greater than max 4"
        );
        assert_eq!(err.axis(), Some(Axis::X));
    }
}
