//! Plot geometry engine
//!
//! Turns one or more series of 2-D points into everything needed to draw
//! them: axis ranges, a uniform scale, tick positions and the
//! data-to-screen transform. Drawing itself lives in
//! [`crate::renderer::svg`].

pub mod error;
pub mod geometry;
pub mod series;

pub use error::{Axis, PlotError};
pub use geometry::{
    compute_range, compute_tick_pitch, AxisRange, PlotGeometry, TickSteps, MAX_TICK_BASE,
    MIN_TICK_BASE,
};
pub use series::{Coordinate, PlotPoint, PlotSeries};

/// Per-figure parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PlotParams {
    /// Explicit x range; inferred from the data when `None`
    pub x_range: Option<AxisRange>,

    /// Explicit y range; inferred from the data when `None`
    pub y_range: Option<AxisRange>,

    /// Logarithm base used to pick the x tick pitch
    pub x_tick_base: u32,

    /// Logarithm base used to pick the y tick pitch
    pub y_tick_base: u32,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            x_range: None,
            y_range: None,
            x_tick_base: 5,
            y_tick_base: 5,
        }
    }
}

impl PlotParams {
    /// Create parameters with inferred ranges and base 5 ticks
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the x range
    pub fn with_x_range(mut self, range: AxisRange) -> Self {
        self.x_range = Some(range);
        self
    }

    /// Fix the y range
    pub fn with_y_range(mut self, range: AxisRange) -> Self {
        self.y_range = Some(range);
        self
    }

    /// Set the x tick base
    pub fn with_x_tick_base(mut self, base: u32) -> Self {
        self.x_tick_base = base;
        self
    }

    /// Set the y tick base
    pub fn with_y_tick_base(mut self, base: u32) -> Self {
        self.y_tick_base = base;
        self
    }
}
