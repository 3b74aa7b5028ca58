//! Configuration for plot rendering

use crate::plot::geometry::TARGET_SIZE;

/// Configuration options for SVG plot output
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Side length of the longer axis in SVG user units
    pub target_size: f64,

    /// Font size of tick labels; also sizes the label margins
    pub text_height: f64,

    /// Radius of the point markers
    pub marker_radius: f64,

    /// Whether to put each element on its own line
    pub pretty_print: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            target_size: TARGET_SIZE,
            text_height: 16.0,
            marker_radius: 2.0,
            pretty_print: true,
        }
    }
}

impl PlotConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target size of the longer axis
    pub fn with_target_size(mut self, size: f64) -> Self {
        self.target_size = size;
        self
    }

    /// Set the tick label height
    pub fn with_text_height(mut self, height: f64) -> Self {
        self.text_height = height;
        self
    }

    /// Set the marker radius
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}
