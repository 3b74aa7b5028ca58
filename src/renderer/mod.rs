//! Markup generation
//!
//! [`html`] turns renderable values into HTML fragments, [`svg`] turns plot
//! series into SVG figures. Both produce owned strings; writing them out is
//! the job of [`crate::sink`].

pub mod config;
pub mod html;
pub mod svg;

pub use config::PlotConfig;
pub use html::{labeled_into, render_html, render_into, EMPTY_PLACEHOLDER};
pub use svg::render_plot;
