//! Map composition and styling.

pub mod composer;
pub mod style;

pub use composer::{export, render_map, BaseLayers, LegendEntry};
pub use style::Color;
