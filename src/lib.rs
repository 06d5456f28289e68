//! # littoral
//!
//! A configurable coastline region map renderer for public-domain shapefile
//! data.
//!
//! This library loads coastline (and optional administrative) geometry from
//! shapefiles, merges the fragments, partitions the coastline into named
//! longitude-bounded regions, and renders each region in its own color on a
//! plate carrée map with base layers, a legend, and a title.
//!
//! ## Key Features
//!
//! - **Everything is configuration**: map extent, regions, colors, layers,
//!   and output are named fields with documented defaults (the original
//!   Florida map), layered from defaults, a JSON file, and the CLI
//! - **Two clip strategies**: a fast longitude point-mask and an exact
//!   rectangular clip that splits strokes correctly
//! - **Single-pass pipeline**: load → merge → partition → render → export,
//!   with no global state
//!
//! ## Architecture
//!
//! - **Data Layer**: reads shapefile layers into `geo` geometry
//! - **Geometry**: fragment merging and region clipping
//! - **Render**: plotters-based composition and PNG export

pub mod config;
pub mod data_loader;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::{LittoralError, Result};
pub use geometry::clip::{ClipStrategy, ClipWindow, Stroke};
pub use geometry::merge::merge_fragments;
pub use geometry::{parse_bbox, BoundingBox};
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start};
pub use pipeline::{run, RenderSummary};
pub use render::{BaseLayers, Color, LegendEntry};
