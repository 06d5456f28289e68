//! The explicit rendering pipeline: load → merge → partition → render → export.
//!
//! Every stage takes its parameters from [`Config`]; there is no implicit
//! canvas or module-level state. A run is a single synchronous pass and any
//! data-loading failure propagates immediately.

use std::path::{Path, PathBuf};
use std::time::Instant;

use geo::BooleanOps;
use geo_types::{Geometry, MultiLineString};
use tracing::{info, warn};

use crate::config::Config;
use crate::data_loader::{self, CountyFilter};
use crate::error::Result;
use crate::geometry::clip::{clip_segment, ClipWindow, Stroke};
use crate::geometry::merge::{merge_fragments, point_count};
use crate::logging::{log_operation_end, log_operation_start, log_timed_operation};
use crate::render::{export, render_map, BaseLayers, LegendEntry};

/// What a pipeline run produced.
#[derive(Debug)]
pub struct RenderSummary {
    /// Regions that contributed at least one stroke
    pub regions_drawn: usize,
    /// Total strokes drawn across all regions
    pub stroke_count: usize,
    /// Which county filter matched, when a county layer was configured
    pub county_filter: Option<CountyFilter>,
    /// Path the image was written to
    pub output_path: PathBuf,
    /// Whether the image went to a temporary preview file instead of the
    /// configured output
    pub preview: bool,
}

impl RenderSummary {
    /// One-line completion message matching where the image went.
    pub fn completion_message(&self) -> String {
        if self.preview {
            format!("Preview opened at {}", self.output_path.display())
        } else {
            format!("Map written to {}", self.output_path.display())
        }
    }
}

/// Run the full pipeline and export the map.
pub fn run(config: &Config, coastline_path: &Path) -> Result<RenderSummary> {
    let start = Instant::now();
    log_operation_start(
        "render_pipeline",
        Some(&coastline_path.display().to_string()),
    );

    let strategy = config.clip_strategy()?;
    info!(strategy = strategy.as_str(), "Using clip strategy");
    let bbox = config.map.bbox;

    // Load the coastline and cut everything down to the map extent before
    // merging, so fragment stitching never sees off-map geometry.
    let fragments = data_loader::load_lines(coastline_path, &bbox)?;
    if fragments.is_empty() {
        warn!("No coastline geometry intersects the map extent");
    }
    let extent = bbox.to_rect().to_polygon();
    let clipped: Vec<MultiLineString<f64>> = fragments
        .iter()
        .map(|fragment| extent.clip(fragment, false))
        .filter(|fragment| !fragment.0.is_empty())
        .collect();

    let coastline = log_timed_operation("merge_fragments", || merge_fragments(&clipped));
    info!(
        parts = coastline.0.len(),
        points = point_count(&coastline),
        "Coastline merged"
    );

    // Partition the merged coastline into per-region strokes.
    let geometry = Geometry::MultiLineString(coastline);
    let mut strokes: Vec<Stroke> = Vec::new();
    let mut regions_drawn = 0usize;
    for region in &config.regions {
        let window = ClipWindow::new(region.lon_range, config.map.clip_lat_band);
        let region_strokes = clip_segment(&geometry, &window, region.color, &region.name, strategy);
        if region_strokes.is_empty() {
            // The region is skipped on the map but keeps its legend entry.
            info!(region = %region.name, "Region has no coastline in its longitude band");
        } else {
            regions_drawn += 1;
        }
        strokes.extend(region_strokes);
    }

    // Optional base layers.
    let mut base = BaseLayers::default();
    if let Some(path) = &config.data.land {
        base.land = data_loader::load_polygons(path, &bbox)?;
    }
    if let Some(path) = &config.data.lakes {
        base.lakes = data_loader::load_polygons(path, &bbox)?;
    }
    if let Some(path) = &config.data.borders {
        base.borders = data_loader::load_lines(path, &bbox)?;
    }
    let mut county_filter: Option<CountyFilter> = None;
    if let Some(path) = &config.data.counties {
        let selection = data_loader::load_counties(
            path,
            &bbox,
            &config.data.county_region_code,
            &config.data.county_iso_code,
        )?;
        if let Some(filter) = selection.matched {
            info!(filter = %filter, outlines = selection.outlines.len(), "County selection matched");
        }
        county_filter = selection.matched;
        base.counties = selection.outlines;
    }

    // Legend order is region order, independent of clip results.
    let legend: Vec<LegendEntry> = config
        .regions
        .iter()
        .map(|region| LegendEntry {
            name: region.name.clone(),
            color: region.color,
        })
        .collect();

    let image = render_map(config, &base, &strokes, &legend)?;
    let output_path = export(&image, &config.output)?;

    log_operation_end("render_pipeline", start, true);
    Ok(RenderSummary {
        regions_drawn,
        stroke_count: strokes.len(),
        county_filter,
        output_path,
        preview: config.output.preview,
    })
}

/// Clip the merged coastline for every configured region without rendering.
///
/// This is the partition step on its own, useful for inspecting what each
/// region would draw.
pub fn partition_strokes(config: &Config, coastline: &MultiLineString<f64>) -> Result<Vec<Stroke>> {
    let strategy = config.clip_strategy()?;
    let geometry = Geometry::MultiLineString(coastline.clone());
    let mut strokes = Vec::new();
    for region in &config.regions {
        let window = ClipWindow::new(region.lon_range, config.map.clip_lat_band);
        strokes.extend(clip_segment(
            &geometry,
            &window,
            region.color,
            &region.name,
            strategy,
        ));
    }
    Ok(strokes)
}
