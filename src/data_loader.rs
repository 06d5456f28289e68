//! Shapefile loading functionality.
//!
//! This module reads vector layers from shapefiles and converts them into
//! `geo` geometry for the rest of the pipeline. Loaded shapes are pre-filtered
//! to the caller's bounding box; a missing or unreadable file is a fatal error
//! that propagates, while an empty attribute-filter result degrades silently
//! to an empty selection.

use std::fmt;
use std::path::Path;

use geo::Intersects;
use geo_types::{LineString, MultiLineString, MultiPolygon};
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use tracing::{debug, warn};

use crate::error::{LittoralError, Result};
use crate::geometry::BoundingBox;
use crate::logging::log_layer_stats;

/// Which attribute filter matched when selecting county records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountyFilter {
    /// Matched on the `REGION` attribute
    RegionCode,
    /// Matched on the `ISO_3166_2` attribute
    IsoSubdivision,
}

impl fmt::Display for CountyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountyFilter::RegionCode => write!(f, "REGION"),
            CountyFilter::IsoSubdivision => write!(f, "ISO_3166_2"),
        }
    }
}

/// The outcome of the two-step county selection.
#[derive(Debug, Clone)]
pub struct CountySelection {
    /// County boundary outlines intersecting the bounding box
    pub outlines: Vec<LineString<f64>>,
    /// Which filter produced the selection, if any matched at all
    pub matched: Option<CountyFilter>,
}

/// Load line geometry from a polyline shapefile, keeping only the shapes
/// that intersect `bbox`.
pub fn load_lines(path: &Path, bbox: &BoundingBox) -> Result<Vec<MultiLineString<f64>>> {
    check_exists(path)?;

    let window = bbox.to_rect().to_polygon();
    let mut reader = shapefile::ShapeReader::from_path(path)?;

    let mut shape_count = 0usize;
    let mut lines = Vec::new();
    for shape in reader.iter_shapes() {
        shape_count += 1;
        match shape? {
            Shape::Polyline(polyline) => {
                let geometry = MultiLineString::<f64>::from(polyline);
                if geometry.intersects(&window) {
                    lines.push(geometry);
                }
            }
            other => {
                warn!("Skipping unsupported shape in line layer: {:?}", other.shapetype());
            }
        }
    }

    log_layer_stats(&path.display().to_string(), "lines", shape_count, lines.len());
    Ok(lines)
}

/// Load polygon geometry from a shapefile, keeping only the shapes that
/// intersect `bbox`. Used for land and lake base layers.
pub fn load_polygons(path: &Path, bbox: &BoundingBox) -> Result<Vec<MultiPolygon<f64>>> {
    check_exists(path)?;

    let window = bbox.to_rect().to_polygon();
    let mut reader = shapefile::ShapeReader::from_path(path)?;

    let mut shape_count = 0usize;
    let mut polygons = Vec::new();
    for shape in reader.iter_shapes() {
        shape_count += 1;
        match shape? {
            Shape::Polygon(polygon) => {
                let geometry = MultiPolygon::<f64>::from(polygon);
                if geometry.intersects(&window) {
                    polygons.push(geometry);
                }
            }
            other => {
                warn!(
                    "Skipping unsupported shape in polygon layer: {:?}",
                    other.shapetype()
                );
            }
        }
    }

    log_layer_stats(
        &path.display().to_string(),
        "polygons",
        shape_count,
        polygons.len(),
    );
    Ok(polygons)
}

/// Load county boundaries, selected by an explicit two-step attribute filter.
///
/// Records are first matched on `REGION == region_code`; if that yields
/// nothing, the selection is retried with `ISO_3166_2 == iso_code`. If both
/// steps come up empty the result is an empty selection with `matched: None`
/// and a warning, never an error.
pub fn load_counties(
    path: &Path,
    bbox: &BoundingBox,
    region_code: &str,
    iso_code: &str,
) -> Result<CountySelection> {
    check_exists(path)?;

    let window = bbox.to_rect().to_polygon();
    let mut reader = shapefile::Reader::from_path(path)?;

    let mut records: Vec<(Shape, shapefile::dbase::Record)> = Vec::new();
    for pair in reader.iter_shapes_and_records() {
        records.push(pair?);
    }
    let shape_count = records.len();

    let mut matched = Some(CountyFilter::RegionCode);
    let mut selected: Vec<&Shape> = records
        .iter()
        .filter(|(_, record)| field_equals(record, "REGION", region_code))
        .map(|(shape, _)| shape)
        .collect();

    if selected.is_empty() {
        debug!(
            region_code = region_code,
            iso_code = iso_code,
            "REGION filter matched nothing, retrying with ISO_3166_2"
        );
        matched = Some(CountyFilter::IsoSubdivision);
        selected = records
            .iter()
            .filter(|(_, record)| field_equals(record, "ISO_3166_2", iso_code))
            .map(|(shape, _)| shape)
            .collect();
    }

    if selected.is_empty() {
        warn!(
            file_path = %path.display(),
            region_code = region_code,
            iso_code = iso_code,
            "No county records matched either filter, continuing without a county overlay"
        );
        matched = None;
    }

    let mut outlines = Vec::new();
    for shape in selected {
        for outline in shape_outlines(shape) {
            if outline.intersects(&window) {
                outlines.push(outline);
            }
        }
    }

    log_layer_stats(
        &path.display().to_string(),
        "counties",
        shape_count,
        outlines.len(),
    );
    Ok(CountySelection { outlines, matched })
}

fn check_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(LittoralError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    Ok(())
}

/// Compare a character field against an expected code. dbase values are
/// space-padded, so comparison trims.
fn field_equals(record: &shapefile::dbase::Record, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(FieldValue::Character(Some(value))) => value.trim() == expected,
        _ => false,
    }
}

/// Extract drawable outlines from a county shape. Polygons contribute their
/// exterior and interior rings; polylines contribute their parts.
fn shape_outlines(shape: &Shape) -> Vec<LineString<f64>> {
    match shape {
        Shape::Polygon(polygon) => {
            let multi = MultiPolygon::<f64>::from(polygon.clone());
            let mut rings = Vec::new();
            for polygon in &multi {
                rings.push(polygon.exterior().clone());
                rings.extend(polygon.interiors().iter().cloned());
            }
            rings
        }
        Shape::Polyline(polyline) => MultiLineString::<f64>::from(polyline.clone()).0,
        _ => Vec::new(),
    }
}
