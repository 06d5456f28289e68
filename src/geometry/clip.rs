//! Region clipping: cut a merged coastline into per-region line strokes.
//!
//! This is the core of the renderer. Given a geometry, a longitude band, a
//! latitude band, and a region's color/label, it produces zero or more
//! [`Stroke`]s for the composer to draw. Two strategies are supported and
//! deliberately kept separate:
//!
//! - [`ClipStrategy::MaskFilter`] reproduces the point-mask approach: each
//!   line part keeps only the points whose longitude falls inside the band,
//!   drawn as one connected stroke. When the mask is discontinuous the
//!   surviving points are still joined into a single stroke, which produces
//!   a visible shortcut across the gap. That shortcut is this strategy's
//!   defined behavior, not a defect to repair here.
//! - [`ClipStrategy::TrueClip`] computes the exact geometric intersection
//!   with the rectangular window (longitude and latitude bounded), splitting
//!   a line into multiple disjoint strokes wherever the window removes
//!   interior portions.
//!
//! An empty intersection yields no strokes and no error.

use std::str::FromStr;

use geo::BooleanOps;
use geo_types::{Geometry, LineString, MultiLineString, Rect};

use crate::error::{LittoralError, Result};
use crate::geometry::BoundingBox;
use crate::render::style::Color;

/// The rectangular clip window for one region: its longitude band combined
/// with the map-wide latitude band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl ClipWindow {
    pub fn new(lon_range: (f64, f64), lat_range: (f64, f64)) -> Self {
        Self {
            lon_min: lon_range.0,
            lon_max: lon_range.1,
            lat_min: lat_range.0,
            lat_max: lat_range.1,
        }
    }

    pub fn to_rect(&self) -> Rect<f64> {
        BoundingBox::new(self.lon_min, self.lat_min, self.lon_max, self.lat_max).to_rect()
    }

    pub fn contains_lon(&self, lon: f64) -> bool {
        (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// A renderable polyline tagged with its region's color and legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub label: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// How region clipping is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipStrategy {
    /// Longitude point-mask, one stroke per line part, no splitting.
    MaskFilter,
    /// Exact rectangular intersection with stroke splitting.
    TrueClip,
}

impl ClipStrategy {
    /// Create a ClipStrategy from a string
    pub fn parse_strategy(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mask-filter" | "mask" => Ok(ClipStrategy::MaskFilter),
            "true-clip" | "clip" => Ok(ClipStrategy::TrueClip),
            _ => Err(LittoralError::InvalidParameter {
                param: "strategy".to_string(),
                message: format!(
                    "Unknown clip strategy: {}. Must be one of: mask-filter, true-clip",
                    s
                ),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipStrategy::MaskFilter => "mask-filter",
            ClipStrategy::TrueClip => "true-clip",
        }
    }
}

impl FromStr for ClipStrategy {
    type Err = LittoralError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ClipStrategy::parse_strategy(s)
    }
}

/// Clip a geometry to a region window and emit the region's strokes.
///
/// Non-line geometry (points, polygons) contributes nothing. Collections are
/// recursed into with the same window until only line primitives remain.
pub fn clip_segment(
    geometry: &Geometry<f64>,
    window: &ClipWindow,
    color: Color,
    label: &str,
    strategy: ClipStrategy,
) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    match strategy {
        ClipStrategy::MaskFilter => mask_filter(geometry, window, color, label, &mut strokes),
        ClipStrategy::TrueClip => true_clip(geometry, window, color, label, &mut strokes),
    }
    strokes
}

fn mask_filter(
    geometry: &Geometry<f64>,
    window: &ClipWindow,
    color: Color,
    label: &str,
    out: &mut Vec<Stroke>,
) {
    for_each_line(geometry, &mut |line| {
        let masked: Vec<(f64, f64)> = line
            .0
            .iter()
            .filter(|c| window.contains_lon(c.x))
            .map(|c| (c.x, c.y))
            .collect();
        // One stroke per line part; mask gaps are not split.
        if !masked.is_empty() {
            out.push(Stroke {
                label: label.to_string(),
                color,
                points: masked,
            });
        }
    });
}

fn true_clip(
    geometry: &Geometry<f64>,
    window: &ClipWindow,
    color: Color,
    label: &str,
    out: &mut Vec<Stroke>,
) {
    match geometry {
        Geometry::Line(line) => {
            let part = LineString::from(vec![line.start, line.end]);
            clip_lines(&MultiLineString(vec![part]), window, color, label, out);
        }
        Geometry::LineString(line) => {
            clip_lines(&MultiLineString(vec![line.clone()]), window, color, label, out);
        }
        Geometry::MultiLineString(lines) => {
            clip_lines(lines, window, color, label, out);
        }
        Geometry::GeometryCollection(collection) => {
            for inner in collection {
                true_clip(inner, window, color, label, out);
            }
        }
        // Points and areal geometry are not coastline strokes.
        _ => {}
    }
}

fn clip_lines(
    lines: &MultiLineString<f64>,
    window: &ClipWindow,
    color: Color,
    label: &str,
    out: &mut Vec<Stroke>,
) {
    let clipped = window.to_rect().to_polygon().clip(lines, false);
    for part in clipped {
        if part.0.len() >= 2 {
            out.push(Stroke {
                label: label.to_string(),
                color,
                points: part.0.iter().map(|c| (c.x, c.y)).collect(),
            });
        }
    }
}

/// Walk a geometry and invoke `f` on every line part it contains.
fn for_each_line<F: FnMut(&LineString<f64>)>(geometry: &Geometry<f64>, f: &mut F) {
    match geometry {
        Geometry::Line(line) => f(&LineString::from(vec![line.start, line.end])),
        Geometry::LineString(line) => f(line),
        Geometry::MultiLineString(lines) => {
            for line in &lines.0 {
                f(line);
            }
        }
        Geometry::GeometryCollection(collection) => {
            for inner in collection {
                for_each_line(inner, f);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{GeometryCollection, Point};

    const RED: Color = Color::rgb(255, 0, 0);

    fn window(lon: (f64, f64), lat: (f64, f64)) -> ClipWindow {
        ClipWindow::new(lon, lat)
    }

    fn line_geom(points: &[(f64, f64)]) -> Geometry<f64> {
        Geometry::LineString(LineString::from(points.to_vec()))
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(
            ClipStrategy::parse_strategy("mask-filter").unwrap(),
            ClipStrategy::MaskFilter
        );
        assert_eq!(
            ClipStrategy::parse_strategy("TRUE-CLIP").unwrap(),
            ClipStrategy::TrueClip
        );
        assert_eq!("clip".parse::<ClipStrategy>().unwrap(), ClipStrategy::TrueClip);
        assert!(ClipStrategy::parse_strategy("nearest").is_err());
    }

    #[test]
    fn test_mask_filter_contiguous_run() {
        // lons [-85, -84, -83, -82] with range [-84.5, -83]: only indices 1-2
        // pass the mask, drawn as a single stroke.
        let geom = line_geom(&[(-85.0, 25.0), (-84.0, 26.0), (-83.0, 27.0), (-82.0, 28.0)]);
        let strokes = clip_segment(
            &geom,
            &window((-84.5, -83.0), (23.0, 31.5)),
            RED,
            "Test",
            ClipStrategy::MaskFilter,
        );
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points, vec![(-84.0, 26.0), (-83.0, 27.0)]);
        assert_eq!(strokes[0].label, "Test");
    }

    #[test]
    fn test_mask_filter_keeps_gap_as_single_stroke() {
        // The middle point falls outside the band; the survivors are still
        // joined into one stroke (the documented shortcut).
        let geom = line_geom(&[(-84.0, 26.0), (-88.0, 26.5), (-83.0, 27.0)]);
        let strokes = clip_segment(
            &geom,
            &window((-85.0, -82.0), (23.0, 31.5)),
            RED,
            "Gap",
            ClipStrategy::MaskFilter,
        );
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points, vec![(-84.0, 26.0), (-83.0, 27.0)]);
    }

    #[test]
    fn test_mask_filter_ignores_latitude() {
        let geom = line_geom(&[(-84.0, 50.0), (-83.5, 55.0)]);
        let strokes = clip_segment(
            &geom,
            &window((-85.0, -83.0), (23.0, 31.5)),
            RED,
            "North",
            ClipStrategy::MaskFilter,
        );
        assert_eq!(strokes.len(), 1);
    }

    #[test]
    fn test_true_clip_cuts_at_boundary() {
        // Straight line (-85, 25) -> (-80, 30) clipped to lon [-85, -82]:
        // exactly one stroke, cut at x = -82 (where y = 28).
        let geom = line_geom(&[(-85.0, 25.0), (-80.0, 30.0)]);
        let strokes = clip_segment(
            &geom,
            &window((-85.0, -82.0), (23.0, 31.5)),
            RED,
            "Test",
            ClipStrategy::TrueClip,
        );
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].label, "Test");
        for &(lon, _) in &strokes[0].points {
            assert!((-85.0..=-82.0).contains(&lon), "lon {} out of band", lon);
        }
        // The clip must introduce the boundary crossing point (-82, 28).
        assert!(strokes[0]
            .points
            .iter()
            .any(|&(lon, lat)| (lon - -82.0).abs() < 1e-6 && (lat - 28.0).abs() < 1e-6));
        // ... and keep the interior endpoint (-85, 25).
        assert!(strokes[0]
            .points
            .iter()
            .any(|&(lon, lat)| (lon - -85.0).abs() < 1e-6 && (lat - 25.0).abs() < 1e-6));
    }

    #[test]
    fn test_true_clip_splits_interior_exit() {
        // The line leaves the latitude band in the middle, so the clip must
        // produce two disjoint strokes, not one with a shortcut.
        let geom = line_geom(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        let strokes = clip_segment(
            &geom,
            &window((0.0, 10.0), (-1.0, 1.0)),
            RED,
            "Split",
            ClipStrategy::TrueClip,
        );
        assert_eq!(strokes.len(), 2);
        for stroke in &strokes {
            for &(x, y) in &stroke.points {
                assert!((-1e-9..=10.0 + 1e-9).contains(&x));
                assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&y));
            }
        }
    }

    #[test]
    fn test_true_clip_containment() {
        let geom = line_geom(&[
            (-87.0, 24.5),
            (-85.0, 26.0),
            (-83.0, 29.0),
            (-81.0, 30.0),
            (-80.0, 30.8),
        ]);
        let win = window((-84.0, -81.5), (25.0, 29.5));
        let strokes = clip_segment(&geom, &win, RED, "Box", ClipStrategy::TrueClip);
        assert!(!strokes.is_empty());
        for stroke in &strokes {
            for &(lon, lat) in &stroke.points {
                assert!(lon >= win.lon_min - 1e-9 && lon <= win.lon_max + 1e-9);
                assert!(lat >= win.lat_min - 1e-9 && lat <= win.lat_max + 1e-9);
            }
        }
    }

    #[test]
    fn test_empty_intersection_yields_no_strokes() {
        let geom = line_geom(&[(-85.0, 25.0), (-84.0, 26.0)]);
        for strategy in [ClipStrategy::MaskFilter, ClipStrategy::TrueClip] {
            let strokes = clip_segment(
                &geom,
                &window((-60.0, -55.0), (23.0, 31.5)),
                RED,
                "Empty",
                strategy,
            );
            assert!(strokes.is_empty());
        }
    }

    #[test]
    fn test_collection_recursion() {
        let collection = Geometry::GeometryCollection(GeometryCollection(vec![
            line_geom(&[(-84.0, 26.0), (-83.0, 27.0)]),
            Geometry::Point(Point::new(-84.0, 26.0)),
            Geometry::GeometryCollection(GeometryCollection(vec![line_geom(&[
                (-83.5, 26.2),
                (-83.2, 26.4),
            ])])),
        ]));
        let strokes = clip_segment(
            &collection,
            &window((-85.0, -82.0), (23.0, 31.5)),
            RED,
            "Nested",
            ClipStrategy::TrueClip,
        );
        assert_eq!(strokes.len(), 2);
    }

    #[test]
    fn test_point_geometry_is_skipped() {
        let geom = Geometry::Point(Point::new(-84.0, 26.0));
        for strategy in [ClipStrategy::MaskFilter, ClipStrategy::TrueClip] {
            assert!(clip_segment(
                &geom,
                &window((-85.0, -82.0), (23.0, 31.5)),
                RED,
                "Point",
                strategy
            )
            .is_empty());
        }
    }
}
