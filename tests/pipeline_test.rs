//! Integration tests for the littoral pipeline.
//!
//! These tests run the pipeline end to end against synthetic shapefiles and
//! verify the clipping, partitioning, and export behavior.

mod common;

use common::{assertions, test_data};
use pretty_assertions::assert_eq;

use geo_types::{LineString, MultiLineString};
use littoral::config::{Config, RegionConfig};
use littoral::data_loader::CountyFilter;
use littoral::pipeline::{self, partition_strokes};
use littoral::Color;

/// Config with the output redirected into a temp dir and a small canvas.
fn test_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.map.width = 320;
    config.map.height = 280;
    config.output.file = dir.path().join("map.png");
    config
}

fn single_region(name: &str, color: &str, lon_range: (f64, f64)) -> Vec<RegionConfig> {
    vec![RegionConfig {
        name: name.to_string(),
        color: Color::parse(color).unwrap(),
        lon_range,
    }]
}

#[test]
fn test_end_to_end_synthetic_coastline() {
    let dir = tempfile::tempdir().unwrap();
    let coastline = dir.path().join("coastline.shp");
    // A single straight line from (-85, 25) to (-80, 30).
    test_data::create_coastline_shp(&coastline, &[vec![(-85.0, 25.0), (-80.0, 30.0)]]).unwrap();

    let mut config = test_config(&dir);
    config.regions = single_region("Test", "red", (-85.0, -82.0));
    config.strategy = "true-clip".to_string();
    config.validate().unwrap();

    let summary = pipeline::run(&config, &coastline).unwrap();
    // Exactly one stroke, produced by the one region.
    assert_eq!(summary.regions_drawn, 1);
    assert_eq!(summary.stroke_count, 1);
    assert!(summary.output_path.exists());
    assert!(!summary.preview);
    assert!(summary.completion_message().starts_with("Map written to "));

    let decoded = image::open(&summary.output_path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (320, 280));
}

#[test]
fn test_true_clip_stroke_is_bounded_and_labeled() {
    let coastline = MultiLineString(vec![LineString::from(vec![(-85.0, 25.0), (-80.0, 30.0)])]);

    let mut config = Config::default();
    config.regions = single_region("Test", "red", (-85.0, -82.0));
    let strokes = partition_strokes(&config, &coastline).unwrap();

    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].label, "Test");
    assertions::assert_points_within(
        &strokes[0].points,
        (-85.0, -82.0),
        config.map.clip_lat_band,
        Some(1e-6),
    );
    // The clipped endpoint sits on the right boundary where y = 28.
    let boundary = strokes[0]
        .points
        .iter()
        .find(|&&(lon, _)| (lon - -82.0).abs() < 1e-6)
        .expect("expected a point on the clip boundary");
    assertions::assert_approx_eq(boundary.1, 28.0, Some(1e-6));
}

#[test]
fn test_each_intersecting_region_gets_a_labeled_stroke() {
    // One long line crossing all three default region bands.
    let coastline = MultiLineString(vec![LineString::from(vec![
        (-87.5, 30.0),
        (-85.0, 29.0),
        (-83.0, 28.0),
        (-81.0, 27.0),
        (-79.8, 26.0),
    ])]);

    let config = Config::default();
    let strokes = partition_strokes(&config, &coastline).unwrap();

    for region in &config.regions {
        assert!(
            strokes.iter().any(|s| s.label == region.name),
            "missing stroke for region {}",
            region.name
        );
    }
}

#[test]
fn test_mask_filter_strategy_from_config() {
    let coastline = MultiLineString(vec![LineString::from(vec![
        (-85.0, 25.0),
        (-84.0, 26.0),
        (-83.0, 27.0),
        (-82.0, 28.0),
    ])]);

    let mut config = Config::default();
    config.strategy = "mask-filter".to_string();
    config.regions = single_region("Band", "gold", (-84.5, -83.0));
    config.validate().unwrap();

    let strokes = partition_strokes(&config, &coastline).unwrap();
    assert_eq!(strokes.len(), 1);
    // The mask keeps the original vertices; nothing is cut at -84.5.
    assert_eq!(strokes[0].points, vec![(-84.0, 26.0), (-83.0, 27.0)]);
}

#[test]
fn test_county_fallback_reported_in_summary() {
    let dir = tempfile::tempdir().unwrap();
    let coastline = dir.path().join("coastline.shp");
    test_data::create_coastline_shp(&coastline, &[vec![(-85.0, 25.0), (-80.0, 30.0)]]).unwrap();
    let counties = dir.path().join("counties.shp");
    // REGION attribute does not match, forcing the ISO_3166_2 fallback.
    test_data::create_county_shp(&counties, "XX", "US-FL").unwrap();

    let mut config = test_config(&dir);
    config.data.counties = Some(counties);
    config.validate().unwrap();

    let summary = pipeline::run(&config, &coastline).unwrap();
    assert_eq!(summary.county_filter, Some(CountyFilter::IsoSubdivision));
}

#[test]
fn test_empty_region_intersections_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let coastline = dir.path().join("coastline.shp");
    test_data::create_coastline_shp(&coastline, &[vec![(-85.0, 25.0), (-84.0, 26.0)]]).unwrap();

    let mut config = test_config(&dir);
    // A band the coastline never reaches.
    config.regions = single_region("Nowhere", "seagreen", (-80.0, -79.7));
    config.validate().unwrap();

    let summary = pipeline::run(&config, &coastline).unwrap();
    assert_eq!(summary.regions_drawn, 0);
    assert_eq!(summary.stroke_count, 0);
    // The map (with its legend entry) is still written.
    assert!(summary.output_path.exists());
}

#[test]
fn test_preview_summary_reports_preview_path() {
    let summary = pipeline::RenderSummary {
        regions_drawn: 1,
        stroke_count: 1,
        county_filter: None,
        output_path: std::env::temp_dir().join("littoral_preview.png"),
        preview: true,
    };
    assert!(summary.completion_message().starts_with("Preview opened at "));
}

#[test]
fn test_missing_coastline_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let missing = dir.path().join("no_such_file.shp");

    let result = pipeline::run(&config, &missing);
    assert!(result.is_err());
}

#[test]
fn test_detailed_region_config_loads() {
    // The bundled second-variant configuration must parse and validate in
    // the default lenient mode, overlap and all.
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/florida_detailed.json");
    let config = Config::load_from_file(&path).unwrap();
    assert!(config.validate().is_ok());

    // The literal out-of-order bands are preserved as written.
    let names: Vec<&str> = config.regions.iter().map(|r| r.name.as_str()).collect();
    let central_east = names.iter().position(|&n| n == "Central East").unwrap();
    let ne_florida = names.iter().position(|&n| n == "NE Florida").unwrap();
    assert!(central_east < ne_florida);
}
