//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is
/// greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that every point of a stroke lies inside a lon/lat window,
/// allowing `epsilon` of slack at the boundary.
pub fn assert_points_within(
    points: &[(f64, f64)],
    lon_range: (f64, f64),
    lat_range: (f64, f64),
    epsilon: Option<f64>,
) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    for &(lon, lat) in points {
        assert!(
            lon >= lon_range.0 - epsilon && lon <= lon_range.1 + epsilon,
            "Longitude {} outside [{}, {}]",
            lon,
            lon_range.0,
            lon_range.1
        );
        assert!(
            lat >= lat_range.0 - epsilon && lat <= lat_range.1 + epsilon,
            "Latitude {} outside [{}, {}]",
            lat,
            lat_range.0,
            lat_range.1
        );
    }
}
