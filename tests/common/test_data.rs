//! Synthetic shapefile fixtures for integration tests.
//!
//! Each helper writes a small shapefile into a caller-supplied path,
//! typically inside a `tempfile` directory.

use std::path::Path;

use shapefile::dbase::{FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing, Polyline};

/// Write a shapes-only polyline file, one shape per entry in `lines`.
pub fn create_coastline_shp(
    path: &Path,
    lines: &[Vec<(f64, f64)>],
) -> Result<(), shapefile::Error> {
    let mut writer = shapefile::ShapeWriter::from_path(path)?;
    for line in lines {
        let points: Vec<Point> = line.iter().map(|&(x, y)| Point::new(x, y)).collect();
        writer.write_shape(&Polyline::new(points))?;
    }
    Ok(())
}

/// Write a county polygon layer with `REGION` and `ISO_3166_2` attributes.
/// The single county is a square inside the Florida bounding box.
pub fn create_county_shp(
    path: &Path,
    region_value: &str,
    iso_value: &str,
) -> Result<(), shapefile::Error> {
    let table = TableWriterBuilder::new()
        .add_character_field("REGION".try_into().unwrap(), 10)
        .add_character_field("ISO_3166_2".try_into().unwrap(), 10);
    let mut writer = shapefile::Writer::from_path(path, table)?;

    let county = Polygon::new(PolygonRing::Outer(vec![
        Point::new(-85.0, 25.0),
        Point::new(-85.0, 26.0),
        Point::new(-84.0, 26.0),
        Point::new(-84.0, 25.0),
        Point::new(-85.0, 25.0),
    ]));
    let mut record = Record::default();
    record.insert(
        "REGION".to_string(),
        FieldValue::Character(Some(region_value.to_string())),
    );
    record.insert(
        "ISO_3166_2".to_string(),
        FieldValue::Character(Some(iso_value.to_string())),
    );
    writer.write_shape_and_record(&county, &record)?;
    Ok(())
}
