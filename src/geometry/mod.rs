//! Geometry handling: bounding boxes, fragment merging, and region clipping.
//!
//! Coastline geometry is represented with `geo` primitives throughout. The
//! loader hands this module raw line fragments; `merge` unifies them and
//! `clip` cuts the unified geometry into per-region strokes.

pub mod clip;
pub mod merge;

use geo_types::{coord, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{LittoralError, Result};

/// A geographic bounding box in degrees, lon/lat axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Convert to a `geo` rectangle for intersection tests and clipping.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Validate the box: latitudes in range, min <= max on both axes.
    pub fn validate(&self) -> Result<()> {
        if self.min_lon > self.max_lon {
            return Err(LittoralError::InvalidCoordinates {
                message: format!(
                    "min_lon ({}) must be <= max_lon ({})",
                    self.min_lon, self.max_lon
                ),
            });
        }
        if self.min_lat > self.max_lat {
            return Err(LittoralError::InvalidCoordinates {
                message: format!(
                    "min_lat ({}) must be <= max_lat ({})",
                    self.min_lat, self.max_lat
                ),
            });
        }
        if !(-90.0..=90.0).contains(&self.min_lat) || !(-90.0..=90.0).contains(&self.max_lat) {
            return Err(LittoralError::InvalidCoordinates {
                message: "Latitude must be in the range -90 to 90".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse a bounding box string "min_lon,min_lat,max_lon,max_lat" into its components
pub fn parse_bbox(bbox: &str) -> Result<BoundingBox> {
    let parts: Vec<&str> = bbox.split(',').collect();
    if parts.len() != 4 {
        return Err(LittoralError::InvalidParameter {
            param: "bbox".to_string(),
            message: "Bounding box must be in format 'min_lon,min_lat,max_lon,max_lat'".to_string(),
        });
    }

    let mut values = [0.0f64; 4];
    for (i, (part, name)) in parts
        .iter()
        .zip(["min_lon", "min_lat", "max_lon", "max_lat"])
        .enumerate()
    {
        values[i] = part
            .trim()
            .parse::<f64>()
            .map_err(|_| LittoralError::InvalidParameter {
                param: "bbox".to_string(),
                message: format!("Invalid {}: {}", name, part),
            })?;
    }

    let bbox = BoundingBox::new(values[0], values[1], values[2], values[3]);
    bbox.validate()?;
    Ok(bbox)
}
