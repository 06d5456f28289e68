//! Configuration management for littoral.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! Every geographic constant, color, and path that was a hardcoded literal in
//! the original map script is a named field here, with the original values as
//! the documented defaults.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LittoralError, Result};
use crate::geometry::clip::ClipStrategy;
use crate::geometry::{parse_bbox, BoundingBox};
use crate::render::style::Color;

/// Command-line arguments for littoral
#[derive(Parser, Debug)]
#[command(name = "littoral")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the coastline polyline shapefile
    pub coastline: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long, env = "LITTORAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, env = "LITTORAL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Render to a temporary file and open it in the platform image viewer
    #[arg(long)]
    pub preview: bool,

    /// Clip strategy (mask-filter, true-clip)
    #[arg(short, long, env = "LITTORAL_STRATEGY")]
    pub strategy: Option<String>,

    /// Map extent override as "min_lon,min_lat,max_lon,max_lat"
    #[arg(short, long, env = "LITTORAL_BBOX")]
    pub bbox: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LITTORAL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Map extent and canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Geographic extent of the map, also the pre-filter for loaded geometry
    #[serde(default = "default_bbox")]
    pub bbox: BoundingBox,

    /// Latitude band applied to every region's clip window
    #[serde(default = "default_clip_lat_band")]
    pub clip_lat_band: (f64, f64),

    /// Map title
    #[serde(default = "default_title")]
    pub title: String,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

/// One named coastal region: a longitude band with a draw color.
/// List order determines draw and legend order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub color: Color,
    pub lon_range: (f64, f64),
}

/// Data source configuration beyond the coastline itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// County boundary shapefile, drawn as an overlay when present
    #[serde(default)]
    pub counties: Option<PathBuf>,

    /// Primary county filter: records whose REGION attribute equals this
    #[serde(default = "default_region_code")]
    pub county_region_code: String,

    /// Fallback county filter: records whose ISO_3166_2 attribute equals this
    #[serde(default = "default_iso_code")]
    pub county_iso_code: String,

    /// Land polygon shapefile for the base fill layer
    #[serde(default)]
    pub land: Option<PathBuf>,

    /// Lake polygon shapefile
    #[serde(default)]
    pub lakes: Option<PathBuf>,

    /// Administrative border polyline shapefile
    #[serde(default)]
    pub borders: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            counties: None,
            county_region_code: default_region_code(),
            county_iso_code: default_iso_code(),
            land: None,
            lakes: None,
            borders: None,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bbox: default_bbox(),
            clip_lat_band: default_clip_lat_band(),
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Legend placement and styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    /// One of: lower-left, lower-right, upper-left, upper-right
    #[serde(default = "default_legend_position")]
    pub position: String,

    /// Optional legend title
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_white")]
    pub background: Color,

    #[serde(default = "default_black")]
    pub text_color: Color,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            position: default_legend_position(),
            title: None,
            background: default_white(),
            text_color: default_black(),
        }
    }
}

/// Base layer and stroke styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Region stroke width in pixels
    #[serde(default = "default_line_width")]
    pub line_width: u32,

    #[serde(default = "default_white")]
    pub land_color: Color,

    #[serde(default = "default_lightblue")]
    pub ocean_color: Color,

    #[serde(default = "default_lightblue")]
    pub lake_color: Color,

    #[serde(default = "default_black")]
    pub border_color: Color,

    #[serde(default = "default_gray")]
    pub county_color: Color,

    #[serde(default)]
    pub legend: LegendConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            land_color: default_white(),
            ocean_color: default_lightblue(),
            lake_color: default_lightblue(),
            border_color: default_black(),
            county_color: default_gray(),
            legend: LegendConfig::default(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// PNG file to write
    #[serde(default = "default_output_file")]
    pub file: PathBuf,

    /// Open the rendered image instead of keeping the file
    #[serde(default)]
    pub preview: bool,

    /// Canvas background color
    #[serde(default = "default_white")]
    pub background: Color,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            preview: false,
            background: default_white(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Map extent and canvas
    #[serde(default)]
    pub map: MapConfig,

    /// Ordered region list; order determines draw and legend order
    #[serde(default = "default_regions")]
    pub regions: Vec<RegionConfig>,

    /// Data sources beyond the coastline
    #[serde(default)]
    pub data: DataConfig,

    /// Styling
    #[serde(default)]
    pub style: StyleConfig,

    /// Output
    #[serde(default)]
    pub output: OutputConfig,

    /// Clip strategy name (mask-filter, true-clip)
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Reject overlapping region longitude ranges instead of tolerating them
    #[serde(default)]
    pub strict_regions: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build the configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.preview && args.output.is_some() {
            return Err(LittoralError::Config {
                message: "--preview and --output are mutually exclusive".to_string(),
            });
        }
        if let Some(output) = args.output {
            config.output.file = output;
            config.output.preview = false;
        } else if args.preview {
            config.output.preview = true;
        }
        if let Some(strategy) = args.strategy {
            config.strategy = strategy;
        }
        if let Some(bbox) = &args.bbox {
            config.map.bbox = parse_bbox(bbox)?;
        }
        config.log_level = args.log_level;

        // Coastline path always comes from the command line
        let coastline_path = args.coastline;

        Ok((config, coastline_path))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.map = other.map;
        self.regions = other.regions;
        self.data = other.data;
        self.style = other.style;
        self.output = other.output;
        self.strategy = other.strategy;
        self.strict_regions = other.strict_regions;
        self.log_level = other.log_level;
    }

    /// The parsed clip strategy. `validate()` must have accepted the config first.
    pub fn clip_strategy(&self) -> Result<ClipStrategy> {
        ClipStrategy::parse_strategy(&self.strategy)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.map.bbox.validate()?;

        let (lat_min, lat_max) = self.map.clip_lat_band;
        if lat_min > lat_max {
            return Err(LittoralError::Config {
                message: format!(
                    "clip_lat_band minimum ({}) must be <= maximum ({})",
                    lat_min, lat_max
                ),
            });
        }

        if self.map.width == 0 || self.map.height == 0 {
            return Err(LittoralError::Config {
                message: "Canvas dimensions cannot be 0".to_string(),
            });
        }

        if self.regions.is_empty() {
            return Err(LittoralError::Config {
                message: "At least one region must be configured".to_string(),
            });
        }

        // Region ranges are only policed in strict mode; the lenient default
        // matches the original, which tolerates overlap and renders whatever
        // the configuration says.
        if self.strict_regions {
            for region in &self.regions {
                if region.lon_range.0 > region.lon_range.1 {
                    return Err(LittoralError::Config {
                        message: format!(
                            "Region '{}' has an inverted longitude range [{}, {}]",
                            region.name, region.lon_range.0, region.lon_range.1
                        ),
                    });
                }
            }
            for (i, a) in self.regions.iter().enumerate() {
                for b in self.regions.iter().skip(i + 1) {
                    // Touching boundaries are allowed; interior overlap is not.
                    let overlap_min = a.lon_range.0.max(b.lon_range.0);
                    let overlap_max = a.lon_range.1.min(b.lon_range.1);
                    if overlap_min < overlap_max {
                        return Err(LittoralError::Config {
                            message: format!(
                                "Regions '{}' and '{}' have overlapping longitude ranges",
                                a.name, b.name
                            ),
                        });
                    }
                }
            }
        }

        // Validate clip strategy
        ClipStrategy::parse_strategy(&self.strategy)?;

        // Validate legend position
        match self.style.legend.position.as_str() {
            "lower-left" | "lower-right" | "upper-left" | "upper-right" => {}
            other => {
                return Err(LittoralError::Config {
                    message: format!(
                        "Invalid legend position: {}. Must be one of: lower-left, lower-right, upper-left, upper-right",
                        other
                    ),
                });
            }
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(LittoralError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            regions: default_regions(),
            data: DataConfig::default(),
            style: StyleConfig::default(),
            output: OutputConfig::default(),
            strategy: default_strategy(),
            strict_regions: false,
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde

fn default_bbox() -> BoundingBox {
    BoundingBox::new(-88.0, 24.0, -79.5, 31.0)
}

fn default_clip_lat_band() -> (f64, f64) {
    (23.0, 31.5)
}

fn default_title() -> String {
    "Florida Map with True Colored Coastline Regions".to_string()
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    1000
}

fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig {
            name: "Panhandle".to_string(),
            color: Color::rgb(139, 69, 19), // saddlebrown
            lon_range: (-87.7, -83.5),
        },
        RegionConfig {
            name: "Central".to_string(),
            color: Color::rgb(255, 215, 0), // gold
            lon_range: (-83.5, -80.5),
        },
        RegionConfig {
            name: "South".to_string(),
            color: Color::rgb(255, 140, 0), // darkorange
            lon_range: (-80.5, -79.7),
        },
    ]
}

fn default_region_code() -> String {
    "FL".to_string()
}

fn default_iso_code() -> String {
    "US-FL".to_string()
}

fn default_legend_position() -> String {
    "lower-left".to_string()
}

fn default_line_width() -> u32 {
    3
}

fn default_output_file() -> PathBuf {
    PathBuf::from("florida_coastline.png")
}

fn default_strategy() -> String {
    "true-clip".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_white() -> Color {
    Color::rgb(255, 255, 255)
}

fn default_black() -> Color {
    Color::rgb(0, 0, 0)
}

fn default_gray() -> Color {
    Color::rgb(128, 128, 128)
}

fn default_lightblue() -> Color {
    Color::rgb(173, 216, 230)
}
