//! Map composition: base layers, region strokes, legend, and title on a
//! fixed-extent plate carrée canvas.
//!
//! The composer draws into an in-memory RGB buffer with `plotters` and hands
//! back an `image` buffer, so callers decide between writing a file and
//! opening a preview. Z-order is fixed: ocean fill, land fill, lakes, border
//! lines, county lines, region strokes, then legend and title on top.

use std::path::{Path, PathBuf};
use std::process::Command;

use geo_types::{LineString, MultiLineString, MultiPolygon};
use image::RgbImage;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{PathElement, Polygon as PolygonElement};
use plotters::prelude::BitMapBackend;
use plotters::style::{Color as _, IntoFont};
use tracing::{debug, info};

use crate::config::{Config, OutputConfig};
use crate::error::{LittoralError, Result};
use crate::geometry::clip::Stroke;
use crate::render::style::Color;

/// Optional base map layers, all loaded up front by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct BaseLayers {
    pub land: Vec<MultiPolygon<f64>>,
    pub lakes: Vec<MultiPolygon<f64>>,
    pub borders: Vec<MultiLineString<f64>>,
    pub counties: Vec<LineString<f64>>,
}

/// One legend row. Every configured region gets an entry in list order,
/// whether or not any of its strokes survived clipping.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
}

fn draw_error<E: std::fmt::Display>(e: E) -> LittoralError {
    LittoralError::Render {
        message: e.to_string(),
    }
}

/// Render the full map into an RGB image buffer.
pub fn render_map(
    config: &Config,
    base: &BaseLayers,
    strokes: &[Stroke],
    legend: &[LegendEntry],
) -> Result<RgbImage> {
    let width = config.map.width;
    let height = config.map.height;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&config.output.background.to_plotters())
            .map_err(draw_error)?;

        let bbox = config.map.bbox;
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.map.title, ("sans-serif", 28).into_font())
            .margin(12)
            .build_cartesian_2d(bbox.min_lon..bbox.max_lon, bbox.min_lat..bbox.max_lat)
            .map_err(draw_error)?;

        // Ocean underlay covers the whole plotting area; land is drawn on top.
        chart
            .plotting_area()
            .fill(&config.style.ocean_color.to_plotters())
            .map_err(draw_error)?;

        for layer in &base.land {
            for polygon in layer {
                let points: Vec<(f64, f64)> =
                    polygon.exterior().0.iter().map(|c| (c.x, c.y)).collect();
                chart
                    .draw_series(std::iter::once(PolygonElement::new(
                        points,
                        config.style.land_color.to_plotters().filled(),
                    )))
                    .map_err(draw_error)?;
            }
        }

        for layer in &base.lakes {
            for polygon in layer {
                let points: Vec<(f64, f64)> =
                    polygon.exterior().0.iter().map(|c| (c.x, c.y)).collect();
                chart
                    .draw_series(std::iter::once(PolygonElement::new(
                        points,
                        config.style.lake_color.to_plotters().filled(),
                    )))
                    .map_err(draw_error)?;
            }
        }

        let border_style = config.style.border_color.to_plotters().stroke_width(1);
        for layer in &base.borders {
            for line in &layer.0 {
                let points: Vec<(f64, f64)> = line.0.iter().map(|c| (c.x, c.y)).collect();
                chart
                    .draw_series(std::iter::once(PathElement::new(points, border_style)))
                    .map_err(draw_error)?;
            }
        }

        let county_style = config.style.county_color.to_plotters().stroke_width(1);
        for outline in &base.counties {
            let points: Vec<(f64, f64)> = outline.0.iter().map(|c| (c.x, c.y)).collect();
            chart
                .draw_series(std::iter::once(PathElement::new(points, county_style)))
                .map_err(draw_error)?;
        }

        // Register legend rows first, one per region in configured order.
        // The rows carry no geometry of their own, so a region whose clip
        // came up empty still appears in the legend.
        if let Some(title) = &config.style.legend.title {
            let invisible = config.output.background.to_plotters().stroke_width(0);
            chart
                .draw_series(std::iter::once(PathElement::new(
                    Vec::<(f64, f64)>::new(),
                    invisible,
                )))
                .map_err(draw_error)?
                .label(title.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y)], invisible));
        }
        for entry in legend {
            let swatch = entry
                .color
                .to_plotters()
                .stroke_width(config.style.line_width);
            chart
                .draw_series(std::iter::once(PathElement::new(
                    Vec::<(f64, f64)>::new(),
                    swatch,
                )))
                .map_err(draw_error)?
                .label(entry.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], swatch));
        }

        debug!(stroke_count = strokes.len(), "Drawing region strokes");
        for stroke in strokes {
            let style = stroke
                .color
                .to_plotters()
                .stroke_width(config.style.line_width);
            chart
                .draw_series(std::iter::once(PathElement::new(
                    stroke.points.clone(),
                    style,
                )))
                .map_err(draw_error)?;
        }

        let position = match config.style.legend.position.as_str() {
            "lower-right" => SeriesLabelPosition::LowerRight,
            "upper-left" => SeriesLabelPosition::UpperLeft,
            "upper-right" => SeriesLabelPosition::UpperRight,
            _ => SeriesLabelPosition::LowerLeft,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(config.style.legend.background.to_plotters().mix(0.9))
            .border_style(config.style.legend.text_color.to_plotters())
            .label_font(
                ("sans-serif", 16)
                    .into_font()
                    .color(&config.style.legend.text_color.to_plotters()),
            )
            .draw()
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    RgbImage::from_raw(width, height, buffer).ok_or_else(|| LittoralError::Render {
        message: "Rendered buffer has unexpected size".to_string(),
    })
}

/// Write the rendered image according to the output configuration and return
/// the path that was written.
///
/// In preview mode the image goes to a temporary file which is then opened
/// with the platform viewer; otherwise it is written to the configured path.
pub fn export(image: &RgbImage, output: &OutputConfig) -> Result<PathBuf> {
    if output.preview {
        let path = std::env::temp_dir().join("littoral_preview.png");
        save_png(image, &path)?;
        open_viewer(&path)?;
        info!(file_path = %path.display(), "Preview opened");
        Ok(path)
    } else {
        save_png(image, &output.file)?;
        info!(file_path = %output.file.display(), "Map written");
        Ok(output.file.clone())
    }
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| LittoralError::Render {
            message: format!("Failed to encode PNG: {}", e),
        })
}

fn open_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command.arg(path).spawn().map_err(|e| LittoralError::Render {
        message: format!("Failed to open image viewer: {}", e),
    })?;
    Ok(())
}
