//! littoral - a coastline region map renderer
//!
//! This is the main entry point for the littoral application.

use tracing::info;

use littoral::{logging, pipeline, Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let (config, coastline_path) = Config::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    // Validate configuration
    config.validate().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        e
    })?;

    logging::init_tracing(&config.log_level);

    info!("Starting littoral v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading coastline shapefile: {:?}", coastline_path);

    let summary = pipeline::run(&config, &coastline_path).map_err(|e| {
        logging::log_error(&e, "render_pipeline");
        e
    })?;

    info!(
        regions_drawn = summary.regions_drawn,
        strokes = summary.stroke_count,
        "Render complete"
    );
    println!("{}", summary.completion_message());

    Ok(())
}
