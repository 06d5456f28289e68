//! Logging utilities for littoral.
//!
//! This module provides structured logging functionality so pipeline runs
//! are searchable and analyzable after the fact.

use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, "Starting operation");

    let result = f();

    let duration = start.elapsed();

    info!(
        operation = operation,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about a loaded shapefile layer
pub fn log_layer_stats(file_path: &str, layer: &str, shape_count: usize, kept_count: usize) {
    info!(
        operation = "layer_load",
        file_path = file_path,
        layer = layer,
        shape_count = shape_count,
        kept_count = kept_count,
        "Layer loaded successfully"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::LittoralError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}
