/*!
 * Logging functionality for Homelink.
 *
 * This module provides tracing setup and utilities for consistent logging
 * across the Homelink SDK. These are the SDK's own diagnostics; log lines
 * destined for the host's log go through the host runtime primitives instead.
 */
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Initialize the logging system with default configuration
pub fn init() -> Result<()> {
    init_with_filter("info")
}

/// Initialize the logging system with a specific filter
///
/// # Arguments
///
/// * `filter` - The log filter string (e.g., "info", "debug", "homelink=trace")
pub fn init_with_filter(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .map_err(|e| Error::runtime(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// A type alias for a tracing span
pub type Span = tracing::Span;

/// Create a new span for a plugin
///
/// # Arguments
///
/// * `name` - The plugin name
pub fn plugin_span(name: &str) -> Span {
    tracing::info_span!("plugin", name = %name)
}

/// Create a new span for a device operation
///
/// # Arguments
///
/// * `operation` - The name of the operation
/// * `unit` - The device unit the operation targets
pub fn device_span(operation: &str, unit: u8) -> Span {
    tracing::info_span!("device", operation = %operation, unit = %unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        // This will fail if called multiple times in the same process
        // but it's fine for a single test
        let _ = init();
    }

    #[test]
    fn test_plugin_span() {
        let span = plugin_span("thermostat");
        let _guard = span.enter();
    }

    #[test]
    fn test_device_span() {
        let span = device_span("update", 3);
        let _guard = span.enter();
    }
}
