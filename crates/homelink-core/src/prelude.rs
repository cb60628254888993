/*!
 * Prelude module for Homelink Core.
 *
 * This module re-exports commonly used types and functions from the Homelink
 * Core crate to make them easier to import.
 */

// Re-export error types
pub use crate::error::{Error, Result};

// Re-export core types
pub use crate::types::{StateMap, Unit, Value};

// Re-export config types
pub use crate::config::{Config, ConfigBuilder, SharedConfig};

// Re-export utility functions
pub use crate::utils::{parse_csv, parse_int, parse_int_or, version_at_least, with_timeout};

// Re-export logging macros
pub use tracing::{debug, error, info, trace, warn};

// Re-export core initialization
pub use crate::init;
