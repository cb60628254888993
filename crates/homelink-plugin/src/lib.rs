/*!
 * Homelink Plugin
 *
 * This crate provides the plugin-side helpers of the Homelink SDK: the
 * control API client, the persisted-state shim backed by a host user
 * variable, and the plugin helper gluing them onto a host runtime.
 */

#![warn(missing_docs)]

// Re-export core types
pub use homelink_core::prelude;

pub mod api;
pub mod helper;
pub mod state;

pub use api::{ApiClient, HostVersion};
pub use helper::{LogLevel, PluginHelper};
pub use state::PersistedState;

/// Homelink plugin crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
