/*!
 * Homelink Host
 *
 * This crate provides the host runtime abstraction for the Homelink SDK:
 * the trait the automation host implements, and the wrapper handles plugin
 * code uses to talk to host-owned devices, connections and images.
 */

#![warn(missing_docs)]

// Re-export core types
pub use homelink_core::prelude;

pub mod connection;
pub mod debug;
pub mod device;
pub mod image;
pub mod memory;
pub mod params;
pub mod runtime;

// Re-export the host trait and the wrapper handles
pub use connection::{ConnectionHandle, ConnectionSpec, Transport, WireProtocol};
pub use debug::{debug_mask, DebugFlag};
pub use device::{DeviceHandle, DeviceParam, DeviceRecord, DeviceSpec, DeviceUpdate, TypeName};
pub use image::{ImageHandle, ImageRecord};
pub use memory::{LogKind, LogLine, MemoryHost};
pub use params::PluginParameters;
pub use runtime::{HostConnection, HostError, HostRuntime, SharedHost};

/// Homelink host crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
