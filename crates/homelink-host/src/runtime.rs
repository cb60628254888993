/*!
 * Host runtime traits for Homelink.
 *
 * This module defines the primitives an automation host supplies to a plugin
 * at load time. Every wrapper handle in this crate holds a shared reference to
 * a `HostRuntime` and forwards calls to it; the host owns all state, all
 * transports, and whatever concurrency model exists.
 */
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use homelink_core::error::Error as CoreError;
use homelink_core::types::{Unit, Value};

use crate::connection::ConnectionSpec;
use crate::device::{DeviceRecord, DeviceSpec, DeviceUpdate};
use crate::image::ImageRecord;
use crate::params::PluginParameters;

/// Error type for host runtime operations
#[derive(Error, Debug)]
pub enum HostError {
    /// No device record exists for the unit
    #[error("Unknown device unit: {0}")]
    UnknownUnit(Unit),

    /// A device record already exists for the unit
    #[error("Device unit already exists: {0}")]
    UnitExists(Unit),

    /// No image record exists for the name
    #[error("Unknown image: {0}")]
    UnknownImage(String),

    /// The spec handed to the host was rejected
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    /// The connection is not in a usable state
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Core error
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for host runtime operations
pub type Result<T> = std::result::Result<T, HostError>;

/// The primitives supplied by the host runtime
///
/// All methods are synchronous, single-threaded delegations: the wrapper layer
/// adds no scheduling, caching, or coordination of its own.
pub trait HostRuntime: Send + Sync + Debug {
    /// Write a message to the host log only if verbose logging is turned on
    fn debug_log(&self, message: &str);

    /// Write a message to the host log
    fn log(&self, message: &str);

    /// Write a status message to the host log
    fn status(&self, message: &str);

    /// Write an error message to the host log
    fn error_log(&self, message: &str);

    /// Set the host's debug mask (see [`crate::debug::debug_mask`])
    fn set_debug_mask(&self, mask: u32);

    /// Set the heartbeat interval in seconds, default 10 seconds
    fn set_heartbeat(&self, interval_secs: u32);

    /// Inform the host that the plugin's hardware can consume notifications
    fn register_notifier(&self, name: &str);

    /// Toggle host-side line-level tracing of the plugin
    fn set_trace(&self, enabled: bool);

    /// Get the plugin's stored configuration blob
    fn configuration(&self) -> Result<Value>;

    /// Replace the plugin's stored configuration blob, returning the result
    fn set_configuration(&self, value: Value) -> Result<Value>;

    /// Get the parameters the host was configured with for this plugin
    fn parameters(&self) -> PluginParameters;

    /// Create a device record on the host
    fn create_device(&self, spec: &DeviceSpec) -> Result<()>;

    /// Update the current values of a device record
    fn update_device(&self, unit: Unit, update: &DeviceUpdate) -> Result<()>;

    /// Delete a device record
    fn delete_device(&self, unit: Unit) -> Result<()>;

    /// Update a device's last-seen time and nothing else
    fn touch_device(&self, unit: Unit) -> Result<()>;

    /// Refresh a device record from the host's database
    fn refresh_device(&self, unit: Unit) -> Result<()>;

    /// Get a mirror of the host's record for a device
    fn device(&self, unit: Unit) -> Result<DeviceRecord>;

    /// Get the units of all device records owned by this plugin
    fn device_units(&self) -> Vec<Unit>;

    /// Open a connection with the given transport and protocol
    fn open_connection(&self, spec: &ConnectionSpec) -> Result<Box<dyn HostConnection>>;

    /// Load a custom image zip file into the host's image table
    fn create_image(&self, filename: &str) -> Result<ImageRecord>;

    /// Delete an image from the host's image table
    fn delete_image(&self, name: &str) -> Result<()>;
}

/// A host-owned connection
///
/// Returned by [`HostRuntime::open_connection`]; the host owns the socket and
/// delivers inbound traffic through its own callback machinery.
pub trait HostConnection: Send + Sync + Debug {
    /// The name of the connection
    fn name(&self) -> String;

    /// The address associated with the connection
    fn address(&self) -> String;

    /// The port associated with the connection, for IP transports
    fn port(&self) -> Option<String>;

    /// The baud rate, for serial transports
    fn baud(&self) -> u32;

    /// The listening connection this one was accepted from, if any
    fn parent(&self) -> Option<String>;

    /// True while a connect has been requested but has yet to complete or fail
    fn connecting(&self) -> bool;

    /// Request a connect to the configured endpoint
    fn connect(&self) -> Result<()>;

    /// Start listening on the configured port
    fn listen(&self) -> Result<()>;

    /// Send a message to the external hardware, optionally delayed
    fn send(&self, payload: Bytes, delay: Option<Duration>) -> Result<()>;

    /// Terminate the connection, including listening connections
    fn disconnect(&self) -> Result<()>;
}

/// A shared reference to a host runtime
pub type SharedHost = Arc<dyn HostRuntime>;
