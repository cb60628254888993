/*!
 * In-memory host runtime for Homelink.
 *
 * `MemoryHost` implements [`HostRuntime`] against plain in-memory tables. It
 * is the reference implementation of the trait and the test double used
 * throughout the SDK's own tests; a real deployment supplies the actual host
 * runtime instead.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tracing::debug;

use homelink_core::types::{Unit, Value};

use crate::connection::ConnectionSpec;
use crate::device::{DeviceRecord, DeviceSpec, DeviceUpdate};
use crate::image::ImageRecord;
use crate::params::PluginParameters;
use crate::runtime::{HostConnection, HostError, HostRuntime, Result};

/// The host log stream a captured line was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Debug stream
    Debug,
    /// Normal log stream
    Normal,
    /// Status stream
    Status,
    /// Error stream
    Error,
}

/// One captured host log line
#[derive(Debug, Clone)]
pub struct LogLine {
    /// The stream the line was written to
    pub kind: LogKind,
    /// The message text
    pub message: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    devices: HashMap<Unit, DeviceRecord>,
    images: HashMap<String, ImageRecord>,
    configuration: Value,
    logs: Vec<LogLine>,
    debug_mask: u32,
    heartbeat_secs: u32,
    notifier: Option<String>,
    trace: bool,
    next_device_id: i64,
    next_image_id: i64,
}

/// An in-memory implementation of [`HostRuntime`]
#[derive(Debug)]
pub struct MemoryHost {
    parameters: PluginParameters,
    state: Mutex<MemoryState>,
    connections: Mutex<Vec<Arc<MemoryConnection>>>,
}

impl MemoryHost {
    /// Create a host with the given plugin parameters
    pub fn new(parameters: PluginParameters) -> Self {
        Self {
            parameters,
            state: Mutex::new(MemoryState {
                next_device_id: 1,
                next_image_id: 1,
                ..Default::default()
            }),
            connections: Mutex::new(Vec::new()),
        }
    }

    /// All captured log lines, in write order
    pub fn log_lines(&self) -> Vec<LogLine> {
        self.state.lock().expect("memory host lock").logs.clone()
    }

    /// Captured log lines of one kind
    pub fn log_lines_of(&self, kind: LogKind) -> Vec<String> {
        self.state
            .lock()
            .expect("memory host lock")
            .logs
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.message.clone())
            .collect()
    }

    /// The currently set debug mask
    pub fn debug_mask(&self) -> u32 {
        self.state.lock().expect("memory host lock").debug_mask
    }

    /// The currently set heartbeat interval
    pub fn heartbeat_secs(&self) -> u32 {
        self.state.lock().expect("memory host lock").heartbeat_secs
    }

    /// The registered notifier name, if any
    pub fn notifier(&self) -> Option<String> {
        self.state.lock().expect("memory host lock").notifier.clone()
    }

    /// Whether host-side tracing is enabled
    pub fn trace_enabled(&self) -> bool {
        self.state.lock().expect("memory host lock").trace
    }

    /// All connections opened through this host
    pub fn connections(&self) -> Vec<Arc<MemoryConnection>> {
        self.connections.lock().expect("memory host lock").clone()
    }

    fn push_log(&self, kind: LogKind, message: &str) {
        let mut state = self.state.lock().expect("memory host lock");
        state.logs.push(LogLine {
            kind,
            message: message.to_string(),
        });
    }
}

impl HostRuntime for MemoryHost {
    fn debug_log(&self, message: &str) {
        self.push_log(LogKind::Debug, message);
    }

    fn log(&self, message: &str) {
        self.push_log(LogKind::Normal, message);
    }

    fn status(&self, message: &str) {
        self.push_log(LogKind::Status, message);
    }

    fn error_log(&self, message: &str) {
        self.push_log(LogKind::Error, message);
    }

    fn set_debug_mask(&self, mask: u32) {
        self.state.lock().expect("memory host lock").debug_mask = mask;
    }

    fn set_heartbeat(&self, interval_secs: u32) {
        self.state.lock().expect("memory host lock").heartbeat_secs = interval_secs;
    }

    fn register_notifier(&self, name: &str) {
        self.state.lock().expect("memory host lock").notifier = Some(name.to_string());
    }

    fn set_trace(&self, enabled: bool) {
        self.state.lock().expect("memory host lock").trace = enabled;
    }

    fn configuration(&self) -> Result<Value> {
        Ok(self
            .state
            .lock()
            .expect("memory host lock")
            .configuration
            .clone())
    }

    fn set_configuration(&self, value: Value) -> Result<Value> {
        let mut state = self.state.lock().expect("memory host lock");
        state.configuration = value;
        Ok(state.configuration.clone())
    }

    fn parameters(&self) -> PluginParameters {
        self.parameters.clone()
    }

    fn create_device(&self, spec: &DeviceSpec) -> Result<()> {
        let mut state = self.state.lock().expect("memory host lock");
        if state.devices.contains_key(&spec.unit) {
            return Err(HostError::UnitExists(spec.unit));
        }

        let id = state.next_device_id;
        state.next_device_id += 1;

        let record = DeviceRecord {
            id,
            name: spec.name.clone(),
            device_id: spec
                .device_id
                .clone()
                .unwrap_or_else(|| format!("000H{:03}U", spec.unit.as_u8())),
            image: spec.image.unwrap_or(0),
            type_code: spec.type_code.unwrap_or(0),
            subtype_code: spec.subtype_code.unwrap_or(0),
            switchtype_code: spec.switchtype_code.unwrap_or(0),
            used: spec.used,
            options: spec.options.clone(),
            ..Default::default()
        };
        state.devices.insert(spec.unit, record);
        debug!("Created device record for unit {}", spec.unit);
        Ok(())
    }

    fn update_device(&self, unit: Unit, update: &DeviceUpdate) -> Result<()> {
        let mut state = self.state.lock().expect("memory host lock");
        let record = state
            .devices
            .get_mut(&unit)
            .ok_or(HostError::UnknownUnit(unit))?;

        // Suppressed updates leave the stored values untouched
        if !update.suppress_triggers {
            record.n_value = update.n_value;
            record.s_value = update.s_value.clone();
            record.last_level = update.n_value;
            record.last_update = Some(Utc::now());
        }

        record.signal_level = update.signal_level;
        record.battery_level = update.battery_level;
        record.timed_out = update.timed_out;
        if let Some(image) = update.image {
            record.image = image;
        }
        if !update.options.is_empty() {
            record.options = update.options.clone();
        }
        if let Some(name) = &update.name {
            record.name = name.clone();
        }
        if let Some(type_code) = update.type_code {
            record.type_code = type_code;
        }
        if let Some(subtype_code) = update.subtype_code {
            record.subtype_code = subtype_code;
        }
        if let Some(switchtype_code) = update.switchtype_code {
            record.switchtype_code = switchtype_code;
        }
        if let Some(used) = update.used {
            record.used = used;
        }
        if let Some(description) = &update.description {
            record.description = description.clone();
        }
        if let Some(color) = &update.color {
            record.color = color.clone();
        }
        Ok(())
    }

    fn delete_device(&self, unit: Unit) -> Result<()> {
        let mut state = self.state.lock().expect("memory host lock");
        state
            .devices
            .remove(&unit)
            .map(|_| ())
            .ok_or(HostError::UnknownUnit(unit))
    }

    fn touch_device(&self, unit: Unit) -> Result<()> {
        let mut state = self.state.lock().expect("memory host lock");
        let record = state
            .devices
            .get_mut(&unit)
            .ok_or(HostError::UnknownUnit(unit))?;
        record.last_update = Some(Utc::now());
        Ok(())
    }

    fn refresh_device(&self, unit: Unit) -> Result<()> {
        // The in-memory table is always current; just verify the unit exists
        let state = self.state.lock().expect("memory host lock");
        if state.devices.contains_key(&unit) {
            Ok(())
        } else {
            Err(HostError::UnknownUnit(unit))
        }
    }

    fn device(&self, unit: Unit) -> Result<DeviceRecord> {
        let state = self.state.lock().expect("memory host lock");
        state
            .devices
            .get(&unit)
            .cloned()
            .ok_or(HostError::UnknownUnit(unit))
    }

    fn device_units(&self) -> Vec<Unit> {
        let state = self.state.lock().expect("memory host lock");
        let mut units: Vec<Unit> = state.devices.keys().copied().collect();
        units.sort();
        units
    }

    fn open_connection(&self, spec: &ConnectionSpec) -> Result<Box<dyn HostConnection>> {
        let connection = Arc::new(MemoryConnection {
            spec: spec.clone(),
            inner: Mutex::new(MemoryConnectionState::default()),
        });
        self.connections
            .lock()
            .expect("memory host lock")
            .push(connection.clone());
        Ok(Box::new(SharedMemoryConnection(connection)))
    }

    fn create_image(&self, filename: &str) -> Result<ImageRecord> {
        let mut state = self.state.lock().expect("memory host lock");
        let name = filename.trim_end_matches(".zip").to_string();
        if !name.starts_with(&self.parameters.key) {
            return Err(HostError::InvalidSpec(format!(
                "Image base '{}' does not start with plugin key '{}'",
                name, self.parameters.key
            )));
        }

        let id = state.next_image_id;
        state.next_image_id += 1;

        let record = ImageRecord {
            id,
            name: name.clone(),
            base: name.clone(),
            description: String::new(),
        };
        state.images.insert(name, record.clone());
        Ok(record)
    }

    fn delete_image(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().expect("memory host lock");
        state
            .images
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| HostError::UnknownImage(name.to_string()))
    }
}

#[derive(Debug, Default)]
struct MemoryConnectionState {
    connected: bool,
    listening: bool,
    sent: Vec<(Bytes, Option<Duration>)>,
}

/// A loopback connection owned by a [`MemoryHost`]
#[derive(Debug)]
pub struct MemoryConnection {
    spec: ConnectionSpec,
    inner: Mutex<MemoryConnectionState>,
}

impl MemoryConnection {
    /// The spec the connection was opened with
    pub fn spec(&self) -> &ConnectionSpec {
        &self.spec
    }

    /// Whether a connect or listen has been requested
    pub fn is_open(&self) -> bool {
        let state = self.inner.lock().expect("memory connection lock");
        state.connected || state.listening
    }

    /// All payloads sent through the connection
    pub fn sent(&self) -> Vec<(Bytes, Option<Duration>)> {
        self.inner.lock().expect("memory connection lock").sent.clone()
    }
}

#[derive(Debug)]
struct SharedMemoryConnection(Arc<MemoryConnection>);

impl HostConnection for SharedMemoryConnection {
    fn name(&self) -> String {
        self.0.spec.name.clone()
    }

    fn address(&self) -> String {
        self.0.spec.address.clone()
    }

    fn port(&self) -> Option<String> {
        self.0.spec.port.clone()
    }

    fn baud(&self) -> u32 {
        self.0.spec.baud
    }

    fn parent(&self) -> Option<String> {
        None
    }

    fn connecting(&self) -> bool {
        false
    }

    fn connect(&self) -> Result<()> {
        self.0
            .inner
            .lock()
            .expect("memory connection lock")
            .connected = true;
        Ok(())
    }

    fn listen(&self) -> Result<()> {
        self.0
            .inner
            .lock()
            .expect("memory connection lock")
            .listening = true;
        Ok(())
    }

    fn send(&self, payload: Bytes, delay: Option<Duration>) -> Result<()> {
        let mut state = self.0.inner.lock().expect("memory connection lock");
        if !state.connected {
            return Err(HostError::ConnectionError(
                "Connection is not open".to_string(),
            ));
        }
        state.sent.push((payload, delay));
        Ok(())
    }

    fn disconnect(&self) -> Result<()> {
        let mut state = self.0.inner.lock().expect("memory connection lock");
        state.connected = false;
        state.listening = false;
        Ok(())
    }
}
