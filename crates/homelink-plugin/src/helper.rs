/*!
 * Plugin helper for Homelink.
 *
 * `PluginHelper` bundles the pieces a plugin needs: the host handle, the
 * control API client, the persisted-state shim, and the logging policy.
 * Failures on this surface are handled by logging through the host and
 * substituting defaults, never by raising to the plugin's callbacks.
 */
use std::collections::HashSet;

use homelink_core::config::ApiConfig;
use homelink_core::error::Result;
use homelink_core::types::{StateMap, Unit};
use homelink_core::utils::parse_int;
use homelink_host::debug::{debug_mask, DebugFlag};
use homelink_host::device::DeviceHandle;
use homelink_host::runtime::SharedHost;

use crate::api::ApiClient;
use crate::state::PersistedState;

/// Log levels understood by [`PluginHelper::write_log`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Always written to the host's plain log
    Normal,
    /// Only written when the helper is in verbose mode
    Verbose,
    /// Written to the host's status stream when supported
    Status,
}

/// Plugin boilerplate bundled around a host runtime
#[derive(Debug)]
pub struct PluginHelper {
    host: SharedHost,
    api: ApiClient,
    state: PersistedState,
    log_level: LogLevel,
    status_supported: bool,
    initialized_units: HashSet<Unit>,
}

impl PluginHelper {
    /// Create a helper for a host, with the given persisted-state defaults
    pub fn new(host: SharedHost, state_defaults: StateMap) -> Result<Self> {
        Self::with_api_config(host, state_defaults, &ApiConfig::default())
    }

    /// Create a helper with explicit API client configuration
    pub fn with_api_config(
        host: SharedHost,
        state_defaults: StateMap,
        api_config: &ApiConfig,
    ) -> Result<Self> {
        let params = host.parameters();
        let api = ApiClient::with_config(&params, api_config)?;
        let state = PersistedState::new(params.name(), state_defaults);

        Ok(Self {
            host,
            api,
            state,
            log_level: LogLevel::Verbose,
            status_supported: true,
            initialized_units: HashSet::new(),
        })
    }

    /// The host runtime this helper is bound to
    pub fn host(&self) -> &SharedHost {
        &self.host
    }

    /// The control API client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The persisted state
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// The persisted state, mutable
    pub fn state_mut(&mut self) -> &mut PersistedState {
        &mut self.state
    }

    /// Set the helper's log level policy
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Set whether the host's status stream should be used
    pub fn set_status_supported(&mut self, supported: bool) {
        self.status_supported = supported;
    }

    /// Plugin start boilerplate: full debugging and a config dump
    pub fn on_start(&self) {
        self.host.set_debug_mask(debug_mask(&[DebugFlag::ShowAll]));
        self.dump_config_to_log();
    }

    /// Plugin stop boilerplate: debugging off
    pub fn on_stop(&self) {
        self.host.set_debug_mask(debug_mask(&[DebugFlag::ShowNone]));
    }

    /// Issue a control API call, swallowing failures
    ///
    /// A transport failure, a non-200 reply or a non-OK status is logged as a
    /// host error and yields `None`.
    pub async fn api_call(&self, query: &str) -> Option<serde_json::Value> {
        match self.api.call(query).await {
            Ok(body) => Some(body),
            Err(e) => {
                self.host.error_log(&e.to_string());
                None
            }
        }
    }

    /// Check that a parameter value is an integer
    ///
    /// Returns the parsed integer, or logs a host error and returns the
    /// supplied default when the value is not numeric.
    pub fn check_param(&self, name: &str, value: &str, default: i64) -> i64 {
        match parse_int(value) {
            Some(parsed) => parsed,
            None => {
                self.host.error_log(&format!(
                    "Parameter '{}' has an invalid value of '{}'! Default of '{}' is instead used.",
                    name, value, default
                ));
                default
            }
        }
    }

    /// Dump the non-empty plugin parameters and the device table to the log
    pub fn dump_config_to_log(&self) {
        let params = self.host.parameters();
        for (name, value) in params.pairs() {
            if !value.is_empty() {
                self.host.debug_log(&format!("'{}':'{}'", name, value));
            }
        }

        let units = self.host.device_units();
        self.host
            .debug_log(&format!("Device count: {}", units.len()));
        for unit in units {
            if let Ok(device) = self.host.device(unit) {
                self.host
                    .debug_log(&format!("Device:           {} - '{}'", unit, device.name));
                self.host
                    .debug_log(&format!("Device ID:       '{}'", device.id));
                self.host
                    .debug_log(&format!("Device nValue:    {}", device.n_value));
                self.host
                    .debug_log(&format!("Device sValue:   '{}'", device.s_value));
                self.host
                    .debug_log(&format!("Device LastLevel: {}", device.last_level));
            }
        }
    }

    /// Write a message through the helper's log-level policy
    ///
    /// Verbose messages are dropped unless the helper is in verbose mode;
    /// status messages go to the host's status stream when supported and the
    /// plain log otherwise; normal messages always go to the plain log.
    pub fn write_log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Verbose => {
                if self.log_level == LogLevel::Verbose {
                    self.status_or_log(message);
                }
            }
            LogLevel::Status => self.status_or_log(message),
            LogLevel::Normal => self.host.log(message),
        }
    }

    fn status_or_log(&self, message: &str) {
        if self.status_supported {
            self.host.status(message);
        } else {
            self.host.log(message);
        }
    }

    /// A handle to one device unit on the host
    pub fn device(&self, unit: Unit) -> DeviceHandle {
        DeviceHandle::new(self.host.clone(), unit)
    }

    /// Record a device unit as initialized by this plugin
    ///
    /// Returns false when the unit was already recorded.
    pub fn register_unit(&mut self, unit: Unit) -> bool {
        self.initialized_units.insert(unit)
    }

    /// Whether a device unit has been recorded as initialized
    pub fn is_unit_registered(&self, unit: Unit) -> bool {
        self.initialized_units.contains(&unit)
    }

    /// All units recorded as initialized, in order
    pub fn registered_units(&self) -> Vec<Unit> {
        let mut units: Vec<Unit> = self.initialized_units.iter().copied().collect();
        units.sort();
        units
    }

    /// Read the persisted state from the host
    ///
    /// A failure logs a host error; the in-memory mapping is reset to its
    /// defaults and the plugin continues.
    pub async fn load_state(&mut self) {
        if self.state.load(&self.api).await.is_err() {
            self.host
                .error_log("Cannot read the user variable holding the persistent variables");
        }
    }

    /// Write the persisted state back to the host
    pub async fn save_state(&self) {
        if let Err(e) = self.state.save(&self.api).await {
            self.host
                .error_log(&format!("Cannot save the persistent variables: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use homelink_core::types::Value;
    use homelink_host::device::{DeviceSpec, TypeName};
    use homelink_host::memory::{LogKind, MemoryHost};
    use homelink_host::params::PluginParameters;
    use homelink_host::HostRuntime;

    fn memory_host() -> Arc<MemoryHost> {
        Arc::new(MemoryHost::new(PluginParameters {
            key: "thermostat".to_string(),
            address: "127.0.0.1".to_string(),
            port: "8080".to_string(),
            mode1: "30".to_string(),
            ..Default::default()
        }))
    }

    fn helper(host: Arc<MemoryHost>) -> PluginHelper {
        let mut defaults = StateMap::new();
        defaults.insert("count".to_string(), Value::Integer(0));
        PluginHelper::new(host, defaults).unwrap()
    }

    #[test]
    fn test_check_param() {
        let host = memory_host();
        let helper = helper(host.clone());

        assert_eq!(helper.check_param("Mode1", "30", 60), 30);
        assert!(host.log_lines_of(LogKind::Error).is_empty());

        assert_eq!(helper.check_param("Mode1", "half", 60), 60);
        let errors = host.log_lines_of(LogKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Mode1"));
        assert!(errors[0].contains("half"));
        assert!(errors[0].contains("60"));
    }

    #[test]
    fn test_on_start_and_stop_set_debug_mask() {
        let host = memory_host();
        let helper = helper(host.clone());

        helper.on_start();
        assert_eq!(host.debug_mask(), 1);

        helper.on_stop();
        assert_eq!(host.debug_mask(), 0);
    }

    #[test]
    fn test_dump_config_skips_empty_parameters() {
        let host = memory_host();
        host.create_device(&DeviceSpec::new("Setpoint", Unit(1), TypeName::Temperature))
            .unwrap();
        let helper = helper(host.clone());

        helper.dump_config_to_log();
        let debug = host.log_lines_of(LogKind::Debug);

        assert!(debug.iter().any(|line| line.contains("'Key':'thermostat'")));
        assert!(debug.iter().any(|line| line.contains("'Mode1':'30'")));
        // Empty slots are skipped
        assert!(!debug.iter().any(|line| line.contains("'Mode2'")));
        assert!(debug.iter().any(|line| line.contains("Device count: 1")));
    }

    #[test]
    fn test_write_log_routing() {
        let host = memory_host();
        let mut helper = helper(host.clone());

        helper.write_log("normal line", LogLevel::Normal);
        helper.write_log("verbose line", LogLevel::Verbose);
        helper.write_log("status line", LogLevel::Status);

        assert_eq!(host.log_lines_of(LogKind::Normal), vec!["normal line"]);
        // Verbose mode is on by default; verbose and status lines go to the
        // status stream
        assert_eq!(
            host.log_lines_of(LogKind::Status),
            vec!["verbose line", "status line"]
        );

        // Verbose lines are dropped outside verbose mode
        helper.set_log_level(LogLevel::Normal);
        helper.write_log("hidden line", LogLevel::Verbose);
        assert!(!host
            .log_lines_of(LogKind::Status)
            .iter()
            .any(|line| line == "hidden line"));

        // Without status support, status lines fall back to the plain log
        helper.set_status_supported(false);
        helper.write_log("fallback line", LogLevel::Status);
        assert!(host
            .log_lines_of(LogKind::Normal)
            .iter()
            .any(|line| line == "fallback line"));
    }

    #[test]
    fn test_unit_registration() {
        let host = memory_host();
        let mut helper = helper(host);

        assert!(helper.register_unit(Unit(3)));
        assert!(helper.register_unit(Unit(1)));
        assert!(!helper.register_unit(Unit(3)));

        assert!(helper.is_unit_registered(Unit(1)));
        assert!(!helper.is_unit_registered(Unit(2)));
        assert_eq!(helper.registered_units(), vec![Unit(1), Unit(3)]);
    }
}
