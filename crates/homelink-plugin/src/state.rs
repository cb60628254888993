/*!
 * Persisted plugin state backed by a host user variable.
 *
 * A user variable is a host-managed named scalar; this shim stores the JSON
 * encoding of a flat key-value mapping in one variable named
 * `{plugin name}-InternalVariables`, read at startup and written back on
 * demand. There is no concurrency, conflict resolution or durability
 * guarantee beyond whatever the host provides. One record per field.
 */
use tracing::{error, info, warn};

use homelink_core::error::Result;
use homelink_core::types::{StateMap, Value};
use homelink_core::utils::version_at_least;

use crate::api::ApiClient;

/// Suffix appended to the plugin name to form the user variable name
const VARIABLE_SUFFIX: &str = "-InternalVariables";

/// The host's user-variable type code for string variables
const VARIABLE_TYPE: u8 = 2;

/// Scripting API version where the creation command was renamed from
/// `saveuservariable` to `adduservariable`; using the old name on newer hosts
/// returns a status error.
const CREATE_COMMAND_BREAK: &str = "2.4.9";

/// A plugin's persisted key-value state
#[derive(Debug, Clone)]
pub struct PersistedState {
    variable_name: String,
    defaults: StateMap,
    current: StateMap,
}

impl PersistedState {
    /// Create state for a plugin with the given default mapping
    pub fn new<S: AsRef<str>>(plugin_name: S, defaults: StateMap) -> Self {
        Self {
            variable_name: format!("{}{}", plugin_name.as_ref(), VARIABLE_SUFFIX),
            current: defaults.clone(),
            defaults,
        }
    }

    /// The name of the host user variable backing this state
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.current.get(key)
    }

    /// Get an integer value by key
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// Get a float value by key
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    /// Get a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a boolean value by key
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Set a value; one record per field
    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.current.insert(key.into(), value.into());
    }

    /// The full current mapping
    pub fn as_map(&self) -> &StateMap {
        &self.current
    }

    /// Reset the current mapping to the defaults
    pub fn reset(&mut self) {
        self.current = self.defaults.clone();
    }

    /// Read the state from the host
    ///
    /// When the backing variable exists its value is decoded and merged over
    /// the defaults; a corrupt value resets to the defaults. When it does not
    /// exist yet it is created, initialised to the defaults. Any failure
    /// resets the in-memory mapping to the defaults before propagating, so
    /// callers can log and continue.
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        match self.try_load(api).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    async fn try_load(&mut self, api: &ApiClient) -> Result<()> {
        let response = api.call("type=command&param=getuservariables").await?;

        let stored = response
            .get("result")
            .and_then(|r| r.as_array())
            .and_then(|variables| {
                variables.iter().find(|variable| {
                    variable.get("Name").and_then(|n| n.as_str()) == Some(self.variable_name())
                })
            })
            .and_then(|variable| variable.get("Value"))
            .and_then(|value| value.as_str())
            .map(str::to_string);

        match stored {
            Some(raw) => match serde_json::from_str::<StateMap>(&raw) {
                Ok(mapping) => {
                    self.current = self.defaults.clone();
                    self.current.extend(mapping);
                    Ok(())
                }
                Err(e) => {
                    warn!(
                        "User variable {} holds an unreadable value, resetting to defaults: {}",
                        self.variable_name, e
                    );
                    self.reset();
                    Ok(())
                }
            },
            None => self.create_variable(api).await,
        }
    }

    async fn create_variable(&mut self, api: &ApiClient) -> Result<()> {
        info!(
            "User variable {} does not exist. Creation requested",
            self.variable_name
        );

        // The creation command was renamed in scripting API 2.4.9; ask the
        // host which side of the break it is on.
        let command = match api.version().await {
            Ok(version) if version_at_least(&version.script_api_version, CREATE_COMMAND_BREAK) => {
                info!("Using 'adduservariable' instead of 'saveuservariable'");
                "adduservariable"
            }
            Ok(_) => "saveuservariable",
            Err(e) => {
                error!(
                    "Unable to fetch host info, unable to determine version: {}",
                    e
                );
                "saveuservariable"
            }
        };

        self.reset();
        let encoded = serde_json::to_string(&self.defaults)?;
        api.call(&format!(
            "type=command&param={}&vname={}&vtype={}&vvalue={}",
            command,
            urlencoding::encode(self.variable_name()),
            VARIABLE_TYPE,
            urlencoding::encode(&encoded)
        ))
        .await?;
        Ok(())
    }

    /// Write the current mapping back to the host
    pub async fn save(&self, api: &ApiClient) -> Result<()> {
        let encoded = serde_json::to_string(&self.current)?;
        api.call(&format!(
            "type=command&param=updateuservariable&vname={}&vtype={}&vvalue={}",
            urlencoding::encode(self.variable_name()),
            VARIABLE_TYPE,
            urlencoding::encode(&encoded)
        ))
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> StateMap {
        let mut map = StateMap::new();
        map.insert("count".to_string(), Value::Integer(0));
        map.insert("mode".to_string(), Value::String("auto".to_string()));
        map
    }

    #[test]
    fn test_variable_name() {
        let state = PersistedState::new("thermostat", defaults());
        assert_eq!(state.variable_name(), "thermostat-InternalVariables");
    }

    #[test]
    fn test_typed_accessors() {
        let mut state = PersistedState::new("thermostat", defaults());
        state.set("count", 3i64);
        state.set("setpoint", 21.5);
        state.set("enabled", true);

        assert_eq!(state.get_integer("count"), Some(3));
        assert_eq!(state.get_float("setpoint"), Some(21.5));
        assert_eq!(state.get_bool("enabled"), Some(true));
        assert_eq!(state.get_str("mode"), Some("auto"));
        assert_eq!(state.get("missing"), None);
    }

    #[test]
    fn test_reset() {
        let mut state = PersistedState::new("thermostat", defaults());
        state.set("count", 9i64);
        state.set("extra", "stray");
        state.reset();

        assert_eq!(state.get_integer("count"), Some(0));
        assert_eq!(state.get("extra"), None);
    }
}
