/*!
 * Plugin parameters supplied by the host.
 *
 * These are set on the host's hardware page, remain static for the lifetime of
 * the plugin, and are read-only to plugin code.
 */
use serde::{Deserialize, Serialize};

/// The parameter slots the host fills in for a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginParameters {
    /// Unique short name for the plugin
    pub key: String,
    /// Folder or directory where the plugin was run from
    pub home_folder: String,
    /// Plugin author
    pub author: String,
    /// Plugin version
    pub version: String,
    /// IP address, used during connection
    pub address: String,
    /// IP port, used during connection
    pub port: String,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// General parameter 1
    pub mode1: String,
    /// General parameter 2
    pub mode2: String,
    /// General parameter 3
    pub mode3: String,
    /// General parameter 4
    pub mode4: String,
    /// General parameter 5
    pub mode5: String,
    /// General parameter 6
    pub mode6: String,
    /// Serial port, used when connecting to serial ports
    pub serial_port: String,
}

impl PluginParameters {
    /// The plugin name the host derives records from
    ///
    /// The host keys hardware records and the persisted user variable off this
    /// name; it is the `key` parameter.
    pub fn name(&self) -> &str {
        &self.key
    }

    /// All parameter slots as name/value pairs, in a stable order
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Key", &self.key),
            ("HomeFolder", &self.home_folder),
            ("Author", &self.author),
            ("Version", &self.version),
            ("Address", &self.address),
            ("Port", &self.port),
            ("Username", &self.username),
            ("Password", &self.password),
            ("Mode1", &self.mode1),
            ("Mode2", &self.mode2),
            ("Mode3", &self.mode3),
            ("Mode4", &self.mode4),
            ("Mode5", &self.mode5),
            ("Mode6", &self.mode6),
            ("SerialPort", &self.serial_port),
        ]
    }
}
