/*!
 * Device wrapper types for Homelink.
 *
 * A device record is a host-managed entity representing one controllable or
 * observable point (switch, sensor, etc.), identified by a small integer unit
 * index. The handle in this module is a pass-through mirror: it holds a
 * reference to the host runtime and the unit, nothing else.
 */
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homelink_core::types::Unit;

use crate::runtime::{Result, SharedHost};

/// Common named device types understood by the host
///
/// Using a type name sets the numeric type, subtype and switchtype values on
/// the host side; raw codes are only needed for devices not covered here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    /// Air quality sensor
    AirQuality,
    /// Alert indicator
    Alert,
    /// Barometer
    Barometer,
    /// Incremental counter
    CounterIncremental,
    /// Contact sensor
    Contact,
    /// Current in amperes, three-phase
    CurrentAmpere,
    /// Current in amperes, single-phase
    CurrentSingle,
    /// Custom sensor
    Custom,
    /// Dimmer switch
    Dimmer,
    /// Distance sensor
    Distance,
    /// Gas meter
    Gas,
    /// Humidity sensor
    Humidity,
    /// Illumination sensor
    Illumination,
    /// Energy meter
    Kwh,
    /// Leaf wetness sensor
    LeafWetness,
    /// Motion sensor
    Motion,
    /// Percentage value
    Percentage,
    /// Push-on button
    PushOn,
    /// Push-off button
    PushOff,
    /// Pressure sensor
    Pressure,
    /// Rain meter
    Rain,
    /// Selector switch
    SelectorSwitch,
    /// Soil moisture sensor
    SoilMoisture,
    /// Solar radiation sensor
    SolarRadiation,
    /// Sound level sensor
    SoundLevel,
    /// On/off switch
    Switch,
    /// Temperature sensor
    Temperature,
    /// Combined temperature and humidity sensor
    TempHum,
    /// Combined temperature, humidity and barometer sensor
    TempHumBaro,
    /// Text display
    Text,
    /// Usage meter
    Usage,
    /// UV sensor
    Uv,
    /// Visibility sensor
    Visibility,
    /// Voltage sensor
    Voltage,
    /// Water flow sensor
    Waterflow,
    /// Wind sensor
    Wind,
    /// Combined wind, temperature and chill sensor
    WindTempChill,
}

impl TypeName {
    /// The name string the host understands
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::AirQuality => "Air Quality",
            TypeName::Alert => "Alert",
            TypeName::Barometer => "Barometer",
            TypeName::CounterIncremental => "Counter Incremental",
            TypeName::Contact => "Contact",
            TypeName::CurrentAmpere => "Current/Ampere",
            TypeName::CurrentSingle => "Current (Single)",
            TypeName::Custom => "Custom",
            TypeName::Dimmer => "Dimmer",
            TypeName::Distance => "Distance",
            TypeName::Gas => "Gas",
            TypeName::Humidity => "Humidity",
            TypeName::Illumination => "Illumination",
            TypeName::Kwh => "kWh",
            TypeName::LeafWetness => "Leaf Wetness",
            TypeName::Motion => "Motion",
            TypeName::Percentage => "Percentage",
            TypeName::PushOn => "Push On",
            TypeName::PushOff => "Push Off",
            TypeName::Pressure => "Pressure",
            TypeName::Rain => "Rain",
            TypeName::SelectorSwitch => "Selector Switch",
            TypeName::SoilMoisture => "Soil Moisture",
            TypeName::SolarRadiation => "Solar Radiation",
            TypeName::SoundLevel => "Sound Level",
            TypeName::Switch => "Switch",
            TypeName::Temperature => "Temperature",
            TypeName::TempHum => "Temp+Hum",
            TypeName::TempHumBaro => "Temp+Hum+Baro",
            TypeName::Text => "Text",
            TypeName::Usage => "Usage",
            TypeName::Uv => "UV",
            TypeName::Visibility => "Visibility",
            TypeName::Voltage => "Voltage",
            TypeName::Waterflow => "Waterflow",
            TypeName::Wind => "Wind",
            TypeName::WindTempChill => "Wind+Temp+Chill",
        }
    }

    /// Parse from the host's name string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Air Quality" => Some(TypeName::AirQuality),
            "Alert" => Some(TypeName::Alert),
            "Barometer" => Some(TypeName::Barometer),
            "Counter Incremental" => Some(TypeName::CounterIncremental),
            "Contact" => Some(TypeName::Contact),
            "Current/Ampere" => Some(TypeName::CurrentAmpere),
            "Current (Single)" => Some(TypeName::CurrentSingle),
            "Custom" => Some(TypeName::Custom),
            "Dimmer" => Some(TypeName::Dimmer),
            "Distance" => Some(TypeName::Distance),
            "Gas" => Some(TypeName::Gas),
            "Humidity" => Some(TypeName::Humidity),
            "Illumination" => Some(TypeName::Illumination),
            "kWh" => Some(TypeName::Kwh),
            "Leaf Wetness" => Some(TypeName::LeafWetness),
            "Motion" => Some(TypeName::Motion),
            "Percentage" => Some(TypeName::Percentage),
            "Push On" => Some(TypeName::PushOn),
            "Push Off" => Some(TypeName::PushOff),
            "Pressure" => Some(TypeName::Pressure),
            "Rain" => Some(TypeName::Rain),
            "Selector Switch" => Some(TypeName::SelectorSwitch),
            "Soil Moisture" => Some(TypeName::SoilMoisture),
            "Solar Radiation" => Some(TypeName::SolarRadiation),
            "Sound Level" => Some(TypeName::SoundLevel),
            "Switch" => Some(TypeName::Switch),
            "Temperature" => Some(TypeName::Temperature),
            "Temp+Hum" => Some(TypeName::TempHum),
            "Temp+Hum+Baro" => Some(TypeName::TempHumBaro),
            "Text" => Some(TypeName::Text),
            "Usage" => Some(TypeName::Usage),
            "UV" => Some(TypeName::Uv),
            "Visibility" => Some(TypeName::Visibility),
            "Voltage" => Some(TypeName::Voltage),
            "Waterflow" => Some(TypeName::Waterflow),
            "Wind" => Some(TypeName::Wind),
            "Wind+Temp+Chill" => Some(TypeName::WindTempChill),
            _ => None,
        }
    }
}

/// Specification for creating a device record on the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Appended to the hardware name to set the initial device name
    pub name: String,
    /// Plugin index for the device; must be less than 256 and never changes
    pub unit: Unit,
    /// Common device type; sets type, subtype and switchtype on the host
    pub type_name: Option<TypeName>,
    /// Raw numeric type value, for devices not covered by a type name
    pub type_code: Option<i32>,
    /// Raw numeric subtype value
    pub subtype_code: Option<i32>,
    /// Raw numeric switchtype value
    pub switchtype_code: Option<i32>,
    /// Custom image number, to override the default
    pub image: Option<i32>,
    /// Device options field; selector switches require details here
    pub options: HashMap<String, String>,
    /// Whether the device appears in the appropriate tabs out of the box
    pub used: bool,
    /// External device identifier, to override the host default
    pub device_id: Option<String>,
}

impl DeviceSpec {
    /// Create a device spec with a common type name
    pub fn new<S: Into<String>>(name: S, unit: Unit, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            unit,
            type_name: Some(type_name),
            ..Default::default()
        }
    }

    /// Create a device spec with raw type codes
    pub fn with_codes<S: Into<String>>(
        name: S,
        unit: Unit,
        type_code: i32,
        subtype_code: i32,
        switchtype_code: i32,
    ) -> Self {
        Self {
            name: name.into(),
            unit,
            type_code: Some(type_code),
            subtype_code: Some(subtype_code),
            switchtype_code: Some(switchtype_code),
            ..Default::default()
        }
    }

    /// Set the custom image number
    pub fn with_image(mut self, image: i32) -> Self {
        self.image = Some(image);
        self
    }

    /// Set a device option
    pub fn with_option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Mark the device as used
    pub fn with_used(mut self, used: bool) -> Self {
        self.used = used;
        self
    }

    /// Set the external device identifier
    pub fn with_device_id<S: Into<String>>(mut self, device_id: S) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

/// An update to the current values of a device record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceUpdate {
    /// The numeric device value
    pub n_value: f64,
    /// The string device value
    pub s_value: String,
    /// Numeric custom image number
    pub image: Option<i32>,
    /// Device signal strength, default 12
    pub signal_level: i32,
    /// Device battery strength, default 255
    pub battery_level: i32,
    /// Device options
    pub options: HashMap<String, String>,
    /// Timed-out devices show with a red header in the host's web UI
    pub timed_out: bool,
    /// Replacement device name
    pub name: Option<String>,
    /// Replacement common device type
    pub type_name: Option<TypeName>,
    /// Replacement raw type value
    pub type_code: Option<i32>,
    /// Replacement raw subtype value
    pub subtype_code: Option<i32>,
    /// Replacement raw switchtype value
    pub switchtype_code: Option<i32>,
    /// Device used flag
    pub used: Option<bool>,
    /// Device description
    pub description: Option<String>,
    /// Current color; the format is defined by the host's command callback
    pub color: Option<String>,
    /// Update attributes without firing notifications, scenes or triggers.
    /// The values are not written to the host database.
    pub suppress_triggers: bool,
}

impl DeviceUpdate {
    /// Create an update with the required numeric and string values
    pub fn new<S: Into<String>>(n_value: f64, s_value: S) -> Self {
        Self {
            n_value,
            s_value: s_value.into(),
            image: None,
            signal_level: 12,
            battery_level: 255,
            options: HashMap::new(),
            timed_out: false,
            name: None,
            type_name: None,
            type_code: None,
            subtype_code: None,
            switchtype_code: None,
            used: None,
            description: None,
            color: None,
            suppress_triggers: false,
        }
    }

    /// Set the custom image number
    pub fn with_image(mut self, image: i32) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the signal strength
    pub fn with_signal_level(mut self, signal_level: i32) -> Self {
        self.signal_level = signal_level;
        self
    }

    /// Set the battery strength
    pub fn with_battery_level(mut self, battery_level: i32) -> Self {
        self.battery_level = battery_level;
        self
    }

    /// Set a device option
    pub fn with_option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Mark the device as timed out
    pub fn with_timed_out(mut self, timed_out: bool) -> Self {
        self.timed_out = timed_out;
        self
    }

    /// Set the device description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the device color
    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Suppress notifications and event triggers for this update
    pub fn with_suppress_triggers(mut self, suppress: bool) -> Self {
        self.suppress_triggers = suppress;
        self
    }
}

/// A mirror of the host's record for one device
///
/// Exists for as long as the host's corresponding record exists; the wrapper
/// layer holds no state of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// The host's database ID for the device
    pub id: i64,
    /// Current name on the host
    pub name: String,
    /// External device identifier
    pub device_id: String,
    /// Current numeric value
    pub n_value: f64,
    /// Current string value
    pub s_value: String,
    /// Numeric signal level
    pub signal_level: i32,
    /// Numeric battery level
    pub battery_level: i32,
    /// Current image number
    pub image: i32,
    /// Numeric device type
    pub type_code: i32,
    /// Numeric device subtype
    pub subtype_code: i32,
    /// Numeric device switchtype
    pub switchtype_code: i32,
    /// Device used flag
    pub used: bool,
    /// Current device options
    pub options: HashMap<String, String>,
    /// Device timed-out flag
    pub timed_out: bool,
    /// Last level as reported by the host
    pub last_level: f64,
    /// Timestamp of the last update
    pub last_update: Option<DateTime<Utc>>,
    /// Device description, visible in the host's edit dialog
    pub description: String,
    /// Current color
    pub color: String,
}

/// A pass-through handle to one device record on the host
#[derive(Debug, Clone)]
pub struct DeviceHandle {
    host: SharedHost,
    unit: Unit,
}

impl DeviceHandle {
    /// Create a handle bound to a unit on a host
    pub fn new(host: SharedHost, unit: Unit) -> Self {
        Self { host, unit }
    }

    /// The unit this handle is bound to
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Create the device record on the host
    ///
    /// The spec's unit is forced to this handle's unit.
    pub fn create(&self, mut spec: DeviceSpec) -> Result<()> {
        spec.unit = self.unit;
        self.host.create_device(&spec)
    }

    /// Update the current values on the host
    pub fn update(&self, update: DeviceUpdate) -> Result<()> {
        self.host.update_device(self.unit, &update)
    }

    /// Delete the device record on the host
    pub fn delete(&self) -> Result<()> {
        self.host.delete_device(self.unit)
    }

    /// Update the device's last-seen time and nothing else
    ///
    /// No events or notifications are triggered.
    pub fn touch(&self) -> Result<()> {
        self.host.touch_device(self.unit)
    }

    /// Refresh the values for the device from the host's database
    ///
    /// Not normally required because device values are updated when callbacks
    /// are invoked.
    pub fn refresh(&self) -> Result<()> {
        self.host.refresh_device(self.unit)
    }

    /// Get a mirror of the host's current record for the device
    pub fn snapshot(&self) -> Result<DeviceRecord> {
        self.host.device(self.unit)
    }

    /// The current numeric value
    pub fn n_value(&self) -> Result<f64> {
        Ok(self.snapshot()?.n_value)
    }

    /// The current string value
    pub fn s_value(&self) -> Result<String> {
        Ok(self.snapshot()?.s_value)
    }
}

/// The string and numeric values, and unit, of one measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceParam {
    /// The device unit the measurement belongs to
    pub unit: Unit,
    /// The numeric value
    pub n_value: f64,
    /// The string value
    pub s_value: String,
}

impl DeviceParam {
    /// Create a measurement triple
    pub fn new<S: Into<String>>(unit: Unit, n_value: f64, s_value: S) -> Self {
        Self {
            unit,
            n_value,
            s_value: s_value.into(),
        }
    }
}
