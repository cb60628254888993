/*!
 * Debug-level flags for the host's plugin framework.
 *
 * The host takes a single numeric mask; plugin code works with a list of
 * flags which this module translates.
 */
use serde::{Deserialize, Serialize};

/// Host debug level mask values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugFlag {
    /// All framework and plugin debugging is disabled
    ShowNone,
    /// Very verbose log from the plugin framework and plugin debug messages
    ShowAll,
    /// Messages from plugin debug-log calls only
    FuncCalls,
    /// High level framework messages about the plugin
    HighLevelMessages,
    /// Framework debug messages related to device objects
    Devices,
    /// Framework debug messages related to connection objects
    Connections,
    /// Framework debug messages related to image objects
    Images,
    /// Dumps of inbound and outbound connection data
    DumpData,
    /// Framework debug messages related to the message queue
    MessageQueue,
}

impl DebugFlag {
    /// The numeric mask value the host understands
    pub fn mask_value(&self) -> u32 {
        match self {
            DebugFlag::ShowNone => 0,
            DebugFlag::ShowAll => 1,
            DebugFlag::FuncCalls => 2,
            DebugFlag::HighLevelMessages => 4,
            DebugFlag::Devices => 8,
            DebugFlag::Connections => 16,
            DebugFlag::Images => 32,
            DebugFlag::DumpData => 64,
            DebugFlag::MessageQueue => 128,
        }
    }
}

/// Translate a list of debug flags into the host's numeric mask
///
/// `ShowNone` anywhere in the list disables everything; `ShowAll` enables
/// everything; otherwise the individual mask values are OR-ed together.
pub fn debug_mask(flags: &[DebugFlag]) -> u32 {
    if flags.contains(&DebugFlag::ShowNone) {
        0
    } else if flags.contains(&DebugFlag::ShowAll) {
        1
    } else {
        flags.iter().fold(0, |mask, flag| mask | flag.mask_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_values() {
        assert_eq!(DebugFlag::ShowNone.mask_value(), 0);
        assert_eq!(DebugFlag::ShowAll.mask_value(), 1);
        assert_eq!(DebugFlag::FuncCalls.mask_value(), 2);
        assert_eq!(DebugFlag::MessageQueue.mask_value(), 128);
    }

    #[test]
    fn test_debug_mask_show_none_wins() {
        assert_eq!(debug_mask(&[DebugFlag::ShowNone]), 0);
        assert_eq!(
            debug_mask(&[DebugFlag::Devices, DebugFlag::ShowNone, DebugFlag::ShowAll]),
            0
        );
    }

    #[test]
    fn test_debug_mask_show_all() {
        assert_eq!(debug_mask(&[DebugFlag::ShowAll]), 1);
        assert_eq!(debug_mask(&[DebugFlag::ShowAll, DebugFlag::Devices]), 1);
    }

    #[test]
    fn test_debug_mask_combines_flags() {
        // 2 + 4 + 8 + 16 + 32
        let mask = debug_mask(&[
            DebugFlag::FuncCalls,
            DebugFlag::HighLevelMessages,
            DebugFlag::Devices,
            DebugFlag::Connections,
            DebugFlag::Images,
        ]);
        assert_eq!(mask, 62);
    }

    #[test]
    fn test_debug_mask_empty() {
        assert_eq!(debug_mask(&[]), 0);
    }

    #[test]
    fn test_debug_mask_duplicates() {
        assert_eq!(debug_mask(&[DebugFlag::Devices, DebugFlag::Devices]), 8);
    }
}
