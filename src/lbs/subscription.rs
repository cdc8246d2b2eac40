use crate::gatt::ClientConfig;

/// Tracks whether notifications are enabled for the Sensor characteristic.
///
/// There is one gate per service instance, shared by all connected clients. The last
/// configuration written by any client wins.
#[derive(Debug, Default)]
pub struct SubscriptionGate {
    config: u16,
}

impl SubscriptionGate {
    /// Creates a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new CCCD value.
    ///
    /// The gate is open only if `value` is exactly "notifications enabled". Indications, both
    /// bits together, and `0` all close it.
    pub fn on_config_changed(&mut self, value: u16) {
        self.config = value;
        debug!(
            "sensor CCCD changed to {:#06x}, notifications {}",
            value,
            if self.is_enabled() { "on" } else { "off" }
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.config == ClientConfig::NOTIFY.bits()
    }

    /// The last recorded CCCD value.
    pub fn config(&self) -> u16 {
        self.config
    }
}
