//! Device capability adapter - reports input capabilities from configuration

use application::ports::DeviceCapabilityPort;

use crate::config::DeviceConfig;

/// Device capabilities fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredDevice {
    supports_hover: bool,
}

impl ConfiguredDevice {
    /// Pointer device that can hover
    #[must_use]
    pub const fn pointer() -> Self {
        Self {
            supports_hover: true,
        }
    }

    /// Touch-only device
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            supports_hover: false,
        }
    }
}

impl From<&DeviceConfig> for ConfiguredDevice {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            supports_hover: config.supports_hover,
        }
    }
}

impl DeviceCapabilityPort for ConfiguredDevice {
    fn supports_hover(&self) -> bool {
        self.supports_hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_configuration() {
        let touch = ConfiguredDevice::from(&DeviceConfig {
            supports_hover: false,
        });
        assert_eq!(touch, ConfiguredDevice::touch());
        assert!(!touch.supports_hover());
        assert!(ConfiguredDevice::from(&DeviceConfig::default()).supports_hover());
    }
}
