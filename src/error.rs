// Configuration errors, detected before any bus activity.
//
// Once the pins are claimed nothing else can fail: the controllers give no
// acknowledgement, so a wiring fault mid-sequence is invisible here.

use core::fmt;

use crate::drivers::gpio::PinRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A required pin was left out of the `BusConfig`.
    MissingPin { role: PinRole },
    /// The GPIO layer refused the claim (pin owned by someone else).
    PinUnavailable { role: PinRole },
}

impl ConfigError {
    pub const fn role(self) -> PinRole {
        match self {
            ConfigError::MissingPin { role } | ConfigError::PinUnavailable { role } => role,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingPin { role } => {
                write!(f, "{} pin is not configured", role.name())
            }
            ConfigError::PinUnavailable { role } => {
                write!(f, "request for '{}' pin failed", role.label())
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_pin() {
        let e = ConfigError::MissingPin {
            role: PinRole::Clock,
        };
        assert_eq!(e.to_string(), "sck pin is not configured");

        let e = ConfigError::PinUnavailable {
            role: PinRole::ChipSelect,
        };
        assert_eq!(e.to_string(), "request for 'panel_csx' pin failed");
        assert_eq!(e.role(), PinRole::ChipSelect);
    }
}
