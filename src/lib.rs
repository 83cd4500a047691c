// panel bring-up over bit-banged 3-wire SPI (SSD2828 / R61529 / R61408)

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "esp32c3")]
pub mod board;
pub mod config;
pub mod drivers;
pub mod error;
pub mod panel;

pub use config::{BusConfig, PanelConfig};
pub use error::ConfigError;
pub use panel::{Controller, initialize_panel};
