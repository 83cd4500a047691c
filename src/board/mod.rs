//! ESP32-C3 panel bring-up board
//!
//! Maps the panel bus onto physical GPIOs (see `pins`) so the bring-up
//! code only ever sees `PinRole`s.

pub mod pins;

use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::Peripherals;

use crate::config::{BusConfig, PanelConfig};
use crate::drivers::gpio::{HalPins, PinRole};
use crate::panel::Controller;

pub type PanelPins =
    HalPins<Output<'static>, Output<'static>, Output<'static>, Input<'static>, Output<'static>>;

/// Controller fitted on this board.
pub const PANEL: PanelConfig = PanelConfig::new(Controller::Ssd2828Hx8394);

pub struct Board {
    pub panel: PanelPins,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        // outputs come up idle: CS deselected, reset released, clock high
        let cs = Output::new(p.GPIO21, Level::High, OutputConfig::default());
        let sck = Output::new(p.GPIO8, Level::High, OutputConfig::default());
        let sdi = Output::new(p.GPIO10, Level::High, OutputConfig::default());
        let rst = Output::new(p.GPIO5, Level::High, OutputConfig::default());
        let sdo = Input::new(p.GPIO7, InputConfig::default().with_pull(Pull::None));

        Board {
            panel: HalPins::new(cs, sck, sdi, sdo, rst),
        }
    }

    /// Bus description for `HalPins`, which addresses pins by role.
    pub fn bus_config() -> BusConfig<PinRole> {
        BusConfig::new(
            PinRole::ChipSelect,
            PinRole::Clock,
            PinRole::DataOut,
            PinRole::Reset,
        )
        .with_data_in(PinRole::DataIn)
        .with_tx_clk_khz(pins::BRIDGE_TX_CLK_KHZ)
    }
}
