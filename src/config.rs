// Bus and panel configuration handed in by the board code.
//
// Both are plain values built once and never mutated; initialize_panel
// borrows them for the duration of the call.

use crate::drivers::gpio::PinRole;
use crate::error::ConfigError;
use crate::panel::Controller;

/// Pins and timing of the bit-banged bus.
///
/// Chip-select, clock, data-out and reset are required. Data-in is only
/// needed by controllers that read back an ID (see `Controller::needs_readback`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig<P> {
    pub cs: Option<P>,
    pub sck: Option<P>,
    pub sdi: Option<P>,
    pub sdo: Option<P>,
    pub reset: Option<P>,
    /// Half-period of the bus clock; each bit waits this long twice.
    /// 0 picks the controller's own figure.
    pub bit_delay_us: u32,
    /// Controller reference clock (SSD2828 TX_CLK). Informational only, 0 = unknown.
    pub tx_clk_khz: u32,
}

impl<P: Copy> BusConfig<P> {
    pub fn new(cs: P, sck: P, sdi: P, reset: P) -> Self {
        Self {
            cs: Some(cs),
            sck: Some(sck),
            sdi: Some(sdi),
            sdo: None,
            reset: Some(reset),
            bit_delay_us: 0,
            tx_clk_khz: 0,
        }
    }

    pub fn with_data_in(mut self, sdo: P) -> Self {
        self.sdo = Some(sdo);
        self
    }

    pub fn with_bit_delay_us(mut self, us: u32) -> Self {
        self.bit_delay_us = us;
        self
    }

    pub fn with_tx_clk_khz(mut self, khz: u32) -> Self {
        self.tx_clk_khz = khz;
        self
    }

    pub fn pin(&self, role: PinRole) -> Option<P> {
        match role {
            PinRole::ChipSelect => self.cs,
            PinRole::Clock => self.sck,
            PinRole::DataOut => self.sdi,
            PinRole::DataIn => self.sdo,
            PinRole::Reset => self.reset,
        }
    }

    /// Resolve the pins the bus cannot run without.
    pub fn required_pins(&self) -> Result<BusPins<P>, ConfigError> {
        let need = |role: PinRole| self.pin(role).ok_or(ConfigError::MissingPin { role });
        Ok(BusPins {
            cs: need(PinRole::ChipSelect)?,
            sck: need(PinRole::Clock)?,
            sdi: need(PinRole::DataOut)?,
            reset: need(PinRole::Reset)?,
            sdo: self.sdo,
        })
    }
}

/// Validated pin set: everything but data-in is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusPins<P> {
    pub cs: P,
    pub sck: P,
    pub sdi: P,
    pub reset: P,
    pub sdo: Option<P>,
}

/// Colour depth of the bridge's RGB input (SSD2828 wiring property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    Bpp16,
    Bpp18,
    #[default]
    Bpp24,
}

impl ColorDepth {
    pub const fn bits(self) -> u8 {
        match self {
            ColorDepth::Bpp16 => 16,
            ColorDepth::Bpp18 => 18,
            ColorDepth::Bpp24 => 24,
        }
    }
}

/// Panel and link parameters.
///
/// Apart from `controller`, these are carried through for the bridge
/// configuration logic; the register tables quote fixed values and the bus
/// does not interpret any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub controller: Controller,
    pub color_depth: ColorDepth,
    /// MIPI DSI data lanes, 1..=4.
    pub lanes: u8,
    pub lane_mbps: u16,
    /// Pack 18bpp pixels in a 24bpp envelope on the link.
    pub loosely_packed: bool,
    pub exit_sleep_delay_ms: u32,
    pub display_on_delay_ms: u32,
}

impl PanelConfig {
    pub const fn new(controller: Controller) -> Self {
        Self {
            controller,
            color_depth: ColorDepth::Bpp24,
            lanes: 4,
            lane_mbps: 513,
            loosely_packed: false,
            exit_sleep_delay_ms: 100,
            display_on_delay_ms: 200,
        }
    }

    pub const fn with_lanes(mut self, lanes: u8, mbps: u16) -> Self {
        self.lanes = lanes;
        self.lane_mbps = mbps;
        self
    }

    pub const fn with_color_depth(mut self, depth: ColorDepth) -> Self {
        self.color_depth = depth;
        self
    }

    pub const fn with_loose_packing(mut self, loose: bool) -> Self {
        self.loosely_packed = loose;
        self
    }

    pub const fn with_settle_delays(mut self, exit_sleep_ms: u32, display_on_ms: u32) -> Self {
        self.exit_sleep_delay_ms = exit_sleep_ms;
        self.display_on_delay_ms = display_on_ms;
        self
    }
}
