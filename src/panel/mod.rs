// Panel bring-up: controller procedures and the sequencer that replays them.
//
// initialize_panel is the only entry point the board code needs. It
// validates the configuration, claims the bus pins, pulses reset and
// replays the selected controller's procedure. Pins are released on return.

pub mod procedure;
pub mod r61408;
pub mod r61529;
pub mod sequencer;
pub mod ssd2828;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::{BusConfig, PanelConfig};
use crate::drivers::claim::acquire;
use crate::drivers::gpio::{GpioController, PinRole};
use crate::error::ConfigError;
use procedure::Procedure;
use sequencer::{Report, Sequencer};

/// Panel controllers this crate can bring up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// SSD2828 MIPI bridge in front of an HX8394 720x1280 panel.
    Ssd2828Hx8394,
    /// R61529, programmed only after its ID reads back.
    R61529,
    R61408,
}

impl Controller {
    pub const fn procedure(self) -> &'static Procedure {
        match self {
            Controller::Ssd2828Hx8394 => &ssd2828::PROCEDURE,
            Controller::R61529 => &r61529::PROCEDURE,
            Controller::R61408 => &r61408::PROCEDURE,
        }
    }

    pub const fn name(self) -> &'static str {
        self.procedure().name
    }

    /// Whether bring-up reads from the chip, and so needs a data-in pin.
    pub fn needs_readback(self) -> bool {
        self.procedure().needs_readback()
    }

    pub const fn default_bit_delay_us(self) -> u32 {
        self.procedure().bit_delay_us
    }
}

/// Bring the configured panel from reset to displaying.
///
/// Fails only on configuration problems, before anything is driven. A
/// detection variant whose ID does not match still returns `Ok`.
pub fn initialize_panel<G, D>(
    gpio: &mut G,
    delay: &mut D,
    bus: &BusConfig<G::Pin>,
    panel: &PanelConfig,
) -> Result<(), ConfigError>
where
    G: GpioController,
    D: DelayNs,
{
    bring_up(gpio, delay, bus, panel).map(|_| ())
}

/// `initialize_panel`, also reporting what happened on the wire.
pub fn bring_up<G, D>(
    gpio: &mut G,
    delay: &mut D,
    bus: &BusConfig<G::Pin>,
    panel: &PanelConfig,
) -> Result<Report, ConfigError>
where
    G: GpioController,
    D: DelayNs,
{
    let controller = panel.controller;
    let procedure = controller.procedure();

    let pins = bus.required_pins().inspect_err(|e| warn!("panel bus: {}", e))?;
    if procedure.needs_readback() && pins.sdo.is_none() {
        let err = ConfigError::MissingPin {
            role: PinRole::DataIn,
        };
        warn!("panel bus: {} ({} reads its ID)", err, procedure.name);
        return Err(err);
    }

    let bit_delay_us = match bus.bit_delay_us {
        0 => procedure.bit_delay_us,
        us => us,
    };

    info!(
        "panel: {} ({} lanes @ {} Mbps, {} bpp{}, tx_clk {} kHz, bit {} us)",
        procedure.name,
        panel.lanes,
        panel.lane_mbps,
        panel.color_depth.bits(),
        if panel.loosely_packed { " loose" } else { "" },
        bus.tx_clk_khz,
        bit_delay_us,
    );

    let mut claim = acquire(gpio, bus)?;
    let report = {
        let transport = claim.transport(delay, bit_delay_us, procedure.framing);
        let mut seq = Sequencer::new(transport);
        seq.run(procedure)
    };
    claim.release();

    match report.detected {
        Some(false) => info!("panel: {} not detected, left unprogrammed", procedure.name),
        _ => info!("panel: {} up, {} steps", procedure.name, report.steps),
    }
    Ok(report)
}
