// Pin acquisition for the duration of one bring-up.
//
// Claims happen in wiring order (csx, sck, sdi, reset, sdo). A refused
// claim hands back everything taken so far before reporting. The returned
// guard releases all pins on drop, so early returns cannot leak claims.

use embedded_hal::delay::DelayNs;
use log::warn;

use super::bitbang::{BitBang, Framing};
use super::gpio::{Direction, GpioController, Level, PinRole};
use crate::config::{BusConfig, BusPins};
use crate::error::ConfigError;

pub struct Claim<'a, G: GpioController> {
    gpio: &'a mut G,
    pins: BusPins<G::Pin>,
    held: bool,
}

/// Claim every configured pin and put it in its bus direction.
///
/// Outputs start high: chip-select idle, reset released, clock and data
/// parked high. Data-in, when present, becomes an input.
pub fn acquire<'a, G: GpioController>(
    gpio: &'a mut G,
    bus: &BusConfig<G::Pin>,
) -> Result<Claim<'a, G>, ConfigError> {
    let pins = bus.required_pins().inspect_err(|e| warn!("panel bus: {}", e))?;

    let order = wiring_order(&pins);
    for (i, &(role, pin)) in order.iter().enumerate() {
        let Some(pin) = pin else { continue };
        if gpio.claim(pin, role.label()).is_err() {
            warn!("panel bus: request for '{}' pin failed", role.label());
            for &(_, taken) in &order[..i] {
                if let Some(taken) = taken {
                    gpio.release(taken);
                }
            }
            return Err(ConfigError::PinUnavailable { role });
        }
    }

    gpio.set_direction(pins.reset, Direction::Output(Level::High));
    gpio.set_direction(pins.cs, Direction::Output(Level::High));
    gpio.set_direction(pins.sck, Direction::Output(Level::High));
    gpio.set_direction(pins.sdi, Direction::Output(Level::High));
    if let Some(sdo) = pins.sdo {
        gpio.set_direction(sdo, Direction::Input);
    }

    Ok(Claim {
        gpio,
        pins,
        held: true,
    })
}

fn wiring_order<P: Copy>(pins: &BusPins<P>) -> [(PinRole, Option<P>); 5] {
    [
        (PinRole::ChipSelect, Some(pins.cs)),
        (PinRole::Clock, Some(pins.sck)),
        (PinRole::DataOut, Some(pins.sdi)),
        (PinRole::Reset, Some(pins.reset)),
        (PinRole::DataIn, pins.sdo),
    ]
}

impl<'a, G: GpioController> Claim<'a, G> {
    pub fn pins(&self) -> &BusPins<G::Pin> {
        &self.pins
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Borrow the claimed pins as a bus master.
    pub fn transport<'b, D: DelayNs>(
        &'b mut self,
        delay: &'b mut D,
        bit_delay_us: u32,
        framing: Framing,
    ) -> BitBang<'b, G, D> {
        BitBang::new(&mut *self.gpio, delay, self.pins, bit_delay_us, framing)
    }

    /// Return all pins to the unclaimed state. Safe to call repeatedly.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        for (_, pin) in wiring_order(&self.pins) {
            if let Some(pin) = pin {
                self.gpio.release(pin);
            }
        }
        self.held = false;
    }
}

impl<G: GpioController> Drop for Claim<'_, G> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mock::{Event, MockGpio, pins};

    fn full_bus() -> BusConfig<u8> {
        BusConfig::new(pins::CS, pins::SCK, pins::SDI, pins::RST).with_data_in(pins::SDO)
    }

    #[test]
    fn acquire_then_release_leaves_nothing_claimed() {
        let (mut gpio, _) = MockGpio::new();
        for bus in [full_bus(), BusConfig::new(pins::CS, pins::SCK, pins::SDI, pins::RST)] {
            let mut claim = acquire(&mut gpio, &bus).unwrap();
            assert!(claim.is_held());
            claim.release();
            claim.release();
            assert!(!claim.is_held());
            drop(claim);
            assert!(gpio.claimed().is_empty());
        }
    }

    #[test]
    fn drop_releases_claims() {
        let (mut gpio, _) = MockGpio::new();
        {
            let _claim = acquire(&mut gpio, &full_bus()).unwrap();
        }
        assert!(gpio.claimed().is_empty());
    }

    #[test]
    fn missing_required_pin_claims_nothing() {
        let (mut gpio, trace) = MockGpio::new();
        let cases = [
            (BusConfig { cs: None, ..full_bus() }, PinRole::ChipSelect),
            (BusConfig { sck: None, ..full_bus() }, PinRole::Clock),
            (BusConfig { sdi: None, ..full_bus() }, PinRole::DataOut),
        ];
        for (bus, role) in cases {
            let err = acquire(&mut gpio, &bus).err();
            assert_eq!(err, Some(ConfigError::MissingPin { role }));
        }
        assert!(gpio.claimed().is_empty());
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn busy_pin_unwinds_earlier_claims() {
        let (mut gpio, trace) = MockGpio::new();
        gpio.mark_busy(pins::RST);

        let err = acquire(&mut gpio, &full_bus()).err();
        assert_eq!(
            err,
            Some(ConfigError::PinUnavailable {
                role: PinRole::Reset
            })
        );
        assert!(gpio.claimed().is_empty());

        // no pin was driven before the failure
        assert!(
            trace
                .borrow()
                .iter()
                .all(|e| matches!(e, Event::Claim(_) | Event::Release(_)))
        );
    }

    #[test]
    fn outputs_park_high_and_data_in_becomes_input() {
        let (mut gpio, trace) = MockGpio::new();
        let _claim = acquire(&mut gpio, &full_bus()).unwrap();

        let trace = trace.borrow();
        for pin in [pins::RST, pins::CS, pins::SCK, pins::SDI] {
            assert!(trace.contains(&Event::Direction(pin, Direction::Output(Level::High))));
        }
        assert!(trace.contains(&Event::Direction(pins::SDO, Direction::Input)));
    }
}
