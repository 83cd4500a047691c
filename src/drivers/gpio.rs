// Digital I/O boundary consumed by the bus master.
//
// The bus never touches registers; everything goes through
// GpioController, so any GPIO-capable pin can carry the bus.
// HalPins adapts five embedded-hal pins to that interface.

use core::fmt;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Level::High } else { Level::Low }
    }

    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    /// Output, driven to the given level as part of the switch.
    Output(Level),
}

/// Logical signal a pin carries on the bus.
///
/// Names follow the controller side of the wire: `DataOut` is the master's
/// output, which lands on the chip's SDI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    ChipSelect,
    Clock,
    DataOut,
    DataIn,
    Reset,
}

impl PinRole {
    pub const ALL: [PinRole; 5] = [
        PinRole::ChipSelect,
        PinRole::Clock,
        PinRole::DataOut,
        PinRole::DataIn,
        PinRole::Reset,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PinRole::ChipSelect => "csx",
            PinRole::Clock => "sck",
            PinRole::DataOut => "sdi",
            PinRole::DataIn => "sdo",
            PinRole::Reset => "reset",
        }
    }

    /// Owner label handed to `GpioController::claim`.
    pub const fn label(self) -> &'static str {
        match self {
            PinRole::ChipSelect => "panel_csx",
            PinRole::Clock => "panel_sck",
            PinRole::DataOut => "panel_sdi",
            PinRole::DataIn => "panel_sdo",
            PinRole::Reset => "panel_reset",
        }
    }

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by `claim` when the pin already has an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBusy;

pub trait GpioController {
    type Pin: Copy + PartialEq + fmt::Debug;

    fn claim(&mut self, pin: Self::Pin, label: &'static str) -> Result<(), PinBusy>;
    fn release(&mut self, pin: Self::Pin);
    fn set_direction(&mut self, pin: Self::Pin, direction: Direction);
    fn set_level(&mut self, pin: Self::Pin, level: Level);
    fn level(&mut self, pin: Self::Pin) -> Level;
}

// ── embedded-hal adapter ────────────────────────────────────────────────

/// Placeholder for a data-in line that is not wired up. Always reads low.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unwired;

impl ErrorType for Unwired {
    type Error = core::convert::Infallible;
}

impl InputPin for Unwired {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// The five bus pins as typed embedded-hal pins, addressed by `PinRole`.
///
/// Pin direction is fixed by the pin types, so `set_direction` only applies
/// the initial output level. Claims are tracked here because the pins are
/// owned by value and nothing else can reach them.
pub struct HalPins<CS, SCK, SDI, SDO, RST> {
    cs: CS,
    sck: SCK,
    sdi: SDI,
    sdo: SDO,
    rst: RST,
    claimed: u8,
}

impl<CS, SCK, SDI, SDO, RST> HalPins<CS, SCK, SDI, SDO, RST>
where
    CS: OutputPin,
    SCK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
    RST: OutputPin,
{
    pub fn new(cs: CS, sck: SCK, sdi: SDI, sdo: SDO, rst: RST) -> Self {
        Self {
            cs,
            sck,
            sdi,
            sdo,
            rst,
            claimed: 0,
        }
    }

    pub fn is_claimed(&self, role: PinRole) -> bool {
        self.claimed & role.mask() != 0
    }

    pub fn release_all(self) -> (CS, SCK, SDI, SDO, RST) {
        (self.cs, self.sck, self.sdi, self.sdo, self.rst)
    }
}

#[inline]
fn drive<P: OutputPin>(pin: &mut P, level: Level) {
    let _ = pin.set_state(level.into());
}

impl<CS, SCK, SDI, SDO, RST> GpioController for HalPins<CS, SCK, SDI, SDO, RST>
where
    CS: OutputPin,
    SCK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
    RST: OutputPin,
{
    type Pin = PinRole;

    fn claim(&mut self, pin: PinRole, _label: &'static str) -> Result<(), PinBusy> {
        if self.is_claimed(pin) {
            return Err(PinBusy);
        }
        self.claimed |= pin.mask();
        Ok(())
    }

    fn release(&mut self, pin: PinRole) {
        self.claimed &= !pin.mask();
    }

    fn set_direction(&mut self, pin: PinRole, direction: Direction) {
        if let Direction::Output(level) = direction {
            self.set_level(pin, level);
        }
    }

    fn set_level(&mut self, pin: PinRole, level: Level) {
        match pin {
            PinRole::ChipSelect => drive(&mut self.cs, level),
            PinRole::Clock => drive(&mut self.sck, level),
            PinRole::DataOut => drive(&mut self.sdi, level),
            PinRole::Reset => drive(&mut self.rst, level),
            PinRole::DataIn => {} // input only
        }
    }

    // only the data-in line is readable; outputs report low
    fn level(&mut self, pin: PinRole) -> Level {
        match pin {
            PinRole::DataIn => Level::from_bit(self.sdo.is_high().unwrap_or(false)),
            _ => Level::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakePin(Rc<Cell<bool>>);

    impl ErrorType for FakePin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.set(true);
            Ok(())
        }
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }
    }

    #[test]
    fn hal_pins_reject_double_claim() {
        let mut pins = HalPins::new(
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
            Unwired,
            FakePin::default(),
        );
        assert_eq!(pins.claim(PinRole::Clock, "a"), Ok(()));
        assert_eq!(pins.claim(PinRole::Clock, "b"), Err(PinBusy));
        pins.release(PinRole::Clock);
        pins.release(PinRole::Clock);
        assert!(!pins.is_claimed(PinRole::Clock));
        assert_eq!(pins.claim(PinRole::Clock, "b"), Ok(()));
    }

    #[test]
    fn hal_pins_route_levels_by_role() {
        let cs = FakePin::default();
        let sdo = FakePin::default();
        let mut pins = HalPins::new(
            cs.clone(),
            FakePin::default(),
            FakePin::default(),
            sdo.clone(),
            FakePin::default(),
        );

        pins.set_direction(PinRole::ChipSelect, Direction::Output(Level::High));
        assert!(cs.0.get());
        pins.set_level(PinRole::ChipSelect, Level::Low);
        assert!(!cs.0.get());

        sdo.0.set(true);
        assert_eq!(pins.level(PinRole::DataIn), Level::High);
    }
}
