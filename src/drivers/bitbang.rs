// 3-wire 9-bit SPI master on plain GPIOs
//
// Every byte is preceded by a D/C bit (0 = command, 1 = data) clocked like
// a data bit. Bits go out MSB first: clock low, drive data, wait, clock high,
// wait. The controller samples on the rising edge.
//
// Chip-select is asserted by each transfer and left asserted; callers
// decide when to deselect (see Framing). A byte is clocked inside a
// critical section: the controllers cannot resume a half-clocked byte.
//
// Slow on purpose (hundreds of bytes take milliseconds) so any pin works.

use embedded_hal::delay::DelayNs;

use super::gpio::{GpioController, Level};
use crate::config::BusPins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Command,
    Data,
}

impl Kind {
    #[inline]
    const fn flag(self) -> Level {
        match self {
            Kind::Command => Level::Low,
            Kind::Data => Level::High,
        }
    }
}

/// Controller-specific details of how transfers are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    /// Drive data-out high once a byte has been clocked out.
    pub idle_data_high: bool,
    /// Deassert chip-select after every sequence step.
    pub deselect_per_step: bool,
}

pub struct BitBang<'a, G: GpioController, D> {
    gpio: &'a mut G,
    delay: &'a mut D,
    pins: BusPins<G::Pin>,
    unit_us: u32,
    framing: Framing,
}

impl<'a, G, D> BitBang<'a, G, D>
where
    G: GpioController,
    D: DelayNs,
{
    pub fn new(
        gpio: &'a mut G,
        delay: &'a mut D,
        pins: BusPins<G::Pin>,
        unit_us: u32,
        framing: Framing,
    ) -> Self {
        Self {
            gpio,
            delay,
            pins,
            unit_us,
            framing,
        }
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn can_read(&self) -> bool {
        self.pins.sdo.is_some()
    }

    pub fn write_command(&mut self, cmd: u8) {
        self.write_byte(cmd, Kind::Command);
    }

    pub fn write_data(&mut self, byte: u8) {
        self.write_byte(byte, Kind::Data);
    }

    pub fn write_byte(&mut self, value: u8, kind: Kind) {
        critical_section::with(|_| {
            self.gpio.set_level(self.pins.cs, Level::Low);
            self.clock_out(kind.flag());
            for bit in (0..8).rev() {
                self.clock_out(Level::from_bit(value & (1 << bit) != 0));
            }
            if self.framing.idle_data_high {
                self.gpio.set_level(self.pins.sdi, Level::High);
            }
        });
    }

    /// Clock in one byte, MSB first, sampling data-in while the clock is low.
    /// Data-out keeps whatever the previous write left on it.
    pub fn read_byte(&mut self) -> u8 {
        // procedures that read are refused at init when data-in is absent
        let Some(sdo) = self.pins.sdo else {
            return 0;
        };

        critical_section::with(|_| {
            self.gpio.set_level(self.pins.cs, Level::Low);
            let mut value = 0u8;
            for i in 0..8 {
                self.gpio.set_level(self.pins.sck, Level::Low);
                self.delay.delay_us(self.unit_us);
                if self.gpio.level(sdo).is_high() {
                    value |= 0x80 >> i;
                }
                self.gpio.set_level(self.pins.sck, Level::High);
                self.delay.delay_us(self.unit_us);
            }
            value
        })
    }

    pub fn deselect(&mut self) {
        self.gpio.set_level(self.pins.cs, Level::High);
    }

    pub fn set_reset(&mut self, level: Level) {
        self.gpio.set_level(self.pins.reset, level);
    }

    pub fn wait_ms(&mut self, ms: u32) {
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
    }

    #[inline]
    fn clock_out(&mut self, bit: Level) {
        self.gpio.set_level(self.pins.sck, Level::Low);
        self.gpio.set_level(self.pins.sdi, bit);
        self.delay.delay_us(self.unit_us);
        self.gpio.set_level(self.pins.sck, Level::High);
        self.delay.delay_us(self.unit_us);
    }
}
