// Recording GPIO + delay backend for host tests.
//
// Both halves append to one shared trace so pin activity and waits stay in
// order. decode() replays the trace as a bus analyser would: 9-bit frames
// sampled on rising clock edges while chip-select is low.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use super::gpio::{Direction, GpioController, Level, PinBusy};

pub mod pins {
    pub const CS: u8 = 4;
    pub const SCK: u8 = 2;
    pub const SDI: u8 = 3;
    pub const SDO: u8 = 1;
    pub const RST: u8 = 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Claim(u8),
    Release(u8),
    Direction(u8, Direction),
    Set(u8, Level),
    Sample(u8, Level),
    WaitNs(u32),
    WaitUs(u32),
    WaitMs(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub struct MockGpio {
    trace: Trace,
    claimed: BTreeSet<u8>,
    busy: BTreeSet<u8>,
    readback: VecDeque<bool>,
}

impl MockGpio {
    pub fn new() -> (Self, Trace) {
        let trace = Trace::default();
        let gpio = Self {
            trace: trace.clone(),
            claimed: BTreeSet::new(),
            busy: BTreeSet::new(),
            readback: VecDeque::new(),
        };
        (gpio, trace)
    }

    /// Pretend another driver owns `pin`.
    pub fn mark_busy(&mut self, pin: u8) {
        self.busy.insert(pin);
    }

    /// Bytes the data-in line will present, MSB first, one bit per sample.
    pub fn queue_readback(&mut self, bytes: &[u8]) {
        for &b in bytes {
            for i in (0..8).rev() {
                self.readback.push_back(b & (1 << i) != 0);
            }
        }
    }

    pub fn claimed(&self) -> &BTreeSet<u8> {
        &self.claimed
    }

    fn log(&self, event: Event) {
        self.trace.borrow_mut().push(event);
    }
}

impl GpioController for MockGpio {
    type Pin = u8;

    fn claim(&mut self, pin: u8, _label: &'static str) -> Result<(), PinBusy> {
        if self.busy.contains(&pin) || !self.claimed.insert(pin) {
            return Err(PinBusy);
        }
        self.log(Event::Claim(pin));
        Ok(())
    }

    fn release(&mut self, pin: u8) {
        if self.claimed.remove(&pin) {
            self.log(Event::Release(pin));
        }
    }

    fn set_direction(&mut self, pin: u8, direction: Direction) {
        self.log(Event::Direction(pin, direction));
    }

    fn set_level(&mut self, pin: u8, level: Level) {
        self.log(Event::Set(pin, level));
    }

    fn level(&mut self, pin: u8) -> Level {
        let level = Level::from_bit(self.readback.pop_front().unwrap_or(false));
        self.log(Event::Sample(pin, level));
        level
    }
}

pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Event::WaitNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Event::WaitUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Event::WaitMs(ms));
    }
}

/// What a bus analyser would report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Cmd(u8),
    Data(u8),
    Read(u8),
    Deselect,
    Reset(Level),
    WaitMs(u32),
}

/// Data-out level at every rising clock edge.
pub fn samples_at_clock_high(trace: &[Event]) -> Vec<bool> {
    let mut sdi = false;
    let mut sck = true;
    let mut out = Vec::new();
    for e in trace {
        match *e {
            Event::Set(pins::SDI, level) => sdi = level.is_high(),
            Event::Set(pins::SCK, level) => {
                if !sck && level.is_high() {
                    out.push(sdi);
                }
                sck = level.is_high();
            }
            _ => {}
        }
    }
    out
}

pub fn decode(trace: &[Event]) -> Vec<Op> {
    let mut ops = Vec::new();
    let mut cs = true;
    let mut sck = true;
    let mut sdi = false;
    let mut sampled = false;
    let mut write_bits: u16 = 0;
    let mut write_len = 0;
    let mut read_bits: u8 = 0;
    let mut read_len = 0;

    for e in trace {
        match *e {
            Event::Direction(pins::CS, Direction::Output(level)) => cs = level.is_high(),
            Event::Direction(pins::SCK, Direction::Output(level)) => sck = level.is_high(),
            Event::Direction(pins::SDI, Direction::Output(level)) => sdi = level.is_high(),
            Event::Set(pins::CS, level) => {
                if !cs && level.is_high() {
                    ops.push(Op::Deselect);
                }
                cs = level.is_high();
            }
            Event::Set(pins::RST, level) => ops.push(Op::Reset(level)),
            Event::Set(pins::SDI, level) => sdi = level.is_high(),
            Event::Set(pins::SCK, level) => {
                let rising = !sck && level.is_high();
                sck = level.is_high();
                if !rising || cs {
                    continue;
                }
                if sampled {
                    sampled = false;
                    continue;
                }
                write_bits = (write_bits << 1) | sdi as u16;
                write_len += 1;
                if write_len == 9 {
                    let byte = (write_bits & 0xFF) as u8;
                    ops.push(if write_bits & 0x100 != 0 {
                        Op::Data(byte)
                    } else {
                        Op::Cmd(byte)
                    });
                    write_bits = 0;
                    write_len = 0;
                }
            }
            Event::Sample(_, level) => {
                sampled = true;
                read_bits = (read_bits << 1) | level.is_high() as u8;
                read_len += 1;
                if read_len == 8 {
                    ops.push(Op::Read(read_bits));
                    read_bits = 0;
                    read_len = 0;
                }
            }
            Event::WaitMs(ms) => ops.push(Op::WaitMs(ms)),
            _ => {}
        }
    }
    ops
}

/// Only the transfers, without waits, resets or chip-select edges.
pub fn transfers(trace: &[Event]) -> Vec<Op> {
    decode(trace)
        .into_iter()
        .filter(|op| matches!(op, Op::Cmd(_) | Op::Data(_) | Op::Read(_)))
        .collect()
}
