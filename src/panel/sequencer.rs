// Linear interpreter over a Procedure
//
// UNINITIALIZED -> RESETTING -> RUNNING -> COMPLETE. Nothing past pin
// acquisition can fail, so there is no error state.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use super::procedure::{Detect, Procedure, ResetTiming, Stage, Step};
use super::ssd2828;
use crate::drivers::bitbang::BitBang;
use crate::drivers::gpio::{GpioController, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Resetting,
    Running,
    Complete,
}

/// What one run did on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    /// Outcome of the ID readback, if the procedure has one.
    pub detected: Option<bool>,
    /// Sequence steps replayed (unlock and read commands included).
    pub steps: usize,
}

pub struct Sequencer<'a, G: GpioController, D> {
    bus: BitBang<'a, G, D>,
    state: State,
    report: Report,
}

impl<'a, G, D> Sequencer<'a, G, D>
where
    G: GpioController,
    D: DelayNs,
{
    pub fn new(bus: BitBang<'a, G, D>) -> Self {
        Self {
            bus,
            state: State::Uninitialized,
            report: Report::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn run(&mut self, procedure: &Procedure) -> Report {
        self.report = Report::default();

        self.state = State::Resetting;
        self.reset(&procedure.reset);

        self.state = State::Running;
        for (i, stage) in procedure.stages.iter().enumerate() {
            debug!("{}: stage {}/{}", procedure.name, i + 1, procedure.stages.len());
            match stage {
                Stage::Direct(steps) => self.run_sequence(steps),
                Stage::Bridged(steps) => self.run_bridged(steps),
                Stage::Detect(detect) => {
                    let found = self.detect_and_branch(detect);
                    self.report.detected = Some(found);
                }
            }
        }

        self.state = State::Complete;
        self.report
    }

    /// Chip-select idle, reset pulse, settle.
    pub fn reset(&mut self, timing: &ResetTiming) {
        self.bus.deselect();
        self.bus.set_reset(Level::High);
        self.bus.wait_ms(timing.lead_in_ms);
        self.bus.set_reset(Level::Low);
        self.bus.wait_ms(timing.assert_ms);
        self.bus.set_reset(Level::High);
        self.bus.wait_ms(timing.settle_ms);
    }

    /// Replay steps in order: command, its data bytes, delay.
    pub fn run_sequence(&mut self, steps: &[Step]) {
        let deselect = self.bus.framing().deselect_per_step;
        for step in steps {
            self.bus.write_command(step.cmd);
            for &byte in step.data {
                self.bus.write_data(byte);
            }
            if deselect {
                self.bus.deselect();
            }
            self.bus.wait_ms(step.delay_ms);
        }
        self.report.steps += steps.len();
    }

    /// Replay steps through the SSD2828, one generic packet each.
    pub fn run_bridged(&mut self, steps: &[Step]) {
        for step in steps {
            ssd2828::send_packet(&mut self.bus, step);
            self.bus.wait_ms(step.delay_ms);
        }
        self.report.steps += steps.len();
    }

    /// Read the two ID bytes and run the matching table once.
    ///
    /// A mismatch is not an error: nothing is sent and the run carries on.
    pub fn detect_and_branch(&mut self, detect: &Detect) -> bool {
        self.run_sequence(detect.unlock);

        self.bus.write_command(detect.read_cmd);
        for _ in 0..detect.dummy_reads {
            self.bus.read_byte();
        }
        let id = [self.bus.read_byte(), self.bus.read_byte()];
        self.bus.deselect();
        self.report.steps += 1;

        self.run_sequence(detect.unlock);

        if id == detect.id {
            info!("panel id {:02x} {:02x} matched", id[0], id[1]);
            self.run_sequence(detect.on_match);
            true
        } else {
            info!(
                "panel id {:02x} {:02x} (want {:02x} {:02x}), table skipped",
                id[0], id[1], detect.id[0], detect.id[1]
            );
            false
        }
    }
}
