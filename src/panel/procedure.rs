// Bring-up procedures as data.
//
// A procedure quotes a controller's documented init: reset timing, then an
// ordered list of stages. Steps are replayed exactly as listed; they are
// never reordered, merged or skipped.

use crate::drivers::bitbang::Framing;

/// One controller transaction: command, parameters, then a settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub cmd: u8,
    pub data: &'static [u8],
    pub delay_ms: u32,
}

impl Step {
    pub const fn new(cmd: u8, data: &'static [u8]) -> Self {
        Self {
            cmd,
            data,
            delay_ms: 0,
        }
    }

    pub const fn then_wait_ms(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }
}

/// Reset pulse: lead-in with reset released, hold asserted (low), settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    pub lead_in_ms: u32,
    pub assert_ms: u32,
    pub settle_ms: u32,
}

/// ID readback used to pick a register table.
///
/// Unlock steps run, `read_cmd` is sent, `dummy_reads` bytes are discarded
/// and the next two compared with `id`. Chip-select is released and the
/// unlock steps repeated before `on_match` runs. A mismatch runs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detect {
    pub unlock: &'static [Step],
    pub read_cmd: u8,
    pub dummy_reads: u8,
    pub id: [u8; 2],
    pub on_match: &'static [Step],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Steps addressed to the chip on the bus.
    Direct(&'static [Step]),
    /// Steps for the panel behind an SSD2828, sent as generic packets.
    Bridged(&'static [Step]),
    Detect(Detect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Procedure {
    pub name: &'static str,
    pub framing: Framing,
    pub bit_delay_us: u32,
    pub reset: ResetTiming,
    pub stages: &'static [Stage],
}

impl Procedure {
    pub fn needs_readback(&self) -> bool {
        self.stages.iter().any(|s| matches!(s, Stage::Detect(_)))
    }

    /// Transactions on the wire if every branch is taken.
    pub fn max_steps(&self) -> usize {
        self.stages
            .iter()
            .map(|stage| match stage {
                Stage::Direct(steps) | Stage::Bridged(steps) => steps.len(),
                Stage::Detect(d) => 2 * d.unlock.len() + 1 + d.on_match.len(),
            })
            .sum()
    }

    /// Sum of all step delays plus the reset pulse, in milliseconds.
    pub fn settle_budget_ms(&self) -> u32 {
        let steps = |s: &[Step]| s.iter().map(|s| s.delay_ms).sum::<u32>();
        let stages: u32 = self
            .stages
            .iter()
            .map(|stage| match stage {
                Stage::Direct(s) | Stage::Bridged(s) => steps(*s),
                Stage::Detect(d) => 2 * steps(d.unlock) + steps(d.on_match),
            })
            .sum();
        self.reset.lead_in_ms + self.reset.assert_ms + self.reset.settle_ms + stages
    }
}
