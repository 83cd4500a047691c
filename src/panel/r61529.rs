// Renesas R61529 320x480 TFT controller
//
// Probed before programming: after unlocking manufacturer commands the
// device-code register (BF) returns three dummy bytes, then the ID. Only a
// panel answering 0x15 0x29 gets the table. Chip-select is released after
// every step; this controller latches parameters on the CS edge.

use super::procedure::{Detect, Procedure, ResetTiming, Stage, Step};
use crate::drivers::bitbang::Framing;

pub const DEVICE_ID: [u8; 2] = [0x15, 0x29];

const READ_DEVICE_CODE: u8 = 0xBF;

const UNLOCK: &[Step] = &[Step::new(0xB0, &[0x04])];

// same curve for R, G and B; positive then negative polarity
const GAMMA: &[u8] = &[
    0x06, 0x0C, 0x16, 0x24, 0x30, 0x48, 0x3D, 0x28, 0x20, 0x14, 0x0C, 0x04, //
    0x06, 0x0C, 0x16, 0x24, 0x30, 0x48, 0x3D, 0x28, 0x20, 0x14, 0x0C, 0x04,
];

const INIT: &[Step] = &[
    Step::new(0xB4, &[0x00]),
    Step::new(0xB0, &[0x04]),
    Step::new(0x20, &[]), // exit invert mode
    Step::new(0x36, &[0x6A]),
    Step::new(0x3A, &[0x77]), // 24bpp
    Step::new(0xB3, &[0x02, 0x00, 0x00, 0x20]),
    Step::new(0xC0, &[0x03, 0xDF, 0x40, 0x12, 0x00, 0x01, 0x00, 0x55]),
    Step::new(0xC1, &[0x07, 0x28, 0x08, 0x08, 0x00]),
    Step::new(0xC4, &[0x70, 0x00, 0x03, 0x01]),
    Step::new(0xC6, &[0x1D]),
    Step::new(0xC8, GAMMA),
    Step::new(0xC9, GAMMA),
    Step::new(0xCA, GAMMA),
    Step::new(0xD0, &[0x95, 0x0A, 0x08, 0x10, 0x39]),
    Step::new(0xD1, &[0x02, 0x2C, 0x2C, 0x44, 0x00]),
    Step::new(0x11, &[]).then_wait_ms(7),
    Step::new(0x29, &[]).then_wait_ms(7),
    Step::new(0x2C, &[]),
    Step::new(0x36, &[0x00]),
];

const STAGES: &[Stage] = &[Stage::Detect(Detect {
    unlock: UNLOCK,
    read_cmd: READ_DEVICE_CODE,
    dummy_reads: 3,
    id: DEVICE_ID,
    on_match: INIT,
})];

pub const PROCEDURE: Procedure = Procedure {
    name: "r61529",
    framing: Framing {
        idle_data_high: false,
        deselect_per_step: true,
    },
    bit_delay_us: 1,
    reset: ResetTiming {
        lead_in_ms: 2,
        assert_ms: 10,
        settle_ms: 10,
    },
    stages: STAGES,
};
