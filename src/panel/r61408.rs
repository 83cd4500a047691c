// Renesas R61408 480x800 TFT controller
//
// No ID probe: the table is sent as soon as reset settles. Chip-select
// stays asserted for the whole table.

use super::procedure::{Procedure, ResetTiming, Stage, Step};
use crate::drivers::bitbang::Framing;

const GAMMA: &[u8] = &[
    0x02, 0x13, 0x18, 0x25, 0x34, 0x4E, 0x36, 0x23, 0x17, 0x0E, 0x0C, 0x02, //
    0x02, 0x13, 0x18, 0x25, 0x34, 0x4E, 0x36, 0x23, 0x17, 0x0E, 0x0C, 0x02,
];

const INIT: &[Step] = &[
    Step::new(0x11, &[]).then_wait_ms(40), // sleep out
    Step::new(0xB0, &[0x04]),
    Step::new(0xB3, &[0x10, 0x00, 0x00]),
    Step::new(0xB6, &[0x52, 0x83]),
    Step::new(0xB7, &[0x80, 0x72, 0x11, 0x25]),
    Step::new(
        0xB8,
        &[
            0x00, 0x0F, 0x0F, 0xFF, 0xFF, 0xC8, 0xC8, 0x02, 0x18, 0x10, 0x10, 0x37,
            0x5A, 0x87, 0xBE, 0xFF, 0x00, 0x00, 0x00, 0x00,
        ],
    ),
    Step::new(0xB9, &[0x00, 0x00, 0x00, 0x00]),
    Step::new(0xBD, &[0x00]),
    Step::new(0xC0, &[0x02, 0x76]),
    Step::new(
        0xC1,
        &[
            0x63, 0x31, 0x00, 0x27, 0x27, 0x32, 0x12, 0x28, 0x4E, 0x10, 0xA5, 0x0F,
            0x58, 0x21, 0x01,
        ],
    ),
    Step::new(0xC2, &[0x28, 0x06, 0x06, 0x01, 0x03, 0x00]),
    Step::new(0xC3, &[0x40, 0x00, 0x03]),
    Step::new(0xC4, &[0x00, 0x01]),
    Step::new(0xC6, &[0x00, 0x00]),
    Step::new(0xC7, &[0x11, 0x8D, 0xA0, 0xF5, 0x27]),
    Step::new(0xC8, GAMMA),
    Step::new(0xC9, GAMMA),
    Step::new(0xCA, GAMMA),
    Step::new(
        0xD0,
        &[
            0xA9, 0x03, 0xCC, 0xA5, 0x00, 0x53, 0x20, 0x10, 0x01, 0x00, 0x01, 0x01,
            0x00, 0x03, 0x01, 0x00,
        ],
    ),
    Step::new(0xD1, &[0x18, 0x0C, 0x23, 0x03, 0x75, 0x02, 0x50]),
    Step::new(0xD3, &[0x33]),
    Step::new(0xD5, &[0x2A, 0x2A]),
    Step::new(0xD6, &[0x28]),
    Step::new(
        0xD7,
        &[
            0x01, 0x00, 0xAA, 0xC0, 0x2A, 0x2C, 0x22, 0x12, 0x71, 0x0A, 0x12, 0x00,
            0xA0, 0x00, 0x03,
        ],
    ),
    Step::new(0xD8, &[0x44, 0x44, 0x22, 0x44, 0x21, 0x46, 0x42, 0x40]),
    Step::new(0xD9, &[0xCF, 0x2D, 0x51]),
    Step::new(0xDA, &[0x01]),
    Step::new(0xDE, &[0x01, 0x51]),
    Step::new(0xE1, &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    Step::new(0xE6, &[0x55]),
    Step::new(0xF3, &[0x06, 0x00, 0x00, 0x24, 0x00]),
    Step::new(0xF8, &[0x00]),
    Step::new(0xFA, &[0x01]),
    Step::new(0xFB, &[0x00, 0x00, 0x00]),
    Step::new(0xFC, &[0x00, 0x00, 0x00, 0x00, 0x00]),
    Step::new(
        0xFD,
        &[
            0x00, 0x00, 0x70, 0x00, 0x72, 0x31, 0x37, 0x70, 0x32, 0x31, 0x07, 0x00,
            0x00,
        ],
    ),
    Step::new(0xFE, &[0x00, 0x00, 0x00, 0x00, 0x20]),
    Step::new(0xB0, &[0x04]).then_wait_ms(40),
    Step::new(0x35, &[0x00]),
    Step::new(0x44, &[0x00]),
    Step::new(0x36, &[0x00]),
    Step::new(0x3A, &[0x77]), // 24bpp
    Step::new(0x2A, &[0x00, 0x00, 0x01, 0xDF]), // columns 0..=479
    Step::new(0x2B, &[0x00, 0x00, 0x03, 0x1F]), // rows 0..=799
    Step::new(0x29, &[]).then_wait_ms(10),
    Step::new(0x2C, &[]).then_wait_ms(10),
    Step::new(0x36, &[0x08]),
];

pub const PROCEDURE: Procedure = Procedure {
    name: "r61408",
    framing: Framing {
        idle_data_high: false,
        deselect_per_step: false,
    },
    bit_delay_us: 1,
    reset: ResetTiming {
        lead_in_ms: 2,
        assert_ms: 10,
        settle_ms: 10,
    },
    stages: &[Stage::Direct(INIT)],
};
