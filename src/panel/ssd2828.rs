// SSD2828 MIPI-DSI bridge driving an HX8394 720x1280 panel (6.86", 4 lanes)
//
// The bridge is configured directly over the 3-wire bus. Panel registers
// sit behind it: each panel step is wrapped in a generic packet (size
// registers, then the packet drop register followed by the payload).
// Bring-up: bridge in LP mode -> HX8394 init -> bridge HS video mode.

use embedded_hal::delay::DelayNs;

use super::procedure::{Procedure, ResetTiming, Stage, Step};
use crate::drivers::bitbang::{BitBang, Framing};
use crate::drivers::gpio::GpioController;

mod reg {
    pub const VICR1: u8 = 0xB1; // sync pulse widths
    pub const VICR2: u8 = 0xB2; // back porches
    pub const VICR3: u8 = 0xB3; // front porches
    pub const VICR4: u8 = 0xB4; // horizontal active
    pub const VICR5: u8 = 0xB5; // vertical active
    pub const VICR6: u8 = 0xB6; // video mode / RGB bus width
    pub const CFGR: u8 = 0xB7;
    pub const VCR: u8 = 0xB8; // virtual channel
    pub const PCR: u8 = 0xB9; // PLL enable
    pub const PLCR: u8 = 0xBA; // PLL NS/MS/range
    pub const CCR: u8 = 0xBB; // LP clock divider
    pub const PSCR1: u8 = 0xBC; // packet size, low word
    pub const PSCR2: u8 = 0xBD; // packet size, high word
    pub const PDR: u8 = 0xBF; // packet drop
    pub const DAR1: u8 = 0xC9; // HS data zero / prepare
    pub const DAR2: u8 = 0xCA; // clock prepare / zero
    pub const DAR3: u8 = 0xCB; // clock post / pre
    pub const DAR4: u8 = 0xCC; // HS trail / clock trail
    pub const TR: u8 = 0xD6; // colour order, byte order
    pub const LCFR: u8 = 0xDE; // lane count
}

// CFGR values: LP generic writes while configuring, HS video when done
const CFGR_LP_GENERIC: [u8; 2] = [0x50, 0x02];

// RGB timing for the 6.86" panel
const HSPW: u8 = 3;
const VSPW: u8 = 10;
const HBPD: u8 = 120;
const VBPD: u8 = 15;
const HFPD: u8 = 120;
const VFPD: u8 = 2;

/// Wrap one panel step in a generic packet. Chip-select stays asserted.
pub fn send_packet<G, D>(bus: &mut BitBang<'_, G, D>, step: &Step)
where
    G: GpioController,
    D: DelayNs,
{
    let len = (1 + step.data.len()) as u16;

    bus.write_command(reg::CFGR);
    for b in CFGR_LP_GENERIC {
        bus.write_data(b);
    }
    bus.write_command(reg::PSCR2);
    bus.write_data(0x00);
    bus.write_data(0x00);
    bus.write_command(reg::PSCR1);
    bus.write_data(len as u8);
    bus.write_data((len >> 8) as u8);

    bus.write_command(reg::PDR);
    bus.write_data(step.cmd);
    for &b in step.data {
        bus.write_data(b);
    }
}

// ── Bridge, LP mode ─────────────────────────────────────────────────────

const BRIDGE_LP: &[Step] = &[
    Step::new(reg::CFGR, &[0x50, 0x00]), // TX_CLK as PLL source
    Step::new(reg::VCR, &[0x00, 0x00]),
    Step::new(reg::PCR, &[0x00, 0x00]), // PLL off while reprogramming
    Step::new(reg::PLCR, &[0x14, 0x42]), // 240MHz
    Step::new(reg::CCR, &[0x04, 0x00]),
    Step::new(reg::LCFR, &[0x03, 0x00]), // 4 lanes
    Step::new(reg::DAR1, &[0x02, 0x23]),
];

// ── HX8394-D panel (through the bridge) ─────────────────────────────────

const HX8394: &[Step] = &[
    Step::new(0xB9, &[0xFF, 0x83, 0x94]),
    Step::new(0xBA, &[0x73, 0x83]),
    Step::new(
        0xB1,
        &[
            0x6C, 0x0C, 0x0D, 0x25, 0x04, 0x11, 0xF1, 0x81, 0x5C, 0xE6, 0x23, 0x80,
            0xC0, 0xD2, 0x58,
        ],
    ),
    Step::new(0xB2, &[0x00, 0x64, 0x0F, 0x09, 0x24, 0x1C, 0x08, 0x08, 0x1C, 0x4D, 0x00, 0x00]),
    Step::new(0xB4, &[0x00, 0xFF, 0x01, 0x5A, 0x01, 0x5A, 0x01, 0x5A, 0x01, 0x6C, 0x01, 0x6C]),
    Step::new(0xBF, &[0x41, 0x0E, 0x01]),
    Step::new(
        0xD3,
        &[
            0x00, 0x07, 0x00, 0x64, 0x07, 0x08, 0x08, 0x32, 0x10, 0x07, 0x00, 0x07,
            0x32, 0x10, 0x03, 0x00, 0x03, 0x00, 0x32, 0x10, 0x08, 0x00, 0x35, 0x33,
            0x09, 0x09, 0x37, 0x0D, 0x07, 0x37, 0x0E, 0x08,
        ],
    ),
    Step::new(
        0xD5,
        &[
            0x18, 0x18, 0x24, 0x24, 0x1A, 0x1A, 0x1B, 0x1B, 0x04, 0x05, 0x06, 0x07,
            0x00, 0x01, 0x02, 0x03, 0x18, 0x18, 0x19, 0x19, 0x20, 0x21, 0x22, 0x23,
            0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
            0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
        ],
    ),
    Step::new(
        0xD6,
        &[
            0x19, 0x19, 0x24, 0x24, 0x1A, 0x1A, 0x1B, 0x1B, 0x03, 0x02, 0x01, 0x00,
            0x07, 0x06, 0x05, 0x04, 0x18, 0x18, 0x18, 0x18, 0x23, 0x22, 0x21, 0x20,
            0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
            0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
        ],
    ),
    Step::new(
        0xE0,
        &[
            0x00, 0x00, 0x02, 0x28, 0x2D, 0x3D, 0x0F, 0x32, 0x06, 0x09, 0x0C, 0x17,
            0x0E, 0x12, 0x14, 0x12, 0x14, 0x07, 0x11, 0x12, 0x18, 0x00, 0x00, 0x03,
            0x28, 0x2C, 0x3D, 0x0F, 0x32, 0x06, 0x09, 0x0B, 0x16, 0x0F, 0x11, 0x14,
            0x13, 0x13, 0x07, 0x11, 0x11, 0x17,
        ],
    ),
    Step::new(0xCC, &[0x01]),
    Step::new(0xC7, &[0x00, 0xC0, 0x40, 0xC0]),
    Step::new(0xC0, &[0x30, 0x14]),
    Step::new(0xB6, &[0x46, 0x46]),
    Step::new(0xC6, &[0x3D, 0x00]),
    Step::new(0x3A, &[0x50]),
    Step::new(0x36, &[0x01]),
    Step::new(0x11, &[]),
    Step::new(0x29, &[]),
    Step::new(0xC6, &[0x3D, 0x00]),
    Step::new(0x11, &[0x00]).then_wait_ms(520),
    Step::new(0x29, &[0x00]).then_wait_ms(520),
];

// ── Bridge, HS video mode ───────────────────────────────────────────────

const BRIDGE_HS: &[Step] = &[
    Step::new(reg::CFGR, &[0x50, 0x00]),
    Step::new(reg::VCR, &[0x00, 0x00]),
    Step::new(reg::PCR, &[0x00, 0x00]),
    Step::new(reg::PLCR, &[0x28, 0x82]), // 480MHz
    Step::new(reg::CCR, &[0x03, 0x00]),
    Step::new(reg::PCR, &[0x01, 0x00]), // PLL on
    Step::new(reg::DAR1, &[0x02, 0x23]).then_wait_ms(100),
    Step::new(reg::DAR2, &[0x01, 0x23]),
    Step::new(reg::DAR3, &[0x10, 0x05]),
    Step::new(reg::DAR4, &[0x05, 0x10]),
    Step::new(0xD0, &[0x00, 0x00]),
    Step::new(reg::VICR1, &[HSPW, VSPW]),
    Step::new(reg::VICR2, &[HBPD, VBPD]),
    Step::new(reg::VICR3, &[HFPD, VFPD]),
    Step::new(reg::VICR4, &[0xE0, 0x01]), // 480
    Step::new(reg::VICR5, &[0x00, 0x05]), // 1280
    Step::new(reg::VICR6, &[0x03, 0x00]), // 24bpp, burst with blanking
    Step::new(reg::LCFR, &[0x03, 0x00]),
    Step::new(reg::TR, &[0x04, 0x00]), // RGB, MSB first
    Step::new(reg::CFGR, &[0x4B, 0x02]), // HS video
    Step::new(0x2C, &[]),
];

const STAGES: &[Stage] = &[
    Stage::Direct(BRIDGE_LP),
    Stage::Bridged(HX8394),
    Stage::Direct(BRIDGE_HS),
];

pub const PROCEDURE: Procedure = Procedure {
    name: "ssd2828+hx8394",
    framing: Framing {
        idle_data_high: true,
        deselect_per_step: false,
    },
    bit_delay_us: 10,
    reset: ResetTiming {
        lead_in_ms: 5,
        assert_ms: 50,
        settle_ms: 150,
    },
    stages: STAGES,
};
