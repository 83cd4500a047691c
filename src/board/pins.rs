//! GPIO |     Function    |      Notes
//! -----+-----------------+----------------------------------
//!  5   | Panel RESET     | Active low, held high once released
//!  7   | Panel SDO       | Read back only (R61529 ID probe)
//!  8   | Panel SCK       | Bit-banged, idles high
//! 10   | Panel SDI       | Bit-banged, D/C bit + 8 data bits
//! 21   | Panel CSX       | Active low

// ----- 3-wire panel bus -----
pub const PANEL_CS: u8 = 21;
pub const PANEL_SCK: u8 = 8;
pub const PANEL_SDI: u8 = 10;
pub const PANEL_SDO: u8 = 7;
pub const PANEL_RST: u8 = 5;

// SSD2828 TX_CLK crystal
pub const BRIDGE_TX_CLK_KHZ: u32 = 24_000;
