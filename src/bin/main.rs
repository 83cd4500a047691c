// panel-bringup firmware entry point
//
// Boot: logger -> clocks -> board pins -> panel bring-up, then idle.
// A configuration error is logged and the panel left dark; there is
// nothing to retry with the same wiring.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use log::{error, info};

use panel_bringup::board::{self, Board};
use panel_bringup::initialize_panel;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let mut board = Board::init(peripherals);
    let mut delay = Delay::new();
    let bus = Board::bus_config();

    match initialize_panel(&mut board.panel, &mut delay, &bus, &board::PANEL) {
        Ok(()) => info!("panel ready"),
        Err(e) => error!("panel bring-up failed: {}", e),
    }

    loop {
        delay.delay_millis(1000);
    }
}
