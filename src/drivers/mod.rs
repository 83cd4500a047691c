// Bus-level drivers, board-independent.
//
// Only pin assignments (in board/) are board-specific; everything here
// talks to pins through gpio::GpioController.

pub mod bitbang;
pub mod claim;
pub mod gpio;

#[cfg(test)]
pub(crate) mod mock;
