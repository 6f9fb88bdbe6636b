//! Drivers for the sensor hardware attached to the Raspberry Pi.

pub mod hal;
pub mod mcp3008;
pub mod oled;
pub mod rpi;

pub use hal::{BusGuard, SpiBus};
pub use mcp3008::{Mcp3008, Sample};
pub use oled::OledRenderer;
pub use rpi::RpiSpi;
