//! Raspberry Pi SPI bus.

use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::settings::SpiSettings;
use crate::{Error, Result};

use super::hal::SpiBus;

/// Hardware SPI bus opened through `spidev`.
#[derive(Debug)]
pub struct RpiSpi {
    spi: Option<Spi>,
}

impl RpiSpi {
    /// Open the bus and chip select described by `settings` in SPI mode 0.
    pub fn open(settings: &SpiSettings) -> Result<RpiSpi> {
        let bus = bus_for(settings.bus)?;
        let slave_select = slave_select_for(settings.chip_select)?;
        let spi = Spi::new(bus, slave_select, settings.clock_hz, Mode::Mode0)?;
        log::info!("Opened SPI{}.{} at {} Hz", settings.bus, settings.chip_select, settings.clock_hz);

        Ok(RpiSpi {
            spi: Some(spi),
        })
    }
}

impl SpiBus for RpiSpi {
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        let spi = self.spi.as_ref().ok_or(Error::BusClosed)?;
        let transferred = spi.transfer(read, write)?;
        check_length(transferred, read.len())
    }

    fn close(&mut self) {
        // spidev is closed when the handle is dropped.
        self.spi.take();
    }
}

/// Fail a transfer that clocked fewer bytes than requested.
fn check_length(transferred: usize, expected: usize) -> Result<()> {
    if transferred < expected {
        return Err(Error::Bus(format!("short transfer ({} of {} bytes)", transferred, expected)));
    }
    Ok(())
}

/// Map a bus number to the rppal bus.
pub fn bus_for(bus: u8) -> Result<Bus> {
    match bus {
        0 => Ok(Bus::Spi0),
        1 => Ok(Bus::Spi1),
        2 => Ok(Bus::Spi2),
        3 => Ok(Bus::Spi3),
        4 => Ok(Bus::Spi4),
        5 => Ok(Bus::Spi5),
        6 => Ok(Bus::Spi6),
        _ => Err(Error::Settings(format!("SPI bus {} does not exist", bus))),
    }
}

/// Map a chip select number to the rppal slave select line.
pub fn slave_select_for(chip_select: u8) -> Result<SlaveSelect> {
    match chip_select {
        0 => Ok(SlaveSelect::Ss0),
        1 => Ok(SlaveSelect::Ss1),
        2 => Ok(SlaveSelect::Ss2),
        _ => Err(Error::Settings(format!("chip select {} is not supported", chip_select))),
    }
}
