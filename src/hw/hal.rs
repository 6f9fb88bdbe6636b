//! Hardware abstraction for the SPI bus.

use crate::{Error, Result};

/// Full-duplex SPI bus a converter can be attached to.
pub trait SpiBus {
    /// Clock out `write` while clocking `read.len()` bytes in.
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()>;

    /// Give the bus back to the system.
    fn close(&mut self);
}

/** Owning handle for an [`SpiBus`] that releases the bus exactly once.

The bus is released by [`BusGuard::release`] or, failing that, when the guard is dropped.
Transfers after release fail with [`Error::BusClosed`].
 */
#[derive(Debug)]
pub struct BusGuard<B: SpiBus> {
    bus: B,
    released: bool,
}

impl<B: SpiBus> BusGuard<B> {
    /// Take ownership of an open bus.
    pub fn new(bus: B) -> BusGuard<B> {
        BusGuard {
            bus,
            released: false,
        }
    }

    /// Perform a transfer on the guarded bus.
    pub fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        if self.released {
            return Err(Error::BusClosed);
        }
        self.bus.transfer(write, read)
    }

    /// Release the bus. Later calls do nothing.
    pub fn release(&mut self) {
        if !self.released {
            self.bus.close();
            self.released = true;
            log::debug!("SPI bus released");
        }
    }

    /// Returns true once the bus has been released.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<B: SpiBus> Drop for BusGuard<B> {
    fn drop(&mut self) {
        self.release();
    }
}
