//! Sampling and rendering errors.

use std::error;
use std::fmt;
use std::fmt::Display;

use rppal::i2c;
use rppal::spi;

/// Error raised while acquiring hardware or running the sampling loop.
#[derive(Debug)]
pub enum Error {
    /// A bus implementation failed to complete a transfer.
    Bus(String),
    /// Transfer attempted after the bus was released.
    BusClosed,
    /// Display panel error.
    Display(String),
    /// I2C initialization error.
    I2C(i2c::Error),
    /// Interrupt handler could not be installed.
    Interrupt(ctrlc::Error),
    /// Settings are out of range or inconsistent.
    Settings(String),
    /// SPI initialization or transfer error.
    Spi(spi::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::I2C(ref e) => Some(e),
            Error::Interrupt(ref e) => Some(e),
            Error::Spi(ref e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match self {
            Bus(ref msg) => write!(f, "bus transfer failed: {}", msg),
            BusClosed => write!(f, "bus has already been released"),
            Display(ref msg) => write!(f, "display error: {}", msg),
            I2C(ref e) => write!(f, "could not obtain I2C interface: {}", e),
            Interrupt(ref e) => write!(f, "could not install interrupt handler: {}", e),
            Settings(ref msg) => write!(f, "invalid settings: {}", msg),
            Spi(ref e) => write!(f, "SPI error: {}", e),
        }
    }
}

impl From<i2c::Error> for Error {
    fn from(e: i2c::Error) -> Self {
        Error::I2C(e)
    }
}

impl From<spi::Error> for Error {
    fn from(e: spi::Error) -> Self {
        Error::Spi(e)
    }
}

impl From<ctrlc::Error> for Error {
    fn from(e: ctrlc::Error) -> Self {
        Error::Interrupt(e)
    }
}
