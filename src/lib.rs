//! Sampling, converting and charting an analog temperature sensor.

#![deny(missing_docs)]

pub mod chart;
pub mod error;
pub mod history;
pub mod hw;
pub mod monitor;
pub mod settings;
pub mod temperature;

#[cfg(test)]
mod mock;

pub use error::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
