/*! Runtime settings.

Defaults describe an LM35 on channel 0 of an MCP3008 wired to SPI0.0, sampled once a second into a one-minute window.
 */

use std::time::Duration;

use serde::Deserialize;

use crate::hw::mcp3008::CHANNELS;
use crate::temperature::SensorModel;
use crate::{Error, Result};

/// Which display the chart goes to.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    /// SSD1306 OLED panel on the I2C bus.
    Oled,
    /// No panel; chart axes are logged.
    Headless,
}

/// SPI bus parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpiSettings {
    /// Bus number (`/dev/spidev<bus>.*`).
    pub bus: u8,
    /// Chip select line.
    pub chip_select: u8,
    /// Clock speed in Hz.
    pub clock_hz: u32,
}

impl Default for SpiSettings {
    fn default() -> SpiSettings {
        SpiSettings {
            bus: 0,
            chip_select: 0,
            clock_hz: 1_350_000,
        }
    }
}

/// Complete runtime settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// ADC channel the sensor is wired to.
    pub channel: i32,
    /// Time between samples in milliseconds.
    pub interval_ms: u64,
    /// Number of readings kept for the chart.
    pub capacity: usize,
    /// SPI bus parameters.
    pub spi: SpiSettings,
    /// Sensor transfer function.
    pub sensor: SensorModel,
    /// Chart destination.
    pub display: DisplayKind,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            channel: 0,
            interval_ms: 1_000,
            capacity: 60,
            spi: SpiSettings::default(),
            sensor: SensorModel::default(),
            display: DisplayKind::Oled,
        }
    }
}

impl Settings {
    /// Time between samples.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Check that the settings describe hardware that can exist.
    pub fn validate(&self) -> Result<()> {
        if self.channel < 0 || self.channel >= CHANNELS {
            return Err(Error::Settings(
                format!("channel {} is outside 0..{}", self.channel, CHANNELS)));
        }
        if self.interval_ms == 0 {
            return Err(Error::Settings("interval must be greater than zero".to_string()));
        }
        if self.capacity == 0 {
            return Err(Error::Settings("capacity must be greater than zero".to_string()));
        }
        if self.spi.clock_hz == 0 {
            return Err(Error::Settings("SPI clock must be greater than zero".to_string()));
        }
        crate::hw::rpi::bus_for(self.spi.bus)?;
        crate::hw::rpi::slave_select_for(self.spi.chip_select)?;
        let positive = |v: f64| v > 0.0;
        if !positive(self.sensor.reference_voltage) || !positive(self.sensor.millivolts_per_degree) {
            return Err(Error::Settings("sensor parameters must be positive".to_string()));
        }

        Ok(())
    }
}
