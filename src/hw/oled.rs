//! Chart output on an SSD1306 128x64 OLED panel.

use std::fmt;

use rppal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::chart::{self, Renderer};
use crate::history::History;
use crate::{Error, Result};

type Panel = Ssd1306<I2CInterface<I2c>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Renderer drawing the chart on an SSD1306 attached to the Raspberry Pi I2C bus.
pub struct OledRenderer {
    panel: Panel,
}

impl OledRenderer {
    /// Open the I2C bus and initialize the panel at its default address.
    pub fn open() -> Result<OledRenderer> {
        let i2c = I2c::new()?;
        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init()
            .map_err(|e| Error::Display(format!("failed to initialize panel: {:?}", e)))?;
        log::info!("Initialized SSD1306 panel");

        Ok(OledRenderer {
            panel,
        })
    }
}

impl Renderer for OledRenderer {
    fn update_plot(&mut self, history: &History) -> Result<()> {
        self.panel.clear_buffer();
        let axes = chart::draw_chart(&mut self.panel, history)
            .map_err(|e| Error::Display(format!("failed to draw chart: {:?}", e)))?;
        self.panel.flush()
            .map_err(|e| Error::Display(format!("failed to flush panel: {:?}", e)))?;
        log::debug!("chart: {}", axes);

        Ok(())
    }
}

impl fmt::Debug for OledRenderer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OledRenderer")
    }
}
