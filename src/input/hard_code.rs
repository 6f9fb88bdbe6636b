//! Settings compiled into the binary.

use thermotrace::settings::Settings;

use super::{Result, SettingsReader};

/// Built-in settings: LM35 on MCP3008 channel 0, SPI0.0, one reading a second.
#[derive(Debug)]
pub struct HardCodedSettings {  }

impl HardCodedSettings {
    pub fn new() -> HardCodedSettings {
        HardCodedSettings {  }
    }
}

impl SettingsReader for HardCodedSettings {
    fn settings(&self) -> Result<Settings> {
        Ok(Settings::default())
    }
}
