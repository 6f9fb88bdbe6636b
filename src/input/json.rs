//! Settings read from a JSON file.
//!
//! ```json
//! { "_version": 1, "channel": 0, "interval_ms": 1000, "display": "oled" }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value as JSONValue;
use thermotrace::settings::Settings;

use super::error::Error;
use super::{Result, SettingsReader};

pub const SETTINGS_VERSION: i64 = 1;

#[derive(Debug)]
pub struct JSONSettingsParser {
    config_path: PathBuf,
}

impl JSONSettingsParser {
    pub fn new(config_path: &Path) -> JSONSettingsParser {
        JSONSettingsParser {
            config_path: config_path.to_path_buf(),
        }
    }
}

/// Parse settings text, checking its version.
pub fn parse_settings(text: &str) -> Result<Settings> {
    let json: JSONValue = serde_json::from_str(text)
        .map_err(|e| Error::Format(format!("JSON parsing failure: {}", e)))?;

    let version = json["_version"].as_i64()
        .ok_or_else(|| Error::Format("Missing '_version' specifier.".to_string()))?;
    if version != SETTINGS_VERSION {
        return Err(Error::Version(version));
    }

    serde_json::from_value(json)
        .map_err(|e| Error::Format(format!("settings parsing failed: {}", e)))
}

impl SettingsReader for JSONSettingsParser {
    fn settings(&self) -> Result<Settings> {
        let mut text = String::new();
        let mut file = File::open(self.config_path.as_path())?;
        file.read_to_string(&mut text)?;
        log::info!("Read settings from {}", self.config_path.display());

        parse_settings(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thermotrace::settings::DisplayKind;

    #[test]
    fn reads_versioned_settings() {
        let settings = parse_settings(
            r#"{ "_version": 1, "channel": 2, "interval_ms": 250, "display": "headless",
                 "sensor": { "reference_voltage": 5.0 } }"#).unwrap();

        assert_eq!(settings.channel, 2);
        assert_eq!(settings.interval_ms, 250);
        assert_eq!(settings.display, DisplayKind::Headless);
        assert_eq!(settings.sensor.reference_voltage, 5.0);
        assert_eq!(settings.sensor.millivolts_per_degree, 10.0);
    }

    #[test]
    fn requires_version() {
        let r = parse_settings(r#"{ "channel": 2 }"#);
        assert!(matches!(r, Err(Error::Format(_))));
    }

    #[test]
    fn rejects_other_versions() {
        let r = parse_settings(r#"{ "_version": 2 }"#);
        assert!(matches!(r, Err(Error::Version(2))));
    }

    #[test]
    fn rejects_mistyped_fields() {
        let r = parse_settings(r#"{ "_version": 1, "display": "crt" }"#);
        assert!(matches!(r, Err(Error::Format(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let parser = JSONSettingsParser::new(Path::new("/nonexistent/thermotrace.json"));
        assert!(matches!(parser.settings(), Err(Error::IO(_))));
    }
}
