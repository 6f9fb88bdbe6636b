//! Pluggable settings providers.

use std::fmt::Debug;

use thermotrace::settings::Settings;

pub mod error;
pub mod hard_code;
pub mod json;

type Result<T> = std::result::Result<T, error::Error>;

/// Reader producing runtime settings from an input source.
pub trait SettingsReader: Debug {
    /// Read the settings.
    fn settings(&self) -> Result<Settings>;
}
