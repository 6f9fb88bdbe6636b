//! Runtime configuration options.

use std::env;
use std::fmt;
use std::fmt::Display;
use std::path::Path;

use getopts::Options;
use thermotrace::settings::{DisplayKind, Settings};

use crate::input::error::Error as InputError;
use crate::input::hard_code::HardCodedSettings;
use crate::input::json::JSONSettingsParser;
use crate::input::SettingsReader;

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug)]
pub enum Error {
    /// An option is missing its required argument.
    ArgumentMissing(&'static str),
    /// Parsing command line failed.
    CLI(getopts::Fail),
    /// User requested to see help, not run the program.
    Help(String),
    /// User passed an invalid option.
    Invalid(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CLI(ref e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;
        match self {
            ArgumentMissing(arg) => write!(f, "missing argument for '{}' option", arg),
            CLI(ref e) => write!(f, "{}", e),
            Help(ref help_msg) => write!(f, "Program help:\n{}", help_msg),
            Invalid(ref opt) => write!(f, "Invalid option: {}", opt),
        }
    }
}

impl From<getopts::Fail> for Error {
    fn from(e: getopts::Fail) -> Error {
        Error::CLI(e)
    }
}

/// Values given on the command line that take precedence over the settings source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    channel: Option<i32>,
    interval_ms: Option<u64>,
    headless: bool,
}

impl Overrides {
    fn apply(&self, settings: Settings) -> Settings {
        Settings {
            channel: self.channel.unwrap_or(settings.channel),
            interval_ms: self.interval_ms.unwrap_or(settings.interval_ms),
            display: if self.headless { DisplayKind::Headless } else { settings.display },
            ..settings
        }
    }
}

#[derive(Debug)]
pub struct Configuration {
    settings_reader: Box<dyn SettingsReader>,
    overrides: Overrides,
}

impl Configuration {
    fn new(settings_reader: Box<dyn SettingsReader>, overrides: Overrides) -> Configuration {
        Configuration {
            settings_reader,
            overrides,
        }
    }

    /// Read settings from the configured source and apply command line overrides.
    pub fn settings(&self) -> std::result::Result<Settings, InputError> {
        let settings = self.settings_reader.settings()?;
        Ok(self.overrides.apply(settings))
    }
}

fn create_options() -> Options {
    let mut opts = Options::new();
    opts.optopt("c", "config", "read settings from a JSON file", "FILE");
    opts.optopt("n", "channel", "ADC channel the sensor is wired to (0-7)", "N");
    opts.optopt("i", "interval", "time between readings", "MS");
    opts.optflag("", "headless", "log chart axes instead of driving the OLED panel");
    opts.optflag("h", "help", "show help");

    opts
}

pub fn parse() -> Result<Configuration> {
    let cli_args: Vec<_> = env::args().collect();
    parse_args(&cli_args)
}

fn parse_args(cli_args: &[String]) -> Result<Configuration> {
    let opts = create_options();
    let program = cli_args.get(0).map(String::as_str).unwrap_or("thermotrace");
    let matches = opts.parse(cli_args.iter().skip(1))?;

    if matches.opt_present("h") {
        let brief = format!("Usage: {} [ options ]", program);
        return Err(Error::Help(opts.usage(&brief)));
    }

    let settings_reader: Box<dyn SettingsReader> = if matches.opt_present("config") {
        let config_path = matches.opt_str("config")
            .ok_or(Error::ArgumentMissing("config"))?;
        Box::new(JSONSettingsParser::new(Path::new(&config_path)))
    } else {
        // Default to the built-in settings.
        Box::new(HardCodedSettings::new())
    };

    let channel = match matches.opt_str("channel") {
        Some(value) => Some(value.parse::<i32>()
            .map_err(|_e| Error::Invalid(format!("{} is not a channel number", value)))?),
        None => None,
    };
    let interval_ms = match matches.opt_str("interval") {
        Some(value) => Some(value.parse::<u64>()
            .map_err(|_e| Error::Invalid(format!("{} is not an interval in milliseconds", value)))?),
        None => None,
    };

    let overrides = Overrides {
        channel,
        interval_ms,
        headless: matches.opt_present("headless"),
    };

    Ok(Configuration::new(settings_reader, overrides))
}
