//! Live temperature chart for an LM35 read through an MCP3008.

use std::process;

use thermotrace::chart::{LogRenderer, Renderer};
use thermotrace::hw::{Mcp3008, OledRenderer, RpiSpi};
use thermotrace::monitor::{Interrupt, Monitor};
use thermotrace::settings::{DisplayKind, Settings};

mod input;
mod opts;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let configuration = match opts::parse() {
        Ok(configuration) => configuration,
        Err(opts::Error::Help(msg)) => {
            println!("{}", msg);
            process::exit(0);
        },
        Err(e) => {
            println!("Initialization failed.\n{}", e);
            process::exit(1);
        },
    };

    let settings = match configuration.settings() {
        Ok(settings) => settings,
        Err(e) => {
            println!("Failed to read settings.\n{}", e);
            process::exit(1);
        },
    };

    if let Err(e) = run(&settings) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(settings: &Settings) -> thermotrace::Result<()> {
    settings.validate()?;
    let stop = Interrupt::install()?;

    let renderer: Box<dyn Renderer> = match settings.display {
        DisplayKind::Oled => Box::new(OledRenderer::open()?),
        DisplayKind::Headless => Box::new(LogRenderer::new()),
    };

    // The bus is released by the monitor on every exit path.
    let bus = RpiSpi::open(&settings.spi)?;
    let mut monitor = Monitor::new(Mcp3008::new(bus), renderer, stop, settings);
    monitor.run()
}
