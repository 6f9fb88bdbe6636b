/*! Sampling loop.

A [`Monitor`] owns the converter, the history and the renderer, and moves through three states:

```text
Running --stop signal--> ShuttingDown --bus released--> Closed
```

While running, each cycle samples the sensor channel, converts the code, records and prints the reading, and redraws the chart.
Between cycles the monitor waits on its [`StopSignal`] for one interval.
A fault in any step ends the loop; the bus is released on every way out of [`Monitor::run`].
 */

use std::fmt;
use std::fmt::Display;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

use chrono::Utc;

use crate::chart::Renderer;
use crate::history::History;
use crate::hw::hal::SpiBus;
use crate::hw::mcp3008::Mcp3008;
use crate::settings::Settings;
use crate::temperature::SensorModel;
use crate::{Error, Result};

/// Message printed when the loop is stopped by the user.
pub const FAREWELL: &str = "Exiting program.";

/// Exit status used when a second interrupt forces the process down.
pub const FORCED_EXIT_STATUS: i32 = 130;

/// Lifecycle of a [`Monitor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum State {
    /// Sampling once per interval.
    Running,
    /// Stop requested or fault raised; the bus is still held.
    ShuttingDown,
    /// Bus released. Terminal.
    Closed,
}

impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            State::Running => write!(f, "running"),
            State::ShuttingDown => write!(f, "shutting down"),
            State::Closed => write!(f, "closed"),
        }
    }
}

/// Source of the user's request to stop.
pub trait StopSignal {
    /// Wait up to `period`; returns true if a stop was requested.
    fn wait(&mut self, period: Duration) -> bool;
}

/// Stop signal raised by SIGINT (Ctrl-C).
#[derive(Debug)]
pub struct Interrupt {
    receiver: Receiver<()>,
}

impl Interrupt {
    /** Install the process interrupt handler.

    The first interrupt asks the loop to stop at the next cycle boundary.
    A second one exits the process at once, for when a bus call never returns.
    Only one handler may be installed per process.
     */
    pub fn install() -> Result<Interrupt> {
        let (sender, receiver) = mpsc::sync_channel(1);
        let requested = AtomicBool::new(false);
        ctrlc::set_handler(move || {
            if !request_stop(&requested, &sender) {
                log::warn!("interrupted again; exiting without cleanup");
                process::exit(FORCED_EXIT_STATUS);
            }
        })?;

        Ok(Interrupt::from_receiver(receiver))
    }

    /// Stop signal fed by an existing channel.
    pub fn from_receiver(receiver: Receiver<()>) -> Interrupt {
        Interrupt {
            receiver,
        }
    }
}

/// Record an interrupt. Returns false if a stop had already been requested.
fn request_stop(requested: &AtomicBool, sender: &SyncSender<()>) -> bool {
    if requested.swap(true, Ordering::SeqCst) {
        return false;
    }
    // A stop is already pending if the channel is full.
    let _ = sender.try_send(());
    true
}

impl StopSignal for Interrupt {
    fn wait(&mut self, period: Duration) -> bool {
        match self.receiver.recv_timeout(period) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}

/// Sampling context owning every piece of mutable state.
#[derive(Debug)]
pub struct Monitor<B: SpiBus, R: Renderer, S: StopSignal> {
    adc: Mcp3008<B>,
    sensor: SensorModel,
    history: History,
    renderer: R,
    stop: S,
    channel: i32,
    interval: Duration,
    state: State,
}

impl<B, R, S> Monitor<B, R, S>
where
    B: SpiBus,
    R: Renderer,
    S: StopSignal,
{
    /// Create a monitor using the channel, window, interval and sensor model from `settings`.
    pub fn new(adc: Mcp3008<B>, renderer: R, stop: S, settings: &Settings) -> Monitor<B, R, S> {
        Monitor {
            adc,
            sensor: settings.sensor,
            history: History::new(settings.capacity),
            renderer,
            stop,
            channel: settings.channel,
            interval: settings.interval(),
            state: State::Running,
        }
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Readings collected so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns true once the bus has been released.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed && self.adc.is_released()
    }

    /** Run the loop until stopped or until a step fails.

    Returns `Ok(())` after a user stop, or the error that ended the loop.
    Either way the monitor is `Closed` and the bus released when this returns.
    A closed monitor cannot run again and fails with [`Error::BusClosed`].
     */
    pub fn run(&mut self) -> Result<()> {
        if self.state == State::Closed {
            return Err(Error::BusClosed);
        }

        let outcome = self.poll();
        self.state = State::ShuttingDown;
        log::debug!("monitor {}", self.state);
        if outcome.is_ok() {
            println!("{}", FAREWELL);
        }
        self.close();

        outcome
    }

    /// Run one sampling cycle.
    ///
    /// Returns the temperature recorded, or `None` if the channel produced no valid sample.
    pub fn cycle(&mut self) -> Result<Option<f64>> {
        let sample = self.adc.read_adc(self.channel)?;
        log::trace!("channel {}: {}", self.channel, sample);
        if !sample.is_valid() {
            log::warn!("channel {} gave no valid reading; skipping cycle", self.channel);
            return Ok(None);
        }

        let temperature = self.sensor.celsius(sample.code());
        self.history.record(Utc::now(), temperature);
        println!("Temperature: {:.2}°C", temperature);
        self.renderer.update_plot(&self.history)?;

        Ok(Some(temperature))
    }

    /// Release the bus and enter the terminal state.
    pub fn close(&mut self) {
        if self.state != State::Closed {
            self.adc.release();
            self.state = State::Closed;
            log::info!("monitor {} after {} readings", self.state, self.history.len());
        }
    }

    fn poll(&mut self) -> Result<()> {
        log::info!("sampling channel {} every {:?}, keeping {} readings",
                   self.channel, self.interval, self.history.capacity());
        while self.state == State::Running {
            self.cycle()?;
            if self.stop.wait(self.interval) {
                log::debug!("stop requested");
                self.state = State::ShuttingDown;
            }
        }

        Ok(())
    }
}
