//! Test doubles for the bus, the renderer and the stop signal.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::chart::Renderer;
use crate::history::History;
use crate::hw::hal::SpiBus;
use crate::monitor::StopSignal;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct BusLog {
    transfers: Vec<Vec<u8>>,
    releases: usize,
}

/// Shared view of what a [`MockBus`] has seen.
#[derive(Clone, Debug)]
pub struct BusProbe {
    log: Rc<RefCell<BusLog>>,
}

impl BusProbe {
    pub fn transfers(&self) -> Vec<Vec<u8>> {
        self.log.borrow().transfers.clone()
    }

    pub fn releases(&self) -> usize {
        self.log.borrow().releases
    }
}

/// Bus answering transfers from a script; fails once the script runs out.
#[derive(Debug)]
pub struct MockBus {
    responses: VecDeque<[u8; 3]>,
    log: Rc<RefCell<BusLog>>,
}

impl MockBus {
    pub fn new() -> MockBus {
        MockBus::with_responses(&[])
    }

    pub fn with_responses(responses: &[[u8; 3]]) -> MockBus {
        MockBus {
            responses: responses.iter().copied().collect(),
            log: Rc::new(RefCell::new(BusLog::default())),
        }
    }

    pub fn failing() -> MockBus {
        MockBus::new()
    }

    pub fn probe(&self) -> BusProbe {
        BusProbe {
            log: Rc::clone(&self.log),
        }
    }
}

impl SpiBus for MockBus {
    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        self.log.borrow_mut().transfers.push(write.to_vec());
        let response = self.responses.pop_front()
            .ok_or_else(|| Error::Bus("no response scripted".to_string()))?;
        read.copy_from_slice(&response[..read.len()]);
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// Shared view of the history lengths a [`RecordingRenderer`] was asked to draw.
#[derive(Clone, Debug)]
pub struct RenderProbe {
    lengths: Rc<RefCell<Vec<usize>>>,
}

impl RenderProbe {
    pub fn lengths(&self) -> Vec<usize> {
        self.lengths.borrow().clone()
    }
}

/// Renderer remembering each redraw, optionally failing after a number of them.
#[derive(Debug)]
pub struct RecordingRenderer {
    lengths: Rc<RefCell<Vec<usize>>>,
    fail_after: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> RecordingRenderer {
        RecordingRenderer {
            lengths: Rc::new(RefCell::new(Vec::new())),
            fail_after: None,
        }
    }

    pub fn failing_after(successes: usize) -> RecordingRenderer {
        RecordingRenderer {
            fail_after: Some(successes),
            ..RecordingRenderer::new()
        }
    }

    pub fn probe(&self) -> RenderProbe {
        RenderProbe {
            lengths: Rc::clone(&self.lengths),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn update_plot(&mut self, history: &History) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.lengths.borrow().len() >= limit {
                return Err(Error::Display("backend gone".to_string()));
            }
        }
        self.lengths.borrow_mut().push(history.len());
        Ok(())
    }
}

/// Stop signal that fires after a fixed number of cycles without sleeping.
#[derive(Debug)]
pub struct StopAfter {
    remaining: usize,
}

impl StopAfter {
    pub fn new(cycles: usize) -> StopAfter {
        StopAfter {
            remaining: cycles,
        }
    }
}

impl StopSignal for StopAfter {
    fn wait(&mut self, _period: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
