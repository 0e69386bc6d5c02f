//! Common test infrastructure for Tracebrush integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from any single test's point of view.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use color_cluster::Rgb;
use tracebrush::backend::{BackendError, PixelProbe, PointerDriver};
use tracebrush::models::ScreenPoint;

/// One recorded pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    MoveTo(ScreenPoint),
    Press,
    Release,
    Click,
}

/// Pointer double that records every action and can be told to start
/// failing after a fixed number of actions.
pub struct RecordingPointer {
    actions: Arc<Mutex<Vec<PointerAction>>>,
    position: ScreenPoint,
    fail_after: Option<usize>,
}

impl RecordingPointer {
    pub fn new(start: ScreenPoint) -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            position: start,
            fail_after: None,
        }
    }

    /// Every action from the `n`-th onward fails.
    pub fn failing_after(start: ScreenPoint, n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new(start)
        }
    }

    /// Handle for inspecting the recorded actions after the run.
    pub fn actions(&self) -> Arc<Mutex<Vec<PointerAction>>> {
        Arc::clone(&self.actions)
    }

    fn record(&mut self, action: PointerAction) -> Result<(), BackendError> {
        let mut actions = self.actions.lock().unwrap();
        if let Some(limit) = self.fail_after {
            if actions.len() >= limit {
                return Err(BackendError::Pointer("injected failure".to_string()));
            }
        }
        actions.push(action);
        Ok(())
    }
}

impl PointerDriver for RecordingPointer {
    fn position(&mut self) -> Result<ScreenPoint, BackendError> {
        Ok(self.position)
    }

    fn move_to(&mut self, point: ScreenPoint) -> Result<(), BackendError> {
        self.record(PointerAction::MoveTo(point))?;
        self.position = point;
        Ok(())
    }

    fn press(&mut self) -> Result<(), BackendError> {
        self.record(PointerAction::Press)
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.record(PointerAction::Release)
    }

    fn click(&mut self) -> Result<(), BackendError> {
        self.record(PointerAction::Click)
    }
}

/// Probe double answering reads from a scripted queue, in call order.
/// Once the queue runs dry every read returns the fallback color.
pub struct ScriptedProbe {
    responses: VecDeque<Result<Rgb, BackendError>>,
    fallback: Rgb,
}

impl ScriptedProbe {
    /// Probe that always sees `fallback` on screen.
    pub fn always(fallback: Rgb) -> Self {
        Self {
            responses: VecDeque::new(),
            fallback,
        }
    }

    /// Probe that answers from `responses` first, then `fallback`.
    pub fn scripted(responses: Vec<Result<Rgb, BackendError>>, fallback: Rgb) -> Self {
        Self {
            responses: responses.into(),
            fallback,
        }
    }
}

impl PixelProbe for ScriptedProbe {
    fn pixel_at(&mut self, _point: ScreenPoint) -> Result<Rgb, BackendError> {
        self.responses.pop_front().unwrap_or(Ok(self.fallback))
    }
}
