//! Run state for one drawing session
//!
//! Owned by the worker thread for the duration of a run; callers only see
//! the events derived from it.

use std::collections::VecDeque;
use std::time::Duration;

use color_cluster::Rgb;

use crate::models::ScreenPoint;

/// Attempts per target before it is abandoned.
pub const MAX_ATTEMPTS: u32 = 3;

/// Immutable description of one drawing run.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Screen points to draw, in drawing order.
    pub targets: Vec<ScreenPoint>,
    /// Colors a drawn pixel may verify against. Verification accepts any
    /// of them: the canvas may render the stroke with a near-palette
    /// color rather than the exact one requested.
    pub palette: Vec<Rgb>,
    /// Per-channel tolerance for verification.
    pub verify_tolerance: u8,
    /// Pause between the drawing action and the verification read.
    pub action_delay: Duration,
    /// Click once before the drag, for canvases that need focus first.
    pub priming_click: bool,
}

/// One target waiting to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingTarget {
    /// Index into the plan's target list, stable across retries.
    pub index: usize,
    pub point: ScreenPoint,
    /// Attempts already made.
    pub attempts: u32,
}

/// Mutable state of a run: the retry queue and the completion counters.
#[derive(Debug)]
pub(crate) struct DrawSession {
    pending: VecDeque<PendingTarget>,
    pub completed: usize,
    pub total: usize,
}

impl DrawSession {
    pub fn new(targets: &[ScreenPoint]) -> Self {
        Self {
            pending: targets
                .iter()
                .enumerate()
                .map(|(index, &point)| PendingTarget {
                    index,
                    point,
                    attempts: 0,
                })
                .collect(),
            completed: 0,
            total: targets.len(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the current pass. Failed targets are requeued afterwards and
    /// form the next pass.
    pub fn take_pass(&mut self) -> Vec<PendingTarget> {
        self.pending.drain(..).collect()
    }

    pub fn requeue(&mut self, failed: Vec<PendingTarget>) {
        self.pending.extend(failed);
    }
}
