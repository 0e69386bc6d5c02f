//! Events emitted by a drawing run
//!
//! The worker thread reports everything it does through these events; the
//! caller drains them from the channel on its own schedule. Run state is
//! never exposed directly.

use crate::models::ScreenPoint;

/// Progress and lifecycle events for one drawing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawEvent {
    /// The run has started with this many targets.
    Started { total: usize },

    /// A target was drawn and verified on screen.
    TargetDrawn { index: usize, point: ScreenPoint },

    /// A target failed verification on every allowed attempt and will not
    /// be retried again.
    TargetAbandoned {
        index: usize,
        point: ScreenPoint,
        attempts: u32,
    },

    /// Counter update after every attempt. `completed` includes abandoned
    /// targets, so it reaches `total` on every completed run.
    Progress { completed: usize, total: usize },

    /// Terminal event, emitted exactly once per run.
    Finished(RunOutcome),
}

/// How a drawing run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every target was drawn or abandoned.
    Completed,
    /// The run was cancelled before finishing.
    Cancelled,
    /// A pointer backend failure ended the run early.
    Failed(String),
}
