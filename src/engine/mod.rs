//! Draw-verify-retry engine
//!
//! Executes a [`DrawPlan`] on a dedicated worker thread: for each target,
//! move the pointer, draw a 1-pixel drag, wait, read the pixel back, and
//! retry up to [`MAX_ATTEMPTS`] times when the read does not match the
//! palette. Everything the worker does is reported as [`DrawEvent`]s.

mod events;
mod session;

pub use events::{DrawEvent, RunOutcome};
pub use session::{DrawPlan, MAX_ATTEMPTS};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::backend::{BackendError, PixelProbe, PointerDriver};
use crate::error::RunError;
use crate::models::ScreenPoint;

use session::DrawSession;

/// Handle to at most one drawing run at a time.
///
/// `start` spawns the worker; the caller keeps the engine to cancel or
/// wait, and drains events from the channel it supplied. Starting while a
/// run is active is an error, not a queue.
pub struct DrawEngine {
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<RunOutcome>>,
}

impl DrawEngine {
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Start a run on a new worker thread.
    ///
    /// Events arrive on `events` as the run progresses, ending with
    /// exactly one `Finished`. Fails with [`RunError::AlreadyRunning`]
    /// while a previous run is still active.
    pub fn start(
        &mut self,
        plan: DrawPlan,
        pointer: Box<dyn PointerDriver>,
        probe: Box<dyn PixelProbe>,
        events: Sender<DrawEvent>,
    ) -> Result<(), RunError> {
        if self.is_running() {
            return Err(RunError::AlreadyRunning);
        }
        // Reap a previously finished worker before reusing the slot
        if let Some(finished) = self.worker.take() {
            let _ = finished.join();
        }

        self.cancel.store(false, Ordering::SeqCst);
        let cancel = Arc::clone(&self.cancel);
        tracing::info!(targets = plan.targets.len(), "Starting drawing run");

        self.worker = Some(std::thread::spawn(move || {
            run_plan(plan, pointer, probe, events, cancel)
        }));
        Ok(())
    }

    /// Request cooperative cancellation. The in-flight action completes;
    /// the worker stops at the next check.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Block until the current run finishes and return its outcome.
    pub fn wait(&mut self) -> Result<RunOutcome, RunError> {
        let worker = self.worker.take().ok_or(RunError::NotStarted)?;
        worker.join().map_err(|_| RunError::WorkerPanicked)
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker entry point: wraps the drawing loop with cleanup and the
/// terminal event, which both run on every exit path.
fn run_plan(
    plan: DrawPlan,
    mut pointer: Box<dyn PointerDriver>,
    mut probe: Box<dyn PixelProbe>,
    events: Sender<DrawEvent>,
    cancel: Arc<AtomicBool>,
) -> RunOutcome {
    let total = plan.targets.len();
    let _ = events.send(DrawEvent::Started { total });

    if total == 0 {
        let _ = events.send(DrawEvent::Progress {
            completed: 0,
            total: 0,
        });
        let _ = events.send(DrawEvent::Finished(RunOutcome::Completed));
        return RunOutcome::Completed;
    }

    // Remembered so the pointer lands back where the user left it
    let resting = pointer.position().ok();

    let outcome = draw_loop(&plan, pointer.as_mut(), probe.as_mut(), &events, &cancel);

    if let Some(point) = resting {
        // Best-effort: a dead pointer backend cannot be restored through
        if let Err(e) = pointer.move_to(point) {
            tracing::debug!(%e, "Could not restore pointer position");
        }
    }

    match &outcome {
        RunOutcome::Completed => tracing::info!("Drawing run completed"),
        RunOutcome::Cancelled => tracing::info!("Drawing run cancelled"),
        RunOutcome::Failed(msg) => tracing::warn!(error = %msg, "Drawing run failed"),
    }
    let _ = events.send(DrawEvent::Finished(outcome.clone()));
    outcome
}

fn draw_loop(
    plan: &DrawPlan,
    pointer: &mut dyn PointerDriver,
    probe: &mut dyn PixelProbe,
    events: &Sender<DrawEvent>,
    cancel: &AtomicBool,
) -> RunOutcome {
    let mut session = DrawSession::new(&plan.targets);

    while !session.is_done() {
        if cancel.load(Ordering::SeqCst) {
            return RunOutcome::Cancelled;
        }

        let pass = session.take_pass();
        let mut failed = Vec::new();
        for mut target in pass {
            if cancel.load(Ordering::SeqCst) {
                return RunOutcome::Cancelled;
            }

            match draw_target(plan, target.point, pointer, probe) {
                Ok(true) => {
                    session.completed += 1;
                    let _ = events.send(DrawEvent::TargetDrawn {
                        index: target.index,
                        point: target.point,
                    });
                }
                Ok(false) => {
                    target.attempts += 1;
                    if target.attempts >= MAX_ATTEMPTS {
                        tracing::debug!(
                            index = target.index,
                            attempts = target.attempts,
                            "Abandoning target"
                        );
                        session.completed += 1;
                        let _ = events.send(DrawEvent::TargetAbandoned {
                            index: target.index,
                            point: target.point,
                            attempts: target.attempts,
                        });
                    } else {
                        failed.push(target);
                    }
                }
                // Pointer failures end the run; nothing drawn after this
                // point could be trusted anyway
                Err(e) => return RunOutcome::Failed(e.to_string()),
            }

            let _ = events.send(DrawEvent::Progress {
                completed: session.completed,
                total: session.total,
            });
        }
        session.requeue(failed);
    }

    RunOutcome::Completed
}

/// Draw one target and verify it.
///
/// Returns `Ok(true)` when the read-back pixel matches the palette,
/// `Ok(false)` on a mismatch or capture failure (both retryable), and
/// `Err` only for pointer failures.
fn draw_target(
    plan: &DrawPlan,
    point: ScreenPoint,
    pointer: &mut dyn PointerDriver,
    probe: &mut dyn PixelProbe,
) -> Result<bool, BackendError> {
    pointer.move_to(point)?;
    if plan.priming_click {
        pointer.click()?;
    }

    // 1-pixel drag: some canvases ignore a plain click but register the
    // shortest possible stroke
    pointer.press()?;
    pointer.move_to(ScreenPoint::new(point.x + 1, point.y))?;
    pointer.move_to(point)?;
    pointer.release()?;

    if !plan.action_delay.is_zero() {
        std::thread::sleep(plan.action_delay);
    }

    match probe.pixel_at(point) {
        Ok(actual) => Ok(plan
            .palette
            .iter()
            .any(|&expected| expected.within_tolerance(actual, plan.verify_tolerance))),
        Err(e) => {
            tracing::debug!(%e, x = point.x, y = point.y, "Capture failed, treating as mismatch");
            Ok(false)
        }
    }
}
