//! Staged phase sequencing.
//!
//! A [`PhaseSchedule`] is a fixed list of `(delay, phase)` steps measured from
//! a common start. [`PhaseSequencer`] drives a schedule on the tokio timer and
//! publishes the current phase through a `watch` channel. Stopping or dropping
//! the sequencer cancels every pending step.
//!
//! The intro/loader reveal on the home page is described by
//! [`intro_schedule`]; clients fetch it and render each phase themselves.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// One step of a schedule: at `delay_ms` after start, the phase becomes `phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseStep {
    pub delay_ms: u64,
    pub phase: u32,
}

impl PhaseStep {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// An ordered set of phase steps with an initial phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSchedule {
    initial: u32,
    steps: Vec<PhaseStep>,
}

impl PhaseSchedule {
    /// Build a schedule from `(delay, phase)` pairs.
    ///
    /// Steps are sorted by delay. Rejects an empty step list and two steps
    /// sharing the same delay (the resulting phase would be ambiguous).
    pub fn new(
        initial: u32,
        steps: impl IntoIterator<Item = (Duration, u32)>,
    ) -> Result<Self, CoreError> {
        let mut steps: Vec<PhaseStep> = steps
            .into_iter()
            .map(|(delay, phase)| PhaseStep {
                delay_ms: delay.as_millis() as u64,
                phase,
            })
            .collect();

        if steps.is_empty() {
            return Err(CoreError::Validation(
                "A phase schedule needs at least one step".into(),
            ));
        }

        steps.sort_by_key(|s| s.delay_ms);
        if let Some(w) = steps.windows(2).find(|w| w[0].delay_ms == w[1].delay_ms) {
            return Err(CoreError::Validation(format!(
                "Duplicate phase delay {}ms",
                w[0].delay_ms
            )));
        }

        Ok(Self { initial, steps })
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }

    /// Phase reached once every step has fired.
    pub fn final_phase(&self) -> u32 {
        self.steps.last().map_or(self.initial, |s| s.phase)
    }

    /// Delay of the last step.
    pub fn total_duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, PhaseStep::delay)
    }

    /// The phase in effect `elapsed` after start.
    pub fn phase_at(&self, elapsed: Duration) -> u32 {
        let elapsed_ms = elapsed.as_millis() as u64;
        self.steps
            .iter()
            .take_while(|s| s.delay_ms <= elapsed_ms)
            .last()
            .map_or(self.initial, |s| s.phase)
    }
}

/// Phases of the home-page intro loader.
pub mod intro {
    pub const HIDDEN: u32 = 0;
    pub const LOGO: u32 = 1;
    pub const TAGLINE: u32 = 2;
    pub const CURTAIN: u32 = 3;
    pub const DONE: u32 = 4;
}

/// The home-page intro/loader schedule.
pub fn intro_schedule() -> PhaseSchedule {
    PhaseSchedule {
        initial: intro::HIDDEN,
        steps: vec![
            PhaseStep { delay_ms: 400, phase: intro::LOGO },
            PhaseStep { delay_ms: 1400, phase: intro::TAGLINE },
            PhaseStep { delay_ms: 2600, phase: intro::CURTAIN },
            PhaseStep { delay_ms: 3400, phase: intro::DONE },
        ],
    }
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Drives a [`PhaseSchedule`] on the tokio timer.
///
/// Must be started from within a tokio runtime. Dropping the sequencer
/// cancels the timer task; subscribers then observe a closed channel and the
/// last phase that fired.
pub struct PhaseSequencer {
    rx: watch::Receiver<u32>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PhaseSequencer {
    pub fn start(schedule: PhaseSchedule) -> Self {
        let (tx, rx) = watch::channel(schedule.initial);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            for step in schedule.steps {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => {
                        tracing::debug!("Phase sequencer cancelled");
                        return;
                    }
                    _ = sleep_until(start + step.delay()) => {
                        if tx.send(step.phase).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Self { rx, cancel, handle }
    }

    /// The current phase.
    pub fn phase(&self) -> u32 {
        *self.rx.borrow()
    }

    /// A receiver notified on every phase change.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.rx.clone()
    }

    /// Whether every step has fired (or the sequencer was stopped).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel all pending steps. The current phase is kept.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PhaseSequencer {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
