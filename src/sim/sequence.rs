//! Spin orchestration as a timer-driven state machine
//!
//! `begin` issues the first reel start and arms a timer. Each `advance`
//! consumes wall-clock time and returns every step whose timer has expired,
//! in order. Overshoot carries into the next timer, so one large advance
//! yields exactly the steps that many small ones would.

use crate::tuning::SpinTiming;

/// Where the spin cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    /// Waiting to start `next_reel`
    Starting { next_reel: usize },
    /// All reels started, waiting for the hold to end
    Holding,
    /// Waiting to signal `next_reel` to stop
    Stopping { next_reel: usize },
    /// All stop signals sent, waiting for visuals to settle
    Resolving,
}

/// Action the machine performs when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStep {
    StartReel(usize),
    StopReel(usize),
    Resolve,
}

#[derive(Debug, Clone)]
pub struct SpinSequence {
    phase: SpinPhase,
    /// Time left on the armed timer
    pending_ms: f64,
    reel_count: usize,
    timing: SpinTiming,
}

impl SpinSequence {
    pub fn new(reel_count: usize, timing: SpinTiming) -> Self {
        debug_assert!(reel_count > 0, "a spin needs at least one reel");
        Self {
            phase: SpinPhase::Idle,
            pending_ms: 0.0,
            reel_count,
            timing,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SpinPhase::Idle
    }

    /// Time until the next step fires (zero when idle)
    pub fn pending_ms(&self) -> f64 {
        self.pending_ms
    }

    /// Start a cycle. Returns the step to perform immediately, or `None` if a
    /// cycle is already running.
    pub fn begin(&mut self) -> Option<SpinStep> {
        if !self.is_idle() {
            return None;
        }
        self.after_start(0);
        Some(SpinStep::StartReel(0))
    }

    /// Consume `elapsed_ms` and return the steps that came due
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<SpinStep> {
        let mut steps = Vec::new();
        let mut remaining = elapsed_ms.max(0.0);

        while !self.is_idle() {
            if self.pending_ms > remaining {
                self.pending_ms -= remaining;
                break;
            }
            remaining -= self.pending_ms;
            steps.push(self.fire());
        }

        steps
    }

    /// Fire the armed timer and arm the next one
    fn fire(&mut self) -> SpinStep {
        match self.phase {
            SpinPhase::Starting { next_reel } => {
                self.after_start(next_reel);
                SpinStep::StartReel(next_reel)
            }
            SpinPhase::Holding => {
                self.after_stop(0);
                SpinStep::StopReel(0)
            }
            SpinPhase::Stopping { next_reel } => {
                self.after_stop(next_reel);
                SpinStep::StopReel(next_reel)
            }
            SpinPhase::Resolving => {
                self.phase = SpinPhase::Idle;
                self.pending_ms = 0.0;
                SpinStep::Resolve
            }
            SpinPhase::Idle => unreachable!("idle sequence has no armed timer"),
        }
    }

    fn after_start(&mut self, reel: usize) {
        if reel + 1 < self.reel_count {
            self.arm(
                SpinPhase::Starting { next_reel: reel + 1 },
                self.timing.reel_start_interval_ms,
            );
        } else {
            self.arm(SpinPhase::Holding, self.timing.hold_ms);
        }
    }

    fn after_stop(&mut self, reel: usize) {
        if reel + 1 < self.reel_count {
            self.arm(
                SpinPhase::Stopping { next_reel: reel + 1 },
                self.timing.reel_stop_interval_ms,
            );
        } else {
            self.arm(SpinPhase::Resolving, self.timing.settle_ms);
        }
    }

    fn arm(&mut self, phase: SpinPhase, delay_ms: f64) {
        self.phase = phase;
        self.pending_ms = delay_ms;
    }
}
