//! Timed enter/exit routines.
//!
//! A routine advances a progress value from 0 to 1 over a duration, one
//! `advance` call at a time, and ends exactly once: either completed or
//! cancelled. Routines never block; between calls they are simply suspended.

use super::slot::{Phase, SlotIndex, StateSlot};
use super::state::StateId;
use tracing::trace;

/// Lifecycle of a routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutineStatus {
    /// Created and queued, not started yet.
    Pending,
    /// Started and advancing.
    Running,
    /// Reached progress 1.
    Completed,
    /// Stopped before completion.
    Cancelled,
}

impl RoutineStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// A single timed enter or exit execution for one slot.
#[derive(Clone, Debug)]
pub struct TimedRoutine {
    slot: SlotIndex,
    phase: Phase,
    duration: f32,
    elapsed: f32,
    progress: f32,
    status: RoutineStatus,
}

impl TimedRoutine {
    pub(crate) fn new(slot: SlotIndex, phase: Phase, duration: f32) -> Self {
        Self {
            slot,
            phase,
            duration,
            elapsed: 0.0,
            progress: 0.0,
            status: RoutineStatus::Pending,
        }
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_enter(&self) -> bool {
        self.phase == Phase::Enter
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Last emitted progress, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn status(&self) -> RoutineStatus {
        self.status
    }

    /// Start the routine and emit progress 0.
    ///
    /// A routine with `duration <= 0` completes inside this call: progress
    /// goes straight to 1 and only the slot's discrete callback fires.
    pub(crate) fn start<S: StateId>(&mut self, slot: &mut StateSlot<S>) -> RoutineStatus {
        if self.status != RoutineStatus::Pending {
            return self.status;
        }
        self.status = RoutineStatus::Running;
        slot.set_in_transition(true);
        trace!(
            state = slot.state().name(),
            phase = %self.phase,
            duration = self.duration,
            "routine started"
        );

        self.emit(slot, 0.0);
        if self.duration <= 0.0 {
            self.emit(slot, 1.0);
            self.complete(slot);
        }
        self.status
    }

    /// Advance by `dt` seconds and emit the resulting progress.
    ///
    /// Does nothing unless the routine is running.
    pub(crate) fn advance<S: StateId>(&mut self, dt: f32, slot: &mut StateSlot<S>) -> RoutineStatus {
        if self.status != RoutineStatus::Running {
            return self.status;
        }
        self.elapsed += dt;
        if self.elapsed < self.duration {
            self.emit(slot, self.elapsed / self.duration);
        } else {
            self.emit(slot, 1.0);
            self.complete(slot);
        }
        self.status
    }

    /// Cancel a running routine, firing the slot's cancel callback.
    ///
    /// Returns `false` when the routine had already terminated or never
    /// started; completion and cancellation are mutually exclusive.
    pub(crate) fn cancel<S: StateId>(&mut self, slot: &mut StateSlot<S>) -> bool {
        if self.status != RoutineStatus::Running {
            return false;
        }
        self.status = RoutineStatus::Cancelled;
        slot.set_pending(self.phase, false);
        slot.set_in_transition(false);
        slot.emit_cancel();
        trace!(
            state = slot.state().name(),
            phase = %self.phase,
            progress = self.progress,
            "routine cancelled"
        );
        true
    }

    /// Drop a routine that never started. No callback fires.
    pub(crate) fn discard<S: StateId>(&mut self, slot: &mut StateSlot<S>) {
        if self.status == RoutineStatus::Pending {
            self.status = RoutineStatus::Cancelled;
            slot.set_pending(self.phase, false);
        }
    }

    fn emit<S: StateId>(&mut self, slot: &mut StateSlot<S>, t: f32) {
        self.progress = t.clamp(0.0, 1.0);
        trace!(state = slot.state().name(), phase = %self.phase, t = self.progress, "progress");
        if self.duration > 0.0 {
            slot.emit_progress(self.phase, self.progress);
        }
    }

    fn complete<S: StateId>(&mut self, slot: &mut StateSlot<S>) {
        if self.duration <= 0.0 {
            slot.emit_discrete(self.phase);
        }
        self.status = RoutineStatus::Completed;
        slot.set_pending(self.phase, false);
        slot.set_in_transition(false);
    }
}
