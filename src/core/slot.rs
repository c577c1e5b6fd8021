//! Per-state slot holding registered callbacks and transition flags.

use super::callbacks::{PhaseCallback, StateCallbacks, VoidFn};
use super::routine::TimedRoutine;
use super::state::StateId;
use std::fmt;

/// Index of a slot inside its machine's slot table.
///
/// Routines refer to slots by index so that flag and callback changes made
/// through the machine are visible to routines already in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub(crate) usize);

impl SlotIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Which half of a transition a routine drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Record for one state: its behavior callbacks and transition flags.
///
/// Slots are created once per state when a machine is built and are owned
/// exclusively by that machine.
pub struct StateSlot<S: StateId> {
    state: S,
    index: SlotIndex,
    enter: Option<PhaseCallback>,
    exit: Option<PhaseCallback>,
    cancel: Option<VoidFn>,
    update: Option<VoidFn>,
    late_update: Option<VoidFn>,
    fixed_update: Option<VoidFn>,
    enter_pending: bool,
    exit_pending: bool,
    in_transition: bool,
}

impl<S: StateId> StateSlot<S> {
    pub(crate) fn new(state: S, index: SlotIndex) -> Self {
        Self {
            state,
            index,
            enter: None,
            exit: None,
            cancel: None,
            update: None,
            late_update: None,
            fixed_update: None,
            enter_pending: false,
            exit_pending: false,
            in_transition: false,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn index(&self) -> SlotIndex {
        self.index
    }

    /// Whether enter is bound in its progress form.
    pub fn has_enter_routine(&self) -> bool {
        self.enter.as_ref().is_some_and(PhaseCallback::is_progress)
    }

    /// Whether exit is bound in its progress form.
    pub fn has_exit_routine(&self) -> bool {
        self.exit.as_ref().is_some_and(PhaseCallback::is_progress)
    }

    /// True from the moment a routine for `phase` is created until it
    /// completes, is cancelled or is discarded.
    pub fn is_pending(&self, phase: Phase) -> bool {
        match phase {
            Phase::Enter => self.enter_pending,
            Phase::Exit => self.exit_pending,
        }
    }

    /// True while a routine for this slot is advancing.
    pub fn is_in_transition(&self) -> bool {
        self.in_transition
    }

    /// Overlay the callbacks that are set; unset ones keep their binding.
    pub(crate) fn bind(&mut self, callbacks: StateCallbacks) {
        let StateCallbacks {
            enter,
            exit,
            cancel,
            update,
            late_update,
            fixed_update,
            ..
        } = callbacks;

        overwrite(&mut self.enter, enter);
        overwrite(&mut self.exit, exit);
        overwrite(&mut self.cancel, cancel);
        overwrite(&mut self.update, update);
        overwrite(&mut self.late_update, late_update);
        overwrite(&mut self.fixed_update, fixed_update);
    }

    /// Create a routine for `phase`, marking the phase pending.
    ///
    /// The configured duration only applies when the phase has a progress
    /// callback; otherwise the routine collapses to zero length so only the
    /// discrete callback fires.
    pub(crate) fn create_routine(&mut self, phase: Phase, configured: f32) -> TimedRoutine {
        let duration = match phase {
            Phase::Enter if self.has_enter_routine() => configured,
            Phase::Exit if self.has_exit_routine() => configured,
            _ => 0.0,
        };
        self.set_pending(phase, true);
        TimedRoutine::new(self.index, phase, duration)
    }

    pub(crate) fn set_pending(&mut self, phase: Phase, pending: bool) {
        match phase {
            Phase::Enter => self.enter_pending = pending,
            Phase::Exit => self.exit_pending = pending,
        }
    }

    pub(crate) fn set_in_transition(&mut self, value: bool) {
        self.in_transition = value;
    }

    pub(crate) fn emit_progress(&mut self, phase: Phase, t: f32) {
        let callback = match phase {
            Phase::Enter => self.enter.as_mut(),
            Phase::Exit => self.exit.as_mut(),
        };
        if let Some(PhaseCallback::Progress(f)) = callback {
            f(t);
        }
    }

    pub(crate) fn emit_discrete(&mut self, phase: Phase) {
        let callback = match phase {
            Phase::Enter => self.enter.as_mut(),
            Phase::Exit => self.exit.as_mut(),
        };
        if let Some(PhaseCallback::Discrete(f)) = callback {
            f();
        }
    }

    pub(crate) fn emit_cancel(&mut self) {
        call(&mut self.cancel);
    }

    pub(crate) fn emit_update(&mut self) {
        call(&mut self.update);
    }

    pub(crate) fn emit_late_update(&mut self) {
        call(&mut self.late_update);
    }

    pub(crate) fn emit_fixed_update(&mut self) {
        call(&mut self.fixed_update);
    }
}

impl<S: StateId> fmt::Debug for StateSlot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSlot")
            .field("state", &self.state)
            .field("enter", &self.enter)
            .field("exit", &self.exit)
            .field("enter_pending", &self.enter_pending)
            .field("exit_pending", &self.exit_pending)
            .field("in_transition", &self.in_transition)
            .finish_non_exhaustive()
    }
}

fn overwrite<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

fn call(callback: &mut Option<VoidFn>) {
    if let Some(f) = callback.as_mut() {
        f();
    }
}
