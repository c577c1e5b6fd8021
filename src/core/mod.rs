//! Core building blocks of the state machine.
//!
//! This module contains the pieces the machine is assembled from:
//! - State identifiers via the `StateId` trait
//! - Explicit callback registration (`StateCallbacks`)
//! - Per-state slots holding callbacks and transition flags
//! - Timed routines that drive enter/exit progress
//! - The linked transition queue that sequences routines
//!
//! Nothing here keeps time on its own: routines only move when the owner
//! advances them by a frame delta.

mod callbacks;
mod queue;
mod routine;
mod slot;
mod state;

pub use callbacks::{CallbackKind, PhaseCallback, ProgressFn, StateCallbacks, VoidFn};
pub use queue::{RoutineEvent, RoutineEventKind, TransitionQueue};
pub use routine::{RoutineStatus, TimedRoutine};
pub use slot::{Phase, SlotIndex, StateSlot};
pub use state::StateId;
