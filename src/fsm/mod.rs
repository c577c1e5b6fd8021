//! The state machine and its transition policies.
//!
//! # Key Concepts
//!
//! - **Transition modes**: `Safe` queues, `Overwrite` cancels, `Blend` overlaps
//! - **State Machine**: resolves requests against the active state and feeds
//!   timed routines into its transition queue
//! - **Configuration**: per-machine mode and durations, loadable from JSON
//!
//! A machine never reads a clock. Routines move only when `advance` is
//! called, which a [`MachineRunner`](crate::runner::MachineRunner) does for
//! every registered machine once per frame.

mod config;
mod error;
mod machine;

pub use config::{TransitionConfig, TransitionMode, DEFAULT_DURATION};
pub use error::FsmError;
pub use machine::{StateMachine, SubscriptionId};
