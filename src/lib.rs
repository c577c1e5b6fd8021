//! Tempo: a frame-driven finite state machine with timed transitions.
//!
//! Tempo separates *when and how* a machine switches states (the transition
//! policy) from *what happens* while it does (the callbacks bound to each
//! state). Enter and exit phases are timed routines that report progress from
//! 0 to 1 as the host advances frames.
//!
//! # Core Concepts
//!
//! - **StateId**: a finite, enumerable set of state identifiers
//! - **StateCallbacks**: explicit registration of enter/exit/cancel/update hooks
//! - **TransitionMode**: `Safe` queues, `Overwrite` cancels, `Blend` overlaps
//! - **MachineRunner**: visits every live machine once per frame phase
//!
//! # Example
//!
//! ```rust
//! use tempo_fsm::core::StateCallbacks;
//! use tempo_fsm::fsm::StateMachine;
//! use tempo_fsm::runner::{FramePhase, MachineRunner};
//! use tempo_fsm::state_enum;
//!
//! state_enum! {
//!     enum Panel {
//!         Red,
//!         Blue,
//!     }
//! }
//!
//! let mut machine = StateMachine::<Panel>::new().unwrap();
//! machine
//!     .register_callbacks(
//!         Panel::Red,
//!         StateCallbacks::new()
//!             .on_enter_progress(|t| println!("red alpha {t}"))
//!             .on_update(|| println!("red is showing")),
//!     )
//!     .unwrap();
//!
//! let runner = MachineRunner::new();
//! let (_id, machine) = runner.spawn_with_initial(machine, Panel::Red).unwrap();
//!
//! for _ in 0..4 {
//!     runner.advance(0.125);
//! }
//! assert_eq!(machine.lock().current_state(), Some(Panel::Red));
//! assert_eq!(runner.tick(FramePhase::Update), 1);
//! ```

pub mod builder;
pub mod core;
pub mod fsm;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{StateCallbacks, StateId};
pub use builder::StateMachineBuilder;
pub use fsm::{FsmError, StateMachine, TransitionConfig, TransitionMode};
pub use runner::{FramePhase, MachineId, MachineRunner};
