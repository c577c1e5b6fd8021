//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! declaring states, binding their callbacks and picking an initial state
//! with minimal boilerplate.

pub mod machine;
pub mod macros;

pub use machine::StateMachineBuilder;
