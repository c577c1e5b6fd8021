//! Errors surfaced by state machine construction, registration and control.

use crate::core::CallbackKind;
use thiserror::Error;

/// Errors that can occur when configuring or driving a state machine.
///
/// Policy no-ops (repeated requests, blend without a pending exit) and
/// cancellation races are absorbed by the transition policies and never
/// show up here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("State type '{state_type}' has no variants; a machine needs at least one state")]
    EmptyStateDomain { state_type: &'static str },

    #[error("No state named '{state}' is registered with this machine")]
    UnknownState { state: String },

    #[error("Invalid transition configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid {callback} callback binding for state '{state}': {reason}")]
    InvalidCallbackBinding {
        state: String,
        callback: CallbackKind,
        reason: String,
    },
}

impl FsmError {
    /// Whether this is a configuration error (empty domain, unknown state,
    /// bad configuration values).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::InvalidCallbackBinding { .. })
    }
}

impl From<serde_json::Error> for FsmError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
