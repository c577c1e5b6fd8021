//! Transition policy and timing configuration.

use super::error::FsmError;
use serde::{Deserialize, Serialize};

/// Default enter and exit duration, in seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

/// How a new state request interacts with a transition already in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Never interrupt a running phase; queue the exit of the active state
    /// followed by the enter of the target.
    #[default]
    Safe,

    /// Cancel everything in flight and start the target's enter directly,
    /// skipping the exit of the active state.
    Overwrite,

    /// Run the active state's exit and the target's enter concurrently.
    Blend,
}

/// Per-machine transition settings.
///
/// Loadable from JSON; missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use tempo_fsm::fsm::{TransitionConfig, TransitionMode};
///
/// let config = TransitionConfig::from_json(r#"{ "mode": "blend", "enter_duration": 1.0 }"#).unwrap();
/// assert_eq!(config.mode, TransitionMode::Blend);
/// assert_eq!(config.enter_duration, 1.0);
/// assert_eq!(config.exit_duration, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub mode: TransitionMode,
    pub enter_duration: f32,
    pub exit_duration: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            mode: TransitionMode::Safe,
            enter_duration: DEFAULT_DURATION,
            exit_duration: DEFAULT_DURATION,
        }
    }
}

impl TransitionConfig {
    pub fn new(mode: TransitionMode, enter_duration: f32, exit_duration: f32) -> Self {
        Self {
            mode,
            enter_duration,
            exit_duration,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, FsmError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, FsmError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject durations that are NaN or infinite.
    ///
    /// Zero and negative durations are valid: the routine completes on the
    /// pass that starts it.
    pub fn validate(&self) -> Result<(), FsmError> {
        validate_durations(self.enter_duration, self.exit_duration)
    }
}

pub(crate) fn validate_durations(enter: f32, exit: f32) -> Result<(), FsmError> {
    for (name, value) in [("enter_duration", enter), ("exit_duration", exit)] {
        if !value.is_finite() {
            return Err(FsmError::InvalidConfig {
                reason: format!("{name} must be finite, got {value}"),
            });
        }
    }
    Ok(())
}
