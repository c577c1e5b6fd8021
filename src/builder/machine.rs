//! Builder for constructing state machines.

use crate::core::{StateCallbacks, StateId};
use crate::fsm::{FsmError, StateMachine, TransitionConfig, TransitionMode};

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```
/// use tempo_fsm::builder::StateMachineBuilder;
/// use tempo_fsm::core::StateCallbacks;
/// use tempo_fsm::fsm::TransitionMode;
/// use tempo_fsm::state_enum;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// let machine = StateMachineBuilder::new()
///     .mode(TransitionMode::Overwrite)
///     .durations(0.25, 0.25)
///     .state(Door::Closed, StateCallbacks::new().on_enter(|| {}))
///     .initial(Door::Closed)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), Some(Door::Closed));
/// ```
pub struct StateMachineBuilder<S: StateId> {
    config: TransitionConfig,
    states: Vec<(S, StateCallbacks)>,
    initial: Option<S>,
}

impl<S: StateId> StateMachineBuilder<S> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: TransitionConfig::default(),
            states: Vec::new(),
            initial: None,
        }
    }

    /// Replace the whole transition configuration.
    pub fn config(mut self, config: TransitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default transition mode.
    pub fn mode(mut self, mode: TransitionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the default enter and exit durations, in seconds.
    pub fn durations(mut self, enter: f32, exit: f32) -> Self {
        self.config.enter_duration = enter;
        self.config.exit_duration = exit;
        self
    }

    /// Bind callbacks to a state. Later bindings for the same state overlay
    /// earlier ones.
    pub fn state(mut self, state: S, callbacks: StateCallbacks) -> Self {
        self.states.push((state, callbacks));
        self
    }

    /// Request this state as soon as the machine is built (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Build the state machine.
    ///
    /// Fails on an empty state domain, invalid durations, a callback bound
    /// twice, or a state outside the domain.
    pub fn build(self) -> Result<StateMachine<S>, FsmError> {
        let mut machine = StateMachine::with_config(self.config)?;
        for (state, callbacks) in self.states {
            machine.register_callbacks(state, callbacks)?;
        }
        if let Some(initial) = self.initial {
            machine.change_state(initial)?;
        }
        Ok(machine)
    }
}

impl<S: StateId> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
