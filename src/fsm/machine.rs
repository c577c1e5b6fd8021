//! State machine that applies transition policies to timed enter/exit routines.

use super::config::{validate_durations, TransitionConfig, TransitionMode};
use super::error::FsmError;
use crate::core::{
    Phase, RoutineEvent, RoutineEventKind, SlotIndex, StateCallbacks, StateId, StateSlot,
    TransitionQueue,
};
use crate::runner::FramePhase;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Handle returned by [`StateMachine::on_state_changed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangedFn<S> = Box<dyn FnMut(S) + Send>;

/// Which states the machine has reached and who wants to hear about it.
///
/// `active` is the state whose enter most recently started; transition
/// policies decide against it. `current` only moves once an enter completes.
struct Tracker<S: StateId> {
    current: Option<SlotIndex>,
    last: Option<SlotIndex>,
    active: Option<SlotIndex>,
    subscribers: Vec<(SubscriptionId, ChangedFn<S>)>,
    next_subscription: u64,
}

impl<S: StateId> Tracker<S> {
    fn new() -> Self {
        Self {
            current: None,
            last: None,
            active: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    fn observe(&mut self, event: RoutineEvent, states: &[S]) {
        if event.phase != Phase::Enter {
            return;
        }
        match event.kind {
            RoutineEventKind::Started => self.active = Some(event.slot),
            RoutineEventKind::Completed => {
                if self.current != Some(event.slot) {
                    self.last = self.current;
                }
                self.current = Some(event.slot);
                let state = states[event.slot.0];
                debug!(state = state.name(), "state changed");
                for (_, subscriber) in self.subscribers.iter_mut() {
                    subscriber(state);
                }
            }
            RoutineEventKind::Cancelled => {
                if self.active == Some(event.slot) {
                    self.active = self.current;
                }
            }
        }
    }
}

/// Finite state machine over the identifiers of `S`.
///
/// One slot exists per identifier. Enter and exit phases run as timed
/// routines through a transition queue that only moves when
/// [`advance`](Self::advance) is called with a frame delta.
///
/// # Example
///
/// ```rust
/// use tempo_fsm::core::StateCallbacks;
/// use tempo_fsm::fsm::StateMachine;
/// use tempo_fsm::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let mut machine = StateMachine::<Light>::new().unwrap();
/// machine
///     .register_callbacks(Light::Red, StateCallbacks::new().on_enter_progress(|_t| {}))
///     .unwrap();
///
/// machine.change_state(Light::Red).unwrap();
/// assert_eq!(machine.current_state(), None);
///
/// for _ in 0..4 {
///     machine.advance(0.125);
/// }
/// assert_eq!(machine.current_state(), Some(Light::Red));
/// ```
pub struct StateMachine<S: StateId> {
    slots: Vec<StateSlot<S>>,
    states: Vec<S>,
    lookup: HashMap<S, SlotIndex>,
    queue: TransitionQueue,
    tracker: Tracker<S>,
    queued: Option<SlotIndex>,
    config: TransitionConfig,
    enabled: bool,
}

impl<S: StateId> StateMachine<S> {
    /// Create a machine with one slot per variant of `S` and default settings.
    pub fn new() -> Result<Self, FsmError> {
        Self::with_config(TransitionConfig::default())
    }

    /// Create a machine with the given transition settings.
    pub fn with_config(config: TransitionConfig) -> Result<Self, FsmError> {
        config.validate()?;

        let mut states = S::variants();
        let mut seen = std::collections::HashSet::new();
        states.retain(|state| seen.insert(*state));

        if states.is_empty() {
            let state_type = std::any::type_name::<S>();
            warn!(state_type, "state domain is empty");
            return Err(FsmError::EmptyStateDomain { state_type });
        }

        let slots: Vec<_> = states
            .iter()
            .enumerate()
            .map(|(i, state)| StateSlot::new(*state, SlotIndex(i)))
            .collect();
        let lookup = states
            .iter()
            .enumerate()
            .map(|(i, state)| (*state, SlotIndex(i)))
            .collect();

        debug!(states = slots.len(), mode = ?config.mode, "state machine created");
        Ok(Self {
            slots,
            states,
            lookup,
            queue: TransitionQueue::new(),
            tracker: Tracker::new(),
            queued: None,
            config,
            enabled: true,
        })
    }

    /// Bind callbacks to a state, overwriting the ones it already had.
    pub fn register_callbacks(
        &mut self,
        state: S,
        callbacks: StateCallbacks,
    ) -> Result<(), FsmError> {
        if let Some(kind) = callbacks.conflicts().first() {
            warn!(state = state.name(), callback = %kind, "conflicting callback binding");
            return Err(FsmError::InvalidCallbackBinding {
                state: state.name().to_string(),
                callback: *kind,
                reason: "bound more than once".to_string(),
            });
        }
        let index = self.resolve(state)?;
        self.slots[index.0].bind(callbacks);
        debug!(state = state.name(), "callbacks registered");
        Ok(())
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn mode(&self) -> TransitionMode {
        self.config.mode
    }

    /// Set the mode used by [`change_state`](Self::change_state).
    pub fn set_mode(&mut self, mode: TransitionMode) {
        self.config.mode = mode;
    }

    /// Set the default enter and exit durations, in seconds.
    pub fn set_durations(&mut self, enter: f32, exit: f32) -> Result<(), FsmError> {
        validate_durations(enter, exit)?;
        self.config.enter_duration = enter;
        self.config.exit_duration = exit;
        Ok(())
    }

    /// Request `target` using the configured mode and durations.
    pub fn change_state(&mut self, target: S) -> Result<(), FsmError> {
        let TransitionConfig {
            mode,
            enter_duration,
            exit_duration,
        } = self.config;
        self.change_state_timed(target, mode, enter_duration, exit_duration)
    }

    /// Request `target` with an explicit mode and the configured durations.
    pub fn change_state_with(&mut self, target: S, mode: TransitionMode) -> Result<(), FsmError> {
        let (enter, exit) = (self.config.enter_duration, self.config.exit_duration);
        self.change_state_timed(target, mode, enter, exit)
    }

    /// Request `target` with an explicit mode and durations.
    ///
    /// Requests the policy decides to absorb (already active, already queued,
    /// blend without a fresh exit) return `Ok(())` without side effects.
    pub fn change_state_timed(
        &mut self,
        target: S,
        mode: TransitionMode,
        enter_duration: f32,
        exit_duration: f32,
    ) -> Result<(), FsmError> {
        validate_durations(enter_duration, exit_duration)?;
        let next = self.resolve(target)?;

        if self.tracker.active == Some(next) {
            debug!(state = target.name(), "already in requested state");
            return Ok(());
        }
        debug!(state = target.name(), ?mode, "change state requested");

        let Some(active) = self.tracker.active else {
            self.enqueue(next, Phase::Enter, enter_duration);
            self.queued = Some(next);
            return Ok(());
        };

        match mode {
            TransitionMode::Safe => {
                if !self.slots[active.0].is_pending(Phase::Exit) {
                    self.enqueue(active, Phase::Exit, exit_duration);
                    self.enqueue(next, Phase::Enter, enter_duration);
                    self.queued = Some(next);
                } else if self.queued != Some(next) {
                    self.enqueue(next, Phase::Enter, enter_duration);
                    self.queued = Some(next);
                } else {
                    debug!(state = target.name(), "state already queued");
                }
            }
            TransitionMode::Overwrite => {
                // Reset the queued target first. If its routine is still
                // running, cancelling the queue aborts it as well.
                if let Some(queued) = self.queued {
                    self.slots[queued.0].emit_cancel();
                }
                self.cancel_queue();
                self.enqueue(next, Phase::Enter, enter_duration);
                self.queued = Some(next);
            }
            TransitionMode::Blend => {
                if !self.slots[active.0].is_pending(Phase::Exit) {
                    let exit = self.slots[active.0].create_routine(Phase::Exit, exit_duration);
                    let enter = self.slots[next.0].create_routine(Phase::Enter, enter_duration);
                    let Self {
                        queue,
                        slots,
                        states,
                        tracker,
                        ..
                    } = self;
                    queue.add_pair(exit, enter, slots, &mut |event| {
                        tracker.observe(event, states)
                    });
                    self.queued = Some(next);
                } else {
                    debug!(state = target.name(), "blend ignored, exit already pending");
                }
            }
        }
        Ok(())
    }

    /// Cancel every pending and running routine.
    ///
    /// Running routines fire their state's cancel callback. The machine
    /// stays in its last completed state.
    pub fn cancel_all(&mut self) {
        debug!("cancelling all transitions");
        self.cancel_queue();
        self.queued = None;
    }

    /// Advance running routines by `dt` seconds.
    ///
    /// Negative and non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "ignoring invalid frame delta");
            return;
        }
        let Self {
            queue,
            slots,
            states,
            tracker,
            ..
        } = self;
        queue.advance(dt, slots, &mut |event| tracker.observe(event, states));
    }

    /// Invoke the current state's callback for `phase`.
    ///
    /// Returns `false`, without calling anything, while disabled, before the
    /// first enter completes, or while a transition is in flight.
    pub fn run_phase(&mut self, phase: FramePhase) -> bool {
        if !self.enabled || self.is_in_transition() {
            return false;
        }
        let Some(current) = self.tracker.current else {
            return false;
        };
        let slot = &mut self.slots[current.0];
        match phase {
            FramePhase::Update => slot.emit_update(),
            FramePhase::LateUpdate => slot.emit_late_update(),
            FramePhase::FixedUpdate => slot.emit_fixed_update(),
        }
        true
    }

    /// Subscribe to completed enters. Subscribers run in subscription order.
    pub fn on_state_changed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(S) + Send + 'static,
    {
        let id = SubscriptionId(self.tracker.next_subscription);
        self.tracker.next_subscription += 1;
        self.tracker.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.tracker.subscribers.len();
        self.tracker.subscribers.retain(|(sub, _)| *sub != id);
        self.tracker.subscribers.len() != before
    }

    /// State whose enter most recently completed.
    pub fn current_state(&self) -> Option<S> {
        self.tracker.current.map(|index| self.states[index.0])
    }

    /// State that was current before the current one.
    pub fn last_state(&self) -> Option<S> {
        self.tracker.last.map(|index| self.states[index.0])
    }

    /// State whose enter most recently started.
    pub fn active_state(&self) -> Option<S> {
        self.tracker.active.map(|index| self.states[index.0])
    }

    /// State the queue is working toward.
    pub fn queued_state(&self) -> Option<S> {
        self.queued.map(|index| self.states[index.0])
    }

    /// True while any enter or exit routine is running.
    pub fn is_in_transition(&self) -> bool {
        self.queue.is_busy()
    }

    pub fn current_slot(&self) -> Option<&StateSlot<S>> {
        self.tracker.current.map(|index| &self.slots[index.0])
    }

    pub fn slot(&self, state: S) -> Option<&StateSlot<S>> {
        self.lookup.get(&state).map(|index| &self.slots[index.0])
    }

    pub fn slots(&self) -> &[StateSlot<S>] {
        &self.slots
    }

    pub fn queue(&self) -> &TransitionQueue {
        &self.queue
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled machines keep transitioning but skip per-frame callbacks.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn resolve(&self, state: S) -> Result<SlotIndex, FsmError> {
        self.lookup.get(&state).copied().ok_or_else(|| {
            warn!(state = state.name(), "unknown state");
            FsmError::UnknownState {
                state: state.name().to_string(),
            }
        })
    }

    fn enqueue(&mut self, index: SlotIndex, phase: Phase, duration: f32) {
        let routine = self.slots[index.0].create_routine(phase, duration);
        let Self {
            queue,
            slots,
            states,
            tracker,
            ..
        } = self;
        queue.add(routine, slots, &mut |event| tracker.observe(event, states));
    }

    fn cancel_queue(&mut self) {
        let Self {
            queue,
            slots,
            states,
            tracker,
            ..
        } = self;
        queue.cancel(slots, &mut |event| tracker.observe(event, states));
    }
}

impl<S: StateId> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current_state())
            .field("last", &self.last_state())
            .field("active", &self.active_state())
            .field("queued", &self.queued_state())
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Color {
        Red,
        Blue,
        Green,
    }

    impl StateId for Color {
        fn variants() -> Vec<Self> {
            vec![Self::Red, Self::Blue, Self::Green]
        }

        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Blue => "Blue",
                Self::Green => "Green",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Nothing {}

    impl StateId for Nothing {
        fn variants() -> Vec<Self> {
            Vec::new()
        }

        fn name(&self) -> &str {
            match *self {}
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Partial {
        Listed,
        Unlisted,
    }

    impl StateId for Partial {
        fn variants() -> Vec<Self> {
            vec![Self::Listed, Self::Listed]
        }

        fn name(&self) -> &str {
            match self {
                Self::Listed => "Listed",
                Self::Unlisted => "Unlisted",
            }
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn machine(log: &Log) -> StateMachine<Color> {
        let mut machine = StateMachine::new().unwrap();
        for color in Color::variants() {
            let (l1, l2, l3, l4) = (
                Arc::clone(log),
                Arc::clone(log),
                Arc::clone(log),
                Arc::clone(log),
            );
            machine
                .register_callbacks(
                    color,
                    StateCallbacks::new()
                        .on_enter_progress(move |t| l1.lock().push(format!("{color:?} enter {t}")))
                        .on_exit_progress(move |t| l2.lock().push(format!("{color:?} exit {t}")))
                        .on_cancel(move || l3.lock().push(format!("{color:?} cancel")))
                        .on_update(move || l4.lock().push(format!("{color:?} update"))),
                )
                .unwrap();
        }
        machine
    }

    fn settle(machine: &mut StateMachine<Color>) {
        for _ in 0..64 {
            if !machine.is_in_transition() {
                return;
            }
            machine.advance(0.125);
        }
        panic!("machine did not settle");
    }

    #[test]
    fn one_slot_per_variant() {
        let machine = StateMachine::<Color>::new().unwrap();
        assert_eq!(machine.slots().len(), 3);
        for color in Color::variants() {
            assert_eq!(machine.slot(color).map(StateSlot::state), Some(color));
        }
    }

    #[test]
    fn empty_domain_is_a_configuration_error() {
        let result = StateMachine::<Nothing>::new();
        assert!(matches!(result, Err(FsmError::EmptyStateDomain { .. })));
    }

    #[test]
    fn duplicate_variants_get_a_single_slot() {
        let machine = StateMachine::<Partial>::new().unwrap();
        assert_eq!(machine.slots().len(), 1);
    }

    #[test]
    fn unknown_target_is_a_configuration_error() {
        let mut machine = StateMachine::<Partial>::new().unwrap();
        let result = machine.change_state(Partial::Unlisted);
        assert_eq!(
            result,
            Err(FsmError::UnknownState {
                state: "Unlisted".to_string()
            })
        );
        assert!(!machine.is_in_transition());
    }

    #[test]
    fn conflicting_registration_is_rejected() {
        let mut machine = StateMachine::<Color>::new().unwrap();
        let result = machine.register_callbacks(
            Color::Red,
            StateCallbacks::new().on_exit(|| {}).on_exit_progress(|_| {}),
        );
        assert!(matches!(
            result,
            Err(FsmError::InvalidCallbackBinding {
                callback: crate::core::CallbackKind::Exit,
                ..
            })
        ));
        assert!(!machine.slot(Color::Red).unwrap().has_exit_routine());
    }

    #[test]
    fn current_state_moves_only_when_enter_completes() {
        let log = Log::default();
        let mut machine = machine(&log);
        let changes = Arc::new(Mutex::new(Vec::new()));
        let c = Arc::clone(&changes);
        machine.on_state_changed(move |state| c.lock().push(state));

        machine.change_state(Color::Red).unwrap();
        assert_eq!(machine.active_state(), Some(Color::Red));
        for _ in 0..3 {
            machine.advance(0.125);
            assert_eq!(machine.current_state(), None);
            assert!(machine.current_slot().is_none());
        }
        machine.advance(0.125);

        assert_eq!(machine.current_state(), Some(Color::Red));
        assert_eq!(machine.current_slot().map(StateSlot::state), Some(Color::Red));
        assert_eq!(*changes.lock(), vec![Color::Red]);
        assert_eq!(
            *log.lock(),
            vec![
                "Red enter 0",
                "Red enter 0.25",
                "Red enter 0.5",
                "Red enter 0.75",
                "Red enter 1"
            ]
        );
    }

    #[test]
    fn requesting_the_active_state_is_a_no_op() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);
        let entries = log.lock().len();

        machine.change_state(Color::Red).unwrap();
        assert!(!machine.is_in_transition());
        assert_eq!(log.lock().len(), entries);
    }

    #[test]
    fn safe_runs_exit_before_enter() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);
        log.lock().clear();

        machine.change_state(Color::Blue).unwrap();
        assert_eq!(machine.queued_state(), Some(Color::Blue));
        settle(&mut machine);

        let log = log.lock();
        let last_exit = log.iter().rposition(|e| e.starts_with("Red exit")).unwrap();
        let first_enter = log.iter().position(|e| e.starts_with("Blue enter")).unwrap();
        assert!(last_exit < first_enter);
        assert_eq!(log[last_exit], "Red exit 1");
        assert_eq!(machine.current_state(), Some(Color::Blue));
        assert_eq!(machine.last_state(), Some(Color::Red));
    }

    #[test]
    fn safe_ignores_repeated_request_for_queued_state() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        machine.change_state(Color::Blue).unwrap();
        machine.change_state(Color::Blue).unwrap();

        assert_eq!(machine.queue().pending_len(), 2);
        settle(&mut machine);

        let blue_starts = log.lock().iter().filter(|e| *e == "Blue enter 0").count();
        assert_eq!(blue_starts, 1);
        assert_eq!(machine.current_state(), Some(Color::Blue));
    }

    #[test]
    fn overwrite_cancels_running_enter() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state_with(Color::Red, TransitionMode::Overwrite).unwrap();
        machine.advance(0.125);
        machine.change_state_with(Color::Blue, TransitionMode::Overwrite).unwrap();
        settle(&mut machine);

        let log = log.lock();
        // Reset for the queued target, then abort for its running enter.
        assert_eq!(log.iter().filter(|e| *e == "Red cancel").count(), 2);
        assert_eq!(log[1..4], ["Red enter 0.25", "Red cancel", "Red cancel"]);
        assert!(!log.iter().any(|e| e == "Red enter 1"));
        assert!(log.iter().any(|e| e == "Blue enter 1"));
        assert!(!log.iter().any(|e| e.contains("exit")));
        assert_eq!(machine.current_state(), Some(Color::Blue));
        assert_eq!(machine.last_state(), None);
    }

    #[test]
    fn overwrite_resets_completed_queued_target() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);

        machine.change_state_with(Color::Green, TransitionMode::Overwrite).unwrap();
        assert_eq!(log.lock().iter().filter(|e| *e == "Red cancel").count(), 1);
        settle(&mut machine);
        assert_eq!(machine.current_state(), Some(Color::Green));
        assert_eq!(machine.last_state(), Some(Color::Red));
    }

    #[test]
    fn blend_overlaps_exit_and_enter() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);
        log.lock().clear();

        machine
            .change_state_timed(Color::Blue, TransitionMode::Blend, 0.25, 0.5)
            .unwrap();
        machine.advance(0.125);
        machine.advance(0.125);
        assert_eq!(machine.current_state(), Some(Color::Blue));
        assert!(machine.is_in_transition());

        machine.advance(0.25);
        assert!(!machine.is_in_transition());
        assert_eq!(
            *log.lock(),
            vec![
                "Red exit 0",
                "Blue enter 0",
                "Red exit 0.25",
                "Blue enter 0.5",
                "Red exit 0.5",
                "Blue enter 1",
                "Red exit 1",
            ]
        );
    }

    #[test]
    fn blend_without_fresh_exit_is_ignored() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);

        machine.change_state(Color::Blue).unwrap();
        machine.change_state_with(Color::Green, TransitionMode::Blend).unwrap();
        assert_eq!(machine.queued_state(), Some(Color::Blue));
        settle(&mut machine);

        assert_eq!(machine.current_state(), Some(Color::Blue));
        assert!(!log.lock().iter().any(|e| e.starts_with("Green")));
    }

    #[test]
    fn cancel_all_keeps_last_completed_state() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        settle(&mut machine);
        machine.change_state(Color::Blue).unwrap();
        machine.advance(0.125);

        machine.cancel_all();
        assert!(!machine.is_in_transition());
        assert_eq!(machine.current_state(), Some(Color::Red));
        assert_eq!(machine.active_state(), Some(Color::Red));
        assert_eq!(machine.queued_state(), None);
        assert!(!machine.slot(Color::Red).unwrap().is_pending(Phase::Exit));

        machine.change_state(Color::Green).unwrap();
        settle(&mut machine);
        assert_eq!(machine.current_state(), Some(Color::Green));
    }

    #[test]
    fn run_phase_waits_for_transition_and_enabled() {
        let log = Log::default();
        let mut machine = machine(&log);
        assert!(!machine.run_phase(FramePhase::Update));

        machine.change_state(Color::Red).unwrap();
        assert!(!machine.run_phase(FramePhase::Update));
        settle(&mut machine);
        assert!(machine.run_phase(FramePhase::Update));
        assert!(machine.run_phase(FramePhase::LateUpdate));

        machine.set_enabled(false);
        assert!(!machine.run_phase(FramePhase::Update));

        let updates = log.lock().iter().filter(|e| *e == "Red update").count();
        assert_eq!(updates, 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut machine = StateMachine::<Color>::new().unwrap();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let c = Arc::clone(&changes);
        let id = machine.on_state_changed(move |state| c.lock().push(state));

        machine.change_state(Color::Red).unwrap();
        assert!(machine.unsubscribe(id));
        assert!(!machine.unsubscribe(id));
        machine.change_state(Color::Blue).unwrap();

        assert_eq!(*changes.lock(), vec![Color::Red]);
        assert_eq!(machine.current_state(), Some(Color::Blue));
    }

    #[test]
    fn invalid_frame_deltas_are_ignored() {
        let log = Log::default();
        let mut machine = machine(&log);
        machine.change_state(Color::Red).unwrap();
        machine.advance(0.125);

        machine.advance(-0.125);
        machine.advance(f32::NAN);
        machine.advance(f32::INFINITY);
        assert!(machine.is_in_transition());
        assert_eq!(machine.current_state(), None);
        assert_eq!(*log.lock(), vec!["Red enter 0", "Red enter 0.25"]);

        machine.advance(0.125);
        assert_eq!(log.lock().last().map(String::as_str), Some("Red enter 0.5"));
    }

    #[test]
    fn invalid_durations_are_rejected() {
        let mut machine = StateMachine::<Color>::new().unwrap();
        assert!(machine.set_durations(f32::NAN, 0.5).is_err());
        assert!(machine
            .change_state_timed(Color::Red, TransitionMode::Safe, 0.5, f32::INFINITY)
            .is_err());
        assert_eq!(machine.active_state(), None);
    }
}
