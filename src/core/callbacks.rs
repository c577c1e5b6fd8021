//! Explicit callback registration for a single state.
//!
//! A `StateCallbacks` value is a small capability struct: every callback is
//! optional, and only the ones that are set replace what a slot already holds.

use std::fmt;

/// Zero-argument callback.
pub type VoidFn = Box<dyn FnMut() + Send>;

/// Callback receiving a progress value in `0.0..=1.0`.
pub type ProgressFn = Box<dyn FnMut(f32) + Send>;

/// The form an enter or exit callback takes.
///
/// A progress callback turns the phase into a timed routine driven over the
/// configured duration. A discrete callback collapses the duration to zero and
/// is invoked exactly once when the phase completes.
pub enum PhaseCallback {
    Progress(ProgressFn),
    Discrete(VoidFn),
}

impl PhaseCallback {
    /// Whether this is the timed (progress) form.
    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Progress(_))
    }
}

impl fmt::Debug for PhaseCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progress(_) => f.write_str("Progress(..)"),
            Self::Discrete(_) => f.write_str("Discrete(..)"),
        }
    }
}

/// Names the callback slots a state exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Enter,
    Exit,
    Cancel,
    Update,
    LateUpdate,
    FixedUpdate,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Cancel => "cancel",
            Self::Update => "update",
            Self::LateUpdate => "late_update",
            Self::FixedUpdate => "fixed_update",
        };
        f.write_str(name)
    }
}

/// Callbacks to bind to one state.
///
/// Built fluently; each setter may be called at most once per value. Binding
/// the same callback twice (including the progress and discrete forms of
/// `Enter` or `Exit`) is recorded and rejected when the value is registered.
///
/// # The cancel callback
///
/// `on_cancel` carries two meanings and handlers should be written for both:
///
/// - **abort**: a running enter or exit routine of this state was cancelled
///   before reaching progress 1.
/// - **reset**: an `Overwrite` request replaced this state while it was the
///   queued target, whether or not its enter had already completed. The hook
///   is the place to put UI and other side effects back to a neutral state
///   before the next enter starts.
///
/// When `Overwrite` replaces a queued target whose enter is still running,
/// both fire: the reset first, then the abort. Handlers should be idempotent.
///
/// # Example
///
/// ```rust
/// use tempo_fsm::core::StateCallbacks;
///
/// let callbacks = StateCallbacks::new()
///     .on_enter_progress(|t| println!("fading in: {t}"))
///     .on_exit(|| println!("gone"))
///     .on_update(|| {});
///
/// assert!(callbacks.conflicts().is_empty());
/// ```
#[derive(Default)]
pub struct StateCallbacks {
    pub(crate) enter: Option<PhaseCallback>,
    pub(crate) exit: Option<PhaseCallback>,
    pub(crate) cancel: Option<VoidFn>,
    pub(crate) update: Option<VoidFn>,
    pub(crate) late_update: Option<VoidFn>,
    pub(crate) fixed_update: Option<VoidFn>,
    conflicts: Vec<CallbackKind>,
}

impl StateCallbacks {
    /// Create an empty set of callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a discrete enter callback, fired once when the enter completes.
    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.bind_phase(CallbackKind::Enter, PhaseCallback::Discrete(Box::new(callback)));
        self
    }

    /// Bind a progress enter callback, driven from 0 to 1 over the enter duration.
    pub fn on_enter_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.bind_phase(CallbackKind::Enter, PhaseCallback::Progress(Box::new(callback)));
        self
    }

    /// Bind a discrete exit callback.
    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.bind_phase(CallbackKind::Exit, PhaseCallback::Discrete(Box::new(callback)));
        self
    }

    /// Bind a progress exit callback.
    pub fn on_exit_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.bind_phase(CallbackKind::Exit, PhaseCallback::Progress(Box::new(callback)));
        self
    }

    /// Bind the cancel callback. See the type-level docs for its two meanings.
    pub fn on_cancel<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel = self.bind_void(CallbackKind::Cancel, self.cancel.is_some(), callback);
        self
    }

    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.update = self.bind_void(CallbackKind::Update, self.update.is_some(), callback);
        self
    }

    pub fn on_late_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.late_update =
            self.bind_void(CallbackKind::LateUpdate, self.late_update.is_some(), callback);
        self
    }

    pub fn on_fixed_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.fixed_update =
            self.bind_void(CallbackKind::FixedUpdate, self.fixed_update.is_some(), callback);
        self
    }

    /// Callbacks that were bound more than once, in the order detected.
    pub fn conflicts(&self) -> &[CallbackKind] {
        &self.conflicts
    }

    fn bind_phase(&mut self, kind: CallbackKind, callback: PhaseCallback) {
        let target = match kind {
            CallbackKind::Enter => &mut self.enter,
            _ => &mut self.exit,
        };
        if target.is_some() {
            self.conflicts.push(kind);
        }
        *target = Some(callback);
    }

    fn bind_void<F>(&mut self, kind: CallbackKind, already_bound: bool, callback: F) -> Option<VoidFn>
    where
        F: FnMut() + Send + 'static,
    {
        if already_bound {
            self.conflicts.push(kind);
        }
        Some(Box::new(callback))
    }
}

impl fmt::Debug for StateCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCallbacks")
            .field("enter", &self.enter)
            .field("exit", &self.exit)
            .field("cancel", &self.cancel.is_some())
            .field("update", &self.update.is_some())
            .field("late_update", &self.late_update.is_some())
            .field("fixed_update", &self.fixed_update.is_some())
            .field("conflicts", &self.conflicts)
            .finish()
    }
}
