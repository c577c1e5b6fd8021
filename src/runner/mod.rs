//! Frame-driven runner for live state machines.
//!
//! The host owns a `MachineRunner` and calls it once per frame phase. The
//! runner advances every registered machine's transition routines and forwards
//! per-frame callbacks to machines that are settled in a state.
//!
//! Machines are held weakly: dropping the last strong handle tears a machine
//! down and the runner skips it from then on.

use crate::core::StateId;
use crate::fsm::{FsmError, StateMachine};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};
use uuid::Uuid;

/// Per-frame phase a host forwards to its machines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FramePhase {
    Update,
    LateUpdate,
    FixedUpdate,
}

/// Identifies a machine registered with a runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Anything the runner can drive once per frame.
pub trait Tickable: Send {
    /// Advance running transitions by `dt` seconds.
    fn advance(&mut self, dt: f32);

    /// Forward `phase` to the settled state. Returns whether a callback ran.
    fn run_phase(&mut self, phase: FramePhase) -> bool;
}

impl<S: StateId> Tickable for StateMachine<S> {
    fn advance(&mut self, dt: f32) {
        StateMachine::advance(self, dt);
    }

    fn run_phase(&mut self, phase: FramePhase) -> bool {
        StateMachine::run_phase(self, phase)
    }
}

/// Shared handle to a machine driven by a runner.
pub type SharedMachine<S> = Arc<Mutex<StateMachine<S>>>;

type WeakTickable = Weak<Mutex<dyn Tickable>>;

/// Registry of live machines, visited in registration order.
#[derive(Default)]
pub struct MachineRunner {
    machines: RwLock<Vec<(MachineId, WeakTickable)>>,
}

impl MachineRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a machine. The runner does not keep it alive.
    pub fn register<T>(&self, machine: &Arc<Mutex<T>>) -> MachineId
    where
        T: Tickable + 'static,
    {
        let shared: Arc<Mutex<dyn Tickable>> = machine.clone();
        let id = MachineId::new();
        self.machines.write().push((id, Arc::downgrade(&shared)));
        debug!(machine = %id, "machine registered");
        id
    }

    /// Wrap `machine` in a shared handle and register it.
    pub fn spawn<S: StateId>(&self, machine: StateMachine<S>) -> (MachineId, SharedMachine<S>) {
        let shared = Arc::new(Mutex::new(machine));
        let id = self.register(&shared);
        (id, shared)
    }

    /// Like [`spawn`](Self::spawn), then request `initial` on the new machine.
    pub fn spawn_with_initial<S: StateId>(
        &self,
        mut machine: StateMachine<S>,
        initial: S,
    ) -> Result<(MachineId, SharedMachine<S>), FsmError> {
        machine.change_state(initial)?;
        Ok(self.spawn(machine))
    }

    /// Remove a machine. Returns `false` if it was not registered.
    pub fn unregister(&self, id: MachineId) -> bool {
        let mut machines = self.machines.write();
        let before = machines.len();
        machines.retain(|(entry, _)| *entry != id);
        machines.len() != before
    }

    /// Advance every live machine's routines by `dt` seconds.
    pub fn advance(&self, dt: f32) {
        for machine in self.live() {
            machine.lock().advance(dt);
        }
    }

    /// Forward `phase` to every live machine. Returns how many ran a callback.
    pub fn tick(&self, phase: FramePhase) -> usize {
        let mut ran = 0;
        for machine in self.live() {
            if machine.lock().run_phase(phase) {
                ran += 1;
            }
        }
        trace!(?phase, ran, "tick");
        ran
    }

    /// Advance by `dt`, then tick `Update` and `LateUpdate`.
    pub fn frame(&self, dt: f32) {
        self.advance(dt);
        self.tick(FramePhase::Update);
        self.tick(FramePhase::LateUpdate);
    }

    /// Drop entries whose machine has been torn down. Returns how many.
    pub fn prune(&self) -> usize {
        let mut machines = self.machines.write();
        let before = machines.len();
        machines.retain(|(_, machine)| machine.strong_count() > 0);
        before - machines.len()
    }

    /// Drop every registration, e.g. at host shutdown.
    pub fn clear(&self) {
        let mut machines = self.machines.write();
        debug!(count = machines.len(), "runner cleared");
        machines.clear();
    }

    /// Number of registrations, including torn-down machines not yet pruned.
    pub fn len(&self) -> usize {
        self.machines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.read().is_empty()
    }

    // Snapshot so callbacks may register machines without deadlocking.
    fn live(&self) -> Vec<Arc<Mutex<dyn Tickable>>> {
        self.machines
            .read()
            .iter()
            .filter_map(|(_, machine)| machine.upgrade())
            .collect()
    }
}

impl fmt::Debug for MachineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<MachineId> = self.machines.read().iter().map(|(id, _)| *id).collect();
        f.debug_struct("MachineRunner").field("machines", &ids).finish()
    }
}
