//! Traffic Light State Machine
//!
//! This example drives a cyclic state machine from a fixed-step frame loop.
//!
//! Key concepts:
//! - Timed enter/exit transitions reporting progress
//! - Per-frame update callbacks once a state is settled
//! - Switching states from a state-changed subscriber's bookkeeping
//!
//! Run with: cargo run --example traffic_light

use parking_lot::Mutex;
use std::sync::Arc;
use tempo_fsm::core::StateCallbacks;
use tempo_fsm::state_enum;
use tempo_fsm::{MachineRunner, StateMachineBuilder, TransitionMode};

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

impl TrafficLight {
    fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }

    /// Frames to hold the light once it is fully on.
    fn hold_frames(self) -> u32 {
        match self {
            Self::Red | Self::Green => 6,
            Self::Yellow => 2,
        }
    }
}

fn light(state: TrafficLight, held: &Arc<Mutex<u32>>) -> StateCallbacks {
    let held = Arc::clone(held);
    StateCallbacks::new()
        .on_enter_progress(move |t| println!("  {state:?} on   {:>3.0}%", t * 100.0))
        .on_exit_progress(move |t| println!("  {state:?} off  {:>3.0}%", t * 100.0))
        .on_update(move || *held.lock() += 1)
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let held = Arc::new(Mutex::new(0u32));
    let machine = StateMachineBuilder::new()
        .mode(TransitionMode::Safe)
        .durations(0.25, 0.125)
        .state(TrafficLight::Red, light(TrafficLight::Red, &held))
        .state(TrafficLight::Yellow, light(TrafficLight::Yellow, &held))
        .state(TrafficLight::Green, light(TrafficLight::Green, &held))
        .initial(TrafficLight::Red)
        .build()
        .unwrap();

    let runner = MachineRunner::new();
    let (id, machine) = runner.spawn(machine);
    println!("Registered machine {id}\n");

    {
        let held = Arc::clone(&held);
        machine.lock().on_state_changed(move |state| {
            *held.lock() = 0;
            println!("-> {state:?} is on");
        });
    }

    let mut changes = 0;
    for _frame in 0..120 {
        runner.frame(1.0 / 16.0);

        let mut machine = machine.lock();
        let Some(current) = machine.current_state() else {
            continue;
        };
        if !machine.is_in_transition() && *held.lock() >= current.hold_frames() {
            machine.change_state(current.next()).unwrap();
            changes += 1;
        }
        if changes == 6 {
            break;
        }
    }

    println!("\nLast state: {:?}", machine.lock().last_state());
    println!("Current state: {:?}", machine.lock().current_state());
    println!("\n=== Example Complete ===");
}
