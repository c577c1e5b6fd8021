//! Linked sequencer for transition routines.
//!
//! The queue is a FIFO of pending links plus one running link. A link is a
//! single routine or a pair that runs concurrently (blend). The running link
//! must finish before the next one starts; when it does, the next link is
//! popped and started in the same pass, so chains of zero-length routines
//! complete without waiting for another tick.

use super::routine::{RoutineStatus, TimedRoutine};
use super::slot::{Phase, SlotIndex, StateSlot};
use super::state::StateId;
use std::collections::VecDeque;
use tracing::trace;

/// What happened to a routine while the queue was driving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutineEventKind {
    Started,
    Completed,
    Cancelled,
}

/// Notification emitted by the queue, after the slot's own callbacks ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutineEvent {
    pub slot: SlotIndex,
    pub phase: Phase,
    pub kind: RoutineEventKind,
}

#[derive(Debug)]
enum Link {
    Single(TimedRoutine),
    Pair(TimedRoutine, TimedRoutine),
}

impl Link {
    fn routines_mut(&mut self) -> impl Iterator<Item = &mut TimedRoutine> {
        let (first, second) = match self {
            Link::Single(routine) => (routine, None),
            Link::Pair(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    fn routines(&self) -> impl Iterator<Item = &TimedRoutine> {
        let (first, second) = match self {
            Link::Single(routine) => (routine, None),
            Link::Pair(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    fn is_finished(&self) -> bool {
        self.routines().all(|r| r.status().is_terminal())
    }
}

/// Ordered chain of pending and running transition routines.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    running: Option<Link>,
    pending: VecDeque<Link>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a link is running.
    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Number of links waiting behind the running one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the running link holds an unfinished routine for `slot`.
    pub fn is_running(&self, slot: SlotIndex) -> bool {
        self.running.as_ref().is_some_and(|link| {
            link.routines()
                .any(|r| r.slot() == slot && r.status() == RoutineStatus::Running)
        })
    }

    /// Routines of the running link, for inspection.
    pub fn running_routines(&self) -> Vec<&TimedRoutine> {
        self.running
            .as_ref()
            .map(|link| link.routines().collect())
            .unwrap_or_default()
    }

    /// Append a routine; it starts at once if the chain is idle.
    pub fn add<S, F>(&mut self, routine: TimedRoutine, slots: &mut [StateSlot<S>], sink: &mut F)
    where
        S: StateId,
        F: FnMut(RoutineEvent),
    {
        self.pending.push_back(Link::Single(routine));
        self.pump(slots, sink);
    }

    /// Append two routines that start together; the link ends when both have.
    pub fn add_pair<S, F>(
        &mut self,
        first: TimedRoutine,
        second: TimedRoutine,
        slots: &mut [StateSlot<S>],
        sink: &mut F,
    ) where
        S: StateId,
        F: FnMut(RoutineEvent),
    {
        self.pending.push_back(Link::Pair(first, second));
        self.pump(slots, sink);
    }

    /// Advance the running link by `dt`, then start successors as links finish.
    pub fn advance<S, F>(&mut self, dt: f32, slots: &mut [StateSlot<S>], sink: &mut F)
    where
        S: StateId,
        F: FnMut(RoutineEvent),
    {
        let Some(link) = self.running.as_mut() else {
            return;
        };
        for routine in link.routines_mut() {
            if routine.status() != RoutineStatus::Running {
                continue;
            }
            let index = routine.slot().0;
            let status = routine.advance(dt, &mut slots[index]);
            if status == RoutineStatus::Completed {
                sink(event(routine, RoutineEventKind::Completed));
            }
        }
        if link.is_finished() {
            trace!("link finished");
            self.running = None;
            self.pump(slots, sink);
        }
    }

    /// Cancel the running link and drop every pending one.
    ///
    /// Running routines fire their slot's cancel callback; routines that
    /// never started are discarded silently. The queue is empty afterwards.
    pub fn cancel<S, F>(&mut self, slots: &mut [StateSlot<S>], sink: &mut F)
    where
        S: StateId,
        F: FnMut(RoutineEvent),
    {
        if let Some(mut link) = self.running.take() {
            for routine in link.routines_mut() {
                let index = routine.slot().0;
                if routine.cancel(&mut slots[index]) {
                    sink(event(routine, RoutineEventKind::Cancelled));
                }
            }
        }
        for mut link in self.pending.drain(..) {
            for routine in link.routines_mut() {
                let index = routine.slot().0;
                routine.discard(&mut slots[index]);
            }
        }
    }

    fn pump<S, F>(&mut self, slots: &mut [StateSlot<S>], sink: &mut F)
    where
        S: StateId,
        F: FnMut(RoutineEvent),
    {
        while self.running.is_none() {
            let Some(mut link) = self.pending.pop_front() else {
                return;
            };
            trace!(remaining = self.pending.len(), "link started");
            for routine in link.routines_mut() {
                let index = routine.slot().0;
                let status = routine.start(&mut slots[index]);
                sink(event(routine, RoutineEventKind::Started));
                if status == RoutineStatus::Completed {
                    sink(event(routine, RoutineEventKind::Completed));
                }
            }
            if !link.is_finished() {
                self.running = Some(link);
            }
        }
    }
}

fn event(routine: &TimedRoutine, kind: RoutineEventKind) -> RoutineEvent {
    RoutineEvent {
        slot: routine.slot(),
        phase: routine.phase(),
        kind,
    }
}
