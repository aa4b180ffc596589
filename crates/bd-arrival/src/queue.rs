//! `BoardingQueue` — passengers that have arrived but are not yet aboard.
//!
//! Two stages: a sparse `BTreeMap` of future arrivals keyed by tick, and the
//! FIFO of passengers standing at the door.  Each tick the scheduler calls
//! [`BoardingQueue::release_due`] and then takes at most one passenger off
//! the front.

use std::collections::{BTreeMap, VecDeque};

use bd_core::{PassengerId, Tick};
use tracing::trace;

use crate::ArrivalResult;

#[derive(Clone, Debug, Default)]
pub struct BoardingQueue {
    pending: BTreeMap<Tick, Vec<PassengerId>>,
    /// Cached pending count for O(1) `pending_len()`.
    pending_total: usize,
    waiting: VecDeque<PassengerId>,
}

impl BoardingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-passenger arrival ticks, indexed by `PassengerId`.
    pub fn from_arrival_ticks(ticks: &[Tick]) -> ArrivalResult<Self> {
        let mut queue = Self::new();
        for (i, &tick) in ticks.iter().enumerate() {
            queue.push(tick, PassengerId::from_index(i)?);
        }
        Ok(queue)
    }

    /// Schedule `passenger` to reach the door at `tick`.
    pub fn push(&mut self, tick: Tick, passenger: PassengerId) {
        self.pending.entry(tick).or_default().push(passenger);
        self.pending_total += 1;
    }

    /// Move every passenger due at or before `now` into the FIFO, earliest
    /// tick first, insertion order within a tick.  Returns how many moved.
    pub fn release_due(&mut self, now: Tick) -> usize {
        let later = self.pending.split_off(&Tick(now.0.saturating_add(1)));
        let due = std::mem::replace(&mut self.pending, later);
        let mut released = 0;
        for (_, passengers) in due {
            released += passengers.len();
            self.waiting.extend(passengers);
        }
        self.pending_total -= released;
        if released > 0 {
            trace!(tick = %now, released, waiting = self.waiting.len(), "arrivals joined the queue");
        }
        released
    }

    /// Passenger at the head of the FIFO.
    pub fn front(&self) -> Option<PassengerId> {
        self.waiting.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<PassengerId> {
        self.waiting.pop_front()
    }

    /// Passengers standing at the door.
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Passengers that have not arrived yet.
    pub fn pending_len(&self) -> usize {
        self.pending_total
    }

    /// Earliest future arrival tick, if any.
    pub fn next_arrival(&self) -> Option<Tick> {
        self.pending.keys().next().copied()
    }

    /// `true` once everyone has arrived and stepped aboard.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty() && self.pending_total == 0
    }

    pub fn len(&self) -> usize {
        self.waiting.len() + self.pending_total
    }
}
