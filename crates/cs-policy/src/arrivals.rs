//! `ArrivalQueue` — processes that have not yet entered the ready set.
//!
//! Keyed by arrival tick; processes arriving on the same tick keep their
//! workload order.  Draining everything due by `now` therefore yields the
//! workload stably sorted by arrival time, which is the admission order every
//! policy uses.

use std::collections::BTreeMap;

use cs_core::{Process, ProcessId, Tick};

#[derive(Debug, Default)]
pub struct ArrivalQueue {
    inner: BTreeMap<Tick, Vec<ProcessId>>,
    /// Cached total process count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every process of a freshly instantiated run.
    pub fn from_processes(procs: &[Process]) -> Self {
        let mut queue = Self::new();
        for p in procs {
            queue.push(p.arrival, p.id);
        }
        queue
    }

    pub fn push(&mut self, arrival: Tick, id: ProcessId) {
        self.inner.entry(arrival).or_default().push(id);
        self.total += 1;
    }

    /// Remove and return every process with `arrival <= now`, ordered by
    /// arrival tick and then by push order.
    pub fn drain_until(&mut self, now: Tick) -> Vec<ProcessId> {
        if self.next_tick().is_none_or(|t| t > now) {
            return Vec::new();
        }
        let later = self.inner.split_off(&(now + 1));
        let due = std::mem::replace(&mut self.inner, later);
        let ids: Vec<ProcessId> = due.into_values().flatten().collect();
        self.total -= ids.len();
        ids
    }

    /// The earliest pending arrival, or `None` once everything is admitted.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
