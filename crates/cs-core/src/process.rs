//! Process input records and per-run simulation state.

use crate::{ProcessId, ProcessOutcome, Tick};

// ── ProcessSpec ───────────────────────────────────────────────────────────────

/// One process as described by the workload.  Never mutated by a policy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessSpec {
    /// Unique name; results are keyed by it.
    pub name:     String,
    pub arrival:  Tick,
    /// Total service demand in ticks.  Must be positive.
    pub burst:    u64,
    /// Lower value = more urgent.
    pub priority: i64,
    /// Initial quantum.  Only the adaptive hybrid policy reads it.
    pub quantum:  u64,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: u64, burst: u64, priority: i64) -> Self {
        Self {
            name: name.into(),
            arrival: Tick(arrival),
            burst,
            priority,
            quantum: 0,
        }
    }

    /// Builder-style setter for the initial quantum.
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = quantum;
        self
    }
}

// ── Process ───────────────────────────────────────────────────────────────────

/// Mutable state of one process during a single simulation run.
///
/// Every policy builds a fresh `Vec<Process>` from the workload, so aging and
/// quantum adjustments made in one run are never visible to another.
#[derive(Clone, Debug)]
pub struct Process {
    pub id:         ProcessId,
    pub name:       String,
    pub arrival:    Tick,
    /// Original service demand, captured at creation.
    pub burst:      u64,
    pub remaining:  u64,
    pub priority:   i64,
    pub quantum:    u64,
    pub completion: Option<Tick>,
}

impl Process {
    pub fn from_spec(id: ProcessId, spec: &ProcessSpec) -> Self {
        Self {
            id,
            name:       spec.name.clone(),
            arrival:    spec.arrival,
            burst:      spec.burst,
            remaining:  spec.burst,
            priority:   spec.priority,
            quantum:    spec.quantum,
            completion: None,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Run for `ticks` units of service.
    #[inline]
    pub fn run(&mut self, ticks: u64) {
        debug_assert!(ticks <= self.remaining, "{} overran its burst", self.name);
        self.remaining -= ticks;
    }

    /// Record completion at `now` and return the waiting/turnaround pair.
    ///
    /// Waiting time is measured against the original burst, not the
    /// (now zero) remaining time.
    pub fn complete(&mut self, now: Tick) -> ProcessOutcome {
        debug_assert_eq!(self.remaining, 0, "{} completed with work left", self.name);
        self.completion = Some(now);
        let turnaround_time = now.since(self.arrival);
        debug_assert!(turnaround_time >= self.burst);
        ProcessOutcome {
            waiting_time: turnaround_time - self.burst,
            turnaround_time,
        }
    }
}
