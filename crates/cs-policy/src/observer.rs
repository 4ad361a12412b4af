//! Timeline observation hooks.

use cs_core::{ProcessOutcome, Tick};

/// Callbacks invoked by every policy at key points of its timeline.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see events; they cannot alter
/// the schedule.
///
/// # Example — dispatch printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SchedObserver for Printer {
///     fn on_dispatch(&mut self, tick: Tick, process: &str) {
///         println!("{tick}: dispatch {process}");
///     }
/// }
/// ```
pub trait SchedObserver {
    /// The CPU was handed to `process` at `tick`.
    fn on_dispatch(&mut self, _tick: Tick, _process: &str) {}

    /// A context switch costing `cost` ticks started at `tick`.  Not called
    /// for zero-cost switches.
    fn on_context_switch(&mut self, _tick: Tick, _cost: u64) {}

    /// No process was ready at `tick`; the clock advanced by one.
    fn on_idle(&mut self, _tick: Tick) {}

    /// Aging changed the priority of a waiting process.
    fn on_priority_change(&mut self, _tick: Tick, _process: &str, _priority: i64) {}

    /// The adaptive hybrid policy recorded a new quantum for `process`.
    fn on_quantum_change(&mut self, _tick: Tick, _process: &str, _quantum: u64) {}

    /// `process` finished at `tick`.
    fn on_complete(&mut self, _tick: Tick, _process: &str, _outcome: ProcessOutcome) {}
}

/// A [`SchedObserver`] that does nothing.
pub struct NoopObserver;

impl SchedObserver for NoopObserver {}

// ── TraceRecorder ─────────────────────────────────────────────────────────────

/// One observed timeline event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Dispatch { tick: Tick, process: String },
    ContextSwitch { tick: Tick, cost: u64 },
    Idle { tick: Tick },
    PriorityChange { tick: Tick, process: String, priority: i64 },
    QuantumChange { tick: Tick, process: String, quantum: u64 },
    Complete { tick: Tick, process: String, outcome: ProcessOutcome },
}

impl TraceEvent {
    pub fn tick(&self) -> Tick {
        match self {
            TraceEvent::Dispatch { tick, .. }
            | TraceEvent::ContextSwitch { tick, .. }
            | TraceEvent::Idle { tick }
            | TraceEvent::PriorityChange { tick, .. }
            | TraceEvent::QuantumChange { tick, .. }
            | TraceEvent::Complete { tick, .. } => *tick,
        }
    }
}

/// Records every event in arrival order.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion ticks in the order processes finished.
    pub fn completions(&self) -> Vec<(Tick, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Complete { tick, process, .. } => Some((*tick, process.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Total ticks spent in context switches.
    pub fn switch_overhead(&self) -> u64 {
        self.events
            .iter()
            .map(|e| match e {
                TraceEvent::ContextSwitch { cost, .. } => *cost,
                _ => 0,
            })
            .sum()
    }
}

impl SchedObserver for TraceRecorder {
    fn on_dispatch(&mut self, tick: Tick, process: &str) {
        self.events.push(TraceEvent::Dispatch { tick, process: process.to_owned() });
    }

    fn on_context_switch(&mut self, tick: Tick, cost: u64) {
        self.events.push(TraceEvent::ContextSwitch { tick, cost });
    }

    fn on_idle(&mut self, tick: Tick) {
        self.events.push(TraceEvent::Idle { tick });
    }

    fn on_priority_change(&mut self, tick: Tick, process: &str, priority: i64) {
        self.events.push(TraceEvent::PriorityChange {
            tick,
            process: process.to_owned(),
            priority,
        });
    }

    fn on_quantum_change(&mut self, tick: Tick, process: &str, quantum: u64) {
        self.events.push(TraceEvent::QuantumChange {
            tick,
            process: process.to_owned(),
            quantum,
        });
    }

    fn on_complete(&mut self, tick: Tick, process: &str, outcome: ProcessOutcome) {
        self.events.push(TraceEvent::Complete {
            tick,
            process: process.to_owned(),
            outcome,
        });
    }
}
