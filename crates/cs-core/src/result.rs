//! Simulation output records.

use std::collections::BTreeMap;

/// Waiting and turnaround time of one completed process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProcessOutcome {
    pub waiting_time:    u64,
    pub turnaround_time: u64,
}

/// The aggregate output of one policy run.
///
/// Created once per invocation and never mutated afterwards.  Maps are
/// `BTreeMap`s so iteration order (and therefore any report built from the
/// result) is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationResult {
    /// Dispatch tokens in order.  Whether consecutive repeats collapse is
    /// policy-dependent.
    pub execution_order:         Vec<String>,
    pub process_results:         BTreeMap<String, ProcessOutcome>,
    /// Adaptive hybrid only; empty for every other policy.
    pub quantum_history:         BTreeMap<String, Vec<u64>>,
    pub average_waiting_time:    f64,
    pub average_turnaround_time: f64,
}

impl SimulationResult {
    /// The result of simulating an empty workload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn outcome(&self, name: &str) -> Option<&ProcessOutcome> {
        self.process_results.get(name)
    }

    pub fn quantum_history(&self, name: &str) -> Option<&[u64]> {
        self.quantum_history.get(name).map(Vec::as_slice)
    }

    pub fn dispatch_count(&self) -> usize {
        self.execution_order.len()
    }
}

/// Mean of `total` over `count`, rounded half-up to two decimals.
///
/// The value is scaled by 100 before rounding (`floor(x * 100 + 0.5) / 100`),
/// and an empty set averages to zero.
pub fn round_average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scaled = total as f64 * 100.0 / count as f64;
    (scaled + 0.5).floor() / 100.0
}

// ── ResultBuilder ─────────────────────────────────────────────────────────────

/// Accumulates dispatches, completions and quantum changes during one run.
///
/// Each policy owns one builder for the duration of a `simulate` call and
/// consumes it with [`finish`][Self::finish].
#[derive(Debug, Default)]
pub struct ResultBuilder {
    execution_order:  Vec<String>,
    process_results:  BTreeMap<String, ProcessOutcome>,
    quantum_history:  BTreeMap<String, Vec<u64>>,
    total_waiting:    u64,
    total_turnaround: u64,
}

impl ResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatch unconditionally.
    pub fn dispatch(&mut self, name: &str) {
        self.execution_order.push(name.to_owned());
    }

    /// Record a dispatch unless `name` is already the last token.
    ///
    /// Returns `true` if a token was appended.
    pub fn dispatch_collapsed(&mut self, name: &str) -> bool {
        if self.last_dispatch() == Some(name) {
            return false;
        }
        self.dispatch(name);
        true
    }

    pub fn last_dispatch(&self) -> Option<&str> {
        self.execution_order.last().map(String::as_str)
    }

    pub fn dispatch_count(&self) -> usize {
        self.execution_order.len()
    }

    pub fn record_completion(&mut self, name: &str, outcome: ProcessOutcome) {
        self.total_waiting += outcome.waiting_time;
        self.total_turnaround += outcome.turnaround_time;
        let previous = self.process_results.insert(name.to_owned(), outcome);
        debug_assert!(previous.is_none(), "{name} completed twice");
    }

    pub fn completed(&self) -> usize {
        self.process_results.len()
    }

    /// Open a quantum history for `name` with its initial value.
    pub fn start_history(&mut self, name: &str, initial: u64) {
        self.quantum_history.insert(name.to_owned(), vec![initial]);
    }

    pub fn push_quantum(&mut self, name: &str, quantum: u64) {
        self.quantum_history
            .entry(name.to_owned())
            .or_default()
            .push(quantum);
    }

    pub fn finish(self) -> SimulationResult {
        let count = self.process_results.len();
        SimulationResult {
            average_waiting_time:    round_average(self.total_waiting, count),
            average_turnaround_time: round_average(self.total_turnaround, count),
            execution_order:         self.execution_order,
            process_results:         self.process_results,
            quantum_history:         self.quantum_history,
        }
    }
}
