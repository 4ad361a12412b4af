//! `TraceOutputObserver<W>` — bridges `SchedObserver` to an `OutputWriter`.

use cs_core::{ProcessOutcome, SimulationResult, Tick};
use cs_policy::{Policy, SchedObserver};

use crate::row::{ProcessResultRow, TraceKind, TraceRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SchedObserver`] that writes dispatches, context switches, aging
/// steps, quantum changes and completions to any [`OutputWriter`].  Idle
/// ticks are not written.
///
/// One observer can trace several policy runs into the same files: call
/// [`begin`][Self::begin] before each run and
/// [`record_result`][Self::record_result] after it.
///
/// Errors from the writer are stored internally because `SchedObserver`
/// methods have no return value.  Check for them with
/// [`take_error`][Self::take_error].
pub struct TraceOutputObserver<W: OutputWriter> {
    writer:     W,
    policy:     &'static str,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            policy:     "",
            last_error: None,
        }
    }

    /// Label subsequent rows with `policy`.
    pub fn begin(&mut self, policy: Policy) {
        self.policy = policy.label();
    }

    /// Write the per-process results of the run started by the last
    /// [`begin`][Self::begin].
    pub fn record_result(&mut self, result: &SimulationResult) {
        let policy = self.policy;
        let rows: Vec<ProcessResultRow<'_>> = result
            .process_results
            .iter()
            .map(|(name, o)| ProcessResultRow {
                policy,
                name,
                waiting_time:    o.waiting_time,
                turnaround_time: o.turnaround_time,
            })
            .collect();
        if !rows.is_empty() {
            let r = self.writer.write_results(&rows);
            self.store_err(r);
        }
    }

    /// Flush the writer.
    pub fn finish(&mut self) {
        let r = self.writer.finish();
        self.store_err(r);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn trace(&mut self, tick: Tick, event: TraceKind, process: &str, value: Option<i64>) {
        let row = TraceRow {
            policy: self.policy,
            tick: tick.0,
            event,
            process,
            value,
        };
        let r = self.writer.write_trace(&row);
        self.store_err(r);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SchedObserver for TraceOutputObserver<W> {
    fn on_dispatch(&mut self, tick: Tick, process: &str) {
        self.trace(tick, TraceKind::Dispatch, process, None);
    }

    fn on_context_switch(&mut self, tick: Tick, cost: u64) {
        self.trace(tick, TraceKind::ContextSwitch, "", Some(cost as i64));
    }

    fn on_priority_change(&mut self, tick: Tick, process: &str, priority: i64) {
        self.trace(tick, TraceKind::PriorityChange, process, Some(priority));
    }

    fn on_quantum_change(&mut self, tick: Tick, process: &str, quantum: u64) {
        self.trace(tick, TraceKind::QuantumChange, process, Some(quantum as i64));
    }

    fn on_complete(&mut self, tick: Tick, process: &str, outcome: ProcessOutcome) {
        self.trace(tick, TraceKind::Complete, process, Some(outcome.turnaround_time as i64));
    }
}
