//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, ProcessResultRow, TraceRow};

/// Sink for per-process results and timeline events.
///
/// Observer callbacks cannot fail, so errors raised while tracing are stored
/// and retrieved with [`TraceOutputObserver::take_error`][crate::TraceOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the per-process results of one policy run.
    fn write_results(&mut self, rows: &[ProcessResultRow<'_>]) -> OutputResult<()>;

    /// Write one timeline event.
    fn write_trace(&mut self, row: &TraceRow<'_>) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
