//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `process_results.csv`
//! - `dispatch_trace.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, ProcessResultRow, TraceRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    results:  Writer<File>,
    trace:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut results = Writer::from_path(dir.join("process_results.csv"))?;
        results.write_record(["policy", "name", "waiting_time", "turnaround_time"])?;

        let mut trace = Writer::from_path(dir.join("dispatch_trace.csv"))?;
        trace.write_record(["policy", "tick", "event", "process", "value"])?;

        Ok(Self {
            results,
            trace,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_results(&mut self, rows: &[ProcessResultRow<'_>]) -> OutputResult<()> {
        for row in rows {
            self.results.write_record(&[
                row.policy.to_owned(),
                row.name.to_owned(),
                row.waiting_time.to_string(),
                row.turnaround_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_trace(&mut self, row: &TraceRow<'_>) -> OutputResult<()> {
        self.trace.write_record(&[
            row.policy.to_owned(),
            row.tick.to_string(),
            row.event.as_str().to_owned(),
            row.process.to_owned(),
            row.value.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.results.flush()?;
        self.trace.flush()?;
        Ok(())
    }
}
