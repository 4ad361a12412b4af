//! CSV workload loader.
//!
//! # CSV format
//!
//! One row per process, in input order.  `quantum` is only read by the
//! adaptive hybrid policy; the column may be left empty or omitted entirely.
//!
//! ```csv
//! name,arrival,burst,priority,quantum
//! P1,0,17,4,7
//! P2,2,6,7,9
//! P3,5,11,3,
//! ```
//!
//! The loaded workload is validated without requiring quanta; callers that
//! intend to run the hybrid policy should use `Policy::validate` as well.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_core::{ProcessSpec, Workload};

use crate::{WorkloadError, WorkloadResult};

#[derive(Deserialize)]
struct ProcessRow {
    name:     String,
    arrival:  u64,
    burst:    u64,
    priority: i64,
    #[serde(default)]
    quantum:  Option<u64>,
}

/// Load a workload from a CSV file.
pub fn load_workload_csv(path: &Path) -> WorkloadResult<Workload> {
    let file = File::open(path)?;
    let workload = load_workload_reader(file)?;
    log::info!("loaded {} processes from {}", workload.len(), path.display());
    Ok(workload)
}

/// Like [`load_workload_csv`] but accepts any `Read` source.
pub fn load_workload_reader<R: Read>(reader: R) -> WorkloadResult<Workload> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let workload = csv_reader
        .deserialize::<ProcessRow>()
        .enumerate()
        .map(|(i, row)| {
            // Line 1 is the header.
            let row = row.map_err(|e| WorkloadError::Parse(format!("line {}: {e}", i + 2)))?;
            Ok(ProcessSpec::new(row.name, row.arrival, row.burst, row.priority)
                .with_quantum(row.quantum.unwrap_or(0)))
        })
        .collect::<WorkloadResult<Workload>>()?;

    workload.validate(false)?;
    Ok(workload)
}
