//! `cs-output` — reports and files produced from simulation results.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`report`]   | `write_report`: the human-readable console report          |
//! | [`row`]      | `ProcessResultRow`, `TraceRow`                             |
//! | [`writer`]   | `OutputWriter` trait                                       |
//! | [`csv`]      | `CsvWriter`: `process_results.csv`, `dispatch_trace.csv`   |
//! | [`observer`] | `TraceOutputObserver`, a `SchedObserver` feeding a writer  |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                           |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, TraceOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceOutputObserver::new(writer);
//! for policy in Policy::ALL {
//!     obs.begin(policy);
//!     let result = policy.scheduler(&params).simulate_observed(&workload, &mut obs);
//!     obs.record_result(&result);
//! }
//! obs.finish();
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceOutputObserver;
pub use report::write_report;
pub use row::{ProcessResultRow, TraceKind, TraceRow};
pub use writer::OutputWriter;
