//! `cs-policy` — the four scheduling policies of the cpu-sched engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`scheduler`]   | `Scheduler` trait — one `simulate` entry point              |
//! | [`arrivals`]    | `ArrivalQueue` (`BTreeMap<Tick, Vec<ProcessId>>`)           |
//! | [`observer`]    | `SchedObserver` hooks, `NoopObserver`, `TraceRecorder`      |
//! | [`srt`]         | `ShortestRemainingTime` (preemptive SJF)                    |
//! | [`round_robin`] | `RoundRobin`                                                |
//! | [`priority`]    | `PriorityAging` (preemptive priority with aging)            |
//! | [`hybrid`]      | `AdaptiveHybrid` (AG: self-tuning quantum)                  |
//! | [`policy`]      | `Policy` registry, `run_all`                                |
//! | [`error`]       | `PolicyError`, `PolicyResult<T>`                            |
//!
//! # Determinism
//!
//! Every `simulate` call builds its own `Vec<Process>` from the workload and
//! is a pure function of `(workload, parameters)`.  Ties are broken by fixed
//! keys (queue order, input order), never by hash order.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_all` runs the policies on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_core::{ProcessSpec, SchedulerParams, Workload};
//! use cs_policy::{Policy, Scheduler};
//!
//! let workload = Workload::new(vec![
//!     ProcessSpec::new("P1", 0, 8, 3),
//!     ProcessSpec::new("P2", 1, 4, 1),
//! ]);
//! let params = SchedulerParams::default().with_context_switch(1);
//! let result = Policy::ShortestRemainingTime.scheduler(&params).simulate(&workload);
//! ```

pub mod arrivals;
pub mod error;
pub mod hybrid;
pub mod observer;
pub mod policy;
pub mod priority;
pub mod round_robin;
pub mod scheduler;
pub mod srt;

#[cfg(test)]
mod tests;

pub use arrivals::ArrivalQueue;
pub use error::{PolicyError, PolicyResult};
pub use hybrid::AdaptiveHybrid;
pub use observer::{NoopObserver, SchedObserver, TraceEvent, TraceRecorder};
pub use policy::{Policy, run_all, run_policies};
pub use priority::PriorityAging;
pub use round_robin::RoundRobin;
pub use scheduler::Scheduler;
pub use srt::ShortestRemainingTime;
