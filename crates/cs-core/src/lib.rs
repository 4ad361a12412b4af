//! `cs-core` — foundational types for the `cpu-sched` simulation engine.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `ProcessId` (position of a process in its workload)       |
//! | [`time`]      | `Tick`                                                    |
//! | [`process`]   | `ProcessSpec` (input record), `Process` (per-run state)   |
//! | [`workload`]  | `Workload` and its validation                             |
//! | [`params`]    | `SchedulerParams`, `TieBreak`                             |
//! | [`result`]    | `SimulationResult`, `ProcessOutcome`, `ResultBuilder`     |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod params;
pub mod process;
pub mod result;
pub mod time;
pub mod workload;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::ProcessId;
pub use params::{SchedulerParams, TieBreak};
pub use process::{Process, ProcessSpec};
pub use result::{ProcessOutcome, ResultBuilder, SimulationResult, round_average};
pub use time::Tick;
pub use workload::Workload;
