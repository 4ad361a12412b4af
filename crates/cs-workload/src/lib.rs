//! `cs-workload` — getting workloads into the cpu-sched engine.
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`fixture`] | JSON test cases with expected output; `Fixture::check`      |
//! | [`loader`]  | Plain CSV workloads                                         |
//! | [`random`]  | `RandomWorkload`, seeded with `SmallRng`                    |
//! | [`error`]   | `WorkloadError`, `WorkloadResult<T>`                        |
//!
//! Every loader validates what it returns, so a `Workload` obtained here can
//! be handed to any policy it was validated for.

pub mod error;
pub mod fixture;
pub mod loader;
pub mod random;


pub use error::{WorkloadError, WorkloadResult};
pub use fixture::{Expected, Fixture, FixtureKind, Mismatch, load_fixture, load_fixture_dir, load_fixture_reader};
pub use loader::{load_workload_csv, load_workload_reader};
pub use random::RandomWorkload;
