//! The `Scheduler` trait implemented by every policy.

use cs_core::{SimulationResult, Workload};

use crate::{NoopObserver, SchedObserver};

/// A scheduling discipline.
///
/// Implementations hold only their parameters; all per-run state (remaining
/// times, aged priorities, grown quanta, the clock) is created inside
/// [`simulate_observed`][Self::simulate_observed] and dropped when it returns.
/// The workload is borrowed immutably, so running one policy can never
/// disturb the input another policy sees.
///
/// The engine assumes validated input (see `Workload::validate`).  An empty
/// workload yields `SimulationResult::empty()`.
pub trait Scheduler: Send + Sync {
    /// Short label used in reports ("SJF", "RR", "Priority", "AG").
    fn name(&self) -> &'static str;

    /// Simulate `workload`, reporting timeline events to `observer`.
    fn simulate_observed(
        &self,
        workload: &Workload,
        observer: &mut dyn SchedObserver,
    ) -> SimulationResult;

    /// Simulate `workload` without observation.
    fn simulate(&self, workload: &Workload) -> SimulationResult {
        self.simulate_observed(workload, &mut NoopObserver)
    }
}
