//! Policy registry and the multi-policy runner.

use std::fmt;
use std::str::FromStr;

use cs_core::{SchedulerParams, SimulationResult, Workload};

use crate::{
    AdaptiveHybrid, PolicyError, PolicyResult, PriorityAging, RoundRobin, Scheduler,
    ShortestRemainingTime,
};

/// The four supported disciplines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Policy {
    ShortestRemainingTime,
    RoundRobin,
    PriorityAging,
    AdaptiveHybrid,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::ShortestRemainingTime,
        Policy::RoundRobin,
        Policy::PriorityAging,
        Policy::AdaptiveHybrid,
    ];

    /// Report label, matching the keys of the JSON fixture format.
    pub fn label(self) -> &'static str {
        match self {
            Policy::ShortestRemainingTime => "SJF",
            Policy::RoundRobin => "RR",
            Policy::PriorityAging => "Priority",
            Policy::AdaptiveHybrid => "AG",
        }
    }

    /// Build the scheduler for this policy from shared parameters.
    pub fn scheduler(self, params: &SchedulerParams) -> Box<dyn Scheduler> {
        match self {
            Policy::ShortestRemainingTime => Box::new(ShortestRemainingTime::from_params(params)),
            Policy::RoundRobin => Box::new(RoundRobin::from_params(params)),
            Policy::PriorityAging => Box::new(PriorityAging::from_params(params)),
            Policy::AdaptiveHybrid => Box::new(AdaptiveHybrid::from_params(params)),
        }
    }

    /// Check that `workload` and `params` are inside what this policy is
    /// defined for.
    pub fn validate(self, workload: &Workload, params: &SchedulerParams) -> PolicyResult<()> {
        workload.validate(self == Policy::AdaptiveHybrid)?;
        match self {
            Policy::RoundRobin => params.require_rr_quantum()?,
            Policy::PriorityAging => params.require_aging_interval()?,
            Policy::ShortestRemainingTime | Policy::AdaptiveHybrid => {}
        }
        Ok(())
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    fn from_str(s: &str) -> PolicyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sjf" | "srt" | "srtf" => Ok(Policy::ShortestRemainingTime),
            "rr" | "round-robin" | "roundrobin" => Ok(Policy::RoundRobin),
            "priority" | "prio" | "aging" => Ok(Policy::PriorityAging),
            "ag" | "hybrid" => Ok(Policy::AdaptiveHybrid),
            _ => Err(PolicyError::UnknownPolicy(s.to_owned())),
        }
    }
}

/// Run every policy in [`Policy::ALL`] over `workload`.
pub fn run_all(workload: &Workload, params: &SchedulerParams) -> Vec<(Policy, SimulationResult)> {
    run_policies(&Policy::ALL, workload, params)
}

/// Run each of `policies` over `workload`, in the given order.
///
/// Every policy builds its own process state, so the runs are independent;
/// with the `parallel` feature they execute on Rayon's thread pool and the
/// returned order is unchanged.
pub fn run_policies(
    policies: &[Policy],
    workload: &Workload,
    params:   &SchedulerParams,
) -> Vec<(Policy, SimulationResult)> {
    log::info!("simulating {} processes under {} policies", workload.len(), policies.len());

    #[cfg(not(feature = "parallel"))]
    {
        policies
            .iter()
            .map(|&policy| (policy, policy.scheduler(params).simulate(workload)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        policies
            .par_iter()
            .map(|&policy| (policy, policy.scheduler(params).simulate(workload)))
            .collect()
    }
}
