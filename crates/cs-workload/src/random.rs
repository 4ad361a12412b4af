//! Seeded random workloads.
//!
//! The same `RandomWorkload` (including `seed`) always generates the same
//! workload, so a failing property run can be replayed from its seed alone.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cs_core::{CoreError, ProcessSpec, Workload};

use crate::WorkloadResult;

/// Parameters for a generated workload.  Processes are named `P1..Pn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomWorkload {
    pub count:       usize,
    pub seed:        u64,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: u64,
    pub burst:       RangeInclusive<u64>,
    pub priority:    RangeInclusive<i64>,
    pub quantum:     RangeInclusive<u64>,
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self {
            count:       5,
            seed:        0,
            max_arrival: 10,
            burst:       1..=10,
            priority:    1..=10,
            quantum:     2..=8,
        }
    }
}

impl RandomWorkload {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the workload.  Every process gets a positive burst and a
    /// positive quantum, so the result is valid for all four policies.
    pub fn generate(&self) -> WorkloadResult<Workload> {
        check_range("burst", &self.burst, 1)?;
        check_range("quantum", &self.quantum, 1)?;
        if self.priority.is_empty() {
            return Err(invalid("priority", "range is empty"));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let workload: Workload = (1..=self.count)
            .map(|n| {
                let arrival = rng.gen_range(0..=self.max_arrival);
                let burst = rng.gen_range(self.burst.clone());
                let priority = rng.gen_range(self.priority.clone());
                let quantum = rng.gen_range(self.quantum.clone());
                ProcessSpec::new(format!("P{n}"), arrival, burst, priority).with_quantum(quantum)
            })
            .collect();

        log::debug!("generated {} processes from seed {}", workload.len(), self.seed);
        Ok(workload)
    }
}

fn check_range(name: &'static str, range: &RangeInclusive<u64>, min: u64) -> WorkloadResult<()> {
    if range.is_empty() {
        return Err(invalid(name, "range is empty"));
    }
    if *range.start() < min {
        return Err(invalid(name, &format!("must start at {min} or more")));
    }
    Ok(())
}

fn invalid(name: &'static str, reason: &str) -> crate::WorkloadError {
    CoreError::InvalidParameter { name, reason: reason.to_owned() }.into()
}
