//! Shortest-remaining-time first (preemptive SJF).
//!
//! Advances one tick at a time.  Each tick the arrived, unfinished process
//! with the least remaining work runs; a newly arrived shorter job therefore
//! preempts the running one at the next tick boundary.  Long jobs can starve.

use cs_core::{ResultBuilder, SchedulerParams, SimulationResult, TieBreak, Tick, Workload};

use crate::{SchedObserver, Scheduler};

#[derive(Clone, Debug)]
pub struct ShortestRemainingTime {
    pub context_switch: u64,
    pub tie_break:      TieBreak,
}

impl ShortestRemainingTime {
    pub fn new(context_switch: u64, tie_break: TieBreak) -> Self {
        Self { context_switch, tie_break }
    }

    pub fn from_params(params: &SchedulerParams) -> Self {
        Self::new(params.context_switch, params.sjf_tie_break)
    }
}

impl Scheduler for ShortestRemainingTime {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn simulate_observed(
        &self,
        workload: &Workload,
        observer: &mut dyn SchedObserver,
    ) -> SimulationResult {
        if workload.is_empty() {
            return SimulationResult::empty();
        }

        let mut procs = workload.instantiate();
        let mut scan: Vec<usize> = (0..procs.len()).collect();
        if self.tie_break == TieBreak::ArrivalOrder {
            // Stable: equal arrivals keep workload order.
            scan.sort_by_key(|&i| procs[i].arrival);
        }

        let mut out = ResultBuilder::new();
        let mut clock = Tick::ZERO;
        // Last process to execute; survives idle gaps and completions.
        let mut last: Option<usize> = None;

        while out.completed() < procs.len() {
            // `min_by_key` keeps the first of equal minima, i.e. scan order.
            let pick = scan
                .iter()
                .copied()
                .filter(|&i| procs[i].arrival <= clock && !procs[i].is_finished())
                .min_by_key(|&i| procs[i].remaining);

            let Some(i) = pick else {
                observer.on_idle(clock);
                clock += 1;
                continue;
            };

            if last.is_some_and(|prev| prev != i) && self.context_switch > 0 {
                observer.on_context_switch(clock, self.context_switch);
                clock += self.context_switch;
            }

            if out.dispatch_collapsed(&procs[i].name) {
                log::debug!("sjf: {clock} dispatch {} (remaining {})", procs[i].name, procs[i].remaining);
                observer.on_dispatch(clock, &procs[i].name);
            }

            procs[i].run(1);
            clock += 1;

            if procs[i].is_finished() {
                let outcome = procs[i].complete(clock);
                observer.on_complete(clock, &procs[i].name, outcome);
                out.record_completion(&procs[i].name, outcome);
            }

            last = Some(i);
        }

        out.finish()
    }
}
