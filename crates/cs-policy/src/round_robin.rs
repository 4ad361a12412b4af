//! Round robin with a fixed time slice.

use std::collections::VecDeque;

use cs_core::{ResultBuilder, SchedulerParams, SimulationResult, Tick, Workload};

use crate::{ArrivalQueue, SchedObserver, Scheduler};

/// FIFO ready queue, fixed quantum, every dispatch recorded.
///
/// Processes that arrive while a slice runs are queued ahead of the process
/// whose slice just expired.  A context switch is charged after a dispatch
/// only if the ready queue is non-empty at that point, so the final dispatch
/// of a run costs nothing.
#[derive(Clone, Debug)]
pub struct RoundRobin {
    pub quantum:        u64,
    pub context_switch: u64,
}

impl RoundRobin {
    pub fn new(quantum: u64, context_switch: u64) -> Self {
        debug_assert!(quantum > 0, "round robin needs a positive quantum");
        Self { quantum, context_switch }
    }

    pub fn from_params(params: &SchedulerParams) -> Self {
        Self::new(params.rr_quantum, params.context_switch)
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
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
        let mut arrivals = ArrivalQueue::from_processes(&procs);
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(procs.len());
        let mut out = ResultBuilder::new();
        let mut clock = Tick::ZERO;

        while out.completed() < procs.len() {
            ready.extend(arrivals.drain_until(clock).into_iter().map(|id| id.index()));

            let Some(i) = ready.pop_front() else {
                observer.on_idle(clock);
                clock += 1;
                continue;
            };

            log::debug!("rr: {clock} dispatch {} (remaining {})", procs[i].name, procs[i].remaining);
            observer.on_dispatch(clock, &procs[i].name);
            out.dispatch(&procs[i].name);

            let slice = self.quantum.min(procs[i].remaining);
            procs[i].run(slice);
            clock += slice;

            ready.extend(arrivals.drain_until(clock).into_iter().map(|id| id.index()));

            if procs[i].is_finished() {
                let outcome = procs[i].complete(clock);
                observer.on_complete(clock, &procs[i].name, outcome);
                out.record_completion(&procs[i].name, outcome);
            } else {
                ready.push_back(i);
            }

            if !ready.is_empty() && self.context_switch > 0 {
                observer.on_context_switch(clock, self.context_switch);
                clock += self.context_switch;
            }
        }

        out.finish()
    }
}
