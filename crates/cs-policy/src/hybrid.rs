//! Adaptive-granularity hybrid ("AG") scheduling.
//!
//! Round robin over a FIFO ready queue, stepped one tick at a time, with a
//! per-process quantum that tunes itself and two mid-slice override checks.
//! For a running process with quantum `q` and `elapsed` ticks used:
//!
//! | When                          | Check                                   | Quantum bonus on preemption |
//! |-------------------------------|-----------------------------------------|-----------------------------|
//! | `elapsed == ceil(q / 4)`      | a ready process has a lower priority value | `ceil((q - elapsed) / 2)` |
//! | otherwise `elapsed >= 2·ceil(q / 4)` | a ready process has less remaining work | `q - elapsed`        |
//!
//! A preempted process goes to the tail of the queue and the candidate runs
//! immediately.  A process that uses its whole quantum grows it by 2 and is
//! re-queued; a finished process records a final quantum of 0.
//!
//! Every quantum value a process takes is appended to its history, so each
//! history starts with the initial quantum and ends with exactly one 0.

use std::collections::VecDeque;

use cs_core::{ResultBuilder, SchedulerParams, SimulationResult, Tick, Workload};

use crate::{ArrivalQueue, SchedObserver, Scheduler};

/// Quantum growth when a process exhausts its slice without finishing.
const EXHAUSTED_QUANTUM_GROWTH: u64 = 2;

#[derive(Clone, Debug)]
pub struct AdaptiveHybrid {
    pub context_switch: u64,
}

impl AdaptiveHybrid {
    pub fn new(context_switch: u64) -> Self {
        Self { context_switch }
    }

    pub fn from_params(params: &SchedulerParams) -> Self {
        Self::new(params.context_switch)
    }
}

impl Scheduler for AdaptiveHybrid {
    fn name(&self) -> &'static str {
        "AG"
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
        for p in &procs {
            out.start_history(&p.name, p.quantum);
        }

        let mut clock = Tick::ZERO;
        let mut current: Option<usize> = None;
        let mut elapsed: u64 = 0;

        while out.completed() < procs.len() {
            ready.extend(arrivals.drain_until(clock).into_iter().map(|id| id.index()));

            let i = match current {
                Some(i) => i,
                None => {
                    let Some(i) = ready.pop_front() else {
                        observer.on_idle(clock);
                        clock += 1;
                        continue;
                    };
                    elapsed = 0;
                    log::debug!("ag: {clock} dispatch {} (quantum {})", procs[i].name, procs[i].quantum);
                    observer.on_dispatch(clock, &procs[i].name);
                    out.dispatch(&procs[i].name);
                    current = Some(i);
                    i
                }
            };

            let q = procs[i].quantum;
            let t25 = q.div_ceil(4);
            let t50 = 2 * t25;

            // First match in queue order wins ties for both checks.
            let preemption = if elapsed == t25 {
                ready
                    .iter()
                    .copied()
                    .min_by_key(|&c| procs[c].priority)
                    .filter(|&c| procs[c].priority < procs[i].priority)
                    .map(|c| (c, q.saturating_sub(elapsed).div_ceil(2)))
            } else if elapsed >= t50 {
                ready
                    .iter()
                    .copied()
                    .min_by_key(|&c| procs[c].remaining)
                    .filter(|&c| procs[c].remaining < procs[i].remaining)
                    .map(|c| (c, q.saturating_sub(elapsed)))
            } else {
                None
            };

            if let Some((next, bonus)) = preemption {
                procs[i].quantum += bonus;
                log::debug!(
                    "ag: {clock} {} preempts {} (quantum now {})",
                    procs[next].name, procs[i].name, procs[i].quantum
                );
                observer.on_quantum_change(clock, &procs[i].name, procs[i].quantum);
                out.push_quantum(&procs[i].name, procs[i].quantum);

                ready.push_back(i);
                if let Some(pos) = ready.iter().position(|&r| r == next) {
                    ready.remove(pos);
                }
                current = Some(next);
                elapsed = 0;
                observer.on_dispatch(clock, &procs[next].name);
                out.dispatch(&procs[next].name);

                if self.context_switch > 0 {
                    observer.on_context_switch(clock, self.context_switch);
                    for _ in 0..self.context_switch {
                        clock += 1;
                        ready.extend(arrivals.drain_until(clock).into_iter().map(|id| id.index()));
                    }
                }
                continue;
            }

            procs[i].run(1);
            elapsed += 1;
            clock += 1;

            if procs[i].is_finished() {
                procs[i].quantum = 0;
                observer.on_quantum_change(clock, &procs[i].name, 0);
                out.push_quantum(&procs[i].name, 0);

                let outcome = procs[i].complete(clock);
                observer.on_complete(clock, &procs[i].name, outcome);
                out.record_completion(&procs[i].name, outcome);
                current = None;
            } else if elapsed == procs[i].quantum {
                procs[i].quantum += EXHAUSTED_QUANTUM_GROWTH;
                log::trace!("ag: {clock} {} exhausted its slice, quantum now {}", procs[i].name, procs[i].quantum);
                observer.on_quantum_change(clock, &procs[i].name, procs[i].quantum);
                out.push_quantum(&procs[i].name, procs[i].quantum);
                ready.push_back(i);
                current = None;
            }
        }

        out.finish()
    }
}
