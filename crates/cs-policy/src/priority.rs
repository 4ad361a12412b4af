//! Preemptive priority scheduling with aging.
//!
//! # Ordering
//!
//! Ready processes are ranked by `(priority, arrival, input position)`,
//! ascending.  The three keys are a total order, so "best" is never ambiguous.
//!
//! # Aging
//!
//! A ready process that has waited `w >= aging_interval` ticks since its last
//! stamp gains `w / aging_interval` priority steps (never below 1) and is
//! re-stamped.  Admission and preemption stamp a process with the current
//! clock.  The running process does not age.
//!
//! # Decision loop
//!
//! ```text
//! loop:
//!   admit arrivals (stamp = clock)
//!   idle and nothing ready            → clock += 1
//!   idle, or best ready outranks CPU  → preempt / dispatch:
//!       running process back to ready (stamp = clock)
//!       dispatch best; every dispatch but the first pays the switch cost
//!       admit, age, re-validate once: if the best ready process now
//!       outranks the dispatched one, swap and pay the switch cost again
//!   run min(remaining, next aging event, next arrival) ticks (≥ 1)
//!   admit, age, complete if done
//! ```

use cs_core::{Process, ProcessId, ResultBuilder, SchedulerParams, SimulationResult, Tick, Workload};

use crate::{ArrivalQueue, SchedObserver, Scheduler};

#[derive(Clone, Debug)]
pub struct PriorityAging {
    pub context_switch: u64,
    pub aging_interval: u64,
}

impl PriorityAging {
    pub fn new(context_switch: u64, aging_interval: u64) -> Self {
        debug_assert!(aging_interval > 0, "aging interval must be positive");
        Self { context_switch, aging_interval }
    }

    pub fn from_params(params: &SchedulerParams) -> Self {
        Self::new(params.context_switch, params.aging_interval)
    }
}

impl Scheduler for PriorityAging {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn simulate_observed(
        &self,
        workload: &Workload,
        observer: &mut dyn SchedObserver,
    ) -> SimulationResult {
        if workload.is_empty() {
            return SimulationResult::empty();
        }

        let mut run = AgingRun::new(workload, self.aging_interval, observer);
        let mut out = ResultBuilder::new();
        let mut active: Option<usize> = None;
        let total = run.procs.len();

        while out.completed() < total {
            run.admit();

            if active.is_none() && run.ready.is_empty() {
                run.observer.on_idle(run.clock);
                run.clock += 1;
                continue;
            }

            let dispatch = match (active, run.best()) {
                (None, Some(c)) => Some(c),
                (Some(a), Some(c)) if run.rank(c) < run.rank(a) => Some(c),
                _ => None,
            };

            if let Some(chosen) = dispatch {
                if let Some(a) = active.take() {
                    log::debug!("priority: {} preempt {}", run.clock, run.procs[a].name);
                    run.last_update[a] = run.clock;
                    run.ready.push(a);
                }
                run.take(chosen);
                run.dispatch(chosen, &mut out);
                let mut current = chosen;

                if out.dispatch_count() > 1 {
                    run.switch(self.context_switch);
                    run.admit();
                }

                // The switch delay may have aged or admitted a better
                // candidate.  Re-check exactly once.
                if !run.ready.is_empty() {
                    run.age();
                    let better = run.best().filter(|&c| run.rank(c) < run.rank(current));
                    if let Some(c) = better {
                        run.ready.push(current);
                        run.take(c);
                        run.dispatch(c, &mut out);
                        current = c;

                        run.switch(self.context_switch);
                        run.admit();
                        if !run.ready.is_empty() {
                            run.age();
                        }
                    }
                }

                active = Some(current);
            }

            if let Some(a) = active {
                let slice = run.slice_for(a);
                run.procs[a].run(slice);
                run.clock += slice;

                run.admit();
                if !run.ready.is_empty() {
                    run.age();
                }

                if run.procs[a].is_finished() {
                    let now = run.clock;
                    let outcome = run.procs[a].complete(now);
                    run.observer.on_complete(now, &run.procs[a].name, outcome);
                    out.record_completion(&run.procs[a].name, outcome);
                    active = None;
                }
            }
        }

        out.finish()
    }
}

// ── Per-run state ─────────────────────────────────────────────────────────────

type Rank = (i64, Tick, ProcessId);

struct AgingRun<'o> {
    procs:          Vec<Process>,
    /// Tick of each process's last aging stamp, indexed like `procs`.
    last_update:    Vec<Tick>,
    /// Unordered; `best()` scans by rank.
    ready:          Vec<usize>,
    arrivals:       ArrivalQueue,
    clock:          Tick,
    aging_interval: u64,
    observer:       &'o mut dyn SchedObserver,
}

impl<'o> AgingRun<'o> {
    fn new(workload: &Workload, aging_interval: u64, observer: &'o mut dyn SchedObserver) -> Self {
        let procs = workload.instantiate();
        let last_update = procs.iter().map(|p| p.arrival).collect();
        let arrivals = ArrivalQueue::from_processes(&procs);
        Self {
            ready: Vec::with_capacity(procs.len()),
            procs,
            last_update,
            arrivals,
            clock: Tick::ZERO,
            aging_interval,
            observer,
        }
    }

    fn rank(&self, i: usize) -> Rank {
        let p = &self.procs[i];
        (p.priority, p.arrival, p.id)
    }

    fn best(&self) -> Option<usize> {
        self.ready.iter().copied().min_by_key(|&i| self.rank(i))
    }

    fn take(&mut self, i: usize) {
        if let Some(pos) = self.ready.iter().position(|&r| r == i) {
            self.ready.swap_remove(pos);
        }
    }

    fn admit(&mut self) {
        for id in self.arrivals.drain_until(self.clock) {
            self.last_update[id.index()] = self.clock;
            self.ready.push(id.index());
        }
    }

    fn age(&mut self) {
        for k in 0..self.ready.len() {
            let i = self.ready[k];
            let waited = self.clock - self.last_update[i];
            if waited < self.aging_interval {
                continue;
            }
            let steps = (waited / self.aging_interval) as i64;
            let p = &mut self.procs[i];
            p.priority = (p.priority - steps).max(1);
            self.last_update[i] = self.clock;
            log::trace!("priority: {} aged {} to {}", self.clock, p.name, p.priority);
            self.observer.on_priority_change(self.clock, &p.name, p.priority);
        }
    }

    fn dispatch(&mut self, i: usize, out: &mut ResultBuilder) {
        log::debug!("priority: {} dispatch {} (priority {})", self.clock, self.procs[i].name, self.procs[i].priority);
        self.observer.on_dispatch(self.clock, &self.procs[i].name);
        out.dispatch(&self.procs[i].name);
    }

    fn switch(&mut self, cost: u64) {
        if cost > 0 {
            self.observer.on_context_switch(self.clock, cost);
            self.clock += cost;
        }
    }

    /// Run until the next event that could change the ranking: completion,
    /// the earliest aging step in the ready set, or the next arrival.
    fn slice_for(&self, i: usize) -> u64 {
        let mut slice = self.procs[i].remaining;
        let next_aging = self
            .ready
            .iter()
            .map(|&r| {
                let waited = self.clock - self.last_update[r];
                self.aging_interval - waited % self.aging_interval
            })
            .min();
        if let Some(ticks) = next_aging {
            slice = slice.min(ticks);
        }
        if let Some(next) = self.arrivals.next_tick() {
            slice = slice.min(next - self.clock);
        }
        slice.max(1)
    }
}
