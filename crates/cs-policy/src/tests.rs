//! Unit tests for cs-policy.
//!
//! Expected timelines were traced by hand, tick by tick.

#[cfg(test)]
mod helpers {
    use cs_core::{ProcessSpec, SimulationResult, Workload};

    /// Five processes with mixed arrivals, bursts and priorities.
    pub fn mixed() -> Workload {
        Workload::new(vec![
            ProcessSpec::new("P1", 0, 8, 3),
            ProcessSpec::new("P2", 1, 4, 1),
            ProcessSpec::new("P3", 2, 2, 4),
            ProcessSpec::new("P4", 3, 1, 2),
            ProcessSpec::new("P5", 4, 3, 5),
        ])
    }

    /// Four processes with initial quanta for the adaptive hybrid policy.
    pub fn hybrid() -> Workload {
        Workload::new(vec![
            ProcessSpec::new("P1", 0, 17, 4).with_quantum(7),
            ProcessSpec::new("P2", 2, 6, 7).with_quantum(9),
            ProcessSpec::new("P3", 5, 11, 3).with_quantum(4),
            ProcessSpec::new("P4", 15, 4, 6).with_quantum(6),
        ])
    }

    /// Two processes separated by idle gaps.
    pub fn gapped() -> Workload {
        Workload::new(vec![
            ProcessSpec::new("A", 3, 2, 1).with_quantum(3),
            ProcessSpec::new("B", 10, 1, 1).with_quantum(3),
        ])
    }

    pub fn order(result: &SimulationResult) -> Vec<&str> {
        result.execution_order.iter().map(String::as_str).collect()
    }

    /// Assert `(waiting, turnaround)` for every named process.
    pub fn assert_outcomes(result: &SimulationResult, expected: &[(&str, u64, u64)]) {
        assert_eq!(result.process_results.len(), expected.len());
        for &(name, waiting, turnaround) in expected {
            let o = result.outcome(name).unwrap_or_else(|| panic!("{name} missing"));
            assert_eq!(
                (o.waiting_time, o.turnaround_time),
                (waiting, turnaround),
                "outcome of {name}"
            );
        }
    }

    /// Turnaround = waiting + burst for every process in `workload`.
    pub fn assert_consistent(workload: &Workload, result: &SimulationResult) {
        for spec in workload.iter() {
            let o = result.outcome(&spec.name).unwrap();
            assert_eq!(o.turnaround_time, o.waiting_time + spec.burst, "{}", spec.name);
        }
    }
}

// ── ArrivalQueue ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrivals {
    use cs_core::{ProcessId, Tick};

    use crate::ArrivalQueue;

    #[test]
    fn drains_in_arrival_then_push_order() {
        let mut q = ArrivalQueue::new();
        q.push(Tick(5), ProcessId(0));
        q.push(Tick(2), ProcessId(1));
        q.push(Tick(5), ProcessId(2));
        q.push(Tick(9), ProcessId(3));
        assert_eq!(q.len(), 4);

        assert!(q.drain_until(Tick(1)).is_empty());
        assert_eq!(q.drain_until(Tick(5)), vec![ProcessId(1), ProcessId(0), ProcessId(2)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(9)));
    }

    #[test]
    fn drain_is_inclusive_and_empties() {
        let mut q = ArrivalQueue::new();
        q.push(Tick(3), ProcessId(0));
        assert_eq!(q.drain_until(Tick(3)), vec![ProcessId(0)]);
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
        assert!(q.drain_until(Tick(100)).is_empty());
    }
}

// ── Shortest remaining time ───────────────────────────────────────────────────

#[cfg(test)]
mod srt {
    use cs_core::{ProcessSpec, TieBreak, Tick, Workload};

    use super::helpers::*;
    use crate::{Scheduler, ShortestRemainingTime, TraceRecorder};

    #[test]
    fn mixed_with_switch_cost() {
        let r = ShortestRemainingTime::new(1, TieBreak::ArrivalOrder).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P4", "P3", "P2", "P5", "P1"]);
        assert_outcomes(&r, &[
            ("P1", 16, 24), ("P2", 7, 11), ("P3", 4, 6), ("P4", 1, 2), ("P5", 9, 12),
        ]);
        assert_eq!(r.average_waiting_time, 7.4);
        assert_eq!(r.average_turnaround_time, 11.0);
        assert!(r.quantum_history.is_empty());
    }

    #[test]
    fn mixed_without_switch_cost() {
        let r = ShortestRemainingTime::new(0, TieBreak::ArrivalOrder).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P3", "P4", "P2", "P5", "P1"]);
        assert_outcomes(&r, &[
            ("P1", 10, 18), ("P2", 3, 7), ("P3", 0, 2), ("P4", 1, 2), ("P5", 4, 7),
        ]);
        assert_eq!(r.average_waiting_time, 3.6);
        assert_eq!(r.average_turnaround_time, 7.2);
    }

    #[test]
    fn shorter_arrival_preempts() {
        let w = Workload::new(vec![
            ProcessSpec::new("P1", 0, 8, 1),
            ProcessSpec::new("P2", 1, 4, 1),
        ]);
        let r = ShortestRemainingTime::new(0, TieBreak::ArrivalOrder).simulate(&w);
        assert_eq!(order(&r), ["P1", "P2", "P1"]);
        assert_outcomes(&r, &[("P1", 4, 12), ("P2", 0, 4)]);
        assert_eq!(r.average_waiting_time, 2.0);
        assert_eq!(r.average_turnaround_time, 8.0);
    }

    #[test]
    fn consecutive_ticks_collapse_into_one_token() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 5, 1)]);
        let r = ShortestRemainingTime::new(3, TieBreak::ArrivalOrder).simulate(&w);
        assert_eq!(order(&r), ["P"]);
        assert_outcomes(&r, &[("P", 0, 5)]);
    }

    #[test]
    fn tie_break_order_is_configurable() {
        // At tick 1 both have two ticks left.
        let w = Workload::new(vec![
            ProcessSpec::new("B", 0, 3, 1),
            ProcessSpec::new("A", 1, 2, 1),
        ]);
        let arrival = ShortestRemainingTime::new(0, TieBreak::ArrivalOrder).simulate(&w);
        assert_eq!(order(&arrival), ["B", "A"]);
        assert_outcomes(&arrival, &[("B", 0, 3), ("A", 2, 4)]);

        let reversed = Workload::new(vec![
            ProcessSpec::new("A", 1, 2, 1),
            ProcessSpec::new("B", 0, 3, 1),
        ]);
        let input = ShortestRemainingTime::new(0, TieBreak::InputOrder).simulate(&reversed);
        assert_eq!(order(&input), ["B", "A", "B"]);
        assert_outcomes(&input, &[("A", 0, 2), ("B", 2, 5)]);

        // Arrival order ignores input position.
        let sorted = ShortestRemainingTime::new(0, TieBreak::ArrivalOrder).simulate(&reversed);
        assert_eq!(order(&sorted), ["B", "A"]);
    }

    #[test]
    fn switch_after_idle_gap_is_charged() {
        let w = gapped();
        let mut trace = TraceRecorder::new();
        let r = ShortestRemainingTime::new(1, TieBreak::ArrivalOrder).simulate_observed(&w, &mut trace);
        assert_eq!(order(&r), ["A", "B"]);
        assert_outcomes(&r, &[("A", 0, 2), ("B", 1, 2)]);
        assert_eq!(trace.switch_overhead(), 1);
        assert_eq!(trace.completions(), vec![(Tick(5), "A"), (Tick(12), "B")]);
    }

    #[test]
    fn trace_accounts_for_every_switch() {
        let w = mixed();
        let mut trace = TraceRecorder::new();
        let r = ShortestRemainingTime::new(1, TieBreak::ArrivalOrder).simulate_observed(&w, &mut trace);
        assert_consistent(&w, &r);
        // No idle time: makespan = total burst + switch overhead.
        assert_eq!(trace.switch_overhead(), 6);
        assert_eq!(
            trace.completions(),
            vec![(Tick(5), "P4"), (Tick(8), "P3"), (Tick(12), "P2"), (Tick(16), "P5"), (Tick(24), "P1")]
        );
    }
}

// ── Round robin ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod round_robin {
    use cs_core::{ProcessSpec, Tick, Workload};

    use super::helpers::*;
    use crate::{RoundRobin, Scheduler, TraceEvent, TraceRecorder};

    #[test]
    fn mixed_with_switch_cost() {
        let r = RoundRobin::new(2, 1).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P3", "P1", "P4", "P5", "P2", "P1", "P5", "P1"]);
        assert_outcomes(&r, &[
            ("P1", 19, 27), ("P2", 14, 18), ("P3", 4, 6), ("P4", 9, 10), ("P5", 17, 20),
        ]);
        assert_eq!(r.average_waiting_time, 12.6);
        assert_eq!(r.average_turnaround_time, 16.2);
    }

    #[test]
    fn mixed_without_switch_cost() {
        let r = RoundRobin::new(2, 0).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P3", "P1", "P4", "P5", "P2", "P1", "P5", "P1"]);
        assert_outcomes(&r, &[
            ("P1", 10, 18), ("P2", 8, 12), ("P3", 2, 4), ("P4", 5, 6), ("P5", 9, 12),
        ]);
        assert_eq!(r.average_waiting_time, 6.8);
        assert_eq!(r.average_turnaround_time, 10.4);
    }

    #[test]
    fn alternates_on_quantum_expiry() {
        let w = Workload::new(vec![
            ProcessSpec::new("P1", 0, 5, 1),
            ProcessSpec::new("P2", 1, 3, 1),
        ]);
        let r = RoundRobin::new(2, 0).simulate(&w);
        assert_eq!(order(&r), ["P1", "P2", "P1", "P2", "P1"]);
        assert_outcomes(&r, &[("P1", 3, 8), ("P2", 3, 6)]);
        assert_eq!(r.average_waiting_time, 3.0);
        assert_eq!(r.average_turnaround_time, 7.0);
    }

    #[test]
    fn lone_process_pays_switches_between_its_slices() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 5, 1)]);
        let mut trace = TraceRecorder::new();
        let r = RoundRobin::new(2, 4).simulate_observed(&w, &mut trace);
        // After each expired slice the queue holds the process itself.
        assert_eq!(order(&r), ["P", "P", "P"]);
        assert_eq!(trace.switch_overhead(), 8);
        assert_outcomes(&r, &[("P", 8, 13)]);
    }

    #[test]
    fn idle_ticks_are_reported() {
        let w = gapped();
        let mut trace = TraceRecorder::new();
        let r = RoundRobin::new(2, 1).simulate_observed(&w, &mut trace);
        assert_eq!(order(&r), ["A", "B"]);
        assert_outcomes(&r, &[("A", 0, 2), ("B", 0, 1)]);
        let idle: Vec<Tick> = trace
            .events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Idle { .. }))
            .map(TraceEvent::tick)
            .collect();
        assert_eq!(idle, vec![Tick(0), Tick(1), Tick(2), Tick(5), Tick(6), Tick(7), Tick(8), Tick(9)]);
        assert_eq!(trace.switch_overhead(), 0);
    }

    #[test]
    fn final_dispatch_pays_no_switch() {
        let w = mixed();
        let mut trace = TraceRecorder::new();
        let r = RoundRobin::new(2, 1).simulate_observed(&w, &mut trace);
        assert_consistent(&w, &r);
        assert_eq!(trace.switch_overhead(), r.dispatch_count() as u64 - 1);
    }
}

// ── Priority with aging ───────────────────────────────────────────────────────

#[cfg(test)]
mod priority {
    use cs_core::{ProcessSpec, Workload};

    use super::helpers::*;
    use crate::{PriorityAging, Scheduler, TraceEvent, TraceRecorder};

    #[test]
    fn mixed_with_switch_cost() {
        let r = PriorityAging::new(1, 5).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P1", "P4", "P1", "P3", "P5"]);
        assert_outcomes(&r, &[
            ("P1", 9, 17), ("P2", 1, 5), ("P3", 16, 18), ("P4", 6, 7), ("P5", 17, 20),
        ]);
        assert_eq!(r.average_waiting_time, 9.8);
        assert_eq!(r.average_turnaround_time, 13.4);
    }

    #[test]
    fn mixed_without_switch_cost() {
        let r = PriorityAging::new(0, 5).simulate(&mixed());
        assert_eq!(order(&r), ["P1", "P2", "P4", "P1", "P3", "P5"]);
        assert_outcomes(&r, &[
            ("P1", 5, 13), ("P2", 0, 4), ("P3", 11, 13), ("P4", 2, 3), ("P5", 11, 14),
        ]);
        assert_eq!(r.average_waiting_time, 5.8);
        assert_eq!(r.average_turnaround_time, 9.4);
    }

    #[test]
    fn single_process_pays_no_switch() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 5, 1)]);
        let r = PriorityAging::new(2, 3).simulate(&w);
        assert_eq!(order(&r), ["P"]);
        assert_outcomes(&r, &[("P", 0, 5)]);
    }

    fn starving() -> Workload {
        Workload::new(vec![
            ProcessSpec::new("L", 0, 2, 4),
            ProcessSpec::new("H1", 0, 5, 1),
            ProcessSpec::new("H2", 3, 5, 1),
        ])
    }

    #[test]
    fn aging_lets_a_low_priority_process_through() {
        let r = PriorityAging::new(0, 2).simulate(&starving());
        assert_eq!(order(&r), ["H1", "H2", "L", "H2"]);
        assert_outcomes(&r, &[("L", 6, 8), ("H1", 0, 5), ("H2", 4, 9)]);

        // Without effective aging L waits for both.
        let slow = PriorityAging::new(0, 1000).simulate(&starving());
        assert_eq!(order(&slow), ["H1", "H2", "L"]);
        assert_outcomes(&slow, &[("L", 10, 12), ("H1", 0, 5), ("H2", 2, 7)]);
    }

    #[test]
    fn aging_steps_are_observed_and_clamped() {
        let mut trace = TraceRecorder::new();
        PriorityAging::new(0, 2).simulate_observed(&starving(), &mut trace);

        let steps = |name: &str| -> Vec<i64> {
            trace
                .events
                .iter()
                .filter_map(|e| match e {
                    TraceEvent::PriorityChange { process, priority, .. } if process == name => Some(*priority),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(steps("L"), vec![3, 2, 1]);
        assert!(steps("H2").iter().all(|&p| p == 1));
        assert!(steps("H1").is_empty());
    }

    #[test]
    fn input_workload_is_not_aged() {
        let w = starving();
        let before = w.clone();
        PriorityAging::new(0, 2).simulate(&w);
        assert_eq!(w, before);
    }

    #[test]
    fn trace_accounts_for_every_switch() {
        let w = mixed();
        let mut trace = TraceRecorder::new();
        let r = PriorityAging::new(1, 5).simulate_observed(&w, &mut trace);
        assert_consistent(&w, &r);
        assert_eq!(trace.switch_overhead(), 6);
    }
}

// ── Adaptive hybrid ───────────────────────────────────────────────────────────

#[cfg(test)]
mod hybrid {
    use cs_core::{ProcessSpec, Workload};

    use super::helpers::*;
    use crate::{AdaptiveHybrid, Scheduler, TraceRecorder};

    const ORDER: [&str; 10] = ["P1", "P2", "P3", "P2", "P1", "P3", "P4", "P3", "P1", "P4"];

    fn assert_histories(r: &cs_core::SimulationResult) {
        assert_eq!(r.quantum_history("P1"), Some(&[7, 10, 14, 0][..]));
        assert_eq!(r.quantum_history("P2"), Some(&[9, 12, 0][..]));
        assert_eq!(r.quantum_history("P3"), Some(&[4, 6, 8, 0][..]));
        assert_eq!(r.quantum_history("P4"), Some(&[6, 8, 0][..]));
    }

    #[test]
    fn four_processes_without_switch_cost() {
        let r = AdaptiveHybrid::new(0).simulate(&hybrid());
        assert_eq!(order(&r), ORDER);
        assert_outcomes(&r, &[("P1", 19, 36), ("P2", 4, 10), ("P3", 10, 21), ("P4", 19, 23)]);
        assert_histories(&r);
        assert_eq!(r.average_waiting_time, 13.0);
        assert_eq!(r.average_turnaround_time, 22.5);
    }

    #[test]
    fn four_processes_with_switch_cost() {
        let w = hybrid();
        let mut trace = TraceRecorder::new();
        let r = AdaptiveHybrid::new(1).simulate_observed(&w, &mut trace);
        assert_eq!(order(&r), ORDER);
        assert_outcomes(&r, &[("P1", 25, 42), ("P2", 7, 13), ("P3", 16, 27), ("P4", 25, 29)]);
        assert_histories(&r);
        assert_eq!(r.average_waiting_time, 18.25);
        assert_eq!(r.average_turnaround_time, 27.75);
        assert_consistent(&w, &r);
        // Only mid-slice preemptions cost a switch.
        assert_eq!(trace.switch_overhead(), 6);
    }

    #[test]
    fn exhausted_quantum_grows_by_two() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 10, 1).with_quantum(4)]);
        let r = AdaptiveHybrid::new(0).simulate(&w);
        assert_eq!(order(&r), ["P", "P"]);
        assert_eq!(r.quantum_history("P"), Some(&[4, 6, 0][..]));
        assert_outcomes(&r, &[("P", 0, 10)]);
    }

    #[test]
    fn histories_end_with_one_zero() {
        let r = AdaptiveHybrid::new(1).simulate(&hybrid());
        for (name, history) in &r.quantum_history {
            assert_eq!(history.last(), Some(&0), "{name}");
            assert_eq!(history.iter().filter(|&&q| q == 0).count(), 1, "{name}");
        }
    }

    #[test]
    fn idle_gaps_cost_nothing() {
        let r = AdaptiveHybrid::new(1).simulate(&gapped());
        assert_eq!(order(&r), ["A", "B"]);
        assert_outcomes(&r, &[("A", 0, 2), ("B", 0, 1)]);
        assert_eq!(r.quantum_history("A"), Some(&[3, 0][..]));
    }
}

// ── Policy registry ───────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use cs_core::{CoreError, ProcessOutcome, ProcessSpec, SchedulerParams, Workload};

    use super::helpers::*;
    use crate::{Policy, PolicyError, run_all, run_policies};

    #[test]
    fn labels_and_aliases() {
        let labels: Vec<&str> = Policy::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["SJF", "RR", "Priority", "AG"]);

        assert_eq!("srt".parse::<Policy>().unwrap(), Policy::ShortestRemainingTime);
        assert_eq!("Round-Robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!(" prio ".parse::<Policy>().unwrap(), Policy::PriorityAging);
        assert_eq!("AG".parse::<Policy>().unwrap(), Policy::AdaptiveHybrid);
        assert_eq!(
            "fifo".parse::<Policy>(),
            Err(PolicyError::UnknownPolicy("fifo".into()))
        );
        assert_eq!(Policy::PriorityAging.to_string(), "Priority");
    }

    #[test]
    fn scheduler_names_match_labels() {
        let params = SchedulerParams::default();
        for policy in Policy::ALL {
            assert_eq!(policy.scheduler(&params).name(), policy.label());
        }
    }

    #[test]
    fn validate_per_policy() {
        let w = mixed();
        let params = SchedulerParams::default();
        assert!(Policy::ShortestRemainingTime.validate(&w, &params).is_ok());
        assert_eq!(
            Policy::AdaptiveHybrid.validate(&w, &params),
            Err(PolicyError::Core(CoreError::ZeroQuantum("P1".into())))
        );

        let no_slice = params.clone().with_rr_quantum(0);
        assert!(Policy::RoundRobin.validate(&w, &no_slice).is_err());
        assert!(Policy::PriorityAging.validate(&w, &no_slice).is_ok());

        let no_aging = params.with_aging_interval(0);
        assert!(Policy::PriorityAging.validate(&w, &no_aging).is_err());

        let dup = Workload::new(vec![
            ProcessSpec::new("X", 0, 1, 1),
            ProcessSpec::new("X", 1, 1, 1),
        ]);
        assert_eq!(
            Policy::ShortestRemainingTime.validate(&dup, &SchedulerParams::default()),
            Err(PolicyError::Core(CoreError::DuplicateName("X".into())))
        );
    }

    #[test]
    fn run_all_keeps_policy_order_and_input() {
        let w = hybrid();
        let before = w.clone();
        let params = SchedulerParams::default().with_context_switch(1);
        let results = run_all(&w, &params);

        let policies: Vec<Policy> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(policies, Policy::ALL);
        assert_eq!(w, before);
        for (policy, result) in &results {
            assert_eq!(result.process_results.len(), w.len(), "{policy}");
            assert_consistent(&w, result);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let w = hybrid();
        let params = SchedulerParams::default().with_context_switch(1);
        let first = run_all(&w, &params);
        let second = run_all(&w, &params);
        assert_eq!(first, second);

        // Running a subset does not change any individual result.
        let only_ag = run_policies(&[Policy::AdaptiveHybrid], &w, &params);
        assert_eq!(only_ag[0], first[3]);
    }

    #[test]
    fn single_process_never_waits() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 5, 1).with_quantum(3)]);
        for (policy, result) in run_all(&w, &SchedulerParams::default()) {
            assert_eq!(
                result.outcome("P"),
                Some(&ProcessOutcome { waiting_time: 0, turnaround_time: 5 }),
                "{policy}"
            );
        }
    }

    #[test]
    fn empty_workload_yields_empty_results() {
        let w = Workload::default();
        for (_, result) in run_all(&w, &SchedulerParams::default()) {
            assert!(result.execution_order.is_empty());
            assert!(result.process_results.is_empty());
            assert_eq!(result.average_waiting_time, 0.0);
            assert_eq!(result.average_turnaround_time, 0.0);
        }
    }
}
