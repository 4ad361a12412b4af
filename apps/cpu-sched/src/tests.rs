//! Tests for argument parsing and policy selection.

#[cfg(test)]
mod cli_tests {
    use std::path::PathBuf;

    use cs_core::{SchedulerParams, TieBreak};
    use cs_policy::Policy;

    use crate::cli::{Command, ParamOverrides, parse_args};

    fn parse(args: &[&str]) -> anyhow::Result<Command> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_is_help() {
        assert_eq!(parse(&[]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn run_with_flags() {
        let Command::Run(run) = parse(&[
            "run", "w.json", "--policy", "rr", "--context-switch=2", "--rr-quantum", "3",
            "--aging", "4", "--tie-break", "input", "--out", "out", "--json",
        ])
        .unwrap() else {
            panic!("expected run");
        };
        assert_eq!(run.path, PathBuf::from("w.json"));
        assert_eq!(run.output.policy, Some(Policy::RoundRobin));
        assert_eq!(
            run.output.params,
            ParamOverrides {
                context_switch: Some(2),
                rr_quantum:     Some(3),
                aging_interval: Some(4),
                tie_break:      Some(TieBreak::InputOrder),
            }
        );
        assert_eq!(run.output.out, Some(PathBuf::from("out")));
        assert!(run.output.json);
    }

    #[test]
    fn policy_all_means_every_policy() {
        let Command::Run(run) = parse(&["run", "w.csv", "--policy=all"]).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(run.output.policy, None);
    }

    #[test]
    fn overrides_only_touch_given_fields() {
        let overrides = ParamOverrides { rr_quantum: Some(7), ..ParamOverrides::default() };
        let base = SchedulerParams::default().with_context_switch(3);
        let params = overrides.apply(base.clone());
        assert_eq!(params, base.with_rr_quantum(7));
    }

    #[test]
    fn verify_and_random() {
        assert_eq!(
            parse(&["verify", "fixtures"]).unwrap(),
            Command::Verify { dir: PathBuf::from("fixtures") }
        );

        let Command::Random(r) = parse(&["random", "--count", "8", "--seed=42", "--policy", "ag"]).unwrap() else {
            panic!("expected random");
        };
        assert_eq!((r.count, r.seed, r.max_arrival), (8, 42, None));
        assert_eq!(r.output.policy, Some(Policy::AdaptiveHybrid));
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse(&["explode"]).is_err());
        assert!(parse(&["run"]).is_err());
        assert!(parse(&["run", "a.json", "b.json"]).is_err());
        assert!(parse(&["run", "a.json", "--policy", "fifo"]).is_err());
        assert!(parse(&["run", "a.json", "--context-switch"]).is_err());
        assert!(parse(&["run", "a.json", "--aging", "soon"]).is_err());
        assert!(parse(&["run", "a.json", "--seed", "1"]).is_err());
        assert!(parse(&["verify"]).is_err());
        assert!(parse(&["random", "--count", "0"]).is_err());
    }
}

#[cfg(test)]
mod app_tests {
    use std::path::PathBuf;

    use cs_core::{ProcessSpec, Workload};
    use cs_policy::Policy;

    use crate::{load_workload, select_policies};

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
    }

    #[test]
    fn hybrid_is_skipped_without_quanta() {
        let w = Workload::new(vec![ProcessSpec::new("P", 0, 3, 1)]);
        assert_eq!(
            select_policies(&w, None),
            [Policy::ShortestRemainingTime, Policy::RoundRobin, Policy::PriorityAging]
        );
        assert_eq!(select_policies(&w, Some(Policy::AdaptiveHybrid)), [Policy::AdaptiveHybrid]);

        let with_quanta = Workload::new(vec![ProcessSpec::new("P", 0, 3, 1).with_quantum(2)]);
        assert_eq!(select_policies(&with_quanta, None), Policy::ALL);
    }

    #[test]
    fn json_fixture_brings_its_parameters() {
        let (w, params) = load_workload(&fixtures().join("test_1.json")).unwrap();
        assert_eq!(w.len(), 5);
        assert_eq!(params.context_switch, 1);
        assert_eq!(params.rr_quantum, 2);
    }

    #[test]
    fn csv_uses_default_parameters() {
        let (w, params) = load_workload(&fixtures().join("mixed.csv")).unwrap();
        assert!(w.has_quanta());
        assert_eq!(params, cs_core::SchedulerParams::default());
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_workload(&fixtures().join("missing.json")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }
}
