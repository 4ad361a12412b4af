//! cpu-sched — run the four scheduling policies over a workload.
//!
//! ```text
//! cpu-sched run fixtures/test_1.json
//! cpu-sched run fixtures/mixed.csv --policy ag --context-switch 1 --out ./output
//! cpu-sched verify fixtures
//! cpu-sched random --count 8 --seed 42
//! ```
//!
//! Reports go to stdout, log records to stderr (see `CPU_SCHED_LOG`).

mod cli;
mod logger;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use cs_core::{SchedulerParams, SimulationResult, Workload};
use cs_output::{CsvWriter, TraceOutputObserver, write_report};
use cs_policy::{Policy, run_policies};
use cs_workload::{RandomWorkload, load_fixture, load_fixture_dir, load_workload_csv};

use cli::{Command, OutputArgs, RandomArgs, RunArgs};

fn main() -> ExitCode {
    if let Err(e) = logger::init() {
        eprintln!("warning: logger not installed: {e}");
    }

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!();
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let outcome = match command {
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(args) => run(args),
        Command::Verify { dir } => verify(&dir),
        Command::Random(args) => random(args),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> Result<ExitCode> {
    let (workload, base) = load_workload(&args.path)?;
    let params = args.output.params.apply(base);
    simulate_and_report(&workload, &params, &args.output)?;
    Ok(ExitCode::SUCCESS)
}

fn verify(dir: &Path) -> Result<ExitCode> {
    let fixtures = load_fixture_dir(dir)
        .with_context(|| format!("loading fixtures from {}", dir.display()))?;

    let mut failed = 0usize;
    for (path, fixture) in &fixtures {
        let mismatches = fixture.verify();
        let file = path.file_name().map(|f| f.to_string_lossy()).unwrap_or_default();
        if mismatches.is_empty() {
            println!("PASS {file} ({})", fixture.name);
        } else {
            failed += 1;
            println!("FAIL {file} ({})", fixture.name);
            for m in &mismatches {
                println!("    {m}");
            }
        }
    }

    println!("{} passed, {failed} failed", fixtures.len() - failed);
    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn random(args: RandomArgs) -> Result<ExitCode> {
    let mut spec = RandomWorkload::default().with_count(args.count).with_seed(args.seed);
    if let Some(max) = args.max_arrival {
        spec.max_arrival = max;
    }
    let workload = spec.generate()?;

    if !args.output.json {
        println!("Generated workload (seed {}):", args.seed);
        for p in workload.iter() {
            println!(
                "  {} | Arrival = {} | Burst = {} | Priority = {} | Quantum = {}",
                p.name, p.arrival.0, p.burst, p.priority, p.quantum
            );
        }
    }

    let params = args.output.params.apply(SchedulerParams::default());
    simulate_and_report(&workload, &params, &args.output)?;
    Ok(ExitCode::SUCCESS)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Load a CSV workload, or a JSON fixture together with its parameters.
fn load_workload(path: &Path) -> Result<(Workload, SchedulerParams)> {
    let is_csv = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        let workload = load_workload_csv(path).with_context(|| format!("loading {}", path.display()))?;
        Ok((workload, SchedulerParams::default()))
    } else {
        let fixture = load_fixture(path).with_context(|| format!("loading {}", path.display()))?;
        Ok((fixture.workload, fixture.params))
    }
}

/// The requested policy, or every policy `workload` can run under.
fn select_policies(workload: &Workload, requested: Option<Policy>) -> Vec<Policy> {
    match requested {
        Some(policy) => vec![policy],
        None => Policy::ALL
            .into_iter()
            .filter(|&p| {
                let ok = p != Policy::AdaptiveHybrid || workload.has_quanta();
                if !ok {
                    log::warn!("skipping {p}: not every process has a quantum");
                }
                ok
            })
            .collect(),
    }
}

fn simulate_and_report(workload: &Workload, params: &SchedulerParams, output: &OutputArgs) -> Result<()> {
    let policies = select_policies(workload, output.policy);
    for &policy in &policies {
        policy
            .validate(workload, params)
            .with_context(|| format!("cannot run {policy}"))?;
    }

    let results = match &output.out {
        Some(dir) => simulate_traced(workload, params, &policies, dir)?,
        None => run_policies(&policies, workload, params),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output.json {
        let by_label: BTreeMap<&str, &SimulationResult> =
            results.iter().map(|(p, r)| (p.label(), r)).collect();
        serde_json::to_writer_pretty(&mut out, &by_label)?;
        writeln!(out)?;
    } else {
        for (policy, result) in &results {
            write_report(&mut out, policy.label(), result)?;
        }
    }
    Ok(())
}

/// Run each policy with a CSV trace observer writing into `dir`.
fn simulate_traced(
    workload: &Workload,
    params:   &SchedulerParams,
    policies: &[Policy],
    dir:      &Path,
) -> Result<Vec<(Policy, SimulationResult)>> {
    let writer = CsvWriter::new(dir).with_context(|| format!("creating output in {}", dir.display()))?;
    let mut obs = TraceOutputObserver::new(writer);

    let results = policies
        .iter()
        .map(|&policy| {
            obs.begin(policy);
            let result = policy.scheduler(params).simulate_observed(workload, &mut obs);
            obs.record_result(&result);
            (policy, result)
        })
        .collect();

    obs.finish();
    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing output to {}", dir.display()));
    }
    log::info!("wrote CSV output to {}", dir.display());
    Ok(results)
}
