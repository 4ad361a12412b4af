//! JSON test-case fixtures.
//!
//! # Formats
//!
//! Two shapes are accepted and told apart automatically.
//!
//! **Standard** cases run SJF, RR and Priority over one workload:
//!
//! ```json
//! {
//!   "name": "mixed arrivals",
//!   "input": {
//!     "contextSwitch": 1, "rrQuantum": 2, "agingInterval": 5,
//!     "processes": [{ "name": "P1", "arrival": 0, "burst": 8, "priority": 3 }]
//!   },
//!   "expectedOutput": {
//!     "SJF":      { "executionOrder": [..], "processResults": [..], "averageWaitingTime": 0.0, "averageTurnaroundTime": 0.0 },
//!     "RR":       { .. },
//!     "Priority": { .. }
//!   }
//! }
//! ```
//!
//! **AG** cases carry a `quantum` per process and a single expected output
//! whose process results also list a `quantumHistory`:
//!
//! ```json
//! {
//!   "input": { "processes": [{ "name": "P1", "arrival": 0, "burst": 17, "priority": 4, "quantum": 7 }] },
//!   "expectedOutput": {
//!     "executionOrder": [..],
//!     "processResults": [{ "name": "P1", "waitingTime": 19, "turnaroundTime": 36, "quantumHistory": [7, 10, 14, 0] }],
//!     "averageWaitingTime": 13.0, "averageTurnaroundTime": 22.5
//!   }
//! }
//! ```
//!
//! A case is AG if any process carries a quantum or its expected output is
//! not keyed by policy.  `expectedOutput` is optional in both shapes; missing
//! scheduler parameters fall back to `SchedulerParams::default()`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use cs_core::{ProcessOutcome, ProcessSpec, SchedulerParams, SimulationResult, Workload};
use cs_policy::Policy;

use crate::{WorkloadError, WorkloadResult};

/// Tolerance for comparing averages.
pub const AVERAGE_TOLERANCE: f64 = 0.01;

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseRecord {
    name:            Option<String>,
    input:           InputRecord,
    expected_output: Option<ExpectedRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputRecord {
    context_switch: Option<u64>,
    rr_quantum:     Option<u64>,
    aging_interval: Option<u64>,
    processes:      Vec<ProcessRecord>,
}

#[derive(Deserialize)]
struct ProcessRecord {
    name:     String,
    arrival:  u64,
    burst:    u64,
    priority: i64,
    quantum:  Option<u64>,
}

/// `Single` must come first: every object matches `PerPolicy`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpectedRecord {
    Single(OutputRecord),
    PerPolicy {
        #[serde(rename = "SJF")]
        sjf:      Option<OutputRecord>,
        #[serde(rename = "RR")]
        rr:       Option<OutputRecord>,
        #[serde(rename = "Priority")]
        priority: Option<OutputRecord>,
        #[serde(rename = "AG")]
        ag:       Option<OutputRecord>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputRecord {
    execution_order:         Vec<String>,
    process_results:         Vec<ResultRecord>,
    average_waiting_time:    f64,
    average_turnaround_time: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultRecord {
    name:            String,
    waiting_time:    u64,
    turnaround_time: u64,
    quantum_history: Option<Vec<u64>>,
}

// ── Fixture ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FixtureKind {
    /// SJF, RR and Priority over one workload.
    Standard,
    /// The adaptive hybrid policy alone.
    Adaptive,
}

impl FixtureKind {
    pub fn policies(self) -> &'static [Policy] {
        match self {
            FixtureKind::Standard => &[
                Policy::ShortestRemainingTime,
                Policy::RoundRobin,
                Policy::PriorityAging,
            ],
            FixtureKind::Adaptive => &[Policy::AdaptiveHybrid],
        }
    }
}

/// Expected output of one policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expected {
    pub execution_order:         Vec<String>,
    pub process_results:         BTreeMap<String, ProcessOutcome>,
    /// Only processes whose record listed a history.
    pub quantum_history:         BTreeMap<String, Vec<u64>>,
    pub average_waiting_time:    f64,
    pub average_turnaround_time: f64,
}

impl From<OutputRecord> for Expected {
    fn from(rec: OutputRecord) -> Self {
        let mut expected = Expected {
            execution_order:         rec.execution_order,
            average_waiting_time:    rec.average_waiting_time,
            average_turnaround_time: rec.average_turnaround_time,
            ..Expected::default()
        };
        for r in rec.process_results {
            if let Some(history) = r.quantum_history {
                expected.quantum_history.insert(r.name.clone(), history);
            }
            expected.process_results.insert(
                r.name,
                ProcessOutcome { waiting_time: r.waiting_time, turnaround_time: r.turnaround_time },
            );
        }
        expected
    }
}

/// One difference between a fixture's expected output and a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub policy:   Policy,
    /// What was compared, e.g. `"execution order"` or `"P2 waiting time"`.
    pub field:    String,
    pub expected: String,
    pub actual:   String,
}

impl Mismatch {
    fn new(policy: Policy, field: impl Into<String>, expected: impl fmt::Debug, actual: impl fmt::Debug) -> Self {
        Self {
            policy,
            field:    field.into(),
            expected: format!("{expected:?}"),
            actual:   format!("{actual:?}"),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} expected {} got {}", self.policy, self.field, self.expected, self.actual)
    }
}

/// A validated test case: workload, parameters and expected output per policy.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub name:     String,
    pub kind:     FixtureKind,
    pub workload: Workload,
    pub params:   SchedulerParams,
    pub expected: BTreeMap<Policy, Expected>,
}

impl Fixture {
    fn from_record(rec: CaseRecord, fallback_name: &str) -> WorkloadResult<Self> {
        let has_quanta = rec.input.processes.iter().any(|p| p.quantum.is_some());
        let single = matches!(rec.expected_output, Some(ExpectedRecord::Single(_)));
        let kind = if has_quanta || single { FixtureKind::Adaptive } else { FixtureKind::Standard };

        let defaults = SchedulerParams::default();
        let params = SchedulerParams {
            context_switch: rec.input.context_switch.unwrap_or(defaults.context_switch),
            rr_quantum:     rec.input.rr_quantum.unwrap_or(defaults.rr_quantum),
            aging_interval: rec.input.aging_interval.unwrap_or(defaults.aging_interval),
            ..defaults
        };

        let workload: Workload = rec
            .input
            .processes
            .into_iter()
            .map(|p| {
                ProcessSpec::new(p.name, p.arrival, p.burst, p.priority)
                    .with_quantum(p.quantum.unwrap_or(0))
            })
            .collect();

        let mut expected = BTreeMap::new();
        match rec.expected_output {
            None => {}
            Some(ExpectedRecord::Single(out)) => {
                expected.insert(Policy::AdaptiveHybrid, Expected::from(out));
            }
            Some(ExpectedRecord::PerPolicy { sjf, rr, priority, ag }) => {
                let keyed = [
                    (Policy::ShortestRemainingTime, sjf),
                    (Policy::RoundRobin, rr),
                    (Policy::PriorityAging, priority),
                    (Policy::AdaptiveHybrid, ag),
                ];
                for (policy, out) in keyed {
                    if let Some(out) = out {
                        expected.insert(policy, Expected::from(out));
                    }
                }
            }
        }

        for &policy in kind.policies() {
            policy.validate(&workload, &params)?;
        }

        Ok(Self {
            name: rec.name.unwrap_or_else(|| fallback_name.to_owned()),
            kind,
            workload,
            params,
            expected,
        })
    }

    /// Policies this fixture is meant to run under.
    pub fn policies(&self) -> &'static [Policy] {
        self.kind.policies()
    }

    /// Compare `result` against the expected output for `policy`.
    ///
    /// Returns an empty list when they agree or when the fixture has no
    /// expectation for `policy`.
    pub fn check(&self, policy: Policy, result: &SimulationResult) -> Vec<Mismatch> {
        let Some(exp) = self.expected.get(&policy) else {
            return Vec::new();
        };
        let mut out = Vec::new();

        if exp.execution_order != result.execution_order {
            out.push(Mismatch::new(policy, "execution order", &exp.execution_order, &result.execution_order));
        }

        for (name, want) in &exp.process_results {
            match result.outcome(name) {
                None => out.push(Mismatch::new(policy, format!("{name} result"), want, None::<ProcessOutcome>)),
                Some(got) => {
                    if got.waiting_time != want.waiting_time {
                        out.push(Mismatch::new(policy, format!("{name} waiting time"), want.waiting_time, got.waiting_time));
                    }
                    if got.turnaround_time != want.turnaround_time {
                        out.push(Mismatch::new(policy, format!("{name} turnaround time"), want.turnaround_time, got.turnaround_time));
                    }
                }
            }
        }

        for (name, want) in &exp.quantum_history {
            let got = result.quantum_history(name);
            if got != Some(want.as_slice()) {
                out.push(Mismatch::new(policy, format!("{name} quantum history"), want, got));
            }
        }

        if (exp.average_waiting_time - result.average_waiting_time).abs() > AVERAGE_TOLERANCE {
            out.push(Mismatch::new(policy, "average waiting time", exp.average_waiting_time, result.average_waiting_time));
        }
        if (exp.average_turnaround_time - result.average_turnaround_time).abs() > AVERAGE_TOLERANCE {
            out.push(Mismatch::new(
                policy,
                "average turnaround time",
                exp.average_turnaround_time,
                result.average_turnaround_time,
            ));
        }

        out
    }

    /// Run every policy of this fixture and collect all mismatches.
    pub fn verify(&self) -> Vec<Mismatch> {
        self.policies()
            .iter()
            .flat_map(|&policy| {
                let result = policy.scheduler(&self.params).simulate(&self.workload);
                self.check(policy, &result)
            })
            .collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate one fixture file.
pub fn load_fixture(path: &Path) -> WorkloadResult<Fixture> {
    let file = File::open(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let rec: CaseRecord = serde_json::from_reader(BufReader::new(file))?;
    Fixture::from_record(rec, &stem)
}

/// Like [`load_fixture`] but accepts any `Read` source.  Unnamed cases are
/// called `"fixture"`.
pub fn load_fixture_reader<R: Read>(reader: R) -> WorkloadResult<Fixture> {
    let rec: CaseRecord = serde_json::from_reader(reader)?;
    Fixture::from_record(rec, "fixture")
}

/// Load every `*.json` file in `dir`, in file-name order.
pub fn load_fixture_dir(dir: &Path) -> WorkloadResult<Vec<(PathBuf, Fixture)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"));
    paths.sort();

    if paths.is_empty() {
        return Err(WorkloadError::Parse(format!("no *.json fixtures in {}", dir.display())));
    }
    log::info!("loading {} fixtures from {}", paths.len(), dir.display());

    paths
        .into_iter()
        .map(|path| {
            let fixture = load_fixture(&path)?;
            Ok((path, fixture))
        })
        .collect()
}
