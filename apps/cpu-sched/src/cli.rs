//! Subcommand CLI parser.
//!
//! Hand-rolled; flags accept both `--flag value` and `--flag=value`.
//!
//! # Grammar
//!
//! ```text
//! cpu-sched run <workload.json|workload.csv> [--policy all|sjf|rr|priority|ag]
//!               [PARAM_FLAGS] [--out DIR] [--json]
//! cpu-sched verify <fixtures-dir>
//! cpu-sched random [--count N] [--seed S] [--max-arrival N]
//!                  [--policy ...] [PARAM_FLAGS] [--out DIR] [--json]
//! cpu-sched --help | -h
//!
//! PARAM_FLAGS: --context-switch N  --rr-quantum N  --aging N
//!              --tie-break arrival|input
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

use cs_core::{SchedulerParams, TieBreak};
use cs_policy::Policy;

pub const USAGE: &str = "\
usage:
  cpu-sched run <workload.json|workload.csv> [--policy all|sjf|rr|priority|ag]
                [--context-switch N] [--rr-quantum N] [--aging N]
                [--tie-break arrival|input] [--out DIR] [--json]
  cpu-sched verify <fixtures-dir>
  cpu-sched random [--count N] [--seed S] [--max-arrival N] [--policy ...]
                   [--context-switch N] [--rr-quantum N] [--aging N]
                   [--tie-break arrival|input] [--out DIR] [--json]

environment:
  CPU_SCHED_LOG   log level: error|warn|info|debug|trace (default warn)";

#[derive(Debug, PartialEq)]
pub enum Command {
    Run(RunArgs),
    Verify { dir: PathBuf },
    Random(RandomArgs),
    Help,
}

/// Scheduler parameters given on the command line.  `None` keeps the value
/// from the workload file, or the default.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParamOverrides {
    pub context_switch: Option<u64>,
    pub rr_quantum:     Option<u64>,
    pub aging_interval: Option<u64>,
    pub tie_break:      Option<TieBreak>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: SchedulerParams) -> SchedulerParams {
        if let Some(v) = self.context_switch {
            params.context_switch = v;
        }
        if let Some(v) = self.rr_quantum {
            params.rr_quantum = v;
        }
        if let Some(v) = self.aging_interval {
            params.aging_interval = v;
        }
        if let Some(v) = self.tie_break {
            params.sjf_tie_break = v;
        }
        params
    }
}

/// Options shared by `run` and `random`.
#[derive(Debug, Default, PartialEq)]
pub struct OutputArgs {
    /// `None` means every policy the workload is valid for.
    pub policy: Option<Policy>,
    pub params: ParamOverrides,
    pub out:    Option<PathBuf>,
    pub json:   bool,
}

#[derive(Debug, PartialEq)]
pub struct RunArgs {
    pub path:   PathBuf,
    pub output: OutputArgs,
}

#[derive(Debug, PartialEq)]
pub struct RandomArgs {
    pub count:       usize,
    pub seed:        u64,
    pub max_arrival: Option<u64>,
    pub output:      OutputArgs,
}

/// Parse the arguments after the executable name.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(sub) = args.next() else {
        return Ok(Command::Help);
    };
    let rest: Vec<String> = args.collect();

    match sub.as_str() {
        "--help" | "-h" | "help" => Ok(Command::Help),
        "run" => parse_run(rest),
        "verify" => parse_verify(rest),
        "random" => parse_random(rest),
        other => bail!("unknown subcommand {other:?}; expected run, verify or random"),
    }
}

fn parse_run(args: Vec<String>) -> Result<Command> {
    let mut path: Option<PathBuf> = None;
    let mut output = OutputArgs::default();
    let mut flags = Flags::new(args);

    while let Some(arg) = flags.next_arg() {
        match arg {
            Arg::Positional(p) if path.is_none() => path = Some(PathBuf::from(p)),
            Arg::Positional(p) => bail!("unexpected argument {p:?}"),
            Arg::Flag(name, inline) => {
                if !output.accept(&name, inline, &mut flags)? {
                    bail!("unknown flag --{name} for run");
                }
            }
        }
    }

    let path = path.ok_or_else(|| anyhow!("run needs a workload file"))?;
    Ok(Command::Run(RunArgs { path, output }))
}

fn parse_verify(args: Vec<String>) -> Result<Command> {
    let mut flags = Flags::new(args);
    let mut dir: Option<PathBuf> = None;
    while let Some(arg) = flags.next_arg() {
        match arg {
            Arg::Positional(p) if dir.is_none() => dir = Some(PathBuf::from(p)),
            Arg::Positional(p) => bail!("unexpected argument {p:?}"),
            Arg::Flag(name, _) => bail!("unknown flag --{name} for verify"),
        }
    }
    let dir = dir.ok_or_else(|| anyhow!("verify needs a fixtures directory"))?;
    Ok(Command::Verify { dir })
}

fn parse_random(args: Vec<String>) -> Result<Command> {
    let mut random = RandomArgs {
        count:       5,
        seed:        0,
        max_arrival: None,
        output:      OutputArgs::default(),
    };
    let mut flags = Flags::new(args);

    while let Some(arg) = flags.next_arg() {
        match arg {
            Arg::Positional(p) => bail!("unexpected argument {p:?}"),
            Arg::Flag(name, inline) => match name.as_str() {
                "count" => random.count = flags.value(&name, inline)?,
                "seed" => random.seed = flags.value(&name, inline)?,
                "max-arrival" => random.max_arrival = Some(flags.value(&name, inline)?),
                _ => {
                    if !random.output.accept(&name, inline, &mut flags)? {
                        bail!("unknown flag --{name} for random");
                    }
                }
            },
        }
    }

    if random.count == 0 {
        bail!("--count must be >= 1");
    }
    Ok(Command::Random(random))
}

impl OutputArgs {
    /// Consume `--name` if it is one of the shared flags.
    fn accept(&mut self, name: &str, inline: Option<String>, flags: &mut Flags) -> Result<bool> {
        match name {
            "policy" => {
                let v: String = flags.value(name, inline)?;
                self.policy = match v.as_str() {
                    "all" => None,
                    other => Some(Policy::from_str(other)?),
                };
            }
            "context-switch" => self.params.context_switch = Some(flags.value(name, inline)?),
            "rr-quantum" => self.params.rr_quantum = Some(flags.value(name, inline)?),
            "aging" => self.params.aging_interval = Some(flags.value(name, inline)?),
            "tie-break" => self.params.tie_break = Some(flags.value(name, inline)?),
            "out" => self.out = Some(PathBuf::from(flags.value::<String>(name, inline)?)),
            "json" => {
                if inline.is_some() {
                    bail!("--json takes no value");
                }
                self.json = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ── Tokenizer ─────────────────────────────────────────────────────────────────

enum Arg {
    Positional(String),
    /// Flag name without the leading `--`, plus an inline `=value`.
    Flag(String, Option<String>),
}

struct Flags {
    args: std::vec::IntoIter<String>,
}

impl Flags {
    fn new(args: Vec<String>) -> Self {
        Self { args: args.into_iter() }
    }

    fn next_arg(&mut self) -> Option<Arg> {
        let arg = self.args.next()?;
        Some(match arg.strip_prefix("--") {
            Some(flag) => match flag.split_once('=') {
                Some((name, value)) => Arg::Flag(name.to_owned(), Some(value.to_owned())),
                None => Arg::Flag(flag.to_owned(), None),
            },
            None => Arg::Positional(arg),
        })
    }

    /// The flag's value: inline if given, otherwise the next argument.
    fn value<T>(&mut self, name: &str, inline: Option<String>) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = match inline {
            Some(v) => v,
            None => self.args.next().ok_or_else(|| anyhow!("--{name} needs a value"))?,
        };
        raw.parse::<T>().with_context(|| format!("invalid value {raw:?} for --{name}"))
    }
}
