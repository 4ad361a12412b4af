//! Per-policy simulation parameters.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Candidate scan order used to break shortest-remaining-time ties.
///
/// The first process in scan order among those sharing the minimum remaining
/// time is dispatched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TieBreak {
    /// Workload order stably sorted by arrival time.
    #[default]
    ArrivalOrder,
    /// Raw workload order.
    InputOrder,
}

impl FromStr for TieBreak {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival" | "arrival-order" => Ok(TieBreak::ArrivalOrder),
            "input" | "input-order" => Ok(TieBreak::InputOrder),
            other => Err(CoreError::InvalidParameter {
                name:   "tie_break",
                reason: format!("expected \"arrival\" or \"input\", got {other:?}"),
            }),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TieBreak::ArrivalOrder => "arrival",
            TieBreak::InputOrder => "input",
        })
    }
}

/// Parameters shared by all four policies.
///
/// Each policy reads only the fields it needs; the others are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SchedulerParams {
    /// Ticks charged to the clock when the CPU switches processes.
    pub context_switch: u64,
    /// Fixed time slice for round robin.  Must be positive.
    pub rr_quantum:     u64,
    /// Ticks a ready process must wait per one-step priority boost.  Must be
    /// positive.
    pub aging_interval: u64,
    pub sjf_tie_break:  TieBreak,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            context_switch: 0,
            rr_quantum:     2,
            aging_interval: 5,
            sjf_tie_break:  TieBreak::ArrivalOrder,
        }
    }
}

impl SchedulerParams {
    pub fn with_context_switch(mut self, ticks: u64) -> Self {
        self.context_switch = ticks;
        self
    }

    pub fn with_rr_quantum(mut self, ticks: u64) -> Self {
        self.rr_quantum = ticks;
        self
    }

    pub fn with_aging_interval(mut self, ticks: u64) -> Self {
        self.aging_interval = ticks;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.sjf_tie_break = tie_break;
        self
    }

    /// Round robin cannot make progress with a zero slice.
    pub fn require_rr_quantum(&self) -> CoreResult<()> {
        if self.rr_quantum == 0 {
            return Err(CoreError::InvalidParameter {
                name:   "rr_quantum",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Aging divides by the interval.
    pub fn require_aging_interval(&self) -> CoreResult<()> {
        if self.aging_interval == 0 {
            return Err(CoreError::InvalidParameter {
                name:   "aging_interval",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}
