//! Plain data row types written by output backends.

/// Waiting and turnaround time of one process under one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResultRow<'a> {
    pub policy:          &'a str,
    pub name:            &'a str,
    pub waiting_time:    u64,
    pub turnaround_time: u64,
}

/// Kind of a [`TraceRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Dispatch,
    ContextSwitch,
    PriorityChange,
    QuantumChange,
    Complete,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Dispatch => "dispatch",
            TraceKind::ContextSwitch => "context_switch",
            TraceKind::PriorityChange => "priority",
            TraceKind::QuantumChange => "quantum",
            TraceKind::Complete => "complete",
        }
    }
}

/// One timeline event.
///
/// `process` is empty for context switches.  `value` holds the switch cost,
/// the new priority, the new quantum or the turnaround time, depending on
/// `event`; it is `None` for dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRow<'a> {
    pub policy:  &'a str,
    pub tick:    u64,
    pub event:   TraceKind,
    pub process: &'a str,
    pub value:   Option<i64>,
}
