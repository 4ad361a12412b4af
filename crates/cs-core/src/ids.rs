//! Strongly typed process identifier.
//!
//! A `ProcessId` is the position of a process in the workload it came from.
//! Names are what results are keyed by; the id is what the schedulers use
//! internally, and it doubles as the "original input order" tie-break key.

use std::fmt;

/// Index of a process in its `Workload`.  Max ~4.3 billion processes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessId({})", self.0)
    }
}

impl From<ProcessId> for usize {
    #[inline(always)]
    fn from(id: ProcessId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for ProcessId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<ProcessId, Self::Error> {
        u32::try_from(n).map(ProcessId)
    }
}
