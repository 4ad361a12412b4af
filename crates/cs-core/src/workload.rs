//! The ordered set of processes a simulation runs over.

use std::collections::HashSet;

use crate::{CoreError, CoreResult, Process, ProcessId, ProcessSpec};

/// An ordered collection of process specs.
///
/// Input order matters: it is the final tie-break key for the priority
/// policy and the default candidate scan order for shortest-remaining-time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Workload {
    processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self { processes }
    }

    pub fn push(&mut self, spec: ProcessSpec) {
        self.processes.push(spec);
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessSpec> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[ProcessSpec] {
        &self.processes
    }

    pub fn get(&self, id: ProcessId) -> Option<&ProcessSpec> {
        self.processes.get(id.index())
    }

    pub fn find(&self, name: &str) -> CoreResult<&ProcessSpec> {
        self.processes
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CoreError::UnknownProcess(name.to_owned()))
    }

    /// Fresh per-run process state, one entry per spec, indexed by `ProcessId`.
    pub fn instantiate(&self) -> Vec<Process> {
        self.processes
            .iter()
            .enumerate()
            .map(|(i, spec)| Process::from_spec(ProcessId(i as u32), spec))
            .collect()
    }

    /// Reject input the policies are not defined for.
    ///
    /// `require_quantum` should be set when the workload will be run under
    /// the adaptive hybrid policy.
    pub fn validate(&self, require_quantum: bool) -> CoreResult<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.processes.len());
        for spec in &self.processes {
            if !seen.insert(spec.name.as_str()) {
                return Err(CoreError::DuplicateName(spec.name.clone()));
            }
            if spec.burst == 0 {
                return Err(CoreError::ZeroBurst(spec.name.clone()));
            }
            if require_quantum && spec.quantum == 0 {
                return Err(CoreError::ZeroQuantum(spec.name.clone()));
            }
        }
        Ok(())
    }

    /// `true` if every process carries a positive quantum.
    pub fn has_quanta(&self) -> bool {
        !self.processes.is_empty() && self.processes.iter().all(|p| p.quantum > 0)
    }
}

impl FromIterator<ProcessSpec> for Workload {
    fn from_iter<I: IntoIterator<Item = ProcessSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
