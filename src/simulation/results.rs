// src/simulation/results.rs
use crate::core::StateVector;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome tallies of a multi-shot execution.
///
/// Keys hold one bitstring per classical register in declaration order,
/// separated by a single space. Character `k` of a register's bitstring is
/// bit `k` of that register.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    counts: BTreeMap<String, usize>,
    shots: usize,
    /// Amplitudes after the last shot, if the backend exposes them.
    final_state: Option<StateVector>,
}

impl ExecutionResult {
    pub(crate) fn new() -> Self {
        Self { counts: BTreeMap::new(), shots: 0, final_state: None }
    }

    /// Builds a result from externally obtained counts (e.g. a remote backend).
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        let shots = counts.values().sum();
        Self { counts, shots, final_state: None }
    }

    pub(crate) fn record_shot(&mut self, key: String) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.shots += 1;
    }

    pub(crate) fn set_final_state(&mut self, state: StateVector) {
        self.final_state = Some(state);
    }

    /// All observed outcome keys with their counts.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Count of a single outcome key.
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// State vector left by the last shot, if the backend kept one.
    pub fn final_state(&self) -> Option<&StateVector> {
        self.final_state.as_ref()
    }

    /// The outcome observed most often. Ties go to the lexicographically smallest key.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&String, usize)>, (key, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((key, count)),
            })
            .map(|(key, count)| (key.as_str(), count))
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Results ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        } else {
            for (key, count) in &self.counts {
                writeln!(f, "  {}: {}", key, count)?;
            }
        }
        Ok(())
    }
}
