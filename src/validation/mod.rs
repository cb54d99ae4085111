// src/validation/mod.rs

//! Structural checks over stabilizer tables and simulator states.

use crate::core::{DataIndex, MeasureIndex, NORM_TOLERANCE, StabilizerKind, StateVector, SurfaceCodeError};
use crate::stabilizers::StabilizerTable;
use std::collections::HashSet;
use std::fmt;

/// An X-type and a Z-type check whose shared data qubits are met in an order
/// that does not let both stabilizers be measured faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterleavingConflict {
    /// The X-type measurement qubit.
    pub x_measure: MeasureIndex,
    /// The Z-type measurement qubit.
    pub z_measure: MeasureIndex,
    /// Data qubits both checks touch.
    pub shared: Vec<DataIndex>,
}

impl fmt::Display for InterleavingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared: Vec<String> = self.shared.iter().map(|d| format!("D{}", d)).collect();
        write!(f, "M{} (X) / M{} (Z) on {}", self.x_measure, self.z_measure, shared.join(", "))
    }
}

/// Checks that every entry has a legal number of present neighbors.
///
/// Rotated lattices allow 2 (boundary) or 4 (bulk); unrotated lattices allow
/// 3 (boundary) or 4 (bulk).
pub fn check_neighbor_weights(table: &StabilizerTable) -> Result<(), SurfaceCodeError> {
    let allowed: [usize; 2] = if table.params().is_rotated() { [2, 4] } else { [3, 4] };
    for (index, entry) in table.entries().iter().enumerate() {
        if !allowed.contains(&entry.weight()) {
            return Err(SurfaceCodeError::LatticeInconsistency {
                message: format!("M{} has weight {}, expected one of {:?}", index, entry.weight(), allowed),
            });
        }
    }
    Ok(())
}

/// Checks the checkerboard rule: two measurement qubits sharing more than one
/// data neighbor must be of different kinds.
pub fn check_checkerboard(table: &StabilizerTable) -> Result<(), SurfaceCodeError> {
    let entries = table.entries();
    for (i, first) in entries.iter().enumerate() {
        for (j, second) in entries.iter().enumerate().skip(i + 1) {
            if first.kind != second.kind {
                continue;
            }
            let shared = shared_neighbors(first.neighbors, second.neighbors);
            if shared.len() > 1 {
                return Err(SurfaceCodeError::LatticeInconsistency {
                    message: format!("M{} and M{} are both {} and share {} data qubits", i, j, first.kind, shared.len()),
                });
            }
        }
    }
    Ok(())
}

/// Checks that within each sub-step no data qubit is touched twice.
pub fn check_step_disjointness(table: &StabilizerTable) -> Result<(), SurfaceCodeError> {
    for step in 0..4 {
        let mut touched: HashSet<DataIndex> = HashSet::new();
        for (index, entry) in table.entries().iter().enumerate() {
            if let Some(data) = entry.neighbors[step] {
                if !touched.insert(data) {
                    return Err(SurfaceCodeError::LatticeInconsistency {
                        message: format!("D{} is touched twice in sub-step {} (again by M{})", data, step, index),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Lists X/Z check pairs whose schedules interfere.
///
/// For every shared data qubit the X check either acts before the Z check or
/// after it. Both stabilizers are extracted correctly only if the number of
/// shared qubits where X acts first is even; every pair where it is odd is
/// reported.
pub fn find_interleaving_conflicts(table: &StabilizerTable) -> Vec<InterleavingConflict> {
    let entries = table.entries();
    let mut conflicts = Vec::new();

    for (x_index, x_entry) in entries.iter().enumerate().filter(|(_, e)| e.kind == StabilizerKind::X) {
        for (z_index, z_entry) in entries.iter().enumerate().filter(|(_, e)| e.kind == StabilizerKind::Z) {
            let shared = shared_neighbors(x_entry.neighbors, z_entry.neighbors);
            if shared.is_empty() {
                continue;
            }
            let x_first = shared
                .iter()
                .filter(|&&d| match (x_entry.step_of(d), z_entry.step_of(d)) {
                    (Some(sx), Some(sz)) => sx < sz,
                    _ => false,
                })
                .count();
            if x_first % 2 == 1 {
                conflicts.push(InterleavingConflict { x_measure: x_index, z_measure: z_index, shared });
            }
        }
    }

    conflicts
}

/// Runs the structural checks every generated table must pass: neighbor
/// weights, checkerboard and per-step disjointness.
pub fn validate_table(table: &StabilizerTable) -> Result<(), SurfaceCodeError> {
    check_neighbor_weights(table)?;
    check_checkerboard(table)?;
    check_step_disjointness(table)?;
    Ok(())
}

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SurfaceCodeError::SimulationError)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), SurfaceCodeError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SurfaceCodeError::SimulationError {
            message: format!(
                "state vector normalization failed. Sum(|c_i|^2) = {} (deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

fn shared_neighbors(a: [Option<DataIndex>; 4], b: [Option<DataIndex>; 4]) -> Vec<DataIndex> {
    let mut shared: Vec<DataIndex> = a.iter().flatten().filter(|d| b.contains(&Some(**d))).copied().collect();
    shared.sort_unstable();
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{CodeParams, Lattice};
    use crate::stabilizers::StabilizerEntry;
    use num_complex::Complex;

    fn table(params: CodeParams) -> Result<StabilizerTable, SurfaceCodeError> {
        StabilizerTable::build(&Lattice::build(params)?)
    }

    #[test]
    fn rotated_tables_pass_every_check() -> Result<(), SurfaceCodeError> {
        for distance in [3, 5, 7] {
            let t = table(CodeParams::Rotated { distance })?;
            validate_table(&t)?;
            assert!(find_interleaving_conflicts(&t).is_empty(), "d = {}", distance);
        }
        Ok(())
    }

    #[test]
    fn unrotated_tables_pass_structure_but_conflict() -> Result<(), SurfaceCodeError> {
        let t = table(CodeParams::Unrotated { columns: 3, rows: 3 })?;
        validate_table(&t)?;
        // M0 Z[-,1,2,0] against M2 X[1,-,4,2]: Z meets D1 first, X meets D2 last.
        let conflicts = find_interleaving_conflicts(&t);
        assert!(conflicts.contains(&InterleavingConflict { x_measure: 2, z_measure: 0, shared: vec![1, 2] }));
        // M0 against M1 X[0,2,3,-] is consistent: X leads on both D0 and D2.
        assert!(!conflicts.iter().any(|c| c.x_measure == 1 && c.z_measure == 0));
        Ok(())
    }

    #[test]
    fn bad_weight_is_reported() {
        let entries = vec![StabilizerEntry { kind: StabilizerKind::Z, neighbors: [Some(0), Some(1), Some(2), None] }];
        let t = StabilizerTable::from_entries(CodeParams::Rotated { distance: 3 }, 3, entries);
        assert!(matches!(check_neighbor_weights(&t), Err(SurfaceCodeError::LatticeInconsistency { .. })));
    }

    #[test]
    fn same_kind_overlap_breaks_checkerboard() {
        let entries = vec![
            StabilizerEntry { kind: StabilizerKind::X, neighbors: [Some(0), Some(1), None, None] },
            StabilizerEntry { kind: StabilizerKind::X, neighbors: [None, None, Some(0), Some(1)] },
        ];
        let t = StabilizerTable::from_entries(CodeParams::Rotated { distance: 3 }, 2, entries);
        assert!(check_checkerboard(&t).is_err());
        assert!(check_step_disjointness(&t).is_ok());
    }

    #[test]
    fn reused_data_in_one_step_is_reported() {
        let entries = vec![
            StabilizerEntry { kind: StabilizerKind::X, neighbors: [Some(0), Some(1), None, None] },
            StabilizerEntry { kind: StabilizerKind::Z, neighbors: [Some(0), None, Some(1), None] },
        ];
        let t = StabilizerTable::from_entries(CodeParams::Rotated { distance: 3 }, 2, entries);
        assert!(matches!(check_step_disjointness(&t), Err(SurfaceCodeError::LatticeInconsistency { .. })));
    }

    #[test]
    fn normalization_respects_tolerance() {
        let ok = StateVector::new(vec![Complex::new(0.6, 0.0), Complex::new(0.0, 0.8)]);
        assert!(check_normalization(&ok, None).is_ok());
        let bad = StateVector::new(vec![Complex::new(0.6, 0.0), Complex::new(0.6, 0.0)]);
        assert!(check_normalization(&bad, None).is_err());
        assert!(check_normalization(&bad, Some(0.5)).is_ok());
    }
}
