// src/stabilizers/mod.rs

//! Per-measurement-qubit stabilizer entries.
//!
//! Each entry lists the four neighbor slots of one measurement qubit in the
//! order the generator visits them: slot `j` is touched in sub-step `j` of
//! every round. Absent slots mark boundary qubits and are skipped.
//!
//! There is exactly one ordering convention per lattice variant, kept in the
//! constants below.

use crate::core::{Coordinate, DataIndex, StabilizerKind, SurfaceCodeError};
use crate::lattice::{CodeParams, Lattice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagonal neighbor positions around a rotated-lattice measurement qubit.
///
/// ```text
///   a---b
///   | M |
///   d---c
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// `a`
    UpperLeft,
    /// `b`
    UpperRight,
    /// `c`
    LowerRight,
    /// `d`
    LowerLeft,
}

impl Corner {
    /// Doubled coordinate offset from the measurement qubit.
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Corner::UpperLeft => (-1, -1),
            Corner::UpperRight => (1, -1),
            Corner::LowerRight => (1, 1),
            Corner::LowerLeft => (-1, 1),
        }
    }

    /// Whether the corner lies above the measurement qubit.
    pub fn is_upper(&self) -> bool {
        matches!(self, Corner::UpperLeft | Corner::UpperRight)
    }
}

/// Axis-aligned neighbor positions around an unrotated-lattice measurement qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `-y`
    North,
    /// `+x`
    East,
    /// `+y`
    South,
    /// `-x`
    West,
}

impl Direction {
    /// Doubled coordinate offset from the measurement qubit (one grid step).
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::North => (0, -2),
            Direction::East => (2, 0),
            Direction::South => (0, 2),
            Direction::West => (-2, 0),
        }
    }

    /// Whether the neighbor lies north or west of the measurement qubit.
    pub fn is_leading(&self) -> bool {
        matches!(self, Direction::North | Direction::West)
    }
}

/// Z-type visiting order on the rotated lattice: `a, b, d, c`.
pub const ROTATED_Z_ORDER: [Corner; 4] = [Corner::UpperLeft, Corner::UpperRight, Corner::LowerLeft, Corner::LowerRight];

/// X-type visiting order on the rotated lattice: `a, d, b, c`.
pub const ROTATED_X_ORDER: [Corner; 4] = [Corner::UpperLeft, Corner::LowerLeft, Corner::UpperRight, Corner::LowerRight];

/// Visiting order on the unrotated lattice, shared by both kinds.
pub const UNROTATED_ORDER: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

/// The rotated corner order used for `kind`.
pub fn rotated_order(kind: StabilizerKind) -> [Corner; 4] {
    match kind {
        StabilizerKind::X => ROTATED_X_ORDER,
        StabilizerKind::Z => ROTATED_Z_ORDER,
    }
}

/// Doubled offsets of the four slots for a measurement qubit of `kind`.
pub fn slot_offsets(params: &CodeParams, kind: StabilizerKind) -> [(i64, i64); 4] {
    if params.is_rotated() {
        rotated_order(kind).map(|corner| corner.offset())
    } else {
        UNROTATED_ORDER.map(|direction| direction.offset())
    }
}

/// Whether slot `slot` of a `kind` qubit points up/left of it.
///
/// Renderers draw those edges data-to-measurement and the others
/// measurement-to-data.
pub fn slot_is_leading(params: &CodeParams, kind: StabilizerKind, slot: usize) -> bool {
    if params.is_rotated() {
        rotated_order(kind)[slot % 4].is_upper()
    } else {
        UNROTATED_ORDER[slot % 4].is_leading()
    }
}

/// Type and ordered data neighbors of one measurement qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StabilizerEntry {
    /// The check this qubit performs.
    pub kind: StabilizerKind,
    /// Neighbor data qubits in visiting order; `None` for an absent boundary neighbor.
    pub neighbors: [Option<DataIndex>; 4],
}

impl StabilizerEntry {
    /// Present neighbors together with their slot.
    pub fn present(&self) -> impl Iterator<Item = (usize, DataIndex)> + '_ {
        self.neighbors.iter().enumerate().filter_map(|(slot, n)| n.map(|d| (slot, d)))
    }

    /// Number of present neighbors.
    pub fn weight(&self) -> usize {
        self.neighbors.iter().flatten().count()
    }

    /// Sub-step in which `data` is visited, if it is a neighbor.
    pub fn step_of(&self, data: DataIndex) -> Option<usize> {
        self.neighbors.iter().position(|n| *n == Some(data))
    }
}

impl fmt::Display for StabilizerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.kind)?;
        for (slot, neighbor) in self.neighbors.iter().enumerate() {
            if slot > 0 {
                write!(f, ", ")?;
            }
            match neighbor {
                Some(d) => write!(f, "D{}", d)?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

/// One [`StabilizerEntry`] per measurement qubit, indexed by measurement index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizerTable {
    params: CodeParams,
    num_data: usize,
    entries: Vec<StabilizerEntry>,
}

impl StabilizerTable {
    /// Derives the table from a lattice.
    ///
    /// # Errors
    /// Returns `LatticeInconsistency` if a measurement qubit ends up with no
    /// neighbor or a neighbor outside the data range.
    pub fn build(lattice: &Lattice) -> Result<Self, SurfaceCodeError> {
        let params = lattice.params();
        let num_data = lattice.num_data_qubits();
        let mut entries = Vec::with_capacity(lattice.num_measure_qubits());

        for (index, site) in lattice.measure_sites().iter().enumerate() {
            let neighbors = slot_offsets(&params, site.kind).map(|(dx2, dy2)| {
                let coordinate: Coordinate = site.coordinate.offset(dx2, dy2);
                lattice.data_index_at(&coordinate)
            });
            let entry = StabilizerEntry { kind: site.kind, neighbors };
            check_entry(index, &entry, num_data)?;
            entries.push(entry);
        }

        Ok(Self { params, num_data, entries })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(params: CodeParams, num_data: usize, entries: Vec<StabilizerEntry>) -> Self {
        Self { params, num_data, entries }
    }

    /// Parameters of the underlying lattice.
    pub fn params(&self) -> CodeParams {
        self.params
    }

    /// All entries, indexed by measurement index.
    pub fn entries(&self) -> &[StabilizerEntry] {
        &self.entries
    }

    /// Entry of measurement qubit `index`.
    pub fn entry(&self, index: usize) -> Option<&StabilizerEntry> {
        self.entries.get(index)
    }

    /// Number of measurement qubits.
    pub fn num_measure_qubits(&self) -> usize {
        self.entries.len()
    }

    /// Number of data qubits.
    pub fn num_data_qubits(&self) -> usize {
        self.num_data
    }

    /// Number of measurement qubits of `kind`.
    pub fn count_kind(&self, kind: StabilizerKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Total number of present neighbors across all entries; equals the
    /// number of two-qubit operations per round.
    pub fn total_weight(&self) -> usize {
        self.entries.iter().map(StabilizerEntry::weight).sum()
    }
}

impl fmt::Display for StabilizerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StabilizerTable[{}: {} entries]", self.params, self.entries.len())?;
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(f, "  M{}: {}", index, entry)?;
        }
        Ok(())
    }
}

// Every entry needs at least one neighbor, all inside the data range.
fn check_entry(index: usize, entry: &StabilizerEntry, num_data: usize) -> Result<(), SurfaceCodeError> {
    if entry.weight() == 0 {
        return Err(SurfaceCodeError::LatticeInconsistency {
            message: format!("measurement qubit M{} has no data neighbors", index),
        });
    }
    if let Some((_, d)) = entry.present().find(|(_, d)| *d >= num_data) {
        return Err(SurfaceCodeError::LatticeInconsistency {
            message: format!("measurement qubit M{} references D{} but only {} data qubits exist", index, d, num_data),
        });
    }
    Ok(())
}
