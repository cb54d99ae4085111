// src/lattice/mod.rs

//! Lattice construction for rotated and unrotated surface codes.
//!
//! A [`Lattice`] maps every occupied [`Coordinate`] to exactly one [`Qubit`].
//! Indices are handed out by an insertion arena in a fixed traversal order;
//! that order is part of the contract, since every later stage addresses
//! qubits by index only.

mod rotated;
mod unrotated;

use crate::core::{Coordinate, MIN_CODE_SIZE, Qubit, StabilizerKind, SurfaceCodeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters selecting a surface code layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum CodeParams {
    /// Rotated surface code of distance `distance`.
    Rotated {
        /// Code distance, odd and at least 3.
        distance: usize,
    },
    /// Unrotated (planar) surface code on an `columns x rows` grid of sites.
    Unrotated {
        /// Number of site columns `n`, odd and at least 3.
        columns: usize,
        /// Number of site rows `m`, odd and at least 3.
        rows: usize,
    },
}

impl CodeParams {
    /// Checks the odd / minimum-size constraints and that the qubit counts
    /// and doubled coordinates are representable.
    pub fn validate(&self) -> Result<(), SurfaceCodeError> {
        match *self {
            CodeParams::Rotated { distance } => check_size("distance d", distance)?,
            CodeParams::Unrotated { columns, rows } => {
                check_size("column count n", columns)?;
                check_size("row count m", rows)?;
            }
        }
        self.data_qubit_count()?;
        self.measure_qubit_count()?;
        Ok(())
    }

    /// Closed-form number of data qubits.
    ///
    /// # Errors
    /// `InvalidParameters` if the count does not fit in `usize`.
    pub fn data_qubit_count(&self) -> Result<usize, SurfaceCodeError> {
        let count = match *self {
            CodeParams::Rotated { distance } => distance.checked_mul(distance),
            CodeParams::Unrotated { columns, rows } => {
                let dims = UnrotatedDims::new(columns, rows);
                dims.n_dqb
                    .checked_mul(dims.m_dqb)
                    .zip(dims.n_dqb.saturating_sub(1).checked_mul(dims.m_mqb))
                    .and_then(|(a, b)| a.checked_add(b))
            }
        };
        count.ok_or_else(|| self.too_large())
    }

    /// Closed-form number of measurement qubits.
    ///
    /// # Errors
    /// `InvalidParameters` if the count does not fit in `usize`.
    pub fn measure_qubit_count(&self) -> Result<usize, SurfaceCodeError> {
        let count = match *self {
            CodeParams::Rotated { distance } => distance.checked_mul(distance).map(|n| n.saturating_sub(1)),
            CodeParams::Unrotated { columns, rows } => {
                let dims = UnrotatedDims::new(columns, rows);
                dims.n_mqb
                    .checked_mul(dims.m_dqb)
                    .zip(dims.n_mqb.checked_add(1).and_then(|n| n.checked_mul(dims.m_mqb)))
                    .and_then(|(a, b)| a.checked_add(b))
            }
        };
        count.ok_or_else(|| self.too_large())
    }

    fn too_large(&self) -> SurfaceCodeError {
        SurfaceCodeError::InvalidParameters { message: format!("{} is too large to lay out", self) }
    }

    /// Whether this is the rotated variant.
    pub fn is_rotated(&self) -> bool {
        matches!(self, CodeParams::Rotated { .. })
    }
}

impl fmt::Display for CodeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeParams::Rotated { distance } => write!(f, "rotated d={}", distance),
            CodeParams::Unrotated { columns, rows } => write!(f, "unrotated {}x{}", columns, rows),
        }
    }
}

fn check_size(what: &str, value: usize) -> Result<(), SurfaceCodeError> {
    if value < MIN_CODE_SIZE || value % 2 == 0 {
        return Err(SurfaceCodeError::InvalidParameters {
            message: format!("{} must be odd and at least {}, got {}", what, MIN_CODE_SIZE, value),
        });
    }
    coordinate_extent(what, value).map(|_| ())
}

/// `value` as a signed extent whose doubled boundary coordinates still fit in `i64`.
fn coordinate_extent(what: &str, value: usize) -> Result<i64, SurfaceCodeError> {
    i64::try_from(value)
        .ok()
        .filter(|v| v.checked_mul(2).and_then(|v2| v2.checked_add(2)).is_some())
        .ok_or_else(|| SurfaceCodeError::InvalidParameters {
            message: format!("{} {} exceeds the coordinate range", what, value),
        })
}

/// Row and column counts of the unrotated lattice split by qubit class.
///
/// `n_dqb`/`n_mqb` count data/measurement qubits on the first row, `m_dqb`/`m_mqb`
/// on the first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrotatedDims {
    /// Data qubits on the first row.
    pub n_dqb: usize,
    /// Data qubits on the first column.
    pub m_dqb: usize,
    /// Measurement qubits on the first row.
    pub n_mqb: usize,
    /// Measurement qubits on the first column.
    pub m_mqb: usize,
}

impl UnrotatedDims {
    /// Derives the counts for odd `columns` and `rows`.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            n_dqb: columns / 2 + columns % 2,
            m_dqb: rows / 2 + rows % 2,
            n_mqb: columns.saturating_sub(1) / 2,
            m_mqb: rows.saturating_sub(1) / 2,
        }
    }
}

/// Position and kind of one measurement qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasureSite {
    /// Where the qubit sits.
    pub coordinate: Coordinate,
    /// The check it performs.
    pub kind: StabilizerKind,
}

/// The complete coordinate-to-qubit mapping of one code patch.
///
/// Built once from [`CodeParams`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    params: CodeParams,
    sites: BTreeMap<Coordinate, Qubit>,
    data: Vec<Coordinate>,
    measure: Vec<MeasureSite>,
}

impl Lattice {
    /// Builds the lattice for `params`.
    ///
    /// # Errors
    /// * `InvalidParameters` if the size constraints are violated.
    /// * `LatticeInconsistency` if the construction produced a collision or
    ///   counts that disagree with the closed-form formulas.
    pub fn build(params: CodeParams) -> Result<Self, SurfaceCodeError> {
        params.validate()?;
        let mut arena = SiteArena::new();
        match params {
            CodeParams::Rotated { distance } => rotated::place_sites(distance, &mut arena)?,
            CodeParams::Unrotated { columns, rows } => unrotated::place_sites(columns, rows, &mut arena)?,
        }
        arena.finish(params)
    }

    /// Shorthand for a rotated code of distance `distance`.
    pub fn rotated(distance: usize) -> Result<Self, SurfaceCodeError> {
        Self::build(CodeParams::Rotated { distance })
    }

    /// Shorthand for an unrotated code on `columns x rows` sites.
    pub fn unrotated(columns: usize, rows: usize) -> Result<Self, SurfaceCodeError> {
        Self::build(CodeParams::Unrotated { columns, rows })
    }

    /// Parameters the lattice was built from.
    pub fn params(&self) -> CodeParams {
        self.params
    }

    /// The qubit at `coordinate`, if any.
    pub fn qubit_at(&self, coordinate: &Coordinate) -> Option<Qubit> {
        self.sites.get(coordinate).copied()
    }

    /// Data index of the data qubit at `coordinate`, if any.
    pub fn data_index_at(&self, coordinate: &Coordinate) -> Option<usize> {
        match self.sites.get(coordinate) {
            Some(Qubit::Data { index }) => Some(*index),
            _ => None,
        }
    }

    /// All occupied sites in row-major coordinate order.
    pub fn sites(&self) -> impl Iterator<Item = (&Coordinate, &Qubit)> {
        self.sites.iter()
    }

    /// Data qubit coordinates indexed by data index.
    pub fn data_sites(&self) -> &[Coordinate] {
        &self.data
    }

    /// Measurement qubit sites indexed by measurement index.
    pub fn measure_sites(&self) -> &[MeasureSite] {
        &self.measure
    }

    /// Number of data qubits.
    pub fn num_data_qubits(&self) -> usize {
        self.data.len()
    }

    /// Number of measurement qubits.
    pub fn num_measure_qubits(&self) -> usize {
        self.measure.len()
    }

    /// Number of measurement qubits of the given kind.
    pub fn count_kind(&self, kind: StabilizerKind) -> usize {
        self.measure.iter().filter(|site| site.kind == kind).count()
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lattice[{}: {} data, {} measurement ({} X, {} Z)]",
            self.params,
            self.num_data_qubits(),
            self.num_measure_qubits(),
            self.count_kind(StabilizerKind::X),
            self.count_kind(StabilizerKind::Z)
        )?;
        for (coordinate, qubit) in &self.sites {
            writeln!(f, "  {}: {}", coordinate, qubit)?;
        }
        Ok(())
    }
}

/// Hands out dense indices as qubits are placed.
///
/// Each class has its own counter; the next index is always the number of
/// qubits of that class placed so far.
#[derive(Debug, Default)]
pub(crate) struct SiteArena {
    sites: BTreeMap<Coordinate, Qubit>,
    data: Vec<Coordinate>,
    measure: Vec<MeasureSite>,
}

impl SiteArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Places a measurement qubit and returns its index.
    pub(crate) fn place_measure(&mut self, coordinate: Coordinate, kind: StabilizerKind) -> Result<usize, SurfaceCodeError> {
        let index = self.measure.len();
        self.occupy(coordinate, Qubit::Measurement { index, kind })?;
        self.measure.push(MeasureSite { coordinate, kind });
        Ok(index)
    }

    /// Places a data qubit and returns its index.
    pub(crate) fn place_data(&mut self, coordinate: Coordinate) -> Result<usize, SurfaceCodeError> {
        let index = self.data.len();
        self.occupy(coordinate, Qubit::Data { index })?;
        self.data.push(coordinate);
        Ok(index)
    }

    fn occupy(&mut self, coordinate: Coordinate, qubit: Qubit) -> Result<(), SurfaceCodeError> {
        if let Some(existing) = self.sites.get(&coordinate) {
            return Err(SurfaceCodeError::LatticeInconsistency {
                message: format!("coordinate {} already holds {}, cannot place {}", coordinate, existing, qubit),
            });
        }
        self.sites.insert(coordinate, qubit);
        Ok(())
    }

    /// Checks the class cardinalities and seals the arena into a lattice.
    pub(crate) fn finish(self, params: CodeParams) -> Result<Lattice, SurfaceCodeError> {
        let expected_data = params.data_qubit_count()?;
        let expected_measure = params.measure_qubit_count()?;
        if self.data.len() != expected_data || self.measure.len() != expected_measure {
            return Err(SurfaceCodeError::LatticeInconsistency {
                message: format!(
                    "{} placed {} data / {} measurement qubits, expected {} / {}",
                    params,
                    self.data.len(),
                    self.measure.len(),
                    expected_data,
                    expected_measure
                ),
            });
        }
        Ok(Lattice { params, sites: self.sites, data: self.data, measure: self.measure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lattice: &Lattice) -> Vec<StabilizerKind> {
        lattice.measure_sites().iter().map(|site| site.kind).collect()
    }

    #[test]
    fn rotated_counts_follow_distance() -> Result<(), SurfaceCodeError> {
        for d in [3usize, 5, 7, 9] {
            let lattice = Lattice::rotated(d)?;
            assert_eq!(lattice.num_data_qubits(), d * d);
            assert_eq!(lattice.num_measure_qubits(), d * d - 1);
            assert_eq!(lattice.count_kind(StabilizerKind::X), (d * d - 1) / 2);
            assert_eq!(lattice.count_kind(StabilizerKind::Z), (d * d - 1) / 2);
        }
        Ok(())
    }

    #[test]
    fn rotated_d3_layout_is_pinned() -> Result<(), SurfaceCodeError> {
        use StabilizerKind::{X, Z};
        let lattice = Lattice::rotated(3)?;
        let expected = [
            (Coordinate::from_doubled(1, -1), X),
            (Coordinate::from_doubled(1, 1), Z),
            (Coordinate::from_doubled(3, 1), X),
            (Coordinate::from_doubled(5, 1), Z),
            (Coordinate::from_doubled(-1, 3), Z),
            (Coordinate::from_doubled(1, 3), X),
            (Coordinate::from_doubled(3, 3), Z),
            (Coordinate::from_doubled(3, 5), X),
        ];
        let actual: Vec<_> = lattice.measure_sites().iter().map(|s| (s.coordinate, s.kind)).collect();
        assert_eq!(actual, expected);
        assert_eq!(kinds(&lattice), vec![X, Z, X, Z, Z, X, Z, X]);
        Ok(())
    }

    #[test]
    fn rotated_data_is_row_major() -> Result<(), SurfaceCodeError> {
        let lattice = Lattice::rotated(5)?;
        for (index, coordinate) in lattice.data_sites().iter().enumerate() {
            assert_eq!(*coordinate, Coordinate::integer((index % 5) as i64, (index / 5) as i64));
            assert_eq!(lattice.data_index_at(coordinate), Some(index));
        }
        Ok(())
    }

    #[test]
    fn unrotated_3x3_matches_closed_form() -> Result<(), SurfaceCodeError> {
        let dims = UnrotatedDims::new(3, 3);
        assert_eq!(dims, UnrotatedDims { n_dqb: 2, m_dqb: 2, n_mqb: 1, m_mqb: 1 });
        let lattice = Lattice::unrotated(3, 3)?;
        assert_eq!(lattice.num_data_qubits(), 5);
        assert_eq!(lattice.num_measure_qubits(), 4);
        use StabilizerKind::{X, Z};
        assert_eq!(kinds(&lattice), vec![Z, X, X, Z]);
        Ok(())
    }

    #[test]
    fn unrotated_rectangular_counts() -> Result<(), SurfaceCodeError> {
        for (n, m) in [(3usize, 5usize), (5, 3), (7, 5), (9, 9)] {
            let params = CodeParams::Unrotated { columns: n, rows: m };
            let lattice = Lattice::build(params)?;
            assert_eq!(lattice.num_data_qubits(), params.data_qubit_count()?);
            assert_eq!(lattice.num_measure_qubits(), params.measure_qubit_count()?);
            // every site of the n x m grid is occupied exactly once
            assert_eq!(lattice.sites().count(), n * m);
        }
        Ok(())
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        for d in [0usize, 1, 2, 4, 6] {
            assert!(matches!(Lattice::rotated(d), Err(SurfaceCodeError::InvalidParameters { .. })), "d={}", d);
        }
        assert!(matches!(Lattice::unrotated(3, 4), Err(SurfaceCodeError::InvalidParameters { .. })));
        assert!(matches!(Lattice::unrotated(1, 3), Err(SurfaceCodeError::InvalidParameters { .. })));
    }

    #[test]
    fn oversized_parameters_are_errors_not_panics() {
        let huge = [
            CodeParams::Rotated { distance: usize::MAX },
            CodeParams::Unrotated { columns: usize::MAX, rows: 3 },
            CodeParams::Unrotated { columns: 3, rows: usize::MAX },
        ];
        for params in huge {
            assert!(matches!(params.validate(), Err(SurfaceCodeError::InvalidParameters { .. })), "{}", params);
            assert!(matches!(Lattice::build(params), Err(SurfaceCodeError::InvalidParameters { .. })), "{}", params);
        }
        assert!(matches!(Lattice::rotated(usize::MAX), Err(SurfaceCodeError::InvalidParameters { .. })));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn rotated_count_overflow_is_rejected() {
        // fits the coordinate range, but d * d overflows
        let params = CodeParams::Rotated { distance: (1usize << 32) + 1 };
        assert!(matches!(params.data_qubit_count(), Err(SurfaceCodeError::InvalidParameters { .. })));
        assert!(matches!(params.measure_qubit_count(), Err(SurfaceCodeError::InvalidParameters { .. })));
        assert!(matches!(Lattice::build(params), Err(SurfaceCodeError::InvalidParameters { .. })));
    }

    #[test]
    fn arena_rejects_double_placement() {
        let mut arena = SiteArena::new();
        let coordinate = Coordinate::integer(0, 0);
        assert_eq!(arena.place_data(coordinate), Ok(0));
        assert!(matches!(
            arena.place_measure(coordinate, StabilizerKind::Z),
            Err(SurfaceCodeError::LatticeInconsistency { .. })
        ));
    }

    #[test]
    fn arena_rejects_wrong_counts() {
        let mut arena = SiteArena::new();
        arena.place_data(Coordinate::integer(0, 0)).unwrap();
        let err = arena.finish(CodeParams::Rotated { distance: 3 }).unwrap_err();
        assert!(matches!(err, SurfaceCodeError::LatticeInconsistency { .. }));
    }

    #[test]
    fn construction_is_deterministic() -> Result<(), SurfaceCodeError> {
        assert_eq!(Lattice::rotated(7)?, Lattice::rotated(7)?);
        assert_eq!(Lattice::unrotated(5, 7)?, Lattice::unrotated(5, 7)?);
        Ok(())
    }
}
