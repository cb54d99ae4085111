// src/lattice/unrotated.rs

//! Unrotated (planar) surface code layout on an `n x m` grid of sites.
//!
//! Sites with `x + y` even hold data qubits. The remaining sites hold
//! measurement qubits: Z checks on even rows (the first and last rows are the
//! smooth boundaries), X checks on odd rows.

use super::SiteArena;
use crate::core::{Coordinate, StabilizerKind, SurfaceCodeError};

pub(super) fn place_sites(columns: usize, rows: usize, arena: &mut SiteArena) -> Result<(), SurfaceCodeError> {
    let n = super::coordinate_extent("column count n", columns)?;
    let m = super::coordinate_extent("row count m", rows)?;

    for y in 0..m {
        let kind = if y % 2 == 0 { StabilizerKind::Z } else { StabilizerKind::X };
        for x in (0..n).filter(|x| (x + y) % 2 == 1) {
            arena.place_measure(Coordinate::integer(x, y), kind)?;
        }
    }

    for y in 0..m {
        for x in (0..n).filter(|x| (x + y) % 2 == 0) {
            arena.place_data(Coordinate::integer(x, y))?;
        }
    }
    Ok(())
}
