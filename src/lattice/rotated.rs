// src/lattice/rotated.rs

//! Rotated surface code layout.
//!
//! Measurement qubits sit on half-integer coordinates between the `d x d`
//! data qubits. Rows run from `y = -0.5` (top boundary) to `y = d - 0.5`
//! (bottom boundary):
//!
//! ```text
//!        X
//!     o-----o-----o
//!     |  Z  |  X  |  Z
//!     o-----o-----o
//!  Z  |  X  |  Z  |
//!     o-----o-----o
//!              X
//! ```

use super::SiteArena;
use crate::core::{Coordinate, StabilizerKind, SurfaceCodeError};

pub(super) fn place_sites(d: usize, arena: &mut SiteArena) -> Result<(), SurfaceCodeError> {
    let d = super::coordinate_extent("distance d", d)?;

    // Top boundary: weight-2 X checks on every other column.
    for i in (0..d - 1).step_by(2) {
        arena.place_measure(Coordinate::half(i, -1), StabilizerKind::X)?;
    }

    for i in 0..d - 1 {
        if i % 2 == 0 {
            for j in 0..d - 1 {
                let kind = if j % 2 == 0 { StabilizerKind::Z } else { StabilizerKind::X };
                arena.place_measure(Coordinate::half(j, i), kind)?;
            }
            // right boundary
            arena.place_measure(Coordinate::half(d - 1, i), StabilizerKind::Z)?;
        } else {
            // left boundary
            arena.place_measure(Coordinate::half(-1, i), StabilizerKind::Z)?;
            for j in 0..d - 1 {
                let kind = if j % 2 == 0 { StabilizerKind::X } else { StabilizerKind::Z };
                arena.place_measure(Coordinate::half(j, i), kind)?;
            }
        }
    }

    // Bottom boundary, offset by one column from the top.
    for i in (1..d - 1).step_by(2) {
        arena.place_measure(Coordinate::half(i, d - 1), StabilizerKind::X)?;
    }

    for y in 0..d {
        for x in 0..d {
            arena.place_data(Coordinate::integer(x, y))?;
        }
    }
    Ok(())
}
