//! Exact planar coordinates for lattice sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lattice site.
///
/// Rotated lattices put measurement qubits on half-integer positions, so the
/// coordinate is stored doubled (`x2 = 2x`, `y2 = 2y`) to keep hashing and
/// ordering exact. `y` grows downward and `x` grows to the right. Ordering is
/// row-major: by `y` first, then by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    y2: i64,
    x2: i64,
}

impl Coordinate {
    /// Creates a coordinate from doubled components.
    pub fn from_doubled(x2: i64, y2: i64) -> Self {
        Self { y2, x2 }
    }

    /// Creates the coordinate `(x, y)` for integer components.
    pub fn integer(x: i64, y: i64) -> Self {
        Self::from_doubled(2 * x, 2 * y)
    }

    /// Creates the coordinate `(x + 0.5, y + 0.5)`.
    pub fn half(x: i64, y: i64) -> Self {
        Self::from_doubled(2 * x + 1, 2 * y + 1)
    }

    /// Doubled horizontal component.
    pub fn x2(&self) -> i64 {
        self.x2
    }

    /// Doubled vertical component.
    pub fn y2(&self) -> i64 {
        self.y2
    }

    /// Horizontal position.
    pub fn x(&self) -> f64 {
        self.x2 as f64 / 2.0
    }

    /// Vertical position (downward).
    pub fn y(&self) -> f64 {
        self.y2 as f64 / 2.0
    }

    /// Returns this coordinate shifted by doubled offsets.
    pub fn offset(&self, dx2: i64, dy2: i64) -> Self {
        Self::from_doubled(self.x2 + dx2, self.y2 + dy2)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
