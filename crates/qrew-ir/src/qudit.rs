//! Qudit identifiers and circuit coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qudit wire within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuditId(pub usize);

impl QuditId {
    /// The wire index as a plain `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for QuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QuditId {
    fn from(id: usize) -> Self {
        QuditId(id)
    }
}

/// A (cycle, qudit) coordinate addressing at most one operation.
///
/// Each wire holds at most one operation per cycle, so any wire an
/// operation touches identifies it within its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CircuitPoint {
    /// The cycle index.
    pub cycle: usize,
    /// A wire touched by the addressed operation.
    pub qudit: QuditId,
}

impl CircuitPoint {
    /// Create a new circuit point.
    pub fn new(cycle: usize, qudit: impl Into<QuditId>) -> Self {
        Self {
            cycle,
            qudit: qudit.into(),
        }
    }
}

impl fmt::Display for CircuitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cycle {}, {})", self.cycle, self.qudit)
    }
}

impl From<(usize, usize)> for CircuitPoint {
    fn from((cycle, qudit): (usize, usize)) -> Self {
        CircuitPoint::new(cycle, qudit)
    }
}
