use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Way;

/// Position of a single cell, stored as `(row, col)`.
///
/// Ordering is row-major, which is what priority queues fall back on when two
/// entries have the same key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Pos(pub usize, pub usize);

impl Pos {
    pub const ZERO: Pos = Pos(0, 0);

    pub fn row(self) -> usize {
        self.0
    }

    pub fn col(self) -> usize {
        self.1
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Cell one step away in the given direction, or `None` if that would leave
    /// a grid of `rows` x `cols` cells.
    pub fn offset(self, way: Way, rows: usize, cols: usize) -> Option<Pos> {
        let Pos(row, col) = self;
        match way {
            Way::North => row.checked_sub(1).map(|row| Pos(row, col)),
            Way::South => (row + 1 < rows).then(|| Pos(row + 1, col)),
            Way::West => col.checked_sub(1).map(|col| Pos(row, col)),
            Way::East => (col + 1 < cols).then(|| Pos(row, col + 1)),
        }
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }

    pub fn iter_fill(rows: usize, cols: usize) -> impl Iterator<Item = Pos> {
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos(row, col)))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(usize, usize)> for Pos {
    fn from(tuple: (usize, usize)) -> Self {
        Pos(tuple.0, tuple.1)
    }
}

impl From<Pos> for (usize, usize) {
    fn from(val: Pos) -> Self {
        (val.0, val.1)
    }
}
