use std::fmt;

use crate::dims::Pos;

/// How a search keeps cells from being processed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Cells are marked visited when pushed, so each enters the frontier at most once.
    MarkOnPush,
    /// Cells are settled when popped. A shorter distance found later pushes the cell
    /// again and the stale entry is skipped once it comes out.
    SettleOnPop,
}

/// Pending cells of a search, each with its distance from the start.
pub trait Frontier: fmt::Debug {
    fn discipline(&self) -> Discipline;

    fn push(&mut self, pos: Pos, dist: usize);

    fn pop(&mut self) -> Option<(Pos, usize)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Manhattan distance, admissible on a 4-connected grid with unit steps.
pub fn heuristic(pos: Pos, target: Pos) -> usize {
    pos.manhattan(target)
}
