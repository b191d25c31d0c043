use std::collections::VecDeque;

use super::frontier::{Discipline, Frontier};
use crate::dims::Pos;

/// First in, first out, explores the maze in layers of equal distance.
#[derive(Debug, Default)]
pub struct BreadthFirst {
    queue: VecDeque<(Pos, usize)>,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for BreadthFirst {
    fn discipline(&self) -> Discipline {
        Discipline::MarkOnPush
    }

    fn push(&mut self, pos: Pos, dist: usize) {
        self.queue.push_back((pos, dist));
    }

    fn pop(&mut self) -> Option<(Pos, usize)> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
