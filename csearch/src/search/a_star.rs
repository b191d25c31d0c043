use std::{cmp::Reverse, collections::BinaryHeap};

use super::frontier::{heuristic, Discipline, Frontier};
use crate::dims::Pos;

/// Min-heap keyed by the estimated total length `dist + heuristic`, ties prefer the
/// cell closer to the start.
#[derive(Debug)]
pub struct AStar {
    heap: BinaryHeap<Reverse<(usize, usize, Pos)>>,
    target: Pos,
}

impl AStar {
    pub fn new(target: Pos) -> Self {
        Self {
            heap: BinaryHeap::new(),
            target,
        }
    }
}

impl Frontier for AStar {
    fn discipline(&self) -> Discipline {
        Discipline::SettleOnPop
    }

    fn push(&mut self, pos: Pos, dist: usize) {
        let estimate = dist + heuristic(pos, self.target);
        self.heap.push(Reverse((estimate, dist, pos)));
    }

    fn pop(&mut self) -> Option<(Pos, usize)> {
        self.heap.pop().map(|Reverse((_, dist, pos))| (pos, dist))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
