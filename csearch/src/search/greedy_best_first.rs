use std::{cmp::Reverse, collections::BinaryHeap};

use super::frontier::{heuristic, Discipline, Frontier};
use crate::dims::Pos;

/// Min-heap keyed only by the heuristic, the distance travelled so far is ignored.
#[derive(Debug)]
pub struct GreedyBestFirst {
    heap: BinaryHeap<Reverse<(usize, Pos, usize)>>,
    target: Pos,
}

impl GreedyBestFirst {
    pub fn new(target: Pos) -> Self {
        Self {
            heap: BinaryHeap::new(),
            target,
        }
    }
}

impl Frontier for GreedyBestFirst {
    fn discipline(&self) -> Discipline {
        Discipline::MarkOnPush
    }

    fn push(&mut self, pos: Pos, dist: usize) {
        self.heap.push(Reverse((heuristic(pos, self.target), pos, dist)));
    }

    fn pop(&mut self) -> Option<(Pos, usize)> {
        self.heap.pop().map(|Reverse((_, pos, dist))| (pos, dist))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
