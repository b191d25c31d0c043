use std::{cmp::Reverse, collections::BinaryHeap};

use super::frontier::{Discipline, Frontier};
use crate::dims::Pos;

/// Min-heap keyed by the distance from the start.
#[derive(Debug, Default)]
pub struct Dijkstra {
    heap: BinaryHeap<Reverse<(usize, Pos)>>,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Dijkstra {
    fn discipline(&self) -> Discipline {
        Discipline::SettleOnPop
    }

    fn push(&mut self, pos: Pos, dist: usize) {
        self.heap.push(Reverse((dist, pos)));
    }

    fn pop(&mut self) -> Option<(Pos, usize)> {
        self.heap.pop().map(|Reverse((dist, pos))| (pos, dist))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
