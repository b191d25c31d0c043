use super::frontier::{Discipline, Frontier};
use crate::dims::Pos;

/// Last in, first out, follows one corridor until it dead-ends.
#[derive(Debug, Default)]
pub struct DepthFirst {
    stack: Vec<(Pos, usize)>,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for DepthFirst {
    fn discipline(&self) -> Discipline {
        Discipline::MarkOnPush
    }

    fn push(&mut self, pos: Pos, dist: usize) {
        self.stack.push((pos, dist));
    }

    fn pop(&mut self) -> Option<(Pos, usize)> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_in_first_out() {
        let mut stack = DepthFirst::new();
        stack.push(Pos(0, 0), 0);
        stack.push(Pos(0, 1), 1);
        stack.push(Pos(1, 0), 1);

        assert_eq!(stack.pop(), Some((Pos(1, 0), 1)));
        assert_eq!(stack.pop(), Some((Pos(0, 1), 1)));
        assert_eq!(stack.len(), 1);
    }
}
