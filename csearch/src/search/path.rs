use crate::{array::Array2D, dims::Pos};

/// Predecessor of every reached cell, the cell it was first (or best) reached from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrevMap(Array2D<Option<Pos>>);

impl PrevMap {
    pub fn new(rows: usize, cols: usize) -> Self {
        PrevMap(Array2D::new(None, rows, cols))
    }

    pub fn get(&self, pos: Pos) -> Option<Pos> {
        self.0.get(pos).copied().flatten()
    }

    pub(crate) fn link(&mut self, pos: Pos, from: Pos) {
        self.0[pos] = Some(from);
    }

    /// Every `(cell, predecessor)` pair, in row-major order.
    pub fn links(&self) -> impl Iterator<Item = (Pos, Pos)> + '_ {
        self.0
            .iter_pos()
            .filter_map(|pos| self.0[pos].map(|from| (pos, from)))
    }

    pub fn link_count(&self) -> usize {
        self.0.iter().filter(|link| link.is_some()).count()
    }

    /// Follows the links back from `target` to `start`.
    ///
    /// Returns the cells from `start` to `target` inclusive, or an empty path when the
    /// chain breaks before reaching `start`.
    pub fn path(&self, start: Pos, target: Pos) -> Vec<Pos> {
        if start == target {
            return vec![start];
        }

        let mut path = vec![target];
        let mut current = target;
        while current != start {
            let Some(from) = self.get(current) else {
                return Vec::new();
            };

            // a cycle in the links, cannot come from a search
            if path.len() > self.0.len() {
                return Vec::new();
            }

            path.push(from);
            current = from;
        }

        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_forward_path() {
        let mut prev = PrevMap::new(2, 3);
        prev.link(Pos(0, 1), Pos(0, 0));
        prev.link(Pos(1, 1), Pos(0, 1));
        prev.link(Pos(1, 2), Pos(1, 1));

        let path = prev.path(Pos(0, 0), Pos(1, 2));
        assert_eq!(path, vec![Pos(0, 0), Pos(0, 1), Pos(1, 1), Pos(1, 2)]);
        assert_eq!(prev.path(Pos(0, 0), Pos(1, 2)), path);
        assert_eq!(prev.link_count(), 3);
    }

    #[test]
    fn missing_link_gives_empty_path() {
        let mut prev = PrevMap::new(2, 2);
        prev.link(Pos(1, 1), Pos(1, 0));
        assert!(prev.path(Pos(0, 0), Pos(1, 1)).is_empty());
        assert!(prev.path(Pos(0, 0), Pos(0, 1)).is_empty());
    }

    #[test]
    fn start_is_target() {
        let prev = PrevMap::new(2, 2);
        assert_eq!(prev.path(Pos(1, 0), Pos(1, 0)), vec![Pos(1, 0)]);
    }

    #[test]
    fn cyclic_links_terminate() {
        let mut prev = PrevMap::new(1, 3);
        prev.link(Pos(0, 1), Pos(0, 2));
        prev.link(Pos(0, 2), Pos(0, 1));
        assert!(prev.path(Pos(0, 0), Pos(0, 2)).is_empty());
    }

    #[test]
    fn links_are_row_major() {
        let mut prev = PrevMap::new(2, 2);
        prev.link(Pos(1, 0), Pos(0, 0));
        prev.link(Pos(0, 1), Pos(0, 0));
        assert_eq!(
            prev.links().collect::<Vec<_>>(),
            vec![(Pos(0, 1), Pos(0, 0)), (Pos(1, 0), Pos(0, 0))]
        );
    }
}
