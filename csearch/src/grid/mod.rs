pub mod way;
pub use way::Way;

use smallvec::SmallVec;

use crate::{array::Array2D, dims::Pos, Error};

/// Rectangular grid of cells and the walls between them.
///
/// Walls are kept in two arrays, so every edge is stored exactly once:
/// - `horizontal` is `(rows + 1) x cols`, entry `(y, x)` separates cell `(y - 1, x)` from
///   `(y, x)`, rows `0` and `rows` being the outer boundary
/// - `vertical` is `rows x (cols + 1)`, entry `(y, x)` separates cell `(y, x - 1)` from
///   `(y, x)`, columns `0` and `cols` being the outer boundary
///
/// `true` means the wall is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    horizontal: Array2D<bool>,
    vertical: Array2D<bool>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Creates a grid with every wall closed.
    pub fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize { rows, cols });
        }

        Ok(Grid {
            horizontal: Array2D::new(true, rows + 1, cols),
            vertical: Array2D::new(true, rows, cols + 1),
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    pub fn check_bounds(&self, pos: Pos) -> Result<(), Error> {
        if self.is_in_bounds(pos) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn horizontal_walls(&self) -> &Array2D<bool> {
        &self.horizontal
    }

    pub fn vertical_walls(&self) -> &Array2D<bool> {
        &self.vertical
    }

    fn wall_slot(&self, pos: Pos, way: Way) -> (bool, Pos) {
        assert!(
            self.is_in_bounds(pos),
            "Cell {pos} is out of bounds of {}x{} grid",
            self.rows,
            self.cols
        );

        let Pos(y, x) = pos;
        match way {
            Way::North => (true, Pos(y, x)),
            Way::South => (true, Pos(y + 1, x)),
            Way::West => (false, Pos(y, x)),
            Way::East => (false, Pos(y, x + 1)),
        }
    }

    /// Whether the wall on the `way` side of `pos` is closed. Boundary walls count too.
    pub fn has_wall(&self, pos: Pos, way: Way) -> bool {
        match self.wall_slot(pos, way) {
            (true, slot) => self.horizontal[slot],
            (false, slot) => self.vertical[slot],
        }
    }

    /// Opens the wall on the `way` side of `pos`.
    ///
    /// This clears the wall shared with the neighbour, or the outer boundary if `pos`
    /// lies on it.
    pub(crate) fn remove_wall(&mut self, pos: Pos, way: Way) {
        match self.wall_slot(pos, way) {
            (true, slot) => self.horizontal[slot] = false,
            (false, slot) => self.vertical[slot] = false,
        }
    }

    pub(crate) fn close_all(&mut self) {
        self.horizontal.fill(true);
        self.vertical.fill(true);
    }

    /// Direction from `a` to `b` if both are in the grid and adjacent.
    pub fn which_way_between(&self, a: Pos, b: Pos) -> Option<Way> {
        if self.is_in_bounds(a) && self.is_in_bounds(b) {
            Way::between(a, b)
        } else {
            None
        }
    }

    /// Whether `a` and `b` are adjacent and connected through an open wall.
    pub fn is_open_between(&self, a: Pos, b: Pos) -> bool {
        self.which_way_between(a, b)
            .is_some_and(|way| !self.has_wall(a, way))
    }

    /// Cells reachable from `pos` in one step, in north, south, west, east order.
    pub fn neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        Way::in_order()
            .into_iter()
            .filter(|&way| !self.has_wall(pos, way))
            .filter_map(|way| pos.offset(way, self.rows, self.cols))
            .collect()
    }

    /// Cells adjacent to `pos` regardless of walls, in north, south, west, east order.
    pub fn grid_neighbors(&self, pos: Pos) -> SmallVec<[(Way, Pos); 4]> {
        Way::in_order()
            .into_iter()
            .filter_map(|way| pos.offset(way, self.rows, self.cols).map(|n| (way, n)))
            .collect()
    }

    /// Number of open walls between two cells, boundary walls are not counted.
    pub fn open_edge_count(&self) -> usize {
        let horizontal = (1..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| Pos(y, x)))
            .filter(|&slot| !self.horizontal[slot])
            .count();
        let vertical = (0..self.rows)
            .flat_map(|y| (1..self.cols).map(move |x| Pos(y, x)))
            .filter(|&slot| !self.vertical[slot])
            .count();

        horizontal + vertical
    }

    /// Every open wall on the outer boundary, as the cell it belongs to and its side.
    pub fn boundary_openings(&self) -> Vec<(Pos, Way)> {
        let mut openings = Vec::new();

        for pos in Pos::iter_fill(self.rows, self.cols) {
            for way in Way::in_order() {
                if pos.offset(way, self.rows, self.cols).is_none() && !self.has_wall(pos, way) {
                    openings.push((pos, way));
                }
            }
        }

        openings
    }

    pub fn is_connected(&self) -> bool {
        let mut seen = Array2D::new(false, self.rows, self.cols);
        let mut stack = vec![Pos::ZERO];
        seen[Pos::ZERO] = true;
        let mut count = 1;

        while let Some(pos) = stack.pop() {
            for next in self.neighbors(pos) {
                if !seen[next] {
                    seen[next] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }

        count == self.cell_count()
    }

    /// A connected graph with `n - 1` edges is a spanning tree.
    pub fn is_perfect(&self) -> bool {
        self.open_edge_count() == self.cell_count() - 1 && self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for pos in Pos::iter_fill(rows, cols) {
            for (way, _) in grid.grid_neighbors(pos) {
                grid.remove_wall(pos, way);
            }
        }
        grid
    }

    #[test]
    fn invalid_size() {
        assert_eq!(
            Grid::new(0, 3),
            Err(Error::InvalidSize { rows: 0, cols: 3 })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn wall_arrays_have_boundary_rows() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.horizontal_walls().size(), (4, 4));
        assert_eq!(grid.vertical_walls().size(), (3, 5));
        assert!(grid.horizontal_walls().iter().all(|&w| w));
        assert!(grid.vertical_walls().iter().all(|&w| w));
    }

    #[test]
    fn closed_grid_has_no_neighbors() {
        let grid = Grid::new(3, 3).unwrap();
        for pos in Pos::iter_fill(3, 3) {
            assert!(grid.neighbors(pos).is_empty());
        }
        assert_eq!(grid.open_edge_count(), 0);
        assert!(!grid.is_connected());
    }

    #[test]
    fn walls_are_shared() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall(Pos(0, 0), Way::East);
        assert!(!grid.has_wall(Pos(0, 1), Way::West));
        grid.remove_wall(Pos(1, 1), Way::North);
        assert!(!grid.has_wall(Pos(0, 1), Way::South));

        for pos in Pos::iter_fill(2, 2) {
            for (way, other) in grid.grid_neighbors(pos) {
                assert_eq!(grid.has_wall(pos, way), grid.has_wall(other, way.reverse()));
            }
        }

        assert!(grid.is_open_between(Pos(0, 0), Pos(0, 1)));
        assert!(grid.is_open_between(Pos(0, 1), Pos(1, 1)));
        assert!(!grid.is_open_between(Pos(0, 0), Pos(1, 0)));
        assert!(!grid.is_open_between(Pos(0, 0), Pos(1, 1)));
    }

    #[test]
    fn neighbors_order_is_fixed() {
        let grid = open_grid(3, 3);
        assert_eq!(
            grid.neighbors(Pos(1, 1)).as_slice(),
            &[Pos(0, 1), Pos(2, 1), Pos(1, 0), Pos(1, 2)]
        );
        assert_eq!(grid.neighbors(Pos(0, 0)).as_slice(), &[Pos(1, 0), Pos(0, 1)]);
    }

    #[test]
    fn open_boundary_is_not_a_neighbor() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall(Pos(0, 0), Way::North);
        assert!(grid.neighbors(Pos(0, 0)).is_empty());
        assert_eq!(grid.boundary_openings(), vec![(Pos(0, 0), Way::North)]);
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    fn open_grid_has_cycles() {
        let grid = open_grid(3, 3);
        assert!(grid.is_connected());
        assert_eq!(grid.open_edge_count(), 12);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn close_all_resets() {
        let mut grid = open_grid(2, 3);
        grid.remove_wall(Pos(0, 0), Way::West);
        grid.close_all();
        assert_eq!(grid, Grid::new(2, 3).unwrap());
    }

    #[test]
    fn way_between_needs_both_in_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.which_way_between(Pos(0, 0), Pos(1, 0)), Some(Way::South));
        assert_eq!(grid.which_way_between(Pos(1, 1), Pos(1, 0)), Some(Way::West));
        assert_eq!(grid.which_way_between(Pos(1, 1), Pos(2, 1)), None);
        assert_eq!(grid.which_way_between(Pos(0, 0), Pos(1, 1)), None);
        assert!(!grid.is_open_between(Pos(1, 1), Pos(1, 2)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_query_panics() {
        let grid = Grid::new(2, 2).unwrap();
        grid.neighbors(Pos(2, 0));
    }
}
