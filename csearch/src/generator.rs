use std::fmt;

use rand::{seq::SliceRandom as _, Rng as _};
use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Pos,
    grid::{Grid, Way},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

pub trait MazeGenerator: fmt::Debug {
    /// Carves passages into `grid`, which is expected to have every wall closed.
    fn carve(&self, grid: &mut Grid, rng: &mut Random);

    fn name(&self) -> &'static str;
}

/// Randomized depth-first carving, produces a perfect maze.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

impl MazeGenerator for DepthFirstSearch {
    fn carve(&self, grid: &mut Grid, rng: &mut Random) {
        let (rows, cols) = (grid.rows(), grid.cols());

        let mut visited = Array2D::new(false, rows, cols);
        let mut stack = Vec::with_capacity(grid.cell_count());

        let current = Pos(rng.gen_range(0..rows), rng.gen_range(0..cols));
        visited[current] = true;
        stack.push(current);

        while let Some(&current) = stack.last() {
            // Adjacency by coordinates only, walls are what we are removing
            let unvisited_neighbors = grid
                .grid_neighbors(current)
                .into_iter()
                .filter(|(_, cell)| !visited[*cell])
                .collect::<SmallVec<[_; 4]>>();

            match unvisited_neighbors.choose(rng) {
                Some(&(way, next)) => {
                    grid.remove_wall(current, way);
                    visited[next] = true;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "depth first search"
    }
}

/// Any cell of the grid, uniformly.
pub fn pick_target(grid: &Grid, rng: &mut Random) -> Pos {
    Pos(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()))
}

/// Candidate start cells: the top and bottom rows in full, then the left and right
/// columns without their corners.
///
/// With a single row the top and bottom rows are the same row and appear twice.
pub fn border_cells(rows: usize, cols: usize) -> Vec<Pos> {
    let inner_rows = 1..rows.saturating_sub(1);

    (0..cols)
        .map(|col| Pos(0, col))
        .chain((0..cols).map(|col| Pos(rows - 1, col)))
        .chain(inner_rows.clone().map(|row| Pos(row, 0)))
        .chain(inner_rows.map(|row| Pos(row, cols - 1)))
        .collect()
}

pub fn pick_start(grid: &Grid, rng: &mut Random) -> Pos {
    let cells = border_cells(grid.rows(), grid.cols());
    cells[rng.gen_range(0..cells.len())]
}

/// Opens the single boundary wall of `start`.
///
/// Conditions are checked top, bottom, left, right and only the first one that matches
/// opens a wall, so corners always open towards the top or bottom.
pub fn open_entrance(grid: &mut Grid, start: Pos) -> Option<Way> {
    let Pos(row, col) = start;

    let way = if row == 0 {
        Way::North
    } else if row == grid.rows() - 1 {
        Way::South
    } else if col == 0 {
        Way::West
    } else if col == grid.cols() - 1 {
        Way::East
    } else {
        log::warn!("Start {start} is not on the border, no entrance opened");
        return None;
    };

    grid.remove_wall(start, way);
    Some(way)
}
