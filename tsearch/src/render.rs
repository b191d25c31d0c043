use std::fmt;

use csearch::{array::Array2D, dims::Pos, grid::Grid, Maze};

/// What a glyph on the canvas stands for, the viewer picks colors by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Wall,
    Empty,
    Visited,
    Path,
    Start,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub mark: Mark,
}

impl Glyph {
    const EMPTY: Glyph = Glyph {
        ch: ' ',
        mark: Mark::Empty,
    };

    fn wall(ch: char) -> Self {
        Glyph {
            ch,
            mark: Mark::Wall,
        }
    }
}

pub const VISITED_CHAR: char = '·';
pub const PATH_CHAR: char = '•';
pub const START_CHAR: char = 'S';
pub const TARGET_CHAR: char = 'T';

pub fn round_line_corner(left: bool, top: bool, right: bool, bottom: bool) -> char {
    match (left, top, right, bottom) {
        (false, false, false, false) => ' ',
        (false, false, false, true) => '╷',
        (false, false, true, false) => '╶',
        (false, false, true, true) => '╭',
        (false, true, false, false) => '╵',
        (false, true, false, true) => '│',
        (false, true, true, false) => '╰',
        (false, true, true, true) => '├',
        (true, false, false, false) => '╴',
        (true, false, false, true) => '╮',
        (true, false, true, false) => '─',
        (true, false, true, true) => '┬',
        (true, true, false, false) => '╯',
        (true, true, false, true) => '┤',
        (true, true, true, false) => '┴',
        (true, true, true, true) => '┼',
    }
}

/// Position of the cell's glyph on the canvas.
pub fn from_maze_to_real(pos: Pos) -> Pos {
    Pos(pos.0 * 2 + 1, pos.1 * 2 + 1)
}

/// Glyph between two adjacent cells, the wall slot they share.
fn between_real(a: Pos, b: Pos) -> Pos {
    let (a, b) = (from_maze_to_real(a), from_maze_to_real(b));
    Pos((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}

/// Maze drawn as `(rows * 2 + 1) x (cols * 2 + 1)` glyphs: cells at odd coordinates,
/// walls and junctions in between.
#[derive(Debug, Clone)]
pub struct Canvas {
    glyphs: Array2D<Glyph>,
    start: Pos,
    target: Pos,
}

impl Canvas {
    pub fn new(maze: &Maze) -> Self {
        let grid = maze.grid();
        let mut glyphs = Array2D::new(Glyph::EMPTY, grid.rows() * 2 + 1, grid.cols() * 2 + 1);

        Self::draw_walls(grid, &mut glyphs);

        let mut canvas = Canvas {
            glyphs,
            start: maze.start(),
            target: maze.target(),
        };
        canvas.draw_endpoints();
        canvas
    }

    fn draw_walls(grid: &Grid, glyphs: &mut Array2D<Glyph>) {
        let horizontal = grid.horizontal_walls();
        let vertical = grid.vertical_walls();

        for y in 0..=grid.rows() {
            for x in 0..=grid.cols() {
                let left = x > 0 && horizontal[Pos(y, x - 1)];
                let right = x < grid.cols() && horizontal[Pos(y, x)];
                let top = y > 0 && vertical[Pos(y - 1, x)];
                let bottom = y < grid.rows() && vertical[Pos(y, x)];

                let ch = round_line_corner(left, top, right, bottom);
                glyphs[Pos(y * 2, x * 2)] = Glyph::wall(ch);
            }
        }

        for pos in horizontal.iter_pos().filter(|&pos| horizontal[pos]) {
            glyphs[Pos(pos.0 * 2, pos.1 * 2 + 1)] = Glyph::wall('─');
        }

        for pos in vertical.iter_pos().filter(|&pos| vertical[pos]) {
            glyphs[Pos(pos.0 * 2 + 1, pos.1 * 2)] = Glyph::wall('│');
        }
    }

    fn draw_endpoints(&mut self) {
        self.glyphs[from_maze_to_real(self.start)] = Glyph {
            ch: START_CHAR,
            mark: Mark::Start,
        };
        self.glyphs[from_maze_to_real(self.target)] = Glyph {
            ch: TARGET_CHAR,
            mark: Mark::Target,
        };
    }

    /// `(rows, cols)` of glyphs.
    pub fn size(&self) -> (usize, usize) {
        self.glyphs.size()
    }

    pub fn get(&self, pos: Pos) -> Option<Glyph> {
        self.glyphs.get(pos).copied()
    }

    pub fn glyphs(&self) -> &Array2D<Glyph> {
        &self.glyphs
    }

    fn put(&mut self, pos: Pos, ch: char, mark: Mark) {
        let glyph = &mut self.glyphs[pos];
        if !matches!(glyph.mark, Mark::Start | Mark::Target) {
            *glyph = Glyph { ch, mark };
        }
    }

    /// Marks a settled cell and the passage it was reached through.
    ///
    /// Returns the canvas positions that changed.
    pub fn mark_visited(&mut self, cell: Pos, from: Option<Pos>) -> Vec<Pos> {
        let mut changed = vec![from_maze_to_real(cell)];
        self.put(changed[0], VISITED_CHAR, Mark::Visited);

        if let Some(from) = from {
            let link = between_real(cell, from);
            self.put(link, VISITED_CHAR, Mark::Visited);
            changed.push(link);
        }

        changed
    }

    pub fn mark_path(&mut self, path: &[Pos]) {
        for (i, &cell) in path.iter().enumerate() {
            self.put(from_maze_to_real(cell), PATH_CHAR, Mark::Path);
            if let Some(&next) = path.get(i + 1) {
                self.put(between_real(cell, next), PATH_CHAR, Mark::Path);
            }
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let (rows, _) = self.size();
        (0..rows).filter_map(move |row| {
            self.glyphs
                .row(row)
                .map(|glyphs| glyphs.iter().map(|g| g.ch).collect())
        })
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
