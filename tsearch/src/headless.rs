use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use csearch::{search::Outcome, Algorithm, Maze};

use crate::render::Canvas;

/// Result of one search run without the viewer.
#[derive(Debug, Clone)]
pub struct Summary {
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl Summary {
    pub fn visited(&self) -> usize {
        self.outcome.visited.len()
    }

    /// Number of steps on the path, `None` if the target was not reached.
    pub fn path_len(&self) -> Option<usize> {
        self.outcome.path.len().checked_sub(1)
    }
}

pub fn solve(maze: &Maze, algorithm: Algorithm) -> Summary {
    let start = Instant::now();
    let outcome = algorithm.search(maze).finish();
    let elapsed = start.elapsed();

    log::debug!(
        "{} visited {} cells in {:?}",
        algorithm,
        outcome.visited.len(),
        elapsed
    );

    Summary { outcome, elapsed }
}

/// Draws the maze with the visited cells and path of `summary` over it.
pub fn trace(maze: &Maze, summary: &Summary) -> Canvas {
    let mut canvas = Canvas::new(maze);
    for &cell in &summary.outcome.visited {
        canvas.mark_visited(cell, summary.outcome.prev.get(cell));
    }
    canvas.mark_path(&summary.outcome.path);
    canvas
}

/// Runs every algorithm in `algorithms` to completion and writes a summary table.
pub fn run(
    maze: &Maze,
    algorithms: &[Algorithm],
    print: bool,
    out: &mut impl Write,
) -> io::Result<Vec<Summary>> {
    writeln!(
        out,
        "Maze {}x{}, seed {}, start {}, target {}",
        maze.rows(),
        maze.cols(),
        maze.seed(),
        maze.start(),
        maze.target()
    )?;

    if print {
        writeln!(out, "{}", Canvas::new(maze))?;
    }

    let summaries: Vec<_> = algorithms.iter().map(|&alg| solve(maze, alg)).collect();

    if print {
        for summary in &summaries {
            writeln!(out, "{}:", summary.outcome.algorithm)?;
            writeln!(out, "{}", trace(maze, summary))?;
        }
    }

    writeln!(
        out,
        "{:<10} {:>8} {:>8} {:>12}",
        "algorithm", "visited", "path", "time"
    )?;
    for summary in &summaries {
        let path = summary
            .path_len()
            .map_or_else(|| "-".to_string(), |len| len.to_string());
        writeln!(
            out,
            "{:<10} {:>8} {:>8} {:>12}",
            summary.outcome.algorithm.name(),
            summary.visited(),
            path,
            format!("{:.3?}", summary.elapsed)
        )?;
    }

    Ok(summaries)
}
