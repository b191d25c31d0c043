use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{
    dims::Pos,
    generator::{self, DepthFirstSearch, MazeGenerator, Random},
    grid::Grid,
    Error,
};

/// Generated maze together with its start and target cells.
///
/// Searches borrow the maze immutably, so it cannot be regenerated while any of them
/// is still alive.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    start: Pos,
    target: Pos,
    rng: Random,
    seed: u64,
    generation: usize,
}

impl Maze {
    /// Creates and generates a new maze.
    ///
    /// Without a seed a random one is chosen, it can be read back with [`Maze::seed`].
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self, Error> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        let mut maze = Maze {
            grid: Grid::new(rows, cols)?,
            start: Pos::ZERO,
            target: Pos::ZERO,
            rng: Random::seed_from_u64(seed),
            seed,
            generation: 0,
        };

        maze.setup();
        Ok(maze)
    }

    /// Wraps an already carved grid, used for hand made scenarios.
    pub fn from_parts(grid: Grid, start: Pos, target: Pos) -> Result<Self, Error> {
        grid.check_bounds(start)?;
        grid.check_bounds(target)?;

        Ok(Maze {
            grid,
            start,
            target,
            rng: Random::seed_from_u64(0),
            seed: 0,
            generation: 0,
        })
    }

    /// Regenerates the maze with the default generator.
    pub fn setup(&mut self) {
        self.setup_with(&DepthFirstSearch);
    }

    /// Closes every wall, carves a new maze and picks new start and target.
    pub fn setup_with(&mut self, generator: &dyn MazeGenerator) {
        self.grid.close_all();
        generator.carve(&mut self.grid, &mut self.rng);

        self.target = generator::pick_target(&self.grid, &mut self.rng);
        self.start = generator::pick_start(&self.grid, &mut self.rng);
        generator::open_entrance(&mut self.grid, self.start);

        self.generation += 1;

        log::debug!(
            "Generated {}x{} maze #{} using {}, start {}, target {}",
            self.grid.rows(),
            self.grid.cols(),
            self.generation,
            generator.name(),
            self.start,
            self.target
        );
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn target(&self) -> Pos {
        self.target
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed setups.
    pub fn generation(&self) -> usize {
        self.generation
    }
}
