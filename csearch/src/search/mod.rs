mod a_star;
mod breadth_first;
mod depth_first;
mod dijkstra;
pub mod frontier;
mod greedy_best_first;
pub mod path;

use std::{fmt, iter::FusedIterator, mem, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{array::Array2D, dims::Pos, maze::Maze, Error};
use frontier::{Discipline, Frontier};
pub use path::PrevMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BreadthFirst,
    DepthFirst,
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::GreedyBestFirst => "Greedy",
        }
    }

    /// Whether the returned path is always a shortest one.
    pub fn guarantees_shortest(&self) -> bool {
        matches!(
            self,
            Algorithm::Dijkstra | Algorithm::AStar | Algorithm::BreadthFirst
        )
    }

    /// Starts a new search over `maze`, nothing is computed until the first step.
    pub fn search(self, maze: &Maze) -> Search<'_> {
        Search::new(maze, self)
    }

    fn frontier(self, target: Pos) -> Box<dyn Frontier> {
        match self {
            Algorithm::Dijkstra => Box::new(dijkstra::Dijkstra::new()),
            Algorithm::AStar => Box::new(a_star::AStar::new(target)),
            Algorithm::BreadthFirst => Box::new(breadth_first::BreadthFirst::new()),
            Algorithm::DepthFirst => Box::new(depth_first::DepthFirst::new()),
            Algorithm::GreedyBestFirst => {
                Box::new(greedy_best_first::GreedyBestFirst::new(target))
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '*')
            .collect::<String>()
            .to_lowercase();

        Ok(match key.as_str() {
            "dijkstra" => Algorithm::Dijkstra,
            "a*" | "astar" => Algorithm::AStar,
            "bfs" | "breadthfirst" | "breadthfirstsearch" => Algorithm::BreadthFirst,
            "dfs" | "depthfirst" | "depthfirstsearch" => Algorithm::DepthFirst,
            "greedy" | "gbfs" | "greedybestfirst" | "greedybestfirstsearch" => {
                Algorithm::GreedyBestFirst
            }
            _ => return Err(Error::UnknownAlgorithm(s.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `cell` was settled, `from` is the cell it was reached from (`None` for the start).
    Visited { cell: Pos, from: Option<Pos> },
    /// Final event, the path runs from start to target and is empty if the target
    /// could not be reached.
    Done { path: Vec<Pos>, prev: PrevMap },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Stepping,
    /// Target was settled, only the [`Event::Done`] is left.
    Found,
    Done,
}

/// Everything a search produced, see [`Search::finish`].
#[derive(Debug, Clone)]
pub struct Outcome {
    pub algorithm: Algorithm,
    pub visited: Vec<Pos>,
    pub path: Vec<Pos>,
    pub prev: PrevMap,
}

/// Incremental search from the start to the target of a maze.
///
/// Each call to `next` settles at most one cell and yields it as [`Event::Visited`],
/// the last event is always a single [`Event::Done`]. Dropping the search at any point
/// abandons it, the maze is never modified.
#[derive(Debug)]
pub struct Search<'a> {
    maze: &'a Maze,
    algorithm: Algorithm,
    frontier: Box<dyn Frontier>,
    /// Visited cells for [`Discipline::MarkOnPush`], settled ones for [`Discipline::SettleOnPop`]
    marked: Array2D<bool>,
    dist: Array2D<usize>,
    prev: PrevMap,
    state: State,
    expand_next: Option<Pos>,
    visited: usize,
}

impl<'a> Search<'a> {
    pub fn new(maze: &'a Maze, algorithm: Algorithm) -> Self {
        let (rows, cols) = (maze.rows(), maze.cols());
        let start = maze.start();

        let mut search = Search {
            maze,
            algorithm,
            frontier: algorithm.frontier(maze.target()),
            marked: Array2D::new(false, rows, cols),
            dist: Array2D::new(usize::MAX, rows, cols),
            prev: PrevMap::new(rows, cols),
            state: State::Ready,
            expand_next: None,
            visited: 0,
        };

        search.dist[start] = 0;
        if search.frontier.discipline() == Discipline::MarkOnPush {
            search.marked[start] = true;
        }
        search.frontier.push(start, 0);

        search
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Number of cells settled so far.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Best known distance from the start.
    pub fn distance(&self, pos: Pos) -> Option<usize> {
        self.dist.get(pos).copied().filter(|&d| d != usize::MAX)
    }

    /// Predecessors as they were when the last event was produced.
    ///
    /// Once [`Event::Done`] is yielded, the map is moved into it and this one is empty.
    pub fn prev(&self) -> &PrevMap {
        &self.prev
    }

    /// Abandons the search.
    pub fn cancel(self) {
        log::trace!(
            "{} cancelled after {} visited cells",
            self.algorithm,
            self.visited
        );
    }

    /// Runs the search to the end.
    ///
    /// A search that has already yielded its [`Event::Done`] gives an empty outcome.
    pub fn finish(mut self) -> Outcome {
        let algorithm = self.algorithm;
        let mut visited = Vec::with_capacity(self.maze.grid().cell_count());

        for event in &mut self {
            match event {
                Event::Visited { cell, .. } => visited.push(cell),
                Event::Done { path, prev } => {
                    return Outcome {
                        algorithm,
                        visited,
                        path,
                        prev,
                    }
                }
            }
        }

        Outcome {
            algorithm,
            visited,
            path: Vec::new(),
            prev: mem::take(&mut self.prev),
        }
    }

    fn settle_next(&mut self) -> Option<Pos> {
        while let Some((cell, _)) = self.frontier.pop() {
            match self.frontier.discipline() {
                Discipline::MarkOnPush => return Some(cell),
                Discipline::SettleOnPop => {
                    // stale entry, the cell was already settled with a shorter distance
                    if self.marked[cell] {
                        continue;
                    }
                    self.marked[cell] = true;
                    return Some(cell);
                }
            }
        }

        None
    }

    fn expand(&mut self, cell: Pos) {
        let next_dist = self.dist[cell] + 1;

        for next in self.maze.grid().neighbors(cell) {
            let improves = match self.frontier.discipline() {
                Discipline::MarkOnPush => !self.marked[next],
                Discipline::SettleOnPop => next_dist < self.dist[next],
            };

            if improves {
                if self.frontier.discipline() == Discipline::MarkOnPush {
                    self.marked[next] = true;
                }
                self.dist[next] = next_dist;
                self.prev.link(next, cell);
                self.frontier.push(next, next_dist);
            }
        }
    }

    fn done_event(&mut self) -> Event {
        self.state = State::Done;
        self.expand_next = None;

        let prev = mem::take(&mut self.prev);
        let path = prev.path(self.maze.start(), self.maze.target());

        if path.is_empty() {
            log::warn!(
                "{} could not reach target {} from {}",
                self.algorithm,
                self.maze.target(),
                self.maze.start()
            );
        } else {
            log::debug!(
                "{} found path of {} cells after {} visited cells",
                self.algorithm,
                path.len(),
                self.visited
            );
        }

        Event::Done { path, prev }
    }
}

impl Iterator for Search<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Found => return Some(self.done_event()),
            State::Ready => self.state = State::Stepping,
            State::Stepping => {}
        }

        // neighbours of the previous cell are expanded only now, so that `prev` seen
        // between two events matches the event that was just yielded
        if let Some(cell) = self.expand_next.take() {
            self.expand(cell);
        }

        let Some(cell) = self.settle_next() else {
            return Some(self.done_event());
        };

        self.visited += 1;
        if cell == self.maze.target() {
            self.state = State::Found;
        } else {
            self.expand_next = Some(cell);
        }

        Some(Event::Visited {
            cell,
            from: self.prev.get(cell),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            State::Found => (1, Some(1)),
            State::Ready | State::Stepping => {
                let cells = self.maze.grid().cell_count();
                (1, Some(cells - self.visited + 1))
            }
        }
    }
}

impl FusedIterator for Search<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// 3x3 grid with every interior wall open except the one between (0, 0) and (0, 1).
    fn example_maze() -> Maze {
        let blocked = [Pos(0, 0), Pos(0, 1)];
        let mut grid = Grid::new(3, 3).unwrap();
        for pos in Pos::iter_fill(3, 3) {
            for (way, other) in grid.grid_neighbors(pos) {
                if !(blocked.contains(&pos) && blocked.contains(&other)) {
                    grid.remove_wall(pos, way);
                }
            }
        }

        Maze::from_parts(grid, Pos(0, 0), Pos(2, 2)).unwrap()
    }

    fn visited_cells(events: &[Event]) -> Vec<Pos> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::Visited { cell, .. } => Some(*cell),
                Event::Done { .. } => None,
            })
            .collect()
    }

    fn assert_walkable(maze: &Maze, path: &[Pos]) {
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.target()));
        for step in path.windows(2) {
            assert!(step[0].is_adjacent(step[1]), "{} -> {}", step[0], step[1]);
            assert!(maze.grid().is_open_between(step[0], step[1]));
        }
    }

    #[test]
    fn example_breadth_first() {
        let maze = example_maze();
        assert!(!maze.grid().is_open_between(Pos(0, 0), Pos(0, 1)));
        assert!(maze.grid().is_open_between(Pos(0, 0), Pos(1, 0)));

        let events = Algorithm::BreadthFirst.search(&maze).collect::<Vec<_>>();
        let visited = visited_cells(&events);

        assert_eq!(visited.first(), Some(&Pos(0, 0)));
        assert_eq!(visited.last(), Some(&Pos(2, 2)));

        let Some(Event::Done { path, .. }) = events.last() else {
            panic!("last event is not Done");
        };
        assert_eq!(path.len(), 5);
        assert_walkable(&maze, path);
    }

    #[test]
    fn example_all_algorithms_reach_target() {
        let maze = example_maze();
        for algorithm in Algorithm::ALL {
            let outcome = algorithm.search(&maze).finish();
            assert_walkable(&maze, &outcome.path);
            if algorithm.guarantees_shortest() {
                assert_eq!(outcome.path.len(), 5, "{algorithm}");
            }
        }
    }

    #[test]
    fn shortest_path_equivalence() {
        for seed in 0..30 {
            let maze = Maze::new(11, 17, Some(seed)).unwrap();
            let outcomes = Algorithm::ALL.map(|algorithm| algorithm.search(&maze).finish());
            let shortest = outcomes[0].path.len();
            assert!(shortest > 0);

            for outcome in &outcomes {
                assert_walkable(&maze, &outcome.path);
                if outcome.algorithm.guarantees_shortest() {
                    assert_eq!(outcome.path.len(), shortest, "{} seed {seed}", outcome.algorithm);
                } else {
                    assert!(outcome.path.len() >= shortest);
                }
            }
        }
    }

    #[test]
    fn each_cell_settled_at_most_once() {
        for seed in 0..20 {
            let maze = Maze::new(8, 8, Some(seed)).unwrap();
            for algorithm in Algorithm::ALL {
                let mut visited = algorithm.search(&maze).finish().visited;
                assert!(visited.len() <= maze.grid().cell_count());
                assert_eq!(visited.first(), Some(&maze.start()));
                assert_eq!(visited.last(), Some(&maze.target()));

                let count = visited.len();
                visited.sort();
                visited.dedup();
                assert_eq!(visited.len(), count, "{algorithm} seed {seed}");
            }
        }
    }

    #[test]
    fn single_done_then_nothing() {
        let maze = Maze::new(6, 6, Some(1)).unwrap();
        for algorithm in Algorithm::ALL {
            let mut search = algorithm.search(&maze);
            assert_eq!(search.state(), State::Ready);

            let events = search.by_ref().collect::<Vec<_>>();
            let done_count = events
                .iter()
                .filter(|event| matches!(event, Event::Done { .. }))
                .count();

            assert_eq!(done_count, 1);
            assert!(matches!(events.last(), Some(Event::Done { .. })));
            assert!(search.is_done());
            assert_eq!(search.next(), None);
            assert_eq!(search.next(), None);
        }
    }

    #[test]
    fn visited_events_carry_predecessor() {
        let maze = Maze::new(7, 9, Some(3)).unwrap();
        for algorithm in Algorithm::ALL {
            let mut search = algorithm.search(&maze);
            while let Some(event) = search.next() {
                match event {
                    Event::Visited { cell, from } => {
                        assert_eq!(from, search.prev().get(cell));
                        match from {
                            None => assert_eq!(cell, maze.start()),
                            Some(from) => assert!(maze.grid().is_open_between(cell, from)),
                        }
                    }
                    Event::Done { path, prev } => {
                        assert_eq!(prev.path(maze.start(), maze.target()), path);
                        assert_eq!(prev.path(maze.start(), maze.target()), path);
                    }
                }
            }
        }
    }

    #[test]
    fn expansion_waits_for_next_step() {
        let maze = Maze::new(5, 5, Some(11)).unwrap();
        let mut search = Algorithm::BreadthFirst.search(&maze);

        let first = search.next();
        assert_eq!(
            first,
            Some(Event::Visited {
                cell: maze.start(),
                from: None
            })
        );
        assert_eq!(search.prev().link_count(), 0);

        if maze.start() != maze.target() {
            search.next();
            assert!(search.prev().link_count() >= 1);
        }
    }

    #[test]
    fn start_is_target() {
        let grid = Grid::new(2, 2).unwrap();
        let maze = Maze::from_parts(grid, Pos(0, 1), Pos(0, 1)).unwrap();

        for algorithm in Algorithm::ALL {
            let events = algorithm.search(&maze).collect::<Vec<_>>();
            assert_eq!(events.len(), 2);
            assert_eq!(
                events[0],
                Event::Visited {
                    cell: Pos(0, 1),
                    from: None
                }
            );
            assert!(matches!(&events[1], Event::Done { path, .. } if path == &vec![Pos(0, 1)]));
        }
    }

    #[test]
    fn unreachable_target_gives_empty_path() {
        let grid = Grid::new(3, 3).unwrap();
        let maze = Maze::from_parts(grid, Pos(0, 0), Pos(2, 2)).unwrap();

        for algorithm in Algorithm::ALL {
            let outcome = algorithm.search(&maze).finish();
            assert_eq!(outcome.visited, vec![Pos(0, 0)]);
            assert!(outcome.path.is_empty());
        }
    }

    #[test]
    fn distances_follow_path() {
        let maze = Maze::new(9, 9, Some(8)).unwrap();
        let mut search = Algorithm::Dijkstra.search(&maze);
        let mut path = Vec::new();
        for event in search.by_ref() {
            if let Event::Done { path: found, .. } = event {
                path = found;
            }
        }

        for (i, cell) in path.iter().enumerate() {
            assert_eq!(search.distance(*cell), Some(i));
        }
    }

    #[test]
    fn cancel_then_regenerate() {
        let mut maze = Maze::new(10, 10, Some(21)).unwrap();
        {
            let mut search = Algorithm::AStar.search(&maze);
            search.next();
            search.next();
            search.cancel();
        }

        maze.setup();
        let outcome = Algorithm::AStar.search(&maze).finish();
        assert_eq!(outcome.path.first(), Some(&maze.start()));
        assert_eq!(outcome.path.last(), Some(&maze.target()));
    }

    #[test]
    fn finish_after_done_is_empty() {
        let maze = Maze::new(4, 4, Some(2)).unwrap();
        let mut search = Algorithm::DepthFirst.search(&maze);
        search.by_ref().for_each(drop);

        let outcome = search.finish();
        assert!(outcome.visited.is_empty());
        assert!(outcome.path.is_empty());
    }

    #[test]
    fn size_hint_bounds_events() {
        let maze = Maze::new(6, 7, Some(4)).unwrap();
        for algorithm in Algorithm::ALL {
            let search = algorithm.search(&maze);
            let (_, upper) = search.size_hint();
            let upper = upper.unwrap();
            assert_eq!(upper, 6 * 7 + 1);
            assert!(search.count() <= upper);
        }
    }

    #[test]
    fn parse_algorithm() {
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("Dijkstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!("bfs".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
        assert_eq!("depth-first".parse::<Algorithm>(), Ok(Algorithm::DepthFirst));
        assert_eq!("Greedy Best First".parse::<Algorithm>(), Ok(Algorithm::GreedyBestFirst));
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm("bogo".into()))
        );

        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
    }
}
