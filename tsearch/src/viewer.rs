use std::{
    io::{self, stdout, Stdout, Write},
    panic, thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use csearch::{dims::Pos, Algorithm, Event, Maze};
use pausable_clock::PausableClock;
use unicode_width::UnicodeWidthStr;

use crate::{
    logging,
    render::{Canvas, Mark},
};

const HELP: &str =
    "[1] Dijkstra  [2] A*  [3] BFS  [4] DFS  [5] Greedy   [r] regenerate  [space] pause  [q] quit";

// first terminal row of the maze, row 0 is the help line
const MAZE_TOP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run(Algorithm),
    Regenerate,
    TogglePause,
    Redraw,
    Quit,
}

impl Command {
    fn from_event(event: &TermEvent) -> Option<Self> {
        match event {
            TermEvent::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Command::Quit)
                }
                KeyCode::Char(c @ '1'..='5') => {
                    let index = *c as usize - '1' as usize;
                    Some(Command::Run(Algorithm::ALL[index]))
                }
                KeyCode::Char('r') => Some(Command::Regenerate),
                KeyCode::Char(' ') => Some(Command::TogglePause),
                KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                _ => None,
            },
            TermEvent::Resize(..) => Some(Command::Redraw),
            _ => None,
        }
    }
}

/// Waits for the next command, forever if `timeout` is `None`.
fn poll_command(timeout: Option<Duration>) -> io::Result<Option<Command>> {
    match timeout {
        Some(timeout) if !event::poll(timeout)? => Ok(None),
        _ => Ok(Command::from_event(&event::read()?)),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ViewerSettings {
    pub step_delay: Duration,
    pub color: bool,
}

/// Colors of one algorithm's overlay.
#[derive(Debug, Clone, Copy)]
struct Theme {
    visited: Color,
    path: Color,
    color: bool,
}

impl Theme {
    fn new(algorithm: Option<Algorithm>, color: bool) -> Self {
        let (visited, path) = match algorithm {
            Some(Algorithm::Dijkstra) => (Color::Green, Color::DarkGreen),
            Some(Algorithm::AStar) => (Color::Blue, Color::DarkBlue),
            Some(Algorithm::BreadthFirst) => (Color::Red, Color::DarkRed),
            Some(Algorithm::DepthFirst) => (Color::Magenta, Color::DarkMagenta),
            Some(Algorithm::GreedyBestFirst) => (Color::Yellow, Color::DarkYellow),
            None => (Color::Grey, Color::White),
        };
        Theme {
            visited,
            path,
            color,
        }
    }

    fn color(&self, mark: Mark) -> Color {
        if !self.color {
            return Color::Reset;
        }

        match mark {
            Mark::Wall => Color::White,
            Mark::Empty => Color::Reset,
            Mark::Visited => self.visited,
            Mark::Path => self.path,
            Mark::Start => Color::Cyan,
            Mark::Target => Color::Red,
        }
    }
}

/// Raw mode and alternate screen for as long as it lives.
struct Terminal;

impl Terminal {
    fn enter() -> io::Result<Self> {
        Self::register_panic_hook();

        terminal::enable_raw_mode()?;
        execute!(stdout(), Hide, EnterAlternateScreen)?;

        Ok(Terminal)
    }

    fn register_panic_hook() {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = execute!(stdout(), LeaveAlternateScreen, Show);
            let _ = terminal::disable_raw_mode();

            prev(info)
        }));
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if !thread::panicking() {
            let _ = panic::take_hook();
        }

        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Interactive view of a maze and the searches run over it.
pub struct Viewer {
    maze: Maze,
    settings: ViewerSettings,
    canvas: Canvas,
    theme: Theme,
    status: String,
    out: Stdout,
}

impl Viewer {
    pub fn new(maze: Maze, settings: ViewerSettings) -> Self {
        let canvas = Canvas::new(&maze);
        Viewer {
            maze,
            settings,
            canvas,
            theme: Theme::new(None, settings.color),
            status: String::new(),
            out: stdout(),
        }
    }

    /// Runs until the user quits, `first` is animated right away.
    pub fn run(mut self, first: Option<Algorithm>) -> io::Result<()> {
        let _terminal = Terminal::enter()?;

        self.status = self.idle_status();
        self.draw_all()?;

        let mut next = first.map(Command::Run);
        loop {
            let command = match next.take() {
                Some(command) => command,
                None => match poll_command(Some(Duration::from_millis(250)))? {
                    Some(command) => command,
                    None => {
                        // let decayed log messages disappear
                        self.draw_logs()?;
                        continue;
                    }
                },
            };

            match command {
                Command::Quit => return Ok(()),
                Command::Regenerate => self.regenerate()?,
                Command::Redraw => self.draw_all()?,
                Command::TogglePause => {}
                Command::Run(algorithm) => next = self.animate(algorithm)?,
            }
        }
    }

    fn idle_status(&self) -> String {
        format!(
            "{}x{} maze #{}, seed {}",
            self.maze.rows(),
            self.maze.cols(),
            self.maze.generation(),
            self.maze.seed()
        )
    }

    fn regenerate(&mut self) -> io::Result<()> {
        self.maze.setup();
        self.canvas = Canvas::new(&self.maze);
        self.theme = Theme::new(None, self.settings.color);
        self.status = self.idle_status();
        self.draw_all()
    }

    /// Animates one search, returns the command that interrupted it, if any.
    fn animate(&mut self, algorithm: Algorithm) -> io::Result<Option<Command>> {
        log::info!("Running {}", algorithm);

        self.canvas = Canvas::new(&self.maze);
        self.theme = Theme::new(Some(algorithm), self.settings.color);
        self.status = status_line(algorithm, Duration::ZERO, 0, None, false);
        self.draw_all()?;

        let clock = PausableClock::default();
        let started = clock.now();
        let mut paused = false;
        let mut search = algorithm.search(&self.maze);

        loop {
            let timeout = (!paused).then_some(self.settings.step_delay);
            match poll_command(timeout)? {
                Some(Command::TogglePause) => {
                    paused = !paused;
                    if paused {
                        clock.pause();
                    } else {
                        clock.resume();
                    }
                }
                Some(Command::Redraw) => {
                    Self::draw_screen(&mut self.out, &self.canvas, self.theme, &self.status)?
                }
                Some(command) => {
                    search.cancel();
                    return Ok(Some(command));
                }
                None => {}
            }

            let elapsed = started.elapsed(&clock);
            if paused {
                self.status = status_line(algorithm, elapsed, search.visited_count(), None, true);
                Self::draw_status(&mut self.out, &self.canvas, &self.status)?;
                continue;
            }

            match search.next() {
                Some(Event::Visited { cell, from }) => {
                    for pos in self.canvas.mark_visited(cell, from) {
                        Self::draw_glyph(&mut self.out, &self.canvas, self.theme, pos)?;
                    }
                    self.status =
                        status_line(algorithm, elapsed, search.visited_count(), None, false);
                    Self::draw_status(&mut self.out, &self.canvas, &self.status)?;
                }
                Some(Event::Done { path, .. }) => {
                    self.canvas.mark_path(&path);
                    let path_len = path.len().checked_sub(1);
                    self.status =
                        status_line(algorithm, elapsed, search.visited_count(), path_len, false);
                    break;
                }
                None => break,
            }
        }

        drop(search);
        self.draw_all()?;
        Ok(None)
    }

    fn draw_all(&mut self) -> io::Result<()> {
        Self::draw_screen(&mut self.out, &self.canvas, self.theme, &self.status)?;
        self.draw_logs()
    }

    fn draw_screen(out: &mut Stdout, canvas: &Canvas, theme: Theme, status: &str) -> io::Result<()> {
        queue!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0), Print(HELP))?;

        let glyphs = canvas.glyphs();
        for row in 0..glyphs.rows() {
            queue!(out, MoveTo(0, MAZE_TOP + row as u16))?;

            let mut current = None;
            for glyph in glyphs.row(row).unwrap_or_default() {
                let color = theme.color(glyph.mark);
                if current != Some(color) {
                    queue!(out, SetForegroundColor(color))?;
                    current = Some(color);
                }
                queue!(out, Print(glyph.ch))?;
            }
        }
        queue!(out, ResetColor)?;

        Self::draw_status(out, canvas, status)
    }

    fn draw_glyph(out: &mut Stdout, canvas: &Canvas, theme: Theme, pos: Pos) -> io::Result<()> {
        if let Some(glyph) = canvas.get(pos) {
            queue!(
                out,
                MoveTo(pos.col() as u16, MAZE_TOP + pos.row() as u16),
                SetForegroundColor(theme.color(glyph.mark)),
                Print(glyph.ch),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn draw_status(out: &mut Stdout, canvas: &Canvas, status: &str) -> io::Result<()> {
        let y = MAZE_TOP + canvas.size().0 as u16 + 1;
        queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine), Print(status))?;
        out.flush()
    }

    fn draw_logs(&mut self) -> io::Result<()> {
        let logger = logging::get_logger();
        let (width, _) = terminal::size().unwrap_or((100, 100));
        let top = MAZE_TOP + self.canvas.size().0 as u16 + 3;

        let logs = logger.recent();
        for i in 0..logger.max_visible {
            queue!(
                self.out,
                MoveTo(0, top + i as u16),
                Clear(ClearType::CurrentLine)
            )?;

            let Some(log) = logs.get(i) else { continue };
            let color = match log.level {
                log::Level::Error => Color::Red,
                log::Level::Warn => Color::Yellow,
                log::Level::Info => Color::White,
                log::Level::Debug => Color::Blue,
                log::Level::Trace => Color::Grey,
            };

            let mut line = format!("{} -> {}", log.source, log.message);
            while line.width() > width as usize && line.pop().is_some() {}

            queue!(
                self.out,
                SetForegroundColor(color),
                Print(line),
                ResetColor
            )?;
        }

        self.out.flush()
    }
}

fn status_line(
    algorithm: Algorithm,
    elapsed: Duration,
    visited: usize,
    path_len: Option<usize>,
    paused: bool,
) -> String {
    let mut status = format!(
        "{}: {:.2} s, visited {}",
        algorithm,
        elapsed.as_secs_f64(),
        visited
    );
    if let Some(len) = path_len {
        status.push_str(&format!(", path length {}", len));
    }
    if paused {
        status.push_str(" (paused)");
    }
    status
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> TermEvent {
        TermEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn number_keys_pick_algorithms() {
        for (i, alg) in Algorithm::ALL.into_iter().enumerate() {
            let c = char::from_digit(i as u32 + 1, 10).unwrap();
            assert_eq!(
                Command::from_event(&key(KeyCode::Char(c), KeyEventKind::Press)),
                Some(Command::Run(alg))
            );
        }
        assert_eq!(
            Command::from_event(&key(KeyCode::Char('6'), KeyEventKind::Press)),
            None
        );
    }

    #[test]
    fn only_presses_count() {
        assert_eq!(
            Command::from_event(&key(KeyCode::Char('r'), KeyEventKind::Press)),
            Some(Command::Regenerate)
        );
        assert_eq!(
            Command::from_event(&key(KeyCode::Char('r'), KeyEventKind::Release)),
            None
        );
        assert_eq!(
            Command::from_event(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_event(&TermEvent::Resize(80, 24)),
            Some(Command::Redraw)
        );
    }

    #[test]
    fn status_text() {
        let status = status_line(
            Algorithm::AStar,
            Duration::from_millis(1500),
            12,
            Some(7),
            false,
        );
        assert_eq!(status, "A*: 1.50 s, visited 12, path length 7");
        assert!(status_line(Algorithm::DepthFirst, Duration::ZERO, 0, None, true)
            .ends_with("(paused)"));
    }

    #[test]
    fn themes_differ_per_algorithm() {
        let visited: Vec<_> = Algorithm::ALL
            .into_iter()
            .map(|alg| Theme::new(Some(alg), true).color(Mark::Visited))
            .collect();
        for (i, a) in visited.iter().enumerate() {
            assert!(visited[i + 1..].iter().all(|b| a != b));
        }

        let plain = Theme::new(Some(Algorithm::AStar), false);
        assert_eq!(plain.color(Mark::Path), Color::Reset);
        assert_eq!(plain.color(Mark::Wall), Color::Reset);
    }
}
