use std::{io, path::PathBuf};

use clap::Parser;
use csearch::{Algorithm, Maze};
use tsearch::{
    headless, logging,
    settings::Settings,
    viewer::{Viewer, ViewerSettings},
    AppError,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "tsearch")]
struct Args {
    #[clap(long, help = "Number of maze rows")]
    rows: Option<usize>,
    #[clap(long, help = "Number of maze columns")]
    cols: Option<usize>,
    #[clap(long, help = "Seed of the maze generator")]
    seed: Option<u64>,
    #[clap(short, long, help = "Search to run: dijkstra, astar, bfs, dfs or greedy")]
    algorithm: Option<Algorithm>,
    #[clap(long, help = "Delay between animated steps in milliseconds")]
    delay: Option<u64>,
    #[clap(long, action, help = "Run without the interactive viewer")]
    headless: bool,
    #[clap(long, action, help = "Run every search headless on the same maze")]
    all: bool,
    #[clap(short, long, action, help = "Print the maze and traces, implies --headless")]
    print: bool,
    #[clap(short, long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
}

impl Args {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(rows) = self.rows {
            settings = settings.set_rows(rows);
        }
        if let Some(cols) = self.cols {
            settings = settings.set_cols(cols);
        }
        if let Some(seed) = self.seed {
            settings = settings.set_seed(seed);
        }
        if let Some(algorithm) = self.algorithm {
            settings = settings.set_algorithm(algorithm);
        }
        if let Some(delay) = self.delay {
            settings = settings.set_step_delay_ms(delay);
        }
        settings
    }

    fn is_headless(&self) -> bool {
        self.headless || self.all || self.print
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        if let Some(s) = config_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", config_path);
        }
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&config_path)?;
        return Ok(());
    }

    let settings = args.apply(Settings::load(&config_path)?);
    logging::init(settings.get_log_level(), args.is_headless())?;
    log::debug!("Loaded settings from {:?}: {:?}", config_path, settings);

    let maze = Maze::new(
        settings.get_rows(),
        settings.get_cols(),
        settings.get_seed(),
    )?;

    if args.is_headless() {
        let algorithms = if args.all {
            Algorithm::ALL.to_vec()
        } else {
            vec![settings.get_algorithm()]
        };
        headless::run(&maze, &algorithms, args.print, &mut io::stdout().lock())?;
        return Ok(());
    }

    better_panic::install();

    let viewer = Viewer::new(
        maze,
        ViewerSettings {
            step_delay: settings.get_step_delay(),
            color: settings.get_color(),
        },
    );
    viewer.run(Some(settings.get_algorithm()))?;

    Ok(())
}
