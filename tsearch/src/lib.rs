pub mod headless;
pub mod logging;
pub mod render;
pub mod settings;
pub mod viewer;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Maze(#[from] csearch::Error),
    #[error("{0}")]
    Settings(#[from] settings::SettingsError),
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
