use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use csearch::Algorithm;
use log::LevelFilter;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

const DEFAULT_ROWS: usize = 15;
const DEFAULT_COLS: usize = 30;
const DEFAULT_ALGORITHM: Algorithm = Algorithm::AStar;
const DEFAULT_STEP_DELAY_MS: u64 = 10;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot access settings file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Error reading settings file {path:?}, {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub step_delay_ms: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub color: Option<bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(mut self, value: usize) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn set_cols(mut self, value: usize) -> Self {
        self.cols = Some(value);
        self
    }

    pub fn get_cols(&self) -> usize {
        self.cols.unwrap_or(DEFAULT_COLS)
    }

    pub fn set_algorithm(mut self, value: Algorithm) -> Self {
        self.algorithm = Some(value);
        self
    }

    pub fn get_algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(DEFAULT_ALGORITHM)
    }

    pub fn set_step_delay_ms(mut self, value: u64) -> Self {
        self.step_delay_ms = Some(value);
        self
    }

    pub fn get_step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms.unwrap_or(DEFAULT_STEP_DELAY_MS))
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_log_level(mut self, value: LevelFilter) -> Self {
        self.log_level = Some(value.to_string());
        self
    }

    /// Unknown level names fall back to the default level.
    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tsearch")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    /// Parses settings from a ron string, missing fields are left unset.
    pub fn from_ron(settings: &str) -> Result<Self, ron::error::SpannedError> {
        Self::options().from_str(settings)
    }

    /// Loads settings from `path`, writing the default file there first if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(settings) => Self::from_ron(&settings).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Settings file {:?} not found, creating default", path);
                Self::reset_config(path)?;
                Self::from_ron(DEFAULT_SETTINGS).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Overwrites `path` with the default settings.
    pub fn reset_config(path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }
}
