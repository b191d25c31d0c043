use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, OnceLock, RwLock,
    },
    time::{Duration, Instant},
};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    const DEFAULT_DECAY: Duration = Duration::from_secs(5);
    const DEFAULT_MAX_VISIBLE: usize = 3;

    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn, DEFAULT_DECAY, DEFAULT_MAX_VISIBLE))
}

/// Installs the logger, `echo` prints every message to stderr as well,
/// used when no screen is there to show them.
pub fn init(level: LevelFilter, echo: bool) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);
    logger.set_echo(echo);

    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Message {
    pub level: log::Level,
    pub pushed: Instant,
    pub message: String,
    pub source: String,
}

#[derive(Default)]
struct Logs {
    // newest first
    logs: Vec<Message>,
}

impl Logs {
    fn push(&mut self, message: Message) {
        self.logs.insert(0, message);
    }

    fn clear_old(&mut self, decay: Duration) {
        let now = Instant::now();
        self.logs
            .retain(|msg| now.duration_since(msg.pushed) < decay);
    }
}

pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
    echo: AtomicBool,
    pub decay: Duration,
    pub max_visible: usize,
    logs: Mutex<Logs>,
}

impl AppLogger {
    fn new(min_level: LevelFilter, decay: Duration, max_visible: usize) -> Self {
        Self {
            min_level: RwLock::new(min_level),
            echo: AtomicBool::new(false),
            decay,
            max_visible,
            logs: Mutex::new(Logs::default()),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        match self.min_level.read() {
            Ok(level) => *level,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        match self.min_level.write() {
            Ok(mut min) => *min = level,
            Err(poisoned) => *poisoned.into_inner() = level,
        }
    }

    pub fn set_echo(&self, echo: bool) {
        self.echo.store(echo, Ordering::Relaxed);
    }

    fn borrow_mut_logs(&self) -> MutexGuard<Logs> {
        // a panic while holding the lock cannot leave the list half written
        self.logs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Messages younger than the decay, newest first, at most `max_visible` of them.
    pub fn recent(&self) -> Vec<Message> {
        let mut logs = self.borrow_mut_logs();
        logs.clear_old(self.decay);
        logs.logs.iter().take(self.max_visible).cloned().collect()
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = Message {
            level: record.level(),
            pushed: Instant::now(),
            message: record.args().to_string(),
            source: record.module_path().unwrap_or("unknown").to_string(),
        };

        if self.echo.load(Ordering::Relaxed) {
            eprintln!(
                "[{}] {} -> {}",
                message.level, message.source, message.message
            );
        }

        self.borrow_mut_logs().push(message);
    }

    fn flush(&self) {}
}
