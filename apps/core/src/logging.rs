//! Append-only file log under the app data directory. Before the file is
//! opened, an oversized log is moved aside as `anilauncher-<epoch>.log` and
//! only the newest archives are kept.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::any::Any;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_FILE_NAME: &str = "anilauncher.log";
const ARCHIVE_PREFIX: &str = "anilauncher-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static PANIC_HOOK: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

struct Logger {
    file: Mutex<File>,
}

impl Logger {
    fn open(log_dir: &Path) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILE_NAME);
        if archive_if_oversized(&path, log_dir)? {
            prune_old_archives(log_dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((
            Self {
                file: Mutex::new(file),
            },
            path,
        ))
    }

    fn write(&self, level: Level, message: &str) {
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let _ = writeln!(file, "[{}] [{}] {message}", epoch_secs(), level.as_str());
        let _ = file.flush();
    }
}

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

/// Opens the log file in `log_dir`. Later calls keep writing to the file
/// opened first.
pub fn init_in(log_dir: &Path) -> std::io::Result<PathBuf> {
    let (logger, path) = Logger::open(log_dir)?;
    let _ = LOGGER.set(logger);
    PANIC_HOOK.get_or_init(install_panic_hook);
    Ok(path)
}

pub fn init() -> std::io::Result<PathBuf> {
    init_in(&logs_dir())
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

fn emit(level: Level, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write(level, message);
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Returns whether the log was moved aside.
fn archive_if_oversized(log_path: &Path, log_dir: &Path) -> std::io::Result<bool> {
    match fs::metadata(log_path) {
        Ok(meta) if meta.len() >= MAX_LOG_BYTES => {
            let archive = log_dir.join(format!("{ARCHIVE_PREFIX}{}.log", epoch_secs()));
            fs::rename(log_path, archive)?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

fn prune_old_archives(log_dir: &Path) -> std::io::Result<()> {
    let mut archives: Vec<PathBuf> = fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| is_archive(path))
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(MAX_ARCHIVES);
    for stale in &archives[..excess] {
        let _ = fs::remove_file(stale);
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    match location {
        Some(at) => format!("panic at {}:{}: {text}", at.file(), at.line()),
        None => format!("panic: {text}"),
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error(&panic_message(info.payload(), info.location()));
        previous(info);
    }));
}
