//! Diagnostic log sinks and tracing setup.
//!
//! The executor and command handlers never log through a global. They receive
//! a [`LogSink`] from whoever owns the session, which lets tests capture every
//! entry with a [`MemorySink`].

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.to_rfc3339(),
            self.level,
            self.message
        )
    }
}

/// Append-only destination for diagnostic entries.
///
/// Implementations must append each entry atomically; ordering between
/// concurrent writers is only as good as their timestamps.
pub trait LogSink: Send + Sync {
    fn append(&self, entry: LogEntry);

    fn debug(&self, message: &str) {
        self.append(LogEntry::now(LogLevel::Debug, message));
    }
    fn info(&self, message: &str) {
        self.append(LogEntry::now(LogLevel::Info, message));
    }
    fn warning(&self, message: &str) {
        self.append(LogEntry::now(LogLevel::Warning, message));
    }
    fn error(&self, message: &str) {
        self.append(LogEntry::now(LogLevel::Error, message));
    }
}

/// Keeps every entry in memory for the lifetime of the sink.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn append(&self, entry: LogEntry) {
        let mut guard = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(entry);
    }
}

/// Appends one formatted line per entry to a file.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn append(&self, entry: LogEntry) {
        let line = format!("{entry}\n");
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!("failed to write log entry: {e}");
        }
    }
}

/// Forwards entries to the `tracing` subscriber.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn append(&self, entry: LogEntry) {
        match entry.level {
            LogLevel::Debug => tracing::debug!("{}", entry.message),
            LogLevel::Info => tracing::info!("{}", entry.message),
            LogLevel::Warning => tracing::warn!("{}", entry.message),
            LogLevel::Error => tracing::error!("{}", entry.message),
        }
    }
}

/// Fans every entry out to several sinks.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn LogSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl LogSink for MultiSink {
    fn append(&self, entry: LogEntry) {
        for sink in &self.sinks {
            sink.append(entry.clone());
        }
    }
}

/// Install the global tracing subscriber writing to stderr.
///
/// # Errors
/// Returns an error if a global subscriber was already set.
pub fn init_tracing(verbose: bool, quiet: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
