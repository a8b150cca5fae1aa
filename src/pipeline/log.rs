//! Run-scoped log trail explaining gaps in a league's record set.
//!
//! Many concurrent tasks write; one consumer drains after they all finish.

use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One human-readable line of the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Team the line was emitted for, if any.
    pub team: Option<String>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            LogLevel::Info => "✅",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        };
        write!(f, "{marker} {}", self.message)
    }
}

/// Cloneable producer handle for the run log.
///
/// Entries are also mirrored to `tracing` at the matching level.
#[derive(Debug, Clone)]
pub struct RunLog {
    tx: mpsc::UnboundedSender<LogEntry>,
    team: Option<String>,
}

impl RunLog {
    /// Create a producer handle and the single consumer that drains it.
    pub fn channel() -> (Self, LogDrain) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, team: None }, LogDrain { rx })
    }

    /// Handle whose entries are attributed to `team`.
    pub fn scoped(&self, team: &str) -> Self {
        Self {
            tx: self.tx.clone(),
            team: Some(team.to_owned()),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    fn push(&self, level: LogLevel, message: String) {
        let team = self.team.as_deref().unwrap_or_default();
        match level {
            LogLevel::Info => info!(team, "{message}"),
            LogLevel::Warn => warn!(team, "{message}"),
            LogLevel::Error => error!(team, "{message}"),
        }

        // The drain only goes away once the run is over; late lines are moot.
        let _ = self.tx.send(LogEntry {
            level,
            team: self.team.clone(),
            message,
        });
    }
}

/// Single consumer side of a [`RunLog`].
#[derive(Debug)]
pub struct LogDrain {
    rx: mpsc::UnboundedReceiver<LogEntry>,
}

impl LogDrain {
    /// Wait for every producer handle to drop and return all entries in arrival order.
    pub async fn collect(mut self) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        while let Some(entry) = self.rx.recv().await {
            entries.push(entry);
        }
        entries
    }
}
