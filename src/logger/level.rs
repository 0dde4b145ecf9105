//! Severity levels and their stream routing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log record, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    /// Terminates the process after the record is written.
    Fatal,
    /// Raises an unrecoverable fault after the record is written.
    Critical,
}

/// Which of the two output streams a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Debug and info records.
    Info,
    /// Warn-and-above records.
    Error,
}

/// A severity level name that no level recognizes.
#[derive(Debug, Error)]
#[error("invalid severity level {0:?}")]
pub struct InvalidSeverityLevel(pub String);

impl Level {
    /// All levels, ascending.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Critical,
    ];

    /// Stream this level is routed to: warn and above go to the error
    /// stream, everything below to the info stream.
    pub fn stream(self) -> StreamKind {
        if self >= Level::Warn {
            StreamKind::Error
        } else {
            StreamKind::Info
        }
    }

    /// Lowercase level name as it appears in records and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = InvalidSeverityLevel;

    fn from_str(s: &str) -> Result<Self, InvalidSeverityLevel> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "critical" => Ok(Level::Critical),
            _ => Err(InvalidSeverityLevel(s.to_string())),
        }
    }
}
