//! Configuration schema definitions.
//!
//! This module defines the configuration snapshot consumed by the logging
//! container. All types derive Serde traits so a snapshot can come from any
//! serialized source, and all of them are plain values: no live resources,
//! freely cloned and compared field-wise.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration snapshot for the dual-stream logger.
///
/// Equality is field-wise; the container compares the currently-applied
/// snapshot against a freshly observed one on every checkout to decide
/// whether a reload is due.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum severity emitted, as a level name (e.g. "info", "warn").
    ///
    /// Kept as a string so an unrecognized name surfaces as an
    /// input-validation error at build/reset time rather than at
    /// deserialization time.
    pub level: String,

    /// Include caller file/line in each record.
    pub report_caller: bool,

    /// Stream receiving debug/info records.
    pub info_stream: StreamConfig,

    /// Stream receiving warn-and-above records.
    pub error_stream: StreamConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            report_caller: false,
            info_stream: StreamConfig {
                link_name: PathBuf::from("app.log"),
                ..StreamConfig::default()
            },
            error_stream: StreamConfig {
                link_name: PathBuf::from("app_err.log"),
                ..StreamConfig::default()
            },
        }
    }
}

/// Configuration for one rotating output stream.
///
/// Every field here is resource-bound: changing any of them requires
/// closing and reopening the underlying file handles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Stable name consumers read; kept as a symlink to the active
    /// time-suffixed segment.
    pub link_name: PathBuf,

    /// Delete rotated segments older than this. Zero keeps them forever.
    pub max_age_hours: u64,

    /// Rotate to a new segment every N hours.
    pub rotate_hours: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            link_name: PathBuf::from("app.log"),
            max_age_hours: 7 * 24,
            rotate_hours: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_value() {
        let a = LogConfig::default();
        let b = LogConfig::default();
        assert_eq!(a, b);

        let mut c = LogConfig::default();
        c.level = "warn".to_string();
        assert_ne!(a, c);
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let cf: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cf, LogConfig::default());

        let cf: LogConfig =
            serde_json::from_str(r#"{"level":"debug","info_stream":{"rotate_hours":1}}"#).unwrap();
        assert_eq!(cf.level, "debug");
        assert_eq!(cf.info_stream.rotate_hours, 1);
        assert_eq!(cf.error_stream, LogConfig::default().error_stream);
    }
}
