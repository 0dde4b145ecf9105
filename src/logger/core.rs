//! The live logger object managed by the container.
//!
//! All reload-mutable state (severity threshold, caller capture, the two
//! sinks) lives behind one `ArcSwap`, so a reload commits in a single
//! atomic store: no emitter can ever observe a new threshold with old
//! streams or vice versa. Emitters that loaded the previous core keep
//! writing through it until they finish; its streams close when the last
//! reference drops.

use std::io;
use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Local;
use thiserror::Error;

use crate::logger::level::Level;
use crate::logger::record::{self, Fields};
use crate::logger::sinks::{CloseStreamsError, Sinks};

/// Failure to emit one record.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("write record: {0}")]
    Write(#[from] io::Error),
}

/// One consistent view of the logger's behavior.
pub(crate) struct LoggerCore {
    pub(crate) level: Level,
    pub(crate) report_caller: bool,
    pub(crate) sinks: Arc<Sinks>,
}

/// Dual-stream structured logger; the managed object of this crate's
/// container instantiation.
pub struct Logger {
    core: ArcSwap<LoggerCore>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn from_core(core: LoggerCore) -> Self {
        Self {
            core: ArcSwap::from_pointee(core),
        }
    }

    /// Currently-applied severity threshold.
    pub fn level(&self) -> Level {
        self.core.load().level
    }

    /// Emit one structured record.
    ///
    /// Records below the threshold are dropped. A `fatal` record
    /// terminates the process after the write; a `critical` record panics
    /// after the write. Both do so even when the record was filtered or
    /// the emission itself failed; the severity's contract outranks the
    /// emission outcome.
    pub fn log(
        &self,
        level: Level,
        fields: &Fields,
        caller: Option<&Location<'_>>,
    ) -> Result<(), EmitError> {
        let core = self.core.load();

        let result = if level >= core.level {
            let caller = if core.report_caller { caller } else { None };
            record::encode(Local::now().naive_local(), level, fields, caller)
                .map_err(EmitError::Encode)
                .and_then(|line| core.sinks.write(level, &line).map_err(EmitError::Write))
        } else {
            Ok(())
        };

        match level {
            Level::Fatal => {
                let _ = core.sinks.flush();
                std::process::exit(1);
            }
            Level::Critical => {
                let _ = core.sinks.flush();
                panic!("critical record emitted");
            }
            _ => result,
        }
    }

    /// Flush both streams, reporting every failure.
    pub fn close(&self) -> Result<(), CloseStreamsError> {
        self.core.load().sinks.flush()
    }

    pub(crate) fn snapshot(&self) -> Arc<LoggerCore> {
        self.core.load_full()
    }

    pub(crate) fn apply(&self, core: LoggerCore) {
        self.core.store(Arc::new(core));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use serde_json::Value;
    use std::fs;

    fn config_in(dir: &std::path::Path) -> LogConfig {
        let mut cf = LogConfig::default();
        cf.info_stream.link_name = dir.join("inf.log");
        cf.info_stream.rotate_hours = 1;
        cf.error_stream.link_name = dir.join("err.log");
        cf.error_stream.rotate_hours = 1;
        cf
    }

    fn logger_in(dir: &std::path::Path, level: Level, report_caller: bool) -> Logger {
        let sinks = Sinks::open(&config_in(dir)).unwrap();
        Logger::from_core(LoggerCore {
            level,
            report_caller,
            sinks: Arc::new(sinks),
        })
    }

    fn one_field() -> Fields {
        let mut fields = Fields::new();
        fields.insert("msg".to_string(), Value::String("hello".to_string()));
        fields
    }

    #[test]
    fn test_threshold_filters_records() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), Level::Warn, false);

        logger.log(Level::Info, &one_field(), None).unwrap();
        logger.log(Level::Warn, &one_field(), None).unwrap();
        logger.close().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("inf.log")).unwrap(), "");
        let err = fs::read_to_string(dir.path().join("err.log")).unwrap();
        assert!(err.contains(r#""level":"warn""#));
    }

    #[test]
    fn test_caller_captured_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), Level::Debug, false);
        logger
            .log(Level::Info, &one_field(), Some(Location::caller()))
            .unwrap();
        logger.close().unwrap();

        let line = fs::read_to_string(dir.path().join("inf.log")).unwrap();
        let parsed: Value = serde_json::from_str(line.trim()).unwrap();
        assert!(parsed.get("caller").is_none());

        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), Level::Debug, true);
        logger
            .log(Level::Info, &one_field(), Some(Location::caller()))
            .unwrap();
        logger.close().unwrap();

        let line = fs::read_to_string(dir.path().join("inf.log")).unwrap();
        let parsed: Value = serde_json::from_str(line.trim()).unwrap();
        assert!(parsed["caller"].as_str().unwrap().contains("core.rs"));
    }

    #[test]
    fn test_critical_panics_after_writing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), Level::Debug, false);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = logger.log(Level::Critical, &one_field(), None);
        }));
        assert!(outcome.is_err());

        let err = fs::read_to_string(dir.path().join("err.log")).unwrap();
        assert!(err.contains(r#""level":"critical""#));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_critical_panics_even_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();

        // Pre-place the error stream's active segment as a link to a
        // device that rejects every write, so the emission itself fails.
        let suffix = Local::now()
            .naive_local()
            .format(crate::logger::stream::SEGMENT_SUFFIX_LAYOUT);
        std::os::unix::fs::symlink("/dev/full", dir.path().join(format!("err.log.{suffix}")))
            .unwrap();
        let logger = logger_in(dir.path(), Level::Debug, false);

        // The failure surfaces for ordinary severities.
        assert!(logger.log(Level::Error, &one_field(), None).is_err());

        // A critical record still honors its termination contract.
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = logger.log(Level::Critical, &one_field(), None);
        }));
        assert!(outcome.is_err());
    }
}
