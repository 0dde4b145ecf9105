//! Reload strategy for the dual-stream logger.
//!
//! Implements the container's capability seam: building a logger from a
//! configuration snapshot, field-wise comparison, and the priority cascade
//! that patches a live logger in place. Cheap attribute changes (threshold,
//! caller flag) are re-applied whenever any higher-priority detector fired;
//! stream recreation only runs when a resource-bound field actually changed.

use std::fmt;
use std::sync::Arc;

use crate::config::{validate_config, LogConfig, ValidationError};
use crate::container::{CompareOutcome, ReloadStrategy};
use crate::logger::core::{Logger, LoggerCore};
use crate::logger::level::InvalidSeverityLevel;
use crate::logger::sinks::{CloseStreamsError, SinkError, Sinks};

/// Error raised while building, resetting, or closing a logger.
#[derive(Debug)]
pub enum LoggerError {
    Validation(Vec<ValidationError>),
    Level(InvalidSeverityLevel),
    OpenStreams(SinkError),
    ResetStreams(SinkError),
    Close(CloseStreamsError),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Validation(errors) => {
                write!(f, "validate config: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            LoggerError::Level(e) => write!(f, "set level: {e}"),
            LoggerError::OpenStreams(e) => write!(f, "open streams: {e}"),
            LoggerError::ResetStreams(e) => write!(f, "reset streams: {e}"),
            LoggerError::Close(e) => write!(f, "close streams: {e}"),
        }
    }
}

impl std::error::Error for LoggerError {}

/// Strategy binding [`LogConfig`] to [`Logger`] for the generic container.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggerStrategy;

impl ReloadStrategy for LoggerStrategy {
    type Config = LogConfig;
    type Object = Logger;
    type Error = LoggerError;

    fn build(&self, cf: &LogConfig) -> Result<Logger, LoggerError> {
        validate_config(cf).map_err(LoggerError::Validation)?;
        let level = cf.level.parse().map_err(LoggerError::Level)?;
        let sinks = Sinks::open(cf).map_err(LoggerError::OpenStreams)?;

        Ok(Logger::from_core(LoggerCore {
            level,
            report_caller: cf.report_caller,
            sinks: Arc::new(sinks),
        }))
    }

    fn compare(&self, applied: &LogConfig, observed: &LogConfig) -> CompareOutcome {
        if applied == observed {
            CompareOutcome::Unchanged
        } else {
            CompareOutcome::NeedsReset
        }
    }

    fn reset(
        &self,
        logger: &Logger,
        applied: &LogConfig,
        observed: &LogConfig,
    ) -> Result<(), LoggerError> {
        validate_config(observed).map_err(LoggerError::Validation)?;

        let level_changed = observed.level != applied.level;
        let caller_changed = observed.report_caller != applied.report_caller;
        let streams_changed = observed.info_stream != applied.info_stream
            || observed.error_stream != applied.error_stream;

        let prev = logger.snapshot();
        let mut level = prev.level;
        let mut report_caller = prev.report_caller;
        let mut sinks = prev.sinks.clone();

        // Priority cascade, highest first. A detector firing forces the
        // cheaper attribute steps below it to re-apply from the observed
        // config; the expensive recreation step fires only on a real
        // resource-bound change.
        let mut fired = false;

        fired |= level_changed;
        if fired {
            level = observed.level.parse().map_err(LoggerError::Level)?;
        }

        fired |= caller_changed;
        if fired {
            report_caller = observed.report_caller;
        }

        if streams_changed {
            // New streams open before the old ones are released; the old
            // sinks close when their last holder drops.
            sinks = Arc::new(Sinks::open(observed).map_err(LoggerError::ResetStreams)?);
        }

        // Commit as one store: threshold, caller flag, and routing can
        // never be observed out of step.
        logger.apply(LoggerCore {
            level,
            report_caller,
            sinks,
        });
        Ok(())
    }

    fn close(&self, logger: &Logger) -> Result<(), LoggerError> {
        logger.close().map_err(LoggerError::Close)
    }
}
