//! Leveled logging facade over the reloadable container.
//!
//! Every call checks out the current logger, emits one structured record,
//! and checks it back in. The checkout guard drops on every exit path,
//! including emission failures; the fatal path skips check-in only because
//! the whole process is terminating.

use std::panic::Location;

use thiserror::Error;

use crate::config::{ConfigSource, LogConfig};
use crate::container::{Checkout, Container, ContainerError};
use crate::logger::{EmitError, Fields, Level, LoggerStrategy};

/// Failure of one leveled logging call.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("checkout logger: {0}")]
    Checkout(#[from] ContainerError),

    #[error("emit record: {0}")]
    Emit(#[from] EmitError),
}

/// Hot-reloadable dual-stream logger.
///
/// Construct it once with a configuration source and log through it from
/// any number of threads; configuration changes observed by the source are
/// applied between calls without dropping in-flight writes.
pub struct LoggerContainer {
    container: Container<LoggerStrategy>,
}

impl std::fmt::Debug for LoggerContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerContainer").finish_non_exhaustive()
    }
}

impl LoggerContainer {
    /// Build the container, constructing the initial logger from the
    /// source's current configuration.
    pub fn new<S>(source: S) -> Result<Self, ContainerError>
    where
        S: ConfigSource<Config = LogConfig> + 'static,
    {
        Ok(Self {
            container: Container::new(LoggerStrategy, Box::new(source))?,
        })
    }

    /// Borrow the current logger for a batch of writes.
    ///
    /// The borrow reconciles configuration once; records emitted through it
    /// skip further reload checks until it is dropped.
    pub fn checkout(&self) -> Result<Checkout<LoggerStrategy>, ContainerError> {
        self.container.checkout()
    }

    #[track_caller]
    pub fn debug(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Debug, fields, Location::caller())
    }

    #[track_caller]
    pub fn info(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Info, fields, Location::caller())
    }

    #[track_caller]
    pub fn warn(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Warn, fields, Location::caller())
    }

    #[track_caller]
    pub fn error(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Error, fields, Location::caller())
    }

    /// Emit the record, then terminate the process.
    #[track_caller]
    pub fn fatal(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Fatal, fields, Location::caller())
    }

    /// Emit the record, then raise an unrecoverable fault.
    #[track_caller]
    pub fn critical(&self, fields: Fields) -> Result<(), LogError> {
        self.dispatch(Level::Critical, fields, Location::caller())
    }

    /// Emit one record at an arbitrary level.
    #[track_caller]
    pub fn log(&self, level: Level, fields: Fields) -> Result<(), LogError> {
        self.dispatch(level, fields, Location::caller())
    }

    fn dispatch(
        &self,
        level: Level,
        fields: Fields,
        caller: &'static Location<'static>,
    ) -> Result<(), LogError> {
        let logger = self.container.checkout()?;
        // Check-in happens when the guard drops, on every path out of here.
        logger.log(level, &fields, Some(caller))?;
        Ok(())
    }

    /// Close the container; further calls fail with a closed error.
    pub fn close(&self) -> Result<(), ContainerError> {
        self.container.close()
    }
}
