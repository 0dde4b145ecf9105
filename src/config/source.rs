//! Configuration source contract.
//!
//! The container never loads configuration itself; it is handed a source at
//! construction and asks it for the current snapshot on every checkout. Where
//! the snapshot comes from (environment, file, remote config service) is the
//! caller's concern.

/// Error produced by a configuration source.
///
/// Sources are caller-supplied, so the error type is open-ended.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Supplier of the currently-desired configuration.
///
/// A retrieval failure is not fatal to consumers: the container logs it and
/// keeps serving the last-known-good object.
pub trait ConfigSource: Send + Sync {
    /// Configuration value this source produces.
    type Config;

    /// Return the current configuration snapshot.
    fn current(&self) -> Result<Self::Config, SourceError>;
}

/// Any `Fn() -> Result<Config, SourceError>` closure is a valid source.
impl<C, F> ConfigSource for F
where
    F: Fn() -> Result<C, SourceError> + Send + Sync,
{
    type Config = C;

    fn current(&self) -> Result<C, SourceError> {
        (self)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;

    #[test]
    fn test_closure_source() {
        let source = || Ok(LogConfig::default());
        let cf = ConfigSource::current(&source).unwrap();
        assert_eq!(cf, LogConfig::default());
    }

    #[test]
    fn test_closure_source_error() {
        let source = || -> Result<LogConfig, SourceError> { Err("backend unreachable".into()) };
        let err = ConfigSource::current(&source).unwrap_err();
        assert_eq!(err.to_string(), "backend unreachable");
    }
}
