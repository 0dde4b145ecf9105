//! Dual output streams and severity routing.
//!
//! A `Sinks` value owns the two rotating streams (informational and error)
//! plus the routing table mapping each severity level to exactly one of
//! them. It is built as a unit and replaced as a unit: resource-bound
//! configuration changes produce a fresh `Sinks`, never a half-patched one.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::LogConfig;
use crate::logger::level::{Level, StreamKind};
use crate::logger::stream::RollingStream;

/// Failure to open one of the two streams.
///
/// Opening is ordered info-then-error; when the error stream fails to open,
/// the already-open info stream is released before this is returned.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("open info stream: {0}")]
    OpenInfoStream(#[source] io::Error),

    #[error("open error stream: {0}")]
    OpenErrStream(#[source] io::Error),
}

/// Flush failures at close time.
///
/// Both streams are attempted independently; one failing does not suppress
/// the other's report.
#[derive(Debug)]
pub struct CloseStreamsError {
    pub info: Option<io::Error>,
    pub err: Option<io::Error>,
}

impl fmt::Display for CloseStreamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "close streams: ")?;
        match &self.info {
            Some(e) => write!(f, "info: {e}")?,
            None => write!(f, "info: ok")?,
        }
        match &self.err {
            Some(e) => write!(f, ", error: {e}"),
            None => write!(f, ", error: ok"),
        }
    }
}

impl std::error::Error for CloseStreamsError {}

/// The two live output streams with their severity routing table.
pub(crate) struct Sinks {
    routes: [StreamKind; Level::ALL.len()],
    info: RollingStream,
    err: RollingStream,
}

impl std::fmt::Debug for Sinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sinks").finish_non_exhaustive()
    }
}

impl Sinks {
    /// Open both streams from a configuration and derive the routing table.
    pub(crate) fn open(cf: &LogConfig) -> Result<Self, SinkError> {
        let info = RollingStream::open(&cf.info_stream).map_err(SinkError::OpenInfoStream)?;
        let err = match RollingStream::open(&cf.error_stream) {
            Ok(stream) => stream,
            Err(e) => {
                // Release the already-open info stream before surfacing the
                // failure; a failed build must not leak a handle.
                drop(info);
                return Err(SinkError::OpenErrStream(e));
            }
        };

        let mut routes = [StreamKind::Info; Level::ALL.len()];
        for level in Level::ALL {
            routes[level as usize] = level.stream();
        }

        Ok(Self { routes, info, err })
    }

    /// Append one encoded record to the stream its level routes to.
    pub(crate) fn write(&self, level: Level, bytes: &[u8]) -> io::Result<()> {
        match self.routes[level as usize] {
            StreamKind::Info => self.info.write(bytes),
            StreamKind::Error => self.err.write(bytes),
        }
    }

    /// Flush both streams, attempting each regardless of the other.
    pub(crate) fn flush(&self) -> Result<(), CloseStreamsError> {
        let info = self.info.flush().err();
        let err = self.err.flush().err();
        if info.is_some() || err.is_some() {
            return Err(CloseStreamsError { info, err });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_in(dir: &std::path::Path) -> LogConfig {
        let mut cf = LogConfig::default();
        cf.info_stream.link_name = dir.join("inf.log");
        cf.info_stream.rotate_hours = 1;
        cf.error_stream.link_name = dir.join("err.log");
        cf.error_stream.rotate_hours = 1;
        cf
    }

    #[test]
    fn test_routes_each_level_to_one_stream() {
        let dir = tempfile::tempdir().unwrap();
        let sinks = Sinks::open(&config_in(dir.path())).unwrap();

        sinks.write(Level::Info, b"{\"n\":1}\n").unwrap();
        sinks.write(Level::Error, b"{\"n\":2}\n").unwrap();
        sinks.flush().unwrap();

        let inf = fs::read_to_string(dir.path().join("inf.log")).unwrap();
        let err = fs::read_to_string(dir.path().join("err.log")).unwrap();
        assert_eq!(inf, "{\"n\":1}\n");
        assert_eq!(err, "{\"n\":2}\n");
    }

    #[test]
    fn test_open_fails_when_error_stream_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let mut cf = config_in(dir.path());
        cf.error_stream.link_name = PathBuf::from("/nonexistent-dir-for-sure/err.log");

        let e = Sinks::open(&cf).unwrap_err();
        assert!(matches!(e, SinkError::OpenErrStream(_)));
    }

    #[test]
    fn test_close_error_reports_both_streams() {
        let e = CloseStreamsError {
            info: Some(io::Error::new(io::ErrorKind::Other, "disk full")),
            err: Some(io::Error::new(io::ErrorKind::Other, "stale handle")),
        };
        let rendered = e.to_string();
        assert!(rendered.contains("disk full"));
        assert!(rendered.contains("stale handle"));
    }
}
