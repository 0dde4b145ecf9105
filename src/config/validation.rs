//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (rotation interval > 0, level name recognized)
//! - Catch values that would make resource opening undefined
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs inside the object factory, before any stream is opened

use thiserror::Error;

use crate::config::schema::{LogConfig, StreamConfig};
use crate::logger::Level;

/// Longest accepted rotation interval: one year.
pub(crate) const MAX_ROTATE_HOURS: u64 = 24 * 365;

/// Longest accepted retention window: ten years.
pub(crate) const MAX_AGE_HOURS: u64 = 10 * 24 * 365;

/// A single semantic problem with a configuration snapshot.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unrecognized severity level {0:?}")]
    UnrecognizedLevel(String),

    #[error("{stream} stream: link name is empty")]
    EmptyLinkName { stream: &'static str },

    #[error("{stream} stream: rotation interval must be at least one hour")]
    ZeroRotateHours { stream: &'static str },

    #[error("{stream} stream: rotation interval must be at most {MAX_ROTATE_HOURS} hours")]
    RotateTooLarge { stream: &'static str },

    #[error("{stream} stream: retention window must be at most {MAX_AGE_HOURS} hours")]
    MaxAgeTooLarge { stream: &'static str },
}

/// Validate a configuration snapshot, collecting every problem found.
pub fn validate_config(cf: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if cf.level.parse::<Level>().is_err() {
        errors.push(ValidationError::UnrecognizedLevel(cf.level.clone()));
    }

    validate_stream(&cf.info_stream, "info", &mut errors);
    validate_stream(&cf.error_stream, "error", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_stream(cf: &StreamConfig, stream: &'static str, errors: &mut Vec<ValidationError>) {
    if cf.link_name.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLinkName { stream });
    }
    if cf.rotate_hours == 0 {
        errors.push(ValidationError::ZeroRotateHours { stream });
    }
    if cf.rotate_hours > MAX_ROTATE_HOURS {
        errors.push(ValidationError::RotateTooLarge { stream });
    }
    if cf.max_age_hours > MAX_AGE_HOURS {
        errors.push(ValidationError::MaxAgeTooLarge { stream });
    }
}
