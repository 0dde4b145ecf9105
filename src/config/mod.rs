//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! caller-supplied ConfigSource
//!     → LogConfig (plain value snapshot, serde-deserializable)
//!     → validation.rs (semantic checks, inside the factory)
//!     → applied by the container as the comparison baseline
//!
//! On each checkout:
//!     source.current() observes the desired config
//!     → compared field-wise against the applied baseline
//!     → unchanged: serve current object
//!     → changed: reload, then overwrite the baseline
//! ```
//!
//! # Design Decisions
//! - Config is an immutable value; no live resources embedded
//! - All fields have defaults to allow minimal configs
//! - Loading (env/file/remote) stays behind the ConfigSource seam

pub mod schema;
pub mod source;
pub mod validation;

pub use schema::{LogConfig, StreamConfig};
pub use source::{ConfigSource, SourceError};
pub use validation::{validate_config, ValidationError};
