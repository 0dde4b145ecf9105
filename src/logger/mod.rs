//! Dual-stream rotating logger subsystem.
//!
//! # Data Flow
//! ```text
//! LogConfig
//!     → strategy.rs (build: validate, parse level, open sinks)
//!     → core.rs (Logger: one ArcSwap'd view of level/flag/sinks)
//!     → record.rs (encode: JSON line, fixed time layout, caller)
//!     → sinks.rs (route by severity: debug/info vs warn+)
//!     → stream.rs (rotating segments, symlink, retention)
//!
//! On reload:
//!     strategy.rs reset cascade patches the live Logger in place,
//!     committing level, caller flag, and sinks in a single store
//! ```
//!
//! # Design Decisions
//! - Warn-and-above records route to the error stream, the rest to the
//!   info stream; the table is re-derived whenever sinks are rebuilt
//! - Fatal terminates the process and critical panics, after the write
//! - Stream recreation happens only for resource-bound config changes

pub mod core;
pub mod level;
pub mod record;
pub mod sinks;
pub mod strategy;
pub mod stream;

pub use self::core::{EmitError, Logger};
pub use level::{InvalidSeverityLevel, Level, StreamKind};
pub use record::{Fields, TIME_LAYOUT};
pub use sinks::{CloseStreamsError, SinkError};
pub use strategy::{LoggerError, LoggerStrategy};
