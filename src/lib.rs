//! Hot-reloadable dual-stream rotating file logger.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │               LoggerContainer                  │
//!                    │                                                │
//!   log call ───────▶│  facade  ──checkout──▶  container              │
//!                    │                          │                     │
//!                    │                          ▼                     │
//!                    │                   ConfigSource.current()       │
//!                    │                          │                     │
//!                    │              compare against applied baseline  │
//!                    │               unchanged │ changed              │
//!                    │                    │    ▼                      │
//!                    │                    │  reset cascade            │
//!                    │                    │  (level → caller flag →   │
//!                    │                    │   stream recreation)      │
//!                    │                    ▼                           │
//!                    │                 Logger ──route──▶ info stream  │
//!                    │                        └────────▶ error stream │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! The container owns one live [`Logger`] built from a [`LogConfig`]
//! snapshot. Each checkout re-evaluates whether the observed configuration
//! still matches the applied one; deltas are patched in place where cheap
//! (severity threshold, caller capture) and rebuilt where resource-bound
//! (stream paths, rotation, retention). Concurrent emitters are never
//! blocked by a reload and never observe a half-applied configuration.
//!
//! The generic [`Container`] is reusable for other managed resources via
//! [`ReloadStrategy`].

pub mod config;
pub mod container;
pub mod facade;
pub mod logger;

pub use config::{ConfigSource, LogConfig, SourceError, StreamConfig};
pub use container::{Checkout, CompareOutcome, Container, ContainerError, ReloadStrategy};
pub use facade::{LogError, LoggerContainer};
pub use logger::{Fields, Level, Logger, LoggerStrategy};
