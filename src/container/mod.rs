//! Hot-reloadable resource container subsystem.
//!
//! # Data Flow
//! ```text
//! consumer calls checkout()
//!     → source.current() observes the desired config
//!     → strategy.compare(applied, observed)
//!     → Unchanged: hand out the current object (lock-free)
//!     → NeedsReset: serialize through the reload mutex
//!         → strategy.reset(object, applied, observed)
//!         → success: swap in { observed config, object } as one snapshot
//!         → failure: log, keep serving the pre-reset state
//!     → consumer uses the object, check-in on guard drop
//! ```
//!
//! # Design Decisions
//! - One strategy type per managed-resource kind; mismatches are compile
//!   errors, not runtime assertions
//! - Reads are lock-free (arc-swap); only the reload path takes a lock
//! - Config retrieval or reload failure never denies service; the
//!   last-known-good object keeps serving
//! - Superseded resources are released when the last guard referencing
//!   them drops

pub mod reloadable;
pub mod strategy;

pub use reloadable::{Checkout, Container, ContainerError, StageError};
pub use strategy::{CompareOutcome, ReloadStrategy};
