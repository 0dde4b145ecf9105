//! Generic hot-reloadable object container.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::{ConfigSource, SourceError};
use crate::container::strategy::{CompareOutcome, ReloadStrategy};

/// Boxed strategy error, carried inside [`ContainerError`] with a stage label.
pub type StageError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error surfaced by container construction, checkout, or close.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The container was closed; further checkouts are refused.
    #[error("container is closed")]
    Closed,

    /// The config source failed during construction.
    #[error("get config: {0}")]
    Source(#[source] SourceError),

    /// The factory failed to build the initial object.
    #[error("build object: {0}")]
    Build(#[source] StageError),

    /// Releasing the object's resources failed at close time.
    #[error("close object: {0}")]
    Close(#[source] StageError),
}

/// The applied configuration baseline together with the object built from it.
///
/// Swapped as a unit so no observer can see a new baseline with an old
/// object or vice versa.
struct Snapshot<S: ReloadStrategy> {
    config: S::Config,
    object: Arc<S::Object>,
}

/// A checked-out borrow of the current managed object.
///
/// Check-in is the guard's drop, which runs on every exit path. Resources
/// superseded by a reload stay open until the last guard that references
/// them is dropped.
pub struct Checkout<S: ReloadStrategy> {
    object: Arc<S::Object>,
}

impl<S: ReloadStrategy> Deref for Checkout<S> {
    type Target = S::Object;

    fn deref(&self) -> &S::Object {
        &self.object
    }
}

/// Container owning one live object and reconciling it with a configuration
/// source on every checkout.
///
/// Checkout and check-in are lock-free and never serialize unrelated
/// consumers; only the reload decision path (compare, reset, baseline swap)
/// runs under a mutex, one reload at a time.
pub struct Container<S: ReloadStrategy> {
    strategy: S,
    source: Box<dyn ConfigSource<Config = S::Config>>,
    snapshot: ArcSwap<Snapshot<S>>,
    reload: Mutex<()>,
    closed: AtomicBool,
}

impl<S: ReloadStrategy> std::fmt::Debug for Container<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

impl<S: ReloadStrategy> Container<S> {
    /// Build the initial object from the source's current configuration.
    ///
    /// Both a source failure and a build failure fail construction; there is
    /// no last-known-good state to fall back to yet.
    pub fn new(
        strategy: S,
        source: Box<dyn ConfigSource<Config = S::Config>>,
    ) -> Result<Self, ContainerError> {
        let config = source.current().map_err(ContainerError::Source)?;
        let object = strategy
            .build(&config)
            .map_err(|e| ContainerError::Build(Box::new(e)))?;

        Ok(Self {
            strategy,
            source,
            snapshot: ArcSwap::from_pointee(Snapshot {
                config,
                object: Arc::new(object),
            }),
            reload: Mutex::new(()),
            closed: AtomicBool::new(false),
        })
    }

    /// Borrow the current object, reconciling it with the configuration
    /// source first.
    ///
    /// A source failure or a failed reload never denies service: the
    /// checkout succeeds with the last-known-good object and the failure is
    /// reported through tracing. Only a closed container refuses checkouts.
    pub fn checkout(&self) -> Result<Checkout<S>, ContainerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ContainerError::Closed);
        }

        let observed = match self.source.current() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config retrieval failed, serving last known good");
                return Ok(self.current());
            }
        };

        {
            let snap = self.snapshot.load();
            if let CompareOutcome::Unchanged = self.strategy.compare(&snap.config, &observed) {
                return Ok(Checkout {
                    object: snap.object.clone(),
                });
            }
        }

        // One reload at a time; checkout paths that saw no change never
        // touch this lock.
        let _reload = self.reload.lock();

        // Re-read under the lock: a concurrent reload may already have
        // applied this configuration.
        let snap = self.snapshot.load_full();
        if let CompareOutcome::Unchanged = self.strategy.compare(&snap.config, &observed) {
            return Ok(Checkout {
                object: snap.object.clone(),
            });
        }

        match self.strategy.reset(&snap.object, &snap.config, &observed) {
            Ok(()) => {
                // The observed config becomes the comparison baseline for
                // subsequent checkouts, atomically with the object.
                self.snapshot.store(Arc::new(Snapshot {
                    config: observed,
                    object: snap.object.clone(),
                }));
                tracing::info!("configuration reload applied");
            }
            Err(e) => {
                tracing::error!(error = %e, "reload failed, keeping current configuration");
            }
        }

        Ok(Checkout {
            object: snap.object.clone(),
        })
    }

    /// Borrow the current object without consulting the configuration source.
    fn current(&self) -> Checkout<S> {
        Checkout {
            object: self.snapshot.load().object.clone(),
        }
    }

    /// Close the container.
    ///
    /// The current object's resources are released; subsequent checkouts
    /// fail with [`ContainerError::Closed`]. Closing twice is a no-op.
    pub fn close(&self) -> Result<(), ContainerError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let snap = self.snapshot.load();
        self.strategy
            .close(&snap.object)
            .map_err(|e| ContainerError::Close(Box::new(e)))
    }
}
