//! Reload strategy contract.
//!
//! A strategy bundles the three reload capabilities for one kind of managed
//! resource: building a fresh object from a configuration, classifying a
//! configuration delta, and patching a live object in place. Binding them
//! through one generic parameter makes handing the container an object built
//! by a different factory a compile error instead of a runtime assertion.

/// Outcome of comparing the applied configuration against an observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    /// The configurations are equal; the current object keeps serving.
    Unchanged,
    /// Something differs; the object must be reset before serving.
    NeedsReset,
}

/// Capabilities required to manage one kind of reloadable resource.
pub trait ReloadStrategy {
    /// Configuration value the strategy understands. Plain data, compared
    /// by value.
    type Config: Clone;

    /// Live object built from a configuration; may own OS resources.
    type Object;

    /// Error produced by build/reset/close.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a fresh object from a configuration snapshot.
    fn build(&self, config: &Self::Config) -> Result<Self::Object, Self::Error>;

    /// Classify the delta between the applied and the observed configuration.
    ///
    /// Must be value equality: structurally equal but distinct instances
    /// yield [`CompareOutcome::Unchanged`].
    fn compare(&self, applied: &Self::Config, observed: &Self::Config) -> CompareOutcome;

    /// Bring the live object's behavior in line with the observed
    /// configuration.
    ///
    /// Only invoked after [`compare`](Self::compare) signaled
    /// [`CompareOutcome::NeedsReset`]. On failure the object must remain in
    /// its pre-reset state, fully usable.
    fn reset(
        &self,
        object: &Self::Object,
        applied: &Self::Config,
        observed: &Self::Config,
    ) -> Result<(), Self::Error>;

    /// Release the object's owned resources.
    fn close(&self, object: &Self::Object) -> Result<(), Self::Error>;
}
