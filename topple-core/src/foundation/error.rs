/// Convenience result type used across Topple.
pub type ToppleResult<T> = Result<T, ToppleError>;

/// Top-level error taxonomy used by layout APIs.
///
/// Every variant is a construction-time logic error: layout is deterministic
/// and pure, so there are no partial-failure or retry semantics.
#[derive(thiserror::Error, Debug)]
pub enum ToppleError {
    /// Invalid caller-provided geometry or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced child or port name does not exist at this nesting level.
    #[error("no child or port named '{0}'")]
    KeyNotFound(String),

    /// A default lookup was attempted where more than one candidate exists.
    #[error("ambiguous lookup: {0}")]
    AmbiguousLookup(String),

    /// The curvature search bracket failed to narrow below tolerance.
    #[error("curvature search did not converge: {0}")]
    Search(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToppleError {
    /// Build a [`ToppleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ToppleError::KeyNotFound`] value.
    pub fn key_not_found(name: impl Into<String>) -> Self {
        Self::KeyNotFound(name.into())
    }

    /// Build a [`ToppleError::AmbiguousLookup`] value.
    pub fn ambiguous(msg: impl Into<String>) -> Self {
        Self::AmbiguousLookup(msg.into())
    }

    /// Build a [`ToppleError::Search`] value.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }
}
