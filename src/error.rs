//! Structured error types for timegrid.
//!
//! Every failure is reported synchronously to the immediate caller; the core
//! performs no retries and keeps no deferred error channel.

/// All errors that can occur in timegrid state operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// An index outside its documented valid range.
    #[error("index {index} out of range (valid 0..{len})")]
    InvalidRange {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound that was in effect.
        len: usize,
    },

    /// A value that is malformed rather than merely out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An operation issued before its required collaborator was attached.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// An operation on a surface resource that has already been released.
    #[error("resource disposed: {0}")]
    Disposed(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
