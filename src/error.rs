//! Error types for recombine.

/// Errors that can occur while building context windows.
///
/// `Clone` because a resolved [`Deferred`](crate::Deferred) hands the same
/// outcome to every observer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A match record points outside the chunk sequence.
    #[error("match index {index} out of range for {len} chunks")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of chunks in the sequence.
        len: usize,
    },

    /// A chunk is not longer than the declared overlap.
    #[error("overlap {overlap} is not smaller than chunk {index} (length {len})")]
    OverlapTooLarge {
        /// Position of the short chunk.
        index: usize,
        /// The declared overlap.
        overlap: usize,
        /// Length of the chunk, in the configured measure.
        len: usize,
    },

    /// The stage producing the sequence failed.
    #[error("upstream stage failed: {0}")]
    Upstream(String),
}

impl Error {
    /// Wrap a failure from the stage that produces matches.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Result type for recombine operations.
pub type Result<T> = std::result::Result<T, Error>;
