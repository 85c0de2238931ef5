//! The MatchRecord type: a retrieved chunk and where it came from.

use crate::{Error, Result};

/// A chunk identified as relevant, paired with its position in the chunk
/// sequence.
///
/// Records come from whatever retrieval step ran before windowing (vector
/// search, keyword search, a reranker). Only two facts matter here: the text
/// to place at the center of the window, and the index of the chunk it came
/// from.
///
/// ```rust
/// use recombine::MatchRecord;
///
/// let chunks = ["alpha ", "beta ", "gamma"];
/// let record = MatchRecord::from_chunk(&chunks, 1).unwrap();
///
/// assert_eq!(record.text, "beta ");
/// assert_eq!(record.source_index, 1);
/// ```
///
/// `text` does not have to equal the chunk at `source_index`; a highlighted
/// fragment works too. Context is always taken from the neighbors of
/// `source_index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    /// The matched text, placed unchanged at the center of the window.
    pub text: String,
    /// Zero-based index of the source chunk in the chunk sequence.
    pub source_index: usize,
}

impl MatchRecord {
    /// Create a new match record.
    #[must_use]
    pub fn new(text: impl Into<String>, source_index: usize) -> Self {
        Self {
            text: text.into(),
            source_index,
        }
    }

    /// Create a record whose text is the chunk at `source_index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `source_index >= chunks.len()`.
    pub fn from_chunk<S: AsRef<str>>(chunks: &[S], source_index: usize) -> Result<Self> {
        chunks
            .get(source_index)
            .map(|chunk| Self::new(chunk.as_ref(), source_index))
            .ok_or(Error::InvalidIndex {
                index: source_index,
                len: chunks.len(),
            })
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MatchRecord {{ source_index: {}, bytes: {} }}",
            self.source_index,
            self.text.len()
        )
    }
}
