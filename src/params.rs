//! Window parameters.
//!
//! ## Budgets
//!
//! A window asks for `surrounding_characters` of context in total. The total
//! is split with floor division, and each side gets the same half:
//!
//! ```text
//! surrounding = 20  ->  behind 10 | match | ahead 10
//! surrounding = 21  ->  behind 10 | match | ahead 10   (one unit unused)
//! ```
//!
//! The dropped unit on odd totals is deliberate; windows built with the same
//! parameters stay comparable across releases.
//!
//! ## Overlap
//!
//! Chunkers usually repeat the tail of chunk `i` at the head of chunk `i + 1`.
//! Re-gluing neighbors without accounting for it duplicates text:
//!
//! ```text
//! overlap = 3
//! chunk 0: "Hello wor"
//! chunk 1:       "world, hi"
//!                 ^^^ shared
//!
//! naive:    "Hello wor" + "world, hi" = "Hello worworld, hi"
//! stripped: "Hello "    + "world, hi" = "Hello world, hi"
//! ```
//!
//! The overlap must be the one the chunker used; it is never inferred.

use crate::{Error, Measure, Result};

/// Configuration for a [`ContextWindower`](crate::ContextWindower).
///
/// # Examples
///
/// ```rust
/// use recombine::{Measure, WindowParams};
///
/// let params = WindowParams::new(21).with_overlap(3);
/// assert_eq!(params.behind_budget(), 10);
/// assert_eq!(params.ahead_budget(), 10);
/// assert_eq!(params.overlap(), 3);
/// assert_eq!(params.measure(), Measure::Chars);
///
/// // Shorthand conversions
/// let params = WindowParams::from((200, 20));
/// assert_eq!(params.surrounding_characters(), 200);
/// assert_eq!(params.overlap(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowParams {
    surrounding_characters: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    overlap: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    measure: Measure,
}

impl WindowParams {
    /// Parameters with no overlap, counting in chars.
    #[must_use]
    pub const fn new(surrounding_characters: usize) -> Self {
        Self {
            surrounding_characters,
            overlap: 0,
            measure: Measure::Chars,
        }
    }

    /// Set the overlap the chunks were produced with.
    #[must_use]
    pub const fn with_overlap(self, overlap: usize) -> Self {
        Self { overlap, ..self }
    }

    /// Set the unit budgets and overlap are counted in.
    #[must_use]
    pub const fn with_measure(self, measure: Measure) -> Self {
        Self { measure, ..self }
    }

    /// Total requested context around each match.
    #[must_use]
    pub const fn surrounding_characters(&self) -> usize {
        self.surrounding_characters
    }

    /// Units shared by adjacent chunks.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Unit used for budgets and overlap.
    #[must_use]
    pub const fn measure(&self) -> Measure {
        self.measure
    }

    /// Context allowed before the match.
    #[must_use]
    pub const fn behind_budget(&self) -> usize {
        self.surrounding_characters / 2
    }

    /// Context allowed after the match.
    #[must_use]
    pub const fn ahead_budget(&self) -> usize {
        self.surrounding_characters / 2
    }

    /// Check that every chunk is strictly longer than the overlap.
    ///
    /// Windowing never calls this: short chunks only produce short (possibly
    /// empty) context. Call it when a chunk sequence comes from an untrusted
    /// splitter and you would rather fail loudly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverlapTooLarge`] for the first offending chunk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recombine::WindowParams;
    ///
    /// let params = WindowParams::new(100).with_overlap(3);
    /// assert!(params.check_overlap(&["Hello wor", "world, hi"]).is_ok());
    /// assert!(params.check_overlap(&["Hello wor", "wo"]).is_err());
    /// ```
    pub fn check_overlap<S: AsRef<str>>(&self, chunks: &[S]) -> Result<()> {
        if self.overlap == 0 {
            return Ok(());
        }
        for (index, chunk) in chunks.iter().enumerate() {
            let len = self.measure.len(chunk.as_ref());
            if len <= self.overlap {
                return Err(Error::OverlapTooLarge {
                    index,
                    overlap: self.overlap,
                    len,
                });
            }
        }
        Ok(())
    }
}

impl From<usize> for WindowParams {
    fn from(surrounding_characters: usize) -> Self {
        Self::new(surrounding_characters)
    }
}

impl From<(usize, usize)> for WindowParams {
    fn from((surrounding_characters, overlap): (usize, usize)) -> Self {
        Self::new(surrounding_characters).with_overlap(overlap)
    }
}
