//! Context windows around matched chunks.
//!
//! ## The Problem
//!
//! Retrieval works on small chunks because small chunks embed precisely. A
//! language model answering from a single chunk, though, often sees a
//! sentence with its subject in the previous chunk and its conclusion in the
//! next one. Handing over the whole document defeats the point of retrieval.
//!
//! ## The Fix: Re-grow the Chunk
//!
//! Keep the matched chunk as-is and re-attach a bounded amount of text from
//! its neighbors:
//!
//! ```text
//! chunks:  ["one two three ", "four five six ", "seven eight nine"]
//! match:   chunk 1
//! surrounding = 20  ->  10 behind, 10 ahead
//!
//!          "two three " + "four five six " + "seven eigh"
//!           └ behind ┘     └── match ───┘     └ ahead ┘
//! ```
//!
//! The behind and ahead text come from [`BoundaryScan`], so the same overlap
//! stripping and nearest-first truncation apply on both sides.
//!
//! ## Deferred or Immediate
//!
//! | Method | Input | Output |
//! |--------|-------|--------|
//! | [`ContextWindower::surround`] | `Deferred<MatchRecord>` | `Deferred<String>` |
//! | [`ContextWindower::windows`] | `Deferred<MatchRecord>` | `Deferred<Window>` |
//! | [`ContextWindower::window_all`] | `&[MatchRecord]` | `Result<Vec<Window>>` |
//! | [`ContextWindower::window`] | `&MatchRecord` | `Result<Window>` |
//!
//! A single out-of-range index fails the whole batch; there are no partial
//! results.

use std::sync::Arc;

use crate::{BoundaryScan, Deferred, Error, MatchRecord, Measure, Result, WindowParams};

/// A match with the context gathered around it.
///
/// The three text fields concatenated in order give the windowed string, and
/// that is what [`Display`](std::fmt::Display) and
/// [`into_string`](Window::into_string) produce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// Index of the matched chunk.
    pub source_index: usize,
    /// Context taken from the preceding chunks.
    pub behind: String,
    /// The matched text.
    pub text: String,
    /// Context taken from the following chunks.
    pub ahead: String,
}

impl Window {
    /// Total length of the window in bytes.
    ///
    /// Budgets are counted in a [`Measure`]; use [`measured_len`](Self::measured_len)
    /// to compare against them.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behind.len() + self.text.len() + self.ahead.len()
    }

    /// Total length of the window in `measure` units.
    #[must_use]
    pub fn measured_len(&self, measure: Measure) -> usize {
        measure.len(&self.behind) + measure.len(&self.text) + measure.len(&self.ahead)
    }

    /// Whether the window holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate behind, match and ahead text.
    #[must_use]
    pub fn into_string(self) -> String {
        let mut joined = self.behind;
        joined.reserve(self.text.len() + self.ahead.len());
        joined.push_str(&self.text);
        joined.push_str(&self.ahead);
        joined
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.behind, self.text, self.ahead)
    }
}

impl From<Window> for String {
    fn from(window: Window) -> Self {
        window.into_string()
    }
}

/// Builds context windows for match records.
///
/// ## Example
///
/// ```rust
/// use futures::executor::block_on;
/// use recombine::{ContextWindower, Deferred, MatchRecord};
///
/// let chunks = vec![
///     "one two three ".to_string(),
///     "four five six ".to_string(),
///     "seven eight nine".to_string(),
/// ];
/// let matches = Deferred::ready(vec![MatchRecord::new("four five six ", 1)]);
///
/// let windowed = ContextWindower::new(20).surround(&matches, chunks);
///
/// let results = block_on(windowed.resolve()).unwrap();
/// assert_eq!(results[0], "two three four five six seven eigh");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindower {
    params: WindowParams,
}

impl ContextWindower {
    /// Create a windower with `surrounding_characters` of total context and
    /// no overlap.
    #[must_use]
    pub const fn new(surrounding_characters: usize) -> Self {
        Self::from_params(WindowParams::new(surrounding_characters))
    }

    /// Create a windower from full parameters.
    #[must_use]
    pub const fn from_params(params: WindowParams) -> Self {
        Self { params }
    }

    /// Set the overlap the chunks were produced with.
    #[must_use]
    pub const fn with_overlap(self, overlap: usize) -> Self {
        Self::from_params(self.params.with_overlap(overlap))
    }

    /// Set the unit budgets and overlap are counted in.
    #[must_use]
    pub const fn with_measure(self, measure: Measure) -> Self {
        Self::from_params(self.params.with_measure(measure))
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &WindowParams {
        &self.params
    }

    fn behind_scan(&self) -> BoundaryScan {
        BoundaryScan::new(
            self.params.behind_budget(),
            self.params.overlap(),
            self.params.measure(),
        )
    }

    fn ahead_scan(&self) -> BoundaryScan {
        BoundaryScan::new(
            self.params.ahead_budget(),
            self.params.overlap(),
            self.params.measure(),
        )
    }

    /// Build the window for one record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if the record's index is not a valid
    /// position in `chunks`.
    pub fn window<S: AsRef<str>>(&self, record: &MatchRecord, chunks: &[S]) -> Result<Window> {
        let index = record.source_index;
        if index >= chunks.len() {
            tracing::warn!(index, len = chunks.len(), "match index out of range");
            return Err(Error::InvalidIndex {
                index,
                len: chunks.len(),
            });
        }

        Ok(Window {
            source_index: index,
            behind: self.behind_scan().prior(chunks, index),
            text: record.text.clone(),
            ahead: self.ahead_scan().next(chunks, index),
        })
    }

    /// Build windows for every record, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first record with an invalid index; no windows are
    /// returned in that case.
    pub fn window_all<S: AsRef<str>>(
        &self,
        records: &[MatchRecord],
        chunks: &[S],
    ) -> Result<Vec<Window>> {
        tracing::debug!(
            matches = records.len(),
            chunks = chunks.len(),
            behind = self.params.behind_budget(),
            ahead = self.params.ahead_budget(),
            overlap = self.params.overlap(),
            "building context windows"
        );
        records
            .iter()
            .map(|record| self.window(record, chunks))
            .collect()
    }

    /// Register window building on a deferred sequence of matches.
    ///
    /// Nothing runs until the returned sequence is awaited. `chunks` is shared
    /// read-only, so the same `Arc` can be handed to several windowers.
    pub fn windows<S>(
        &self,
        matches: &Deferred<MatchRecord>,
        chunks: impl Into<Arc<[S]>>,
    ) -> Deferred<Window>
    where
        S: AsRef<str> + Send + Sync + 'static,
    {
        let windower = *self;
        let chunks = chunks.into();
        matches.compose(move |records| windower.window_all(records, &chunks))
    }

    /// Register window building and flatten each window to a string.
    ///
    /// The `n`th string belongs to the `n`th match record.
    pub fn surround<S>(
        &self,
        matches: &Deferred<MatchRecord>,
        chunks: impl Into<Arc<[S]>>,
    ) -> Deferred<String>
    where
        S: AsRef<str> + Send + Sync + 'static,
    {
        let windower = *self;
        let chunks = chunks.into();
        matches.compose(move |records| {
            Ok(windower
                .window_all(records, &chunks)?
                .into_iter()
                .map(Window::into_string)
                .collect())
        })
    }
}

impl From<WindowParams> for ContextWindower {
    fn from(params: WindowParams) -> Self {
        Self::from_params(params)
    }
}

/// Shorthand for `ContextWindower::new(surrounding).with_overlap(overlap)`,
/// with a missing overlap meaning 0.
///
/// ```rust
/// use recombine::surrounding_text;
///
/// let windower = surrounding_text(200, Some(20));
/// assert_eq!(windower.params().behind_budget(), 100);
/// assert_eq!(windower.params().overlap(), 20);
/// ```
#[must_use]
pub fn surrounding_text(surrounding_characters: usize, overlap: Option<usize>) -> ContextWindower {
    ContextWindower::new(surrounding_characters).with_overlap(overlap.unwrap_or(0))
}
