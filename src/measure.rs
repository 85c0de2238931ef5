//! Units for budgets and overlaps.
//!
//! Rust strings are UTF-8, so a "character budget" needs a definition before
//! any slicing happens. Byte offsets would panic (or split a code point) as
//! soon as a neighbor contains non-ASCII text:
//!
//! ```text
//! "naïve"   bytes: n a [0xC3 0xAF] v e   len = 6
//!           chars: n a ï v e             len = 5
//! ```
//!
//! [`Measure::Chars`] counts Unicode scalar values and is the default.
//! [`Measure::Graphemes`] counts extended grapheme clusters (UAX #29), which
//! keeps combining marks and emoji sequences intact at the cost of a slower
//! scan:
//!
//! ```text
//! "e\u{301}"   chars: 2   graphemes: 1   (é written as e + combining acute)
//! ```
//!
//! Every slice returned here starts and ends on a unit boundary.

use unicode_segmentation::UnicodeSegmentation;

/// The unit in which window budgets and chunk overlaps are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Measure {
    /// Unicode scalar values (`char`).
    #[default]
    Chars,
    /// Extended grapheme clusters.
    Graphemes,
}

impl Measure {
    /// Length of `text` in this unit.
    ///
    /// ```rust
    /// use recombine::Measure;
    ///
    /// assert_eq!(Measure::Chars.len("naïve"), 5);
    /// assert_eq!(Measure::Graphemes.len("e\u{301}"), 1);
    /// ```
    #[must_use]
    pub fn len(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Graphemes => text.graphemes(true).count(),
        }
    }

    /// The first `n` units of `text` (all of it if shorter).
    #[must_use]
    pub fn head(self, text: &str, n: usize) -> &str {
        &text[..self.offset_from_start(text, n)]
    }

    /// The last `n` units of `text` (all of it if shorter).
    #[must_use]
    pub fn tail(self, text: &str, n: usize) -> &str {
        &text[self.offset_from_end(text, n)..]
    }

    /// `text` without its first `n` units; empty if `n` covers everything.
    #[must_use]
    pub fn drop_head(self, text: &str, n: usize) -> &str {
        &text[self.offset_from_start(text, n)..]
    }

    /// `text` without its last `n` units; empty if `n` covers everything.
    #[must_use]
    pub fn drop_tail(self, text: &str, n: usize) -> &str {
        &text[..self.offset_from_end(text, n)]
    }

    /// Byte offset of the boundary `n` units after the start, clamped to the end.
    fn offset_from_start(self, text: &str, n: usize) -> usize {
        match self {
            Self::Chars => text.char_indices().nth(n).map_or(text.len(), |(i, _)| i),
            Self::Graphemes => text
                .grapheme_indices(true)
                .nth(n)
                .map_or(text.len(), |(i, _)| i),
        }
    }

    /// Byte offset of the boundary `n` units before the end, clamped to zero.
    fn offset_from_end(self, text: &str, n: usize) -> usize {
        if n == 0 {
            return text.len();
        }
        match self {
            Self::Chars => text.char_indices().nth_back(n - 1).map_or(0, |(i, _)| i),
            Self::Graphemes => text
                .grapheme_indices(true)
                .nth_back(n - 1)
                .map_or(0, |(i, _)| i),
        }
    }
}
