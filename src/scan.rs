//! Gathering text from neighboring chunks.
//!
//! ## The Algorithm
//!
//! Walk outward from the match one chunk at a time, nearest neighbor first.
//! Each neighbor loses the overlap it shares with the chunk closer to the
//! match, then contributes as much as still fits:
//!
//! ```text
//! limit = 8, overlap = 0, prior scan from chunk 3
//!
//! chunk 2: "dddd"     fits (4 <= 8)          -> "dddd"
//! chunk 1: "cccccc"   4 + 6 > 8, take last 4 -> "ccccdddd", stop
//! chunk 0: "aa"       never visited
//! ```
//!
//! The text touching the match is kept whole whenever it fits; farther
//! neighbors are the ones that get cut or skipped.
//!
//! ## Exact Fit
//!
//! The budget check happens before each neighbor and only stops the scan once
//! the gathered text is strictly longer than the limit. When the neighbors so
//! far fill the limit exactly, the next neighbor is taken whole, so the result
//! can overshoot by one neighbor:
//!
//! ```text
//! limit = 4, prior scan from chunk 2
//!
//! chunk 1: "abcd"   fits exactly (4 <= 4) -> "abcd"
//! chunk 0: "xyz"    4 is not > 4, taken whole -> "xyzabcd", stop
//! ```
//!
//! A zero limit never gathers anything.
//!
//! ## Direction
//!
//! | Scan | Visits | Overlap stripped from | Truncation keeps |
//! |------|--------|-----------------------|------------------|
//! | prior | `i-1, i-2, ..., 0` | end of neighbor | tail of neighbor |
//! | next | `i+1, i+2, ..., N-1` | start of neighbor | head of neighbor |
//!
//! In both cases the kept piece is the part closest to the match.

use crate::Measure;

/// A per-side scan: how much overlap to strip and how much text to gather.
///
/// ## Example
///
/// ```rust
/// use recombine::{BoundaryScan, Measure};
///
/// let chunks = ["AAAAA", "BBBBB", "CCCCC"];
/// let scan = BoundaryScan::new(3, 0, Measure::Chars);
///
/// assert_eq!(scan.prior(&chunks, 2), "BBB");
/// assert_eq!(scan.next(&chunks, 0), "BBB");
/// assert_eq!(scan.prior(&chunks, 0), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryScan {
    limit: usize,
    overlap: usize,
    measure: Measure,
}

impl BoundaryScan {
    /// Create a scan gathering up to `limit` units, stripping `overlap` units
    /// from each neighbor.
    #[must_use]
    pub const fn new(limit: usize, overlap: usize, measure: Measure) -> Self {
        Self {
            limit,
            overlap,
            measure,
        }
    }

    /// Units gathered before the scan saturates. The result may exceed it by
    /// one whole neighbor when earlier neighbors fill it exactly.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Text from the chunks before `current`, in document order.
    ///
    /// Empty if `current` is 0. An index past the end scans from the last
    /// chunk.
    #[must_use]
    pub fn prior<S: AsRef<str>>(&self, chunks: &[S], current: usize) -> String {
        let before = &chunks[..current.min(chunks.len())];
        let mut pieces: Vec<&str> = Vec::new();
        let mut gathered = 0;

        for neighbor in before.iter().rev() {
            if gathered > self.limit {
                break;
            }
            let neighbor = neighbor.as_ref();
            let text = self.measure.drop_tail(neighbor, self.overlap);
            self.note_degenerate(neighbor, text);
            let len = self.measure.len(text);

            if gathered + len <= self.limit {
                pieces.push(text);
                gathered += len;
            } else if gathered == self.limit && gathered > 0 {
                // Budget met exactly: the next neighbor comes in whole.
                tracing::trace!(current, len, "prior scan overshoots by one neighbor");
                pieces.push(text);
                gathered += len;
            } else {
                let left = self.limit - gathered;
                tracing::trace!(current, left, len, "prior scan saturated");
                pieces.push(self.measure.tail(text, left));
                break;
            }
        }

        pieces.iter().rev().copied().collect()
    }

    /// Text from the chunks after `current`, in document order.
    ///
    /// Empty if `current` is the last chunk (or past it).
    #[must_use]
    pub fn next<S: AsRef<str>>(&self, chunks: &[S], current: usize) -> String {
        let after = chunks.get(current.saturating_add(1)..).unwrap_or_default();
        let mut gathered_text = String::new();
        let mut gathered = 0;

        for neighbor in after {
            if gathered > self.limit {
                break;
            }
            let neighbor = neighbor.as_ref();
            let text = self.measure.drop_head(neighbor, self.overlap);
            self.note_degenerate(neighbor, text);
            let len = self.measure.len(text);

            if gathered + len <= self.limit {
                gathered_text.push_str(text);
                gathered += len;
            } else if gathered == self.limit && gathered > 0 {
                // Budget met exactly: the next neighbor comes in whole.
                tracing::trace!(current, len, "next scan overshoots by one neighbor");
                gathered_text.push_str(text);
                gathered += len;
            } else {
                let left = self.limit - gathered;
                tracing::trace!(current, left, len, "next scan saturated");
                gathered_text.push_str(self.measure.head(text, left));
                break;
            }
        }

        gathered_text
    }

    fn note_degenerate(&self, neighbor: &str, stripped: &str) {
        if self.overlap > 0 && stripped.is_empty() && !neighbor.is_empty() {
            tracing::debug!(
                overlap = self.overlap,
                len = self.measure.len(neighbor),
                "neighbor no longer than overlap, contributes nothing"
            );
        }
    }
}
