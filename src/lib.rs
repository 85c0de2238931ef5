//! # recombine
//!
//! Context windows for retrieval-augmented generation (RAG) pipelines.
//!
//! ## The Problem
//!
//! Retrieval finds chunks; language models need passages. A chunk small enough
//! to embed well is usually too small to answer from: the pronoun's referent is
//! in the previous chunk, the number's unit is in the next one.
//!
//! Sending the whole document back is the other extreme. What you want is the
//! matched chunk plus a bounded amount of its neighborhood, glued back together
//! without the text the chunker duplicated between neighbors.
//!
//! ## Windows
//!
//! ```text
//! Chunks (overlap 3):
//!   0: "The cat sat o"
//!   1:           "t on the mat. It was"
//!   2:                           "was warm."
//!
//! Match: chunk 1, surrounding = 16 (8 behind, 8 ahead)
//!
//! behind: chunk 0 minus its last 3 chars, last 8 chars  -> "e cat sa"
//! ahead:  chunk 2 minus its first 3 chars, first 8 chars -> " warm."
//! window: "e cat sa" + "t on the mat. It was" + " warm."
//! ```
//!
//! Neighbors are visited nearest first, so the text touching the match survives
//! and only the far edges of the window are cut. See [`BoundaryScan`] for the
//! exact rules.
//!
//! ## Deferred Sequences
//!
//! Matches usually arrive asynchronously. [`Deferred`] lets you describe the
//! windowing step before the matches exist; the work happens when the final
//! result is awaited, and each step runs once.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::executor::block_on;
//! use recombine::{ContextWindower, Deferred, Error, MatchRecord};
//!
//! let chunks = vec![
//!     "The cat sat o".to_string(),
//!     "t on the mat. It was".to_string(),
//!     "was warm.".to_string(),
//! ];
//!
//! // Whatever produces matches: a vector index, BM25, a reranker...
//! let matches = Deferred::new(async {
//!     Ok::<_, Error>(vec![MatchRecord::new("t on the mat. It was", 1)])
//! });
//!
//! let windowed = ContextWindower::new(16)
//!     .with_overlap(3)
//!     .surround(&matches, chunks);
//!
//! let windows = block_on(windowed.resolve()).unwrap();
//! assert_eq!(windows[0], "e cat sat on the mat. It was warm.");
//! ```
//!
//! ## Units
//!
//! Budgets and overlaps count `char`s by default. [`Measure::Graphemes`]
//! counts user-perceived characters instead; pick whichever your chunker used.

mod deferred;
mod error;
mod measure;
mod params;
mod record;
mod scan;
mod window;

pub use deferred::Deferred;
pub use error::{Error, Result};
pub use measure::Measure;
pub use params::WindowParams;
pub use record::MatchRecord;
pub use scan::BoundaryScan;
pub use window::{surrounding_text, ContextWindower, Window};
