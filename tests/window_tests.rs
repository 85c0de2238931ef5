//! End-to-end windowing scenarios.
//!
//! Each test drives the public API the way a retrieval pipeline would: matches
//! arrive through a [`Deferred`], windows come out through another.

use std::sync::Arc;

use futures::channel::oneshot;
use futures::executor::block_on;
use recombine::{ContextWindower, Deferred, Error, MatchRecord, Measure, WindowParams};

fn owned(chunks: &[&str]) -> Vec<String> {
    chunks.iter().map(|s| (*s).to_string()).collect()
}

fn surround(windower: ContextWindower, chunks: &[&str], records: Vec<MatchRecord>) -> Result<Vec<String>, Error> {
    let matches = Deferred::ready(records);
    block_on(windower.surround(&matches, owned(chunks)).resolve()).map(|out| out.to_vec())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn middle_match_with_even_budget() {
    let out = surround(
        ContextWindower::new(20),
        &["one two three ", "four five six ", "seven eight nine"],
        vec![MatchRecord::new("four five six ", 1)],
    )
    .unwrap();
    assert_eq!(out, ["two three four five six seven eigh"]);
}

#[test]
fn nearest_neighbor_saturates_budget() {
    let out = surround(
        ContextWindower::new(6),
        &["AAAAA", "BBBBB", "CCCCC"],
        vec![MatchRecord::new("CCCCC", 2)],
    )
    .unwrap();
    // behind budget 3: only "BBB", chunk 0 never contributes
    assert_eq!(out, ["BBBCCCCC"]);
}

#[test]
fn exact_fit_overshoots_by_one_neighbor() {
    // 8 -> 4 behind, 4 ahead; "abcd" meets each budget exactly
    let out = surround(
        ContextWindower::new(8),
        &["xyz", "abcd", "M", "abcd", "xyz"],
        vec![MatchRecord::new("M", 2)],
    )
    .unwrap();
    assert_eq!(out, ["xyzabcdMabcdxyz"]);
}

#[test]
fn first_and_last_chunks_have_one_sided_context() {
    let out = surround(
        ContextWindower::new(100),
        &["alpha ", "beta ", "gamma"],
        vec![MatchRecord::new("alpha ", 0), MatchRecord::new("gamma", 2)],
    )
    .unwrap();
    assert_eq!(out, ["alpha beta gamma", "alpha beta gamma"]);
}

#[test]
fn overlap_is_not_duplicated() {
    let out = surround(
        ContextWindower::new(100).with_overlap(3),
        &["Hello wor", "world, hi"],
        vec![MatchRecord::new("world, hi", 1)],
    )
    .unwrap();
    assert_eq!(out, ["Hello world, hi"]);
}

#[test]
fn zero_budget_returns_match_text() {
    let records = vec![
        MatchRecord::new("beta ", 1),
        MatchRecord::new("a fragment", 0),
    ];
    let out = surround(ContextWindower::new(0), &["alpha ", "beta ", "gamma"], records).unwrap();
    assert_eq!(out, ["beta ", "a fragment"]);
}

#[test]
fn odd_budget_drops_a_unit() {
    // 5 -> 2 behind, 2 ahead
    let out = surround(
        ContextWindower::new(5),
        &["abc", "M", "xyz"],
        vec![MatchRecord::new("M", 1)],
    )
    .unwrap();
    assert_eq!(out, ["bcMxy"]);
}

#[test]
fn duplicate_matches_are_kept() {
    let out = surround(
        ContextWindower::new(2),
        &["ab", "cd", "ef"],
        vec![MatchRecord::new("cd", 1), MatchRecord::new("cd", 1)],
    )
    .unwrap();
    assert_eq!(out, ["bcde", "bcde"]);
}

#[test]
fn grapheme_measure_keeps_clusters() {
    let windower = ContextWindower::new(2).with_measure(Measure::Graphemes);
    assert_eq!(
        *windower.params(),
        WindowParams::new(2).with_measure(Measure::Graphemes)
    );
    let out = surround(
        windower,
        &["cafe\u{301}", " noir"],
        vec![MatchRecord::new(" noir", 1)],
    )
    .unwrap();
    assert_eq!(out, ["e\u{301} noir"]);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn index_equal_to_len_fails_everything() {
    let err = surround(
        ContextWindower::new(10),
        &["a", "b"],
        vec![MatchRecord::new("a", 0), MatchRecord::new("?", 2)],
    )
    .unwrap_err();
    assert_eq!(err, Error::InvalidIndex { index: 2, len: 2 });
}

#[test]
fn upstream_failure_reaches_caller() {
    let matches: Deferred<MatchRecord> = Deferred::new(async { Err(Error::upstream("vector store timed out")) });
    let windowed = ContextWindower::new(10).surround(&matches, owned(&["a"]));
    assert_eq!(
        block_on(windowed.resolve()).unwrap_err(),
        Error::Upstream("vector store timed out".into())
    );
}

// =============================================================================
// Deferred behavior
// =============================================================================

#[test]
fn windowing_waits_for_matches() {
    let (tx, rx) = oneshot::channel();
    let matches = Deferred::new(async move { rx.await.map_err(Error::upstream) });
    let windowed = ContextWindower::new(4).surround(&matches, owned(&["ab", "cd", "ef"]));

    assert!(!windowed.is_resolved());
    tx.send(vec![MatchRecord::new("cd", 1)]).unwrap();

    let out = block_on(windowed.resolve()).unwrap();
    assert_eq!(&*out, &["abcdef".to_string()]);
    assert!(windowed.is_resolved());
}

#[test]
fn several_windowers_over_one_match_set() {
    let chunks: Arc<[String]> = owned(&["one ", "two ", "three"]).into();
    let matches = Deferred::ready(vec![MatchRecord::new("two ", 1)]);

    let narrow = ContextWindower::new(2).surround(&matches, Arc::clone(&chunks));
    let wide = ContextWindower::new(100).surround(&matches, Arc::clone(&chunks));
    let parts = ContextWindower::new(2).windows(&matches, chunks);

    assert_eq!(&*block_on(wide.resolve()).unwrap(), &["one two three".to_string()]);
    assert_eq!(&*block_on(narrow.resolve()).unwrap(), &[" two t".to_string()]);

    let parts = block_on(parts.resolve()).unwrap();
    assert_eq!(parts[0].behind, " ");
    assert_eq!(parts[0].ahead, "t");
}

#[test]
fn windows_chain_into_further_stages() {
    let matches = Deferred::ready(vec![
        MatchRecord::new("beta ", 1),
        MatchRecord::new("gamma", 2),
    ]);
    let prompt = ContextWindower::new(100)
        .surround(&matches, owned(&["alpha ", "beta ", "gamma"]))
        .map(|windows| {
            windows
                .iter()
                .enumerate()
                .map(|(i, w)| format!("[{i}] {w}"))
                .collect()
        });

    let prompt = block_on(prompt.resolve()).unwrap();
    assert_eq!(
        &*prompt,
        &[
            "[0] alpha beta gamma".to_string(),
            "[1] alpha beta gamma".to_string()
        ]
    );
}

#[test]
fn records_from_chunks_round_trip() {
    let chunks = ["intro ", "body ", "outro"];
    let records = (0..chunks.len())
        .map(|i| MatchRecord::from_chunk(&chunks, i))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let out = surround(ContextWindower::new(0), &chunks, records).unwrap();
    assert_eq!(out, chunks);
}

#[cfg(feature = "serde")]
#[test]
fn records_decode_from_json() {
    let records: Vec<MatchRecord> =
        serde_json::from_str(r#"[{"text":"beta ","source_index":1}]"#).unwrap();
    let out = surround(ContextWindower::new(100), &["alpha ", "beta ", "gamma"], records).unwrap();
    assert_eq!(out, ["alpha beta gamma"]);

    let params: WindowParams = serde_json::from_str(r#"{"surrounding_characters":10}"#).unwrap();
    assert_eq!(params, WindowParams::new(10));
}
