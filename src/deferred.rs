//! Deferred sequences: ordered results that are not computed yet.
//!
//! ## The Problem
//!
//! A retrieval pipeline is a chain of stages: search the index, window the
//! matches, trim to a token budget, format a prompt. Most stages are cheap
//! and pure, but the first one is slow and asynchronous. Writing every stage
//! as an `async fn` that awaits its predecessor couples them; computing each
//! stage eagerly means the chain runs before it is fully described.
//!
//! ## The Approach
//!
//! [`Deferred<T>`] wraps a computation that will eventually produce a
//! `Vec<T>`. Stages are attached with [`Deferred::compose`], which returns a
//! new `Deferred` and runs nothing:
//!
//! ```text
//! search() ──► Deferred<MatchRecord>
//!                   │ compose(window)
//!                   ▼
//!              Deferred<String>
//!                   │ compose(trim)
//!                   ▼
//!              Deferred<String> ──► .await  (everything runs here)
//! ```
//!
//! The underlying future is shared, so:
//!
//! - each registered transformation runs at most once, however many times the
//!   result is awaited;
//! - several transformations can hang off the same `Deferred`, and each sees
//!   the same resolved slice;
//! - a failure anywhere upstream skips every transformation below it and is
//!   reported, unchanged, to whoever awaits.
//!
//! Nothing here spawns tasks. Any executor can drive the futures.

use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt, Shared};

use crate::Result;

type SharedSequence<T> = Shared<BoxFuture<'static, Result<Arc<[T]>>>>;

/// An ordered sequence of `T` that becomes available later.
///
/// ## Example
///
/// ```rust
/// use futures::executor::block_on;
/// use recombine::Deferred;
///
/// let numbers = Deferred::new(async { Ok(vec![1, 2, 3]) });
/// let doubled = numbers.map(|xs| xs.iter().map(|x| x * 2).collect());
///
/// assert_eq!(&*block_on(doubled.resolve()).unwrap(), &[2, 4, 6]);
/// ```
#[must_use = "a deferred sequence does nothing until it is awaited"]
pub struct Deferred<T> {
    inner: SharedSequence<T>,
}

impl<T> Deferred<T>
where
    T: Send + Sync + 'static,
{
    /// Wrap a computation. It is not polled until the result is awaited.
    pub fn new<F>(computation: F) -> Self
    where
        F: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        Self {
            inner: computation
                .map(|items| items.map(Arc::from))
                .boxed()
                .shared(),
        }
    }

    /// A sequence whose items are already known.
    pub fn ready(items: Vec<T>) -> Self {
        Self::new(future::ready(Ok(items)))
    }

    /// A sequence whose producer has already failed.
    pub fn failed(error: crate::Error) -> Self {
        Self::new(future::ready(Err(error)))
    }

    /// Register a transformation to run once this sequence resolves.
    ///
    /// `f` receives the resolved items in order and must be a pure function
    /// of them. If this sequence fails, `f` never runs and the returned
    /// sequence fails with the same error. If `f` returns an error, the
    /// returned sequence fails with it.
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use recombine::{Deferred, Error};
    ///
    /// let words = Deferred::ready(vec!["a", "bb", "ccc"]);
    /// let lengths = words.compose(|ws| Ok(ws.iter().map(|w| w.len()).collect()));
    /// let checked = lengths.compose(|ls| {
    ///     if ls.contains(&0) {
    ///         Err(Error::upstream("empty word"))
    ///     } else {
    ///         Ok(ls.to_vec())
    ///     }
    /// });
    ///
    /// assert_eq!(&*block_on(checked.resolve()).unwrap(), &[1, 2, 3]);
    /// ```
    pub fn compose<U, F>(&self, f: F) -> Deferred<U>
    where
        U: Send + Sync + 'static,
        F: FnOnce(&[T]) -> Result<Vec<U>> + Send + 'static,
    {
        Deferred::new(apply(self.inner.clone(), f))
    }

    /// Register an infallible transformation. See [`compose`](Self::compose).
    pub fn map<U, F>(&self, f: F) -> Deferred<U>
    where
        U: Send + Sync + 'static,
        F: FnOnce(&[T]) -> Vec<U> + Send + 'static,
    {
        self.compose(move |items| Ok(f(items)))
    }

    /// Wait for the sequence.
    ///
    /// Awaiting again, or awaiting a clone, returns the same `Arc` without
    /// recomputing anything.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage in the chain.
    pub async fn resolve(&self) -> Result<Arc<[T]>> {
        self.inner.clone().await
    }

    /// The outcome, if the sequence has already been resolved.
    pub fn peek(&self) -> Option<&Result<Arc<[T]>>> {
        self.inner.peek()
    }

    /// Whether the sequence has been resolved (successfully or not).
    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }
}

async fn apply<T, U, F>(source: SharedSequence<T>, f: F) -> Result<Vec<U>>
where
    F: FnOnce(&[T]) -> Result<Vec<U>>,
{
    let items = source.await?;
    f(&items)
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Deferred<T>
where
    T: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

impl<T> From<Vec<T>> for Deferred<T>
where
    T: Send + Sync + 'static,
{
    fn from(items: Vec<T>) -> Self {
        Self::ready(items)
    }
}

impl<T> IntoFuture for Deferred<T>
where
    T: Send + Sync + 'static,
{
    type Output = Result<Arc<[T]>>;
    type IntoFuture = SharedSequence<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.inner
    }
}
