//! Lazy sequence adapters over fallible streams.
//!
//! The suspending counterparts of [`sync::seq`](crate::sync). Each adapter
//! consumes `Stream<Item = Result<T>>`, preserves order, holds at most one
//! upstream element, and ends the stream after yielding an error.

use std::borrow::Borrow;
use std::future::Future;

use async_stream::try_stream;
use futures::pin_mut;
use futures::{Stream, StreamExt};

use crate::error::Result;
use crate::predicate::AsyncPredicate;

/// Lazily filter a fallible stream with an [`AsyncPredicate`].
///
/// Order preserving and strict: the decision for element *i + 1* is not
/// started before element *i*'s is resolved. A predicate failure is yielded
/// at the element it occurred at and ends the stream.
pub fn filter<S, T, P, B>(sequence: S, predicate: P) -> impl Stream<Item = Result<T>> + Send
where
    S: Stream<Item = Result<T>> + Send,
    T: Borrow<B> + Send,
    P: AsyncPredicate<B>,
    B: ?Sized + Sync,
{
    try_stream! {
        pin_mut!(sequence);
        while let Some(item) = sequence.next().await {
            let value = item?;
            if predicate.test(value.borrow()).await? {
                yield value;
            }
        }
    }
}

/// Lazily apply a suspending, fallible `f` to every element.
///
/// An `Err` from `f` is yielded in place of the element and ends the
/// stream.
pub fn map<S, T, U, F, Fut>(sequence: S, mut f: F) -> impl Stream<Item = Result<U>> + Send
where
    S: Stream<Item = Result<T>> + Send,
    T: Send,
    U: Send,
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<U>> + Send,
{
    try_stream! {
        pin_mut!(sequence);
        while let Some(item) = sequence.next().await {
            let value = item?;
            yield f(value).await?;
        }
    }
}

/// Lazily apply a suspending, multi-valued `f` to every element.
///
/// `f` may return no outputs (the element is dropped), one, or many
/// (emitted in returned order); outputs for element *i* always precede
/// outputs for element *i + 1*.
pub fn multi_map<S, T, U, F, Fut>(sequence: S, mut f: F) -> impl Stream<Item = Result<U>> + Send
where
    S: Stream<Item = Result<T>> + Send,
    T: Send,
    U: Send,
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<Vec<U>>> + Send,
{
    try_stream! {
        pin_mut!(sequence);
        while let Some(item) = sequence.next().await {
            let value = item?;
            for out in f(value).await? {
                yield out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::error::FindError;

    #[tokio::test]
    async fn filter_preserves_order() {
        let source = stream::iter([1, 2, 3, 4, 5].map(Ok));
        let even = filter(source, |n: &i32| Ok(n % 2 == 0));
        pin_mut!(even);

        let mut kept = Vec::new();
        while let Some(item) = even.next().await {
            kept.push(item.unwrap());
        }
        assert_eq!(kept, vec![2, 4]);
    }

    #[tokio::test]
    async fn filter_ends_after_predicate_error() {
        let source = stream::iter([1, 2, 3].map(Ok));
        let seq = filter(source, |n: &i32| {
            if *n == 2 {
                Err(FindError::predicate("two"))
            } else {
                Ok(true)
            }
        });
        pin_mut!(seq);

        assert_eq!(seq.next().await.unwrap().unwrap(), 1);
        assert!(seq.next().await.unwrap().is_err());
        assert!(seq.next().await.is_none());
    }

    #[tokio::test]
    async fn map_transforms_in_order() {
        let source = stream::iter([1, 2, 3].map(Ok));
        let doubled = map(source, |n| async move { Ok(n * 2) });
        pin_mut!(doubled);

        let mut out = Vec::new();
        while let Some(item) = doubled.next().await {
            out.push(item.unwrap());
        }
        assert_eq!(out, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn multi_map_expands_drops_and_replaces() {
        let source = stream::iter([1, 2, 3].map(Ok));
        let seq = multi_map(source, |n| async move {
            Ok(match n {
                1 => vec![10, 11],
                2 => vec![],
                other => vec![other],
            })
        });
        pin_mut!(seq);

        let mut out = Vec::new();
        while let Some(item) = seq.next().await {
            out.push(item.unwrap());
        }
        assert_eq!(out, vec![10, 11, 3]);
    }
}
