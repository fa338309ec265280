//! Lazy sequence adapters over fallible iterators.
//!
//! All adapters consume `Iterator<Item = Result<T>>`, preserve order, pull
//! at most one upstream element ahead of the consumer, and fuse after
//! yielding an error: once an `Err` has been produced, the sequence ends.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::error::Result;
use crate::predicate::Predicate;

/// Keep only the elements the predicate accepts. See [`filter`].
pub struct Filter<I, P, B: ?Sized> {
    iter: I,
    predicate: P,
    done: bool,
    _subject: PhantomData<fn(&B) -> bool>,
}

/// Lazily filter a fallible sequence with a [`Predicate`].
///
/// Order is preserved and evaluation is strict: the predicate for element
/// *i + 1* is not invoked before element *i*'s decision is resolved. A
/// predicate failure is yielded at the element it occurred at and ends the
/// sequence — nothing after it is produced.
pub fn filter<I, T, P, B>(sequence: I, predicate: P) -> Filter<I, P, B>
where
    I: Iterator<Item = Result<T>>,
    T: Borrow<B>,
    P: Predicate<B>,
    B: ?Sized,
{
    Filter {
        iter: sequence,
        predicate,
        done: false,
        _subject: PhantomData,
    }
}

impl<I, T, P, B> Iterator for Filter<I, P, B>
where
    I: Iterator<Item = Result<T>>,
    T: Borrow<B>,
    P: Predicate<B>,
    B: ?Sized,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.iter.next() {
                None => return None,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(value)) => match self.predicate.test(value.borrow()) {
                    Ok(true) => return Some(Ok(value)),
                    Ok(false) => continue,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
            }
        }
    }
}

/// Transform each element with a fallible function. See [`map`].
pub struct Map<I, F> {
    iter: I,
    f: F,
    done: bool,
}

/// Lazily apply `f` to every element of a fallible sequence.
///
/// An `Err` from `f` is yielded in place of the element and ends the
/// sequence.
pub fn map<I, T, U, F>(sequence: I, f: F) -> Map<I, F>
where
    I: Iterator<Item = Result<T>>,
    F: FnMut(T) -> Result<U>,
{
    Map {
        iter: sequence,
        f,
        done: false,
    }
}

impl<I, T, U, F> Iterator for Map<I, F>
where
    I: Iterator<Item = Result<T>>,
    F: FnMut(T) -> Result<U>,
{
    type Item = Result<U>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.iter.next()? {
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            Ok(value) => {
                let out = (self.f)(value);
                if out.is_err() {
                    self.done = true;
                }
                Some(out)
            }
        }
    }
}

/// Expand each element into zero or more outputs. See [`multi_map`].
pub struct MultiMap<I, F, U> {
    iter: I,
    f: F,
    pending: VecDeque<U>,
    done: bool,
}

/// Lazily apply a multi-valued `f` to every element.
///
/// `f` may return no outputs (the element is dropped), one, or many
/// (emitted in returned order). Outputs for element *i* always precede
/// outputs for element *i + 1*; only the outputs of a single upstream
/// element are ever buffered.
pub fn multi_map<I, T, U, F>(sequence: I, f: F) -> MultiMap<I, F, U>
where
    I: Iterator<Item = Result<T>>,
    F: FnMut(T) -> Result<Vec<U>>,
{
    MultiMap {
        iter: sequence,
        f,
        pending: VecDeque::new(),
        done: false,
    }
}

impl<I, T, U, F> Iterator for MultiMap<I, F, U>
where
    I: Iterator<Item = Result<T>>,
    F: FnMut(T) -> Result<Vec<U>>,
{
    type Item = Result<U>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(out) = self.pending.pop_front() {
                return Some(Ok(out));
            }
            if self.done {
                return None;
            }
            match self.iter.next()? {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Ok(value) => match (self.f)(value) {
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    Ok(outputs) => self.pending.extend(outputs),
                },
            }
        }
    }
}
