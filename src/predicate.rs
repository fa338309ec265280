use async_trait::async_trait;

use crate::error::Result;

/// Decides whether a single element matches.
///
/// Implement this to define custom matching logic over any element type —
/// paths, strings, or anything a lazy sequence produces. The built-in
/// constructors ([`of_basename`](crate::of_basename) and friends) all return
/// types implementing this trait.
///
/// # Contract
///
/// A predicate must be side-effect-free with respect to the sequence it
/// filters: it may read the filesystem, but it must not mutate traversal
/// state. Returning `Err` aborts the enclosing sequence or finder call —
/// the failure is propagated verbatim, never retried or swallowed.
///
/// # Thread Safety
///
/// `Send + Sync` are required so predicates can be boxed and shared between
/// the synchronous and suspending renderings.
///
/// # Example
///
/// ```rust
/// use pathseek::Predicate;
///
/// let longer_than_three = |s: &str| Ok(s.len() > 3);
/// assert!(longer_than_three.test("main").unwrap());
/// assert!(!longer_than_three.test("rs").unwrap());
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Returns `true` if the value matches.
    fn test(&self, value: &T) -> Result<bool>;
}

impl<T, F> Predicate<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> Result<bool> + Send + Sync,
{
    fn test(&self, value: &T) -> Result<bool> {
        self(value)
    }
}

/// Owned, type-erased predicate. Finder entry points take lists of these.
pub type BoxPredicate<T> = Box<dyn Predicate<T>>;

/// The suspending form of [`Predicate`].
///
/// Every synchronous predicate is automatically usable where a suspending
/// one is expected (blanket impl), so predicate lists handed to the
/// [`stream`](crate::stream) finders may freely mix immediate and
/// suspending members. Implement this directly (via `async_trait`) when the
/// test itself must await filesystem I/O.
#[async_trait]
pub trait AsyncPredicate<T: ?Sized>: Send + Sync {
    /// Returns `true` if the value matches. May suspend.
    async fn test(&self, value: &T) -> Result<bool>;
}

/// Owned, type-erased suspending predicate.
pub type BoxAsyncPredicate<T> = Box<dyn AsyncPredicate<T>>;

#[async_trait]
impl<T, P> AsyncPredicate<T> for P
where
    T: ?Sized + Sync,
    P: Predicate<T>,
{
    async fn test(&self, value: &T) -> Result<bool> {
        Predicate::test(self, value)
    }
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

/// Logical AND over an ordered predicate list. See [`conjunction`].
pub struct Conjunction<T: ?Sized> {
    members: Vec<BoxPredicate<T>>,
}

/// Combine predicates so that all of them must match.
///
/// Members are evaluated left to right and evaluation short-circuits on the
/// first `false`. The empty list is the identity of AND: it matches every
/// input. The first `Err` from a member is returned immediately, without
/// evaluating the rest.
pub fn conjunction<T: ?Sized>(members: Vec<BoxPredicate<T>>) -> Conjunction<T> {
    Conjunction { members }
}

impl<T: ?Sized> Predicate<T> for Conjunction<T> {
    fn test(&self, value: &T) -> Result<bool> {
        for member in &self.members {
            if !member.test(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Logical OR over an ordered predicate list. See [`disjunction`].
pub struct Disjunction<T: ?Sized> {
    members: Vec<BoxPredicate<T>>,
}

/// Combine predicates so that any of them may match.
///
/// Members are evaluated left to right and evaluation short-circuits on the
/// first `true`. The empty list is the identity of OR: it matches nothing.
/// The first `Err` from a member is returned immediately.
pub fn disjunction<T: ?Sized>(members: Vec<BoxPredicate<T>>) -> Disjunction<T> {
    Disjunction { members }
}

impl<T: ?Sized> Predicate<T> for Disjunction<T> {
    fn test(&self, value: &T) -> Result<bool> {
        for member in &self.members {
            if member.test(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Suspending AND. See [`async_conjunction`].
pub struct AsyncConjunction<T: ?Sized> {
    members: Vec<BoxAsyncPredicate<T>>,
}

/// [`conjunction`] over suspending predicates.
///
/// Same semantics: left to right, short-circuit on the first `false`, first
/// `Err` wins, empty list matches everything. Immediate predicates lift via
/// the blanket [`AsyncPredicate`] impl and may be mixed in freely.
pub fn async_conjunction<T: ?Sized>(members: Vec<BoxAsyncPredicate<T>>) -> AsyncConjunction<T> {
    AsyncConjunction { members }
}

#[async_trait]
impl<T: ?Sized + Sync> AsyncPredicate<T> for AsyncConjunction<T> {
    async fn test(&self, value: &T) -> Result<bool> {
        for member in &self.members {
            if !member.test(value).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Suspending OR. See [`async_disjunction`].
pub struct AsyncDisjunction<T: ?Sized> {
    members: Vec<BoxAsyncPredicate<T>>,
}

/// [`disjunction`] over suspending predicates.
pub fn async_disjunction<T: ?Sized>(members: Vec<BoxAsyncPredicate<T>>) -> AsyncDisjunction<T> {
    AsyncDisjunction { members }
}

#[async_trait]
impl<T: ?Sized + Sync> AsyncPredicate<T> for AsyncDisjunction<T> {
    async fn test(&self, value: &T) -> Result<bool> {
        for member in &self.members {
            if member.test(value).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
