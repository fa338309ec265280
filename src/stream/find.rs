//! Suspending finder algorithms.
//!
//! Mirrors [`sync::find`](crate::sync) over `tokio::fs` and
//! [`PathStream`] scopes: same cardinality policies, same ordering, same
//! error policy. Predicate lists may mix immediate and suspending members.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use tracing::debug;

use crate::error::{FindError, Result};
use crate::paths::resolve;
use crate::predicate::{async_conjunction, AsyncConjunction, AsyncPredicate, BoxAsyncPredicate};
use crate::stream::walk::{open_dir, PathStream};

// ---------------------------------------------------------------------------
// SearchScope
// ---------------------------------------------------------------------------

/// Where a finder looks: zero or more start directories.
///
/// The suspending counterpart of [`sync::SearchScope`]: the pre-built lazy
/// sequence form is a [`PathStream`], so traversal generators from
/// [`stream::walk`](crate::stream) plug in directly.
///
/// [`sync::SearchScope`]: crate::sync::SearchScope
pub enum SearchScope {
    /// The current working directory.
    CurrentDir,
    /// An explicit list of start directories.
    Paths(Vec<PathBuf>),
    /// A lazy stream of start directories.
    Sequence(PathStream),
}

impl SearchScope {
    /// Scope over an explicit list of start directories.
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::Paths(paths.into_iter().map(Into::into).collect())
    }

    /// Scope over a pre-built lazy stream of start directories.
    pub fn sequence(sequence: PathStream) -> Self {
        Self::Sequence(sequence)
    }

    fn into_starts(self) -> Result<PathStream> {
        match self {
            Self::CurrentDir => {
                let cwd = std::env::current_dir().map_err(|e| FindError::io(".", e))?;
                Ok(Box::pin(stream::iter(std::iter::once(Ok(cwd)))))
            }
            Self::Paths(paths) => Ok(Box::pin(stream::iter(paths.into_iter().map(Ok)))),
            Self::Sequence(sequence) => Ok(sequence),
        }
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::CurrentDir
    }
}

impl From<&str> for SearchScope {
    fn from(path: &str) -> Self {
        Self::Paths(vec![PathBuf::from(path)])
    }
}

impl From<String> for SearchScope {
    fn from(path: String) -> Self {
        Self::Paths(vec![PathBuf::from(path)])
    }
}

impl From<&Path> for SearchScope {
    fn from(path: &Path) -> Self {
        Self::Paths(vec![path.to_path_buf()])
    }
}

impl From<PathBuf> for SearchScope {
    fn from(path: PathBuf) -> Self {
        Self::Paths(vec![path])
    }
}

impl From<Vec<PathBuf>> for SearchScope {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::Paths(paths)
    }
}

impl From<PathStream> for SearchScope {
    fn from(sequence: PathStream) -> Self {
        Self::Sequence(sequence)
    }
}

// ---------------------------------------------------------------------------
// Finders
// ---------------------------------------------------------------------------

/// Return the first direct child across the scope that satisfies every
/// predicate.
///
/// The suspending form of [`sync::find_file`]: starts in scope order,
/// entries in listing order, the scan stops pulling at the first success
/// and no further I/O is issued. `Ok(None)` when the scope is empty, the
/// predicate list is empty, or nothing matches.
///
/// [`sync::find_file`]: crate::sync::find_file
pub async fn find_file(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxAsyncPredicate<Path>>,
) -> Result<Option<PathBuf>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let matcher = async_conjunction(predicates);
    let mut starts = scope.into().into_starts()?;
    while let Some(start) = starts.next().await {
        let dir = resolve(&start?)?;
        let mut reader = open_dir(&dir).await?;
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FindError::io(&dir, e))?
        {
            let path = entry.path();
            if matcher.test(&path).await? {
                debug!(path = %path.display(), "first match");
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}

/// Return every direct child across the scope that satisfies every
/// predicate, concatenated scope-by-scope in listing order.
///
/// `Ok(vec![])` when the scope or the predicate list is empty.
pub async fn find_all_files(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxAsyncPredicate<Path>>,
) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    if predicates.is_empty() {
        return Ok(matches);
    }
    let matcher = async_conjunction(predicates);
    let mut starts = scope.into().into_starts()?;
    while let Some(start) = starts.next().await {
        let dir = resolve(&start?)?;
        let mut reader = open_dir(&dir).await?;
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FindError::io(&dir, e))?
        {
            let path = entry.path();
            if matcher.test(&path).await? {
                matches.push(path);
            }
        }
    }
    debug!(matches = matches.len(), "scan complete");
    Ok(matches)
}

/// Return the single direct child across the scope that satisfies every
/// predicate — and prove it is the only one.
///
/// Uniqueness cannot be confirmed without looking past the first hit, so
/// the scan continues after a match; a second match aborts immediately
/// with [`FindError::AmbiguousMatch`]. `Ok(None)` when nothing matches.
pub async fn strict_find_file(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxAsyncPredicate<Path>>,
) -> Result<Option<PathBuf>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let matcher = async_conjunction(predicates);
    let mut found: Option<PathBuf> = None;
    let mut starts = scope.into().into_starts()?;
    while let Some(start) = starts.next().await {
        let dir = resolve(&start?)?;
        let mut reader = open_dir(&dir).await?;
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FindError::io(&dir, e))?
        {
            let path = entry.path();
            if matcher.test(&path).await? {
                match found.take() {
                    None => found = Some(path),
                    Some(first) => {
                        return Err(FindError::AmbiguousMatch {
                            first,
                            second: path,
                        })
                    }
                }
            }
        }
    }
    Ok(found)
}

// ---------------------------------------------------------------------------
// has_file
// ---------------------------------------------------------------------------

/// Suspending predicate built by [`has_file`].
pub struct HasFile {
    empty: bool,
    matcher: AsyncConjunction<Path>,
}

/// Suspending predicate: the tested path is a directory whose direct
/// children contain at least one entry satisfying every given predicate.
///
/// No recursion. A missing path or a file tests `false` — not an error.
/// With zero predicates the result is always `false`.
pub fn has_file(predicates: Vec<BoxAsyncPredicate<Path>>) -> HasFile {
    HasFile {
        empty: predicates.is_empty(),
        matcher: async_conjunction(predicates),
    }
}

#[async_trait]
impl AsyncPredicate<Path> for HasFile {
    async fn test(&self, path: &Path) -> Result<bool> {
        if self.empty {
            return Ok(false);
        }
        let meta = match tokio::fs::metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(FindError::io(path, e)),
        };
        if !meta.is_dir() {
            return Ok(false);
        }
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FindError::io(path, e))?;
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FindError::io(path, e))?
        {
            if self.matcher.test(&entry.path()).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
