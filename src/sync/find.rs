//! Synchronous finder algorithms.
//!
//! A finder composes a [`SearchScope`] — which directories to look in —
//! with a list of predicates combined by [`conjunction`], under one of
//! three cardinality policies: first match ([`find_file`]), all matches
//! ([`find_all_files`]), or exactly one match ([`strict_find_file`]).
//!
//! Finders examine the *direct* children of each scope directory, in scope
//! order then listing order. Recursion is expressed through the scope: pass
//! [`downward_directories`](crate::sync::downward_directories) (or any
//! other lazy sequence of directories) as the scope to search a subtree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FindError, Result};
use crate::paths::resolve;
use crate::predicate::{conjunction, BoxPredicate, Conjunction, Predicate};
use crate::sync::walk::open_dir;

// ---------------------------------------------------------------------------
// SearchScope
// ---------------------------------------------------------------------------

/// Where a finder looks: zero or more start directories.
///
/// Built from a single path, a list of paths, or a pre-built lazy sequence
/// of paths (such as a traversal generator). Defaults to the current
/// working directory. Each start is handled independently; results
/// concatenate in the order the starts are produced. Non-absolute starts
/// are resolved against the current working directory.
pub enum SearchScope {
    /// The current working directory.
    CurrentDir,
    /// An explicit list of start directories.
    Paths(Vec<PathBuf>),
    /// A lazy sequence of start directories.
    Sequence(Box<dyn Iterator<Item = Result<PathBuf>> + Send>),
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

    /// Scope over a pre-built lazy sequence of start directories.
    pub fn sequence<I>(sequence: I) -> Self
    where
        I: Iterator<Item = Result<PathBuf>> + Send + 'static,
    {
        Self::Sequence(Box::new(sequence))
    }

    fn into_starts(self) -> Result<Box<dyn Iterator<Item = Result<PathBuf>> + Send>> {
        match self {
            Self::CurrentDir => {
                let cwd = std::env::current_dir().map_err(|e| FindError::io(".", e))?;
                Ok(Box::new(std::iter::once(Ok(cwd))))
            }
            Self::Paths(paths) => Ok(Box::new(paths.into_iter().map(Ok))),
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

// ---------------------------------------------------------------------------
// Finders
// ---------------------------------------------------------------------------

/// Return the first direct child across the scope that satisfies every
/// predicate.
///
/// Starts are visited in scope order, entries in listing order; the scan
/// stops pulling at the first success. `Ok(None)` when the scope is empty,
/// the predicate list is empty, or nothing matches. A missing or
/// non-directory start aborts with a distinct error; a predicate failure
/// aborts with that failure.
pub fn find_file(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxPredicate<Path>>,
) -> Result<Option<PathBuf>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let matcher = conjunction(predicates);
    for start in scope.into().into_starts()? {
        let dir = resolve(&start?)?;
        for entry in open_dir(&dir)? {
            let path = entry.map_err(|e| FindError::io(&dir, e))?.path();
            if matcher.test(&path)? {
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
pub fn find_all_files(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxPredicate<Path>>,
) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    if predicates.is_empty() {
        return Ok(matches);
    }
    let matcher = conjunction(predicates);
    for start in scope.into().into_starts()? {
        let dir = resolve(&start?)?;
        for entry in open_dir(&dir)? {
            let path = entry.map_err(|e| FindError::io(&dir, e))?.path();
            if matcher.test(&path)? {
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
/// the scan continues after a match; a second match aborts immediately with
/// [`FindError::AmbiguousMatch`]. `Ok(None)` when nothing matches.
pub fn strict_find_file(
    scope: impl Into<SearchScope>,
    predicates: Vec<BoxPredicate<Path>>,
) -> Result<Option<PathBuf>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let matcher = conjunction(predicates);
    let mut found: Option<PathBuf> = None;
    for start in scope.into().into_starts()? {
        let dir = resolve(&start?)?;
        for entry in open_dir(&dir)? {
            let path = entry.map_err(|e| FindError::io(&dir, e))?.path();
            if matcher.test(&path)? {
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

/// Predicate built by [`has_file`].
pub struct HasFile {
    empty: bool,
    matcher: Conjunction<Path>,
}

/// Predicate: the tested path is a directory whose direct children contain
/// at least one entry satisfying every given predicate.
///
/// No recursion. A missing path or a file tests `false` — not an error.
/// With zero predicates the result is always `false`.
pub fn has_file(predicates: Vec<BoxPredicate<Path>>) -> HasFile {
    HasFile {
        empty: predicates.is_empty(),
        matcher: conjunction(predicates),
    }
}

impl Predicate<Path> for HasFile {
    fn test(&self, path: &Path) -> Result<bool> {
        if self.empty {
            return Ok(false);
        }
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(FindError::io(path, e)),
        };
        if !meta.is_dir() {
            return Ok(false);
        }
        for entry in fs::read_dir(path).map_err(|e| FindError::io(path, e))? {
            let child = entry.map_err(|e| FindError::io(path, e))?.path();
            if self.matcher.test(&child)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
