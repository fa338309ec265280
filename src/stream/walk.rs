//! Suspending traversal generators.
//!
//! Semantics are identical to [`sync::walk`](crate::sync): breadth-first
//! downward enumeration over a frontier queue, upward ancestor chains, the
//! same depth/height bounds and the same error policy. The difference is
//! only where the walk suspends: every filesystem touch awaits `tokio::fs`
//! instead of blocking.

use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream;
use futures::Stream;
use tracing::trace;

use crate::error::{FindError, Result};
use crate::predicate::AsyncPredicate;
use crate::stream::seq::filter;

/// Owned, type-erased lazy sequence of paths.
///
/// All generators in this module produce this type so the sequences can be
/// stored, passed as a [`SearchScope`](crate::stream::SearchScope), and
/// further combined.
pub type PathStream = Pin<Box<dyn Stream<Item = Result<PathBuf>> + Send>>;

// ---------------------------------------------------------------------------
// Filesystem-status predicates
// ---------------------------------------------------------------------------

/// Suspending predicate: the path exists and is a directory.
pub struct IsDirectory;

/// Suspending predicate: the path exists and is a regular file.
pub struct IsFile;

/// Build an [`IsDirectory`] predicate.
///
/// Missing paths test `false`; any other filesystem failure is surfaced.
pub fn is_directory() -> IsDirectory {
    IsDirectory
}

/// Build an [`IsFile`] predicate.
pub fn is_file() -> IsFile {
    IsFile
}

async fn status(path: &Path) -> Result<Option<std::fs::Metadata>> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FindError::io(path, e)),
    }
}

#[async_trait]
impl AsyncPredicate<Path> for IsDirectory {
    async fn test(&self, path: &Path) -> Result<bool> {
        Ok(status(path).await?.is_some_and(|m| m.is_dir()))
    }
}

#[async_trait]
impl AsyncPredicate<Path> for IsFile {
    async fn test(&self, path: &Path) -> Result<bool> {
        Ok(status(path).await?.is_some_and(|m| m.is_file()))
    }
}

// ---------------------------------------------------------------------------
// Downward traversal
// ---------------------------------------------------------------------------

/// Open a directory for reading, mapping failures to the start-path errors.
pub(crate) async fn open_dir(dir: &Path) -> Result<tokio::fs::ReadDir> {
    check_start(dir).await?;
    tokio::fs::read_dir(dir).await.map_err(|e| FindError::io(dir, e))
}

/// Start-path validation, with errors distinct from mid-walk IO failures.
async fn check_start(dir: &Path) -> Result<()> {
    let meta = tokio::fs::metadata(dir).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FindError::StartPathNotFound(dir.to_path_buf()),
        _ => FindError::io(dir, e),
    })?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(FindError::StartPathNotDirectory(dir.to_path_buf()))
    }
}

/// Whether a directory entry is a directory, following symlinks.
async fn entry_is_dir(entry: &tokio::fs::DirEntry) -> bool {
    match entry.file_type().await {
        Ok(ft) if ft.is_dir() => true,
        Ok(ft) if ft.is_symlink() => tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false),
        _ => false,
    }
}

/// Enumerate the entries below `start`, breadth-first, depth-bounded.
///
/// The suspending form of [`sync::downward_paths`]; see there for the full
/// traversal contract. The invalid-bound check still happens here,
/// synchronously, before any I/O — the returned stream has not touched the
/// filesystem until it is first polled.
///
/// [`sync::downward_paths`]: crate::sync::downward_paths
pub fn downward_paths(start: impl AsRef<Path>, max_depth: isize) -> Result<PathStream> {
    if max_depth < 0 {
        return Err(FindError::InvalidBound(max_depth));
    }
    let start = start.as_ref().to_path_buf();
    let max_depth = max_depth as usize;

    Ok(Box::pin(try_stream! {
        let mut frontier: VecDeque<(PathBuf, usize)> = VecDeque::new();
        frontier.push_back((start.clone(), 0));
        let mut expanded: HashSet<PathBuf> = HashSet::new();
        let mut first = true;

        while let Some((dir, depth)) = frontier.pop_front() {
            if first {
                first = false;
                check_start(&dir).await?;
            }

            let identity = tokio::fs::canonicalize(&dir)
                .await
                .map_err(|e| FindError::io(&dir, e))?;
            if !expanded.insert(identity) {
                continue;
            }

            trace!(dir = %dir.display(), depth, "expanding directory");
            let mut reader = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| FindError::io(&dir, e))?;
            while let Some(entry) = reader
                .next_entry()
                .await
                .map_err(|e| FindError::io(&dir, e))?
            {
                let path = entry.path();
                if depth + 1 <= max_depth && entry_is_dir(&entry).await {
                    frontier.push_back((path.clone(), depth + 1));
                }
                yield path;
            }
        }
    }))
}

/// Enumerate only the directories below `start`, breadth-first.
///
/// Composes [`downward_paths`] with [`filter`](crate::stream::filter) over
/// [`is_directory`]; one extra status query per entry.
pub fn downward_directories(start: impl AsRef<Path>, max_depth: isize) -> Result<PathStream> {
    Ok(Box::pin(filter(downward_paths(start, max_depth)?, is_directory())))
}

/// Enumerate only the regular files below `start`, breadth-first.
pub fn downward_files(start: impl AsRef<Path>, max_depth: isize) -> Result<PathStream> {
    Ok(Box::pin(filter(downward_paths(start, max_depth)?, is_file())))
}

// ---------------------------------------------------------------------------
// Upward traversal
// ---------------------------------------------------------------------------

/// Enumerate every ancestor of `start`, nearest first.
///
/// The suspending form of [`sync::upward_paths`]. Ancestor enumeration is
/// pure path math, so this wraps the synchronous generator; suspension only
/// enters through the directory filters below.
///
/// [`sync::upward_paths`]: crate::sync::upward_paths
pub fn upward_paths(start: impl AsRef<Path>) -> Result<PathStream> {
    Ok(Box::pin(stream::iter(crate::sync::upward_paths(start)?)))
}

/// [`upward_paths`], yielding at most `max_height` ancestors.
///
/// A `max_height <= 0` yields nothing — it is not an error.
pub fn upward_paths_within(start: impl AsRef<Path>, max_height: isize) -> Result<PathStream> {
    Ok(Box::pin(stream::iter(crate::sync::upward_paths_within(
        start, max_height,
    )?)))
}

/// [`upward_paths`], stopping at (and including) `limit`.
pub fn upward_paths_until(
    start: impl AsRef<Path>,
    limit: impl AsRef<Path>,
) -> Result<PathStream> {
    Ok(Box::pin(stream::iter(crate::sync::upward_paths_until(
        start, limit,
    )?)))
}

/// Enumerate the ancestors of `start` that are directories.
pub fn upward_directories(start: impl AsRef<Path>) -> Result<PathStream> {
    Ok(Box::pin(filter(upward_paths(start)?, is_directory())))
}

/// [`upward_directories`], yielding at most `max_height` ancestors.
pub fn upward_directories_within(
    start: impl AsRef<Path>,
    max_height: isize,
) -> Result<PathStream> {
    Ok(Box::pin(filter(
        upward_paths_within(start, max_height)?,
        is_directory(),
    )))
}

/// [`upward_directories`], stopping at (and including) `limit`.
pub fn upward_directories_until(
    start: impl AsRef<Path>,
    limit: impl AsRef<Path>,
) -> Result<PathStream> {
    Ok(Box::pin(filter(
        upward_paths_until(start, limit)?,
        is_directory(),
    )))
}
