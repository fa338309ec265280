use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use regex::Regex;

use pathseek::stream::{
    downward_directories, downward_paths, find_all_files, find_file, has_file, strict_find_file,
    PathStream, SearchScope,
};
use pathseek::{of_basename, of_extname, AsyncPredicate, BoxAsyncPredicate, FindError};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Same tree as the synchronous integration tests.
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("file.md"), "# markdown").unwrap();
    fs::write(root.join("file.html"), "<html>").unwrap();
    fs::write(root.join("notes.txt"), "some notes").unwrap();

    let sub = root.join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("invoice_mar.txt"), "march invoice").unwrap();

    let nested = sub.join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("deep.rs"), "fn main() {}").unwrap();

    dir
}

fn file_prefix() -> BoxAsyncPredicate<Path> {
    Box::new(of_basename([Regex::new(r"^file").unwrap()]))
}

async fn collect_sorted(mut sequence: PathStream) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    while let Some(item) = sequence.next().await {
        paths.push(item.unwrap());
    }
    paths.sort();
    paths
}

// ---------------------------------------------------------------------------
// Finders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_all_files_matches_the_synchronous_rendering() {
    let dir = setup_test_dir();

    let mut suspending = find_all_files(dir.path(), vec![file_prefix()])
        .await
        .unwrap();
    suspending.sort();

    let mut blocking = pathseek::sync::find_all_files(
        dir.path(),
        vec![Box::new(of_basename([Regex::new(r"^file").unwrap()]))],
    )
    .unwrap();
    blocking.sort();

    assert_eq!(suspending, blocking);
    assert_eq!(
        suspending,
        vec![dir.path().join("file.html"), dir.path().join("file.md")]
    );
}

#[tokio::test]
async fn find_file_stops_at_the_first_match() {
    let dir = setup_test_dir();
    let found = find_file(dir.path(), vec![file_prefix()])
        .await
        .unwrap()
        .unwrap();
    assert!(found == dir.path().join("file.md") || found == dir.path().join("file.html"));
}

#[tokio::test]
async fn strict_find_file_rejects_two_matches() {
    let dir = setup_test_dir();
    let err = strict_find_file(dir.path(), vec![file_prefix()])
        .await
        .unwrap_err();
    assert!(matches!(err, FindError::AmbiguousMatch { .. }));
}

#[tokio::test]
async fn strict_find_file_accepts_exactly_one_match() {
    let dir = setup_test_dir();
    let found = strict_find_file(dir.path(), vec![Box::new(of_basename(["notes.txt"]))])
        .await
        .unwrap();
    assert_eq!(found, Some(dir.path().join("notes.txt")));
}

#[tokio::test]
async fn empty_predicate_list_never_matches() {
    let dir = setup_test_dir();
    assert_eq!(find_file(dir.path(), vec![]).await.unwrap(), None);
    assert!(find_all_files(dir.path(), vec![]).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_start_is_a_distinct_error() {
    let err = find_file("/no/such/dir/anywhere", vec![file_prefix()])
        .await
        .unwrap_err();
    assert!(matches!(err, FindError::StartPathNotFound(_)));
}

#[tokio::test]
async fn suspending_predicates_mix_with_immediate_ones() {
    /// Matches paths whose file is non-empty — needs metadata, so it suspends.
    struct NonEmpty;

    #[async_trait]
    impl AsyncPredicate<Path> for NonEmpty {
        async fn test(&self, path: &Path) -> pathseek::Result<bool> {
            match tokio::fs::metadata(path).await {
                Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
                Err(e) => Err(FindError::io(path, e)),
            }
        }
    }

    let dir = setup_test_dir();
    let found = find_all_files(
        dir.path(),
        vec![Box::new(of_extname(["md"])), Box::new(NonEmpty)],
    )
    .await
    .unwrap();
    assert_eq!(found, vec![dir.path().join("file.md")]);
}

#[tokio::test]
async fn traversal_scope_searches_a_subtree() {
    let dir = setup_test_dir();
    let scope = SearchScope::sequence(downward_directories(dir.path(), 4).unwrap());
    let found = find_file(scope, vec![Box::new(of_basename(["deep.rs"]))])
        .await
        .unwrap();
    assert_eq!(found, Some(dir.path().join("sub/nested/deep.rs")));
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn downward_traversal_matches_the_synchronous_rendering() {
    let dir = setup_test_dir();

    let suspending = collect_sorted(downward_paths(dir.path(), 8).unwrap()).await;
    let mut blocking: Vec<PathBuf> = pathseek::sync::downward_paths(dir.path(), 8)
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    blocking.sort();

    assert_eq!(suspending, blocking);
}

#[tokio::test]
async fn depth_zero_yields_only_immediate_children() {
    let dir = setup_test_dir();
    let entries = collect_sorted(downward_paths(dir.path(), 0).unwrap()).await;

    assert_eq!(
        entries,
        vec![
            dir.path().join("file.html"),
            dir.path().join("file.md"),
            dir.path().join("notes.txt"),
            dir.path().join("sub"),
        ]
    );
}

#[tokio::test]
async fn negative_depth_fails_synchronously() {
    // The constructor itself rejects the bound — no stream, no I/O.
    let err = downward_paths("/does/not/matter", -1).unwrap_err();
    assert!(matches!(err, FindError::InvalidBound(-1)));
}

#[tokio::test]
async fn missing_start_fails_at_the_first_poll() {
    let mut walk = downward_paths("/no/such/dir/anywhere", 2).unwrap();
    let err = walk.next().await.unwrap().unwrap_err();
    assert!(matches!(err, FindError::StartPathNotFound(_)));
    assert!(walk.next().await.is_none());
}

#[tokio::test]
async fn upward_directories_climb_through_real_ancestors() {
    let dir = tempfile::tempdir().unwrap();
    let leaf = dir.path().join("a/b/c");
    fs::create_dir_all(&leaf).unwrap();

    let mut sequence = pathseek::stream::upward_directories_within(&leaf, 2).unwrap();
    let mut ancestors = Vec::new();
    while let Some(item) = sequence.next().await {
        ancestors.push(item.unwrap());
    }

    assert_eq!(ancestors, vec![dir.path().join("a/b"), dir.path().join("a")]);
}

// ---------------------------------------------------------------------------
// has_file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn has_file_detects_a_matching_direct_child() {
    let dir = setup_test_dir();
    let marker = has_file(vec![Box::new(of_basename(["invoice_mar.txt"]))]);

    assert!(marker.test(&dir.path().join("sub")).await.unwrap());
    assert!(!marker.test(dir.path()).await.unwrap());
}

#[tokio::test]
async fn has_file_is_false_for_missing_paths_and_zero_predicates() {
    let dir = tempfile::tempdir().unwrap();
    let marker = has_file(vec![Box::new(of_extname(["txt"]))]);
    assert!(!marker.test(Path::new("/no/such/path")).await.unwrap());

    let empty = has_file(vec![]);
    assert!(!empty.test(dir.path()).await.unwrap());
}
