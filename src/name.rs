//! Predicates built from the parts of a path.
//!
//! Each constructor extracts one substring from the tested path — basename,
//! stem, parent, extension — and accepts any number of [`Tester`]s, combined
//! with [`disjunction`]: the path matches if *any* tester matches the
//! extracted substring. A constructor given no testers returns a predicate
//! that can never match.

use std::borrow::Cow;
use std::path::{Component, Path};

use crate::error::Result;
use crate::paths::normalize;
use crate::predicate::{disjunction, BoxPredicate, Disjunction, Predicate};
use crate::tester::Tester;

// ---------------------------------------------------------------------------
// Name predicates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Part {
    Basename,
    Stem,
    Dirname,
    Extension,
}

/// Predicate over one extracted part of a path.
/// Built by [`of_basename`], [`of_name`], [`of_dirname`] or [`of_extname`].
pub struct NamePredicate {
    part: Part,
    matcher: Disjunction<str>,
}

fn name_predicate<I>(part: Part, testers: I) -> NamePredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    let members: Vec<BoxPredicate<str>> = testers
        .into_iter()
        .map(|t| Box::new(t.into()) as BoxPredicate<str>)
        .collect();
    NamePredicate {
        part,
        matcher: disjunction(members),
    }
}

/// Match a path by its basename (final component, extension included).
///
/// ```rust
/// use std::path::Path;
/// use pathseek::{of_basename, Predicate};
///
/// let p = of_basename(["Cargo.toml", "Cargo.lock"]);
/// assert!(p.test(Path::new("/work/Cargo.toml")).unwrap());
/// assert!(!p.test(Path::new("/work/Cargo.toml.orig")).unwrap());
/// ```
pub fn of_basename<I>(testers: I) -> NamePredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    name_predicate(Part::Basename, testers)
}

/// Match a path by its name without extension (the stem).
pub fn of_name<I>(testers: I) -> NamePredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    name_predicate(Part::Stem, testers)
}

/// Match a path by its parent directory, rendered as a string.
///
/// A path with no meaningful parent tests `"."`; the root tests itself.
pub fn of_dirname<I>(testers: I) -> NamePredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    name_predicate(Part::Dirname, testers)
}

/// Match a path by its extension, without the leading dot.
///
/// Paths without an extension extract the empty string.
pub fn of_extname<I>(testers: I) -> NamePredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    name_predicate(Part::Extension, testers)
}

fn dirname(path: &Path) -> Cow<'_, str> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Cow::Borrowed("."),
        Some(parent) => parent.to_string_lossy(),
        None if path.has_root() => path.to_string_lossy(),
        None => Cow::Borrowed("."),
    }
}

impl NamePredicate {
    fn extract<'p>(&self, path: &'p Path) -> Cow<'p, str> {
        match self.part {
            Part::Basename => path
                .file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or(Cow::Borrowed("")),
            Part::Stem => path
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or(Cow::Borrowed("")),
            Part::Extension => path
                .extension()
                .map(|s| s.to_string_lossy())
                .unwrap_or(Cow::Borrowed("")),
            Part::Dirname => dirname(path),
        }
    }
}

impl Predicate<Path> for NamePredicate {
    fn test(&self, path: &Path) -> Result<bool> {
        self.matcher.test(&self.extract(path))
    }
}

// ---------------------------------------------------------------------------
// Segment predicates
// ---------------------------------------------------------------------------

/// The segments of a path: lexically normalized, root and prefix removed,
/// trailing empty or whitespace-only segments dropped.
///
/// An unresolvable `..` counts as a segment; `.` never does.
pub fn path_segments(path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = normalize(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    while segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    segments
}

#[derive(Debug, Clone, Copy)]
enum SegmentMode {
    EverySegment,
    NoSegment,
}

/// Predicate over the segment list of a path.
/// Built by [`has_path_segments`] or [`does_not_have_any_path_segment`].
pub struct SegmentPredicate {
    mode: SegmentMode,
    empty: bool,
    matcher: Disjunction<str>,
}

fn segment_predicate<I>(mode: SegmentMode, testers: I) -> SegmentPredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    let members: Vec<BoxPredicate<str>> = testers
        .into_iter()
        .map(|t| Box::new(t.into()) as BoxPredicate<str>)
        .collect();
    SegmentPredicate {
        mode,
        empty: members.is_empty(),
        matcher: disjunction(members),
    }
}

/// Match a path when *every* segment satisfies some tester.
///
/// With no testers the predicate never matches, regardless of the path.
pub fn has_path_segments<I>(testers: I) -> SegmentPredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    segment_predicate(SegmentMode::EverySegment, testers)
}

/// Match a path when *no* segment satisfies any tester.
///
/// With no testers the predicate never matches, regardless of the path.
pub fn does_not_have_any_path_segment<I>(testers: I) -> SegmentPredicate
where
    I: IntoIterator,
    I::Item: Into<Tester>,
{
    segment_predicate(SegmentMode::NoSegment, testers)
}

impl Predicate<Path> for SegmentPredicate {
    fn test(&self, path: &Path) -> Result<bool> {
        if self.empty {
            return Ok(false);
        }
        for segment in path_segments(path) {
            let hit = self.matcher.test(&segment)?;
            match self.mode {
                SegmentMode::EverySegment if !hit => return Ok(false),
                SegmentMode::NoSegment if hit => return Ok(false),
                _ => {}
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::error::FindError;

    #[test]
    fn basename_tests_the_final_component() {
        let p = of_basename(["file.md"]);
        assert!(p.test(Path::new("/home/user/file.md")).unwrap());
        assert!(p.test(Path::new("file.md")).unwrap());
        assert!(!p.test(Path::new("/home/user/other.md")).unwrap());
    }

    #[test]
    fn basename_equals_disjunction_over_extracted_string() {
        // of_basename(T)(p) == disjunction(T)(basename(p))
        let testers = ["file.md", "notes.txt"];
        let by_path = of_basename(testers);
        let by_string = disjunction(
            testers
                .iter()
                .map(|t| Box::new(Tester::from(*t)) as BoxPredicate<str>)
                .collect(),
        );

        for path in ["/a/file.md", "/a/notes.txt", "/a/other.rs", "file.md"] {
            let p = Path::new(path);
            let basename = p.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
            assert_eq!(
                by_path.test(p).unwrap(),
                by_string.test(&basename).unwrap(),
                "mismatch for {path}"
            );
        }
    }

    #[test]
    fn zero_testers_never_match() {
        let none: [&str; 0] = [];
        assert!(!of_basename(none).test(Path::new("anything")).unwrap());
        let none: [&str; 0] = [];
        assert!(!of_extname(none).test(Path::new("a.md")).unwrap());
    }

    #[test]
    fn name_tests_the_stem() {
        let p = of_name(["file"]);
        assert!(p.test(Path::new("/x/file.md")).unwrap());
        assert!(p.test(Path::new("/x/file")).unwrap());
        assert!(!p.test(Path::new("/x/filer.md")).unwrap());
    }

    #[test]
    fn extname_has_no_leading_dot() {
        let p = of_extname(["md"]);
        assert!(p.test(Path::new("/x/file.md")).unwrap());
        assert!(!p.test(Path::new("/x/file.html")).unwrap());
        assert!(!p.test(Path::new("/x/file")).unwrap());
    }

    #[test]
    fn dirname_tests_the_parent() {
        let p = of_dirname(["/home/user"]);
        assert!(p.test(Path::new("/home/user/file.md")).unwrap());
        assert!(!p.test(Path::new("/home/other/file.md")).unwrap());

        let dot = of_dirname(["."]);
        assert!(dot.test(Path::new("file.md")).unwrap());
    }

    #[test]
    fn patterns_work_as_testers() {
        let p = of_basename([Regex::new(r"^file").unwrap()]);
        assert!(p.test(Path::new("/a/file.md")).unwrap());
        assert!(p.test(Path::new("/a/file.html")).unwrap());
        assert!(!p.test(Path::new("/a/profile.md")).unwrap());
    }

    #[test]
    fn segments_are_normalized() {
        assert_eq!(
            path_segments(Path::new("/home/./user/files/")),
            vec!["home", "user", "files"]
        );
        assert_eq!(path_segments(Path::new("./a/b")), vec!["a", "b"]);
        assert_eq!(path_segments(Path::new("")), Vec::<String>::new());
        assert_eq!(path_segments(Path::new("/")), Vec::<String>::new());
    }

    #[test]
    fn has_path_segments_requires_every_segment() {
        let p = has_path_segments([Regex::new(r"^[a-z]+$").unwrap()]);
        assert!(p.test(Path::new("/home/user/files")).unwrap());
        assert!(!p.test(Path::new("/home/User/files")).unwrap());
    }

    #[test]
    fn has_path_segments_with_no_testers_is_false_everywhere() {
        let none: [&str; 0] = [];
        let p = has_path_segments(none);
        assert!(!p.test(Path::new("/home/user")).unwrap());
        assert!(!p.test(Path::new("")).unwrap());
    }

    #[test]
    fn no_segment_rejects_any_hit() {
        let p = does_not_have_any_path_segment(["node_modules"]);
        assert!(p.test(Path::new("/src/lib/util.rs")).unwrap());
        assert!(!p.test(Path::new("/src/node_modules/x.js")).unwrap());

        let none: [&str; 0] = [];
        assert!(!does_not_have_any_path_segment(none)
            .test(Path::new("/src"))
            .unwrap());
    }

    #[test]
    fn tester_errors_abort_evaluation() {
        let p = of_basename([Tester::function(|_| Err(FindError::predicate("bad")))]);
        assert!(matches!(
            p.test(Path::new("/a/file.md")).unwrap_err(),
            FindError::Predicate(_)
        ));
    }
}
