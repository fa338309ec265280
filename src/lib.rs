//! # pathseek
//!
//! Composable file-finding engine — lazy traversals, predicate combinators,
//! sync and async.
//!
//! pathseek answers two questions separately and lets you combine the
//! answers: *what counts as a match* (predicates over paths — basename,
//! extension, parent directory, path segments, sibling-file presence) and
//! *where to look* (a directory, a breadth-first downward subtree, an
//! upward ancestor chain). A finder evaluates the two together under a
//! cardinality policy: first match ([`sync::find_file`]), all matches
//! ([`sync::find_all_files`]), or exactly one match
//! ([`sync::strict_find_file`], which fails on a second hit rather than
//! guessing).
//!
//! Everything exists twice, with matching semantics: a synchronous
//! rendering in [`sync`] (blocking `std::fs` calls, `Iterator` sequences)
//! and a suspending rendering in [`stream`] (`tokio::fs` calls,
//! [`futures::Stream`] sequences). Sequences are lazy and single-pass —
//! a finder that stops early stops all further I/O.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pathseek::of_basename;
//! use pathseek::sync::{find_all_files, strict_find_file};
//! use regex::Regex;
//!
//! # fn main() -> pathseek::Result<()> {
//! // Every direct child of ./docs whose basename starts with "invoice".
//! let invoices = find_all_files(
//!     "docs",
//!     vec![Box::new(of_basename([Regex::new(r"^invoice").unwrap()]))],
//! )?;
//!
//! // Exactly one Cargo.toml — two would be an ambiguity error.
//! let manifest = strict_find_file(
//!     "workspace",
//!     vec![Box::new(of_basename(["Cargo.toml"]))],
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Scopes are sequences
//!
//! Finders examine the *direct* children of each scope directory.
//! Recursion is just a different scope — any lazy sequence of directories
//! plugs in:
//!
//! ```rust,no_run
//! use pathseek::of_extname;
//! use pathseek::sync::{downward_directories, find_all_files, SearchScope};
//!
//! # fn main() -> pathseek::Result<()> {
//! // All .toml files up to three directories deep.
//! let scope = SearchScope::sequence(downward_directories("project", 3)?);
//! let tomls = find_all_files(scope, vec![Box::new(of_extname(["toml"]))])?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom predicates
//!
//! Any `Fn(&T) -> Result<bool>` is a [`Predicate`]; implement
//! [`AsyncPredicate`] (via `async_trait`) when the test itself must await
//! I/O. Predicate failures are propagated verbatim — never retried, never
//! swallowed.
//!
//! ```rust
//! use std::path::Path;
//! use pathseek::Predicate;
//!
//! let hidden = |p: &Path| {
//!     Ok(p.file_name()
//!         .map(|n| n.to_string_lossy().starts_with('.'))
//!         .unwrap_or(false))
//! };
//! assert!(hidden.test(Path::new("/home/user/.bashrc")).unwrap());
//! ```

#![forbid(unsafe_code)]

pub mod stream;
pub mod sync;

mod error;
mod name;
mod paths;
mod predicate;
mod tester;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use error::{FindError, Result};
pub use name::{
    does_not_have_any_path_segment, has_path_segments, of_basename, of_dirname, of_extname,
    of_name, path_segments, NamePredicate, SegmentPredicate,
};
pub use predicate::{
    async_conjunction, async_disjunction, conjunction, disjunction, AsyncConjunction,
    AsyncDisjunction, AsyncPredicate, BoxAsyncPredicate, BoxPredicate, Conjunction, Disjunction,
    Predicate,
};
pub use tester::Tester;
