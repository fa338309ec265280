//! The fully synchronous rendering of the engine.
//!
//! Identical semantics to [`stream`](crate::stream) — ordering, laziness
//! and error policy all match; blocking filesystem calls simply stand in
//! for the suspension points.

mod find;
mod seq;
mod walk;

pub use find::{find_all_files, find_file, has_file, strict_find_file, HasFile, SearchScope};
pub use seq::{filter, map, multi_map, Filter, Map, MultiMap};
pub use walk::{
    downward_directories, downward_files, downward_paths, is_directory, is_file,
    upward_directories, upward_directories_until, upward_directories_within, upward_paths,
    upward_paths_until, upward_paths_within, DownwardDirectories, DownwardFiles, DownwardPaths,
    IsDirectory, IsFile, UpwardDirectories, UpwardPaths,
};
