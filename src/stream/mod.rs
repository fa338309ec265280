//! The suspending rendering of the engine, over [`futures::Stream`].
//!
//! Identical semantics to [`sync`](crate::sync), with every filesystem
//! touch awaiting `tokio::fs` instead of blocking. Everything runs on one
//! logical thread of control, and a consumer that stops polling stops all
//! further I/O.

mod find;
mod seq;
mod walk;

pub use find::{find_all_files, find_file, has_file, strict_find_file, HasFile, SearchScope};
pub use seq::{filter, map, multi_map};
pub use walk::{
    downward_directories, downward_files, downward_paths, is_directory, is_file,
    upward_directories, upward_directories_until, upward_directories_within, upward_paths,
    upward_paths_until, upward_paths_within, IsDirectory, IsFile, PathStream,
};
