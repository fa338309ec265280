use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FindError>;

#[derive(Error, Debug)]
pub enum FindError {
    // Arguments
    #[error("invalid traversal bound: {0}")]
    InvalidBound(isize),

    // Start paths
    #[error("start path not found")]
    StartPathNotFound(PathBuf),

    #[error("start path is not a directory")]
    StartPathNotDirectory(PathBuf),

    // Cardinality
    #[error("ambiguous match: more than one path satisfies the predicates")]
    AmbiguousMatch { first: PathBuf, second: PathBuf },

    // Third-party extensibility
    #[error("predicate failure: {0}")]
    Predicate(String),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FindError {
    /// Wrap a caller-supplied predicate or tester failure.
    ///
    /// Finders and sequence adapters propagate this verbatim — it is never
    /// retried or swallowed.
    pub fn predicate(message: impl Into<String>) -> Self {
        Self::Predicate(message.into())
    }

    /// Wrap an [`std::io::Error`] together with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::StartPathNotFound(p)
            | Self::StartPathNotDirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            Self::AmbiguousMatch { first, .. } => Some(first),
            _ => None,
        }
    }
}
