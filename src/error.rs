//! Errors raised at the crate's edges.
//!
//! The geometry itself never fails; only loading datasets and parsing names can.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading or configuring an overlay.
#[derive(Debug, Error)]
pub enum Error {
    /// A dataset file could not be read
    #[error("failed to read {path:?}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying io error
        #[source]
        source: std::io::Error,
    },

    /// A dataset was not valid JSON or did not match the point layout
    #[error("malformed dataset")]
    Json(#[from] serde_json::Error),

    /// A dataset parsed fine but holds no points
    #[error("dataset contains no points")]
    EmptyDataset,

    /// An overlay style name which isn't known
    #[error("unknown overlay style {0:?}, expected \"straight\" or \"curved\"")]
    UnknownStyle(String),
}

/// Crate wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
