//! Error types for allowgate

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for allowgate operations
#[derive(Error, Debug)]
pub enum AllowGateError {
    /// The allow-list resource could not be read
    #[error("Failed to read allow-list {path:?}: {source}")]
    Io {
        /// Path of the resource
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The allow-list content is not a flat object of booleans
    #[error("Failed to parse allow-list{}: {source}", display_path(.path))]
    Parse {
        /// Path of the resource, when it was loaded from disk
        path: Option<PathBuf>,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// An entry was syntactically valid but not acceptable as a username
    #[error("Invalid allow-list entry: {0}")]
    InvalidEntry(String),

    /// A membership mode name was not recognised
    #[error("Unknown membership mode '{0}' (expected 'presence' or 'flag')")]
    UnknownMembershipMode(String),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {:?}", p))
        .unwrap_or_default()
}

/// Result type alias for allowgate operations
pub type Result<T> = std::result::Result<T, AllowGateError>;
