//! Error types for platform and configuration faults.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the local platform implementation and configuration
/// validation.
///
/// These are the typed backing of the failure messages surfaced through
/// [`Outcome`](crate::Outcome); callers of the public operations only ever
/// see the rendered messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A directory could not be listed.
    #[error("failed to list directory '{}': {source}", path.display())]
    ListDirectory {
        /// Directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read.
    #[error("failed to read file '{}': {source}", path.display())]
    ReadFile {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write file '{}': {source}", path.display())]
    WriteFile {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be copied.
    #[error("failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    CopyFile {
        /// Source path of the copy.
        from: PathBuf,
        /// Destination path of the copy.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A copy refused to replace an existing destination.
    #[error("destination '{}' already exists and overwrite is disabled", to.display())]
    DestinationExists {
        /// Destination that already exists.
        to: PathBuf,
    },

    /// A file could not be deleted.
    #[error("failed to delete file '{}': {source}", path.display())]
    DeleteFile {
        /// File that could not be deleted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directories configuration is unusable.
    #[error("invalid directories configuration: {reason}")]
    InvalidDirectories {
        /// Human-readable explanation.
        reason: String,
    },
}

impl CoreError {
    /// Returns `true` when the error stems from a missing file or
    /// directory rather than from permissions or hardware.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ListDirectory { source, .. }
            | Self::ReadFile { source, .. }
            | Self::WriteFile { source, .. }
            | Self::CopyFile { source, .. }
            | Self::DeleteFile { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::DestinationExists { .. } | Self::InvalidDirectories { .. } => false,
        }
    }
}

/// Convenience alias for results with [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
