//! Error types for the manifest and archive codecs.

use crate::archive::MANIFEST_PATH;
use thiserror::Error;

/// Errors from manifest decoding and encoding.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document is not well-formed JSON.
    #[error("manifest document is not well-formed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A required field is absent.
    #[error("manifest is missing required field '{field}'")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// A required field is present but blank.
    #[error("manifest field '{field}' is blank")]
    BlankField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// The manifest could not be serialized.
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ManifestError {
    /// Returns `true` when the error concerns a required field rather than
    /// document syntax.
    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::BlankField { .. })
    }
}

/// Errors from reading and writing package containers.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The bytes are not a readable compressed container.
    #[error("payload is not a valid package container: {0}")]
    InvalidContainer(#[source] std::io::Error),

    /// An entry inside the container could not be read.
    #[error("failed to read archive entry: {0}")]
    EntryRead(#[source] std::io::Error),

    /// An entry could not be written while assembling.
    #[error("failed to write archive entry '{path}': {source}")]
    EntryWrite {
        /// Entry path being written.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An entry path escapes the archive root.
    #[error("archive entry '{path}' is unsafe: {reason}")]
    UnsafeEntry {
        /// Offending entry path.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// The container could not be finalized after writing entries.
    #[error("failed to finalize archive: {0}")]
    Finalize(#[source] std::io::Error),

    /// The container holds no manifest document.
    #[error("archive has no '{}' entry", MANIFEST_PATH)]
    MissingManifest,

    /// The embedded manifest failed to decode or encode.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl ArchiveError {
    /// Returns `true` when the error means the bytes cannot be a package,
    /// as opposed to an I/O problem while writing one.
    #[must_use]
    pub const fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidContainer(_)
                | Self::EntryRead(_)
                | Self::UnsafeEntry { .. }
                | Self::MissingManifest
                | Self::Manifest(_)
        )
    }
}

/// Convenience alias for results with [`ArchiveError`].
pub type Result<T> = std::result::Result<T, ArchiveError>;
