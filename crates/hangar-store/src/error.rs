//! Error types for the package store.

use hangar_core::Fqn;
use thiserror::Error;

/// Errors from store lookups and package bookkeeping.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored file matches the requested fqn.
    #[error("no package file for '{fqn}' in the store")]
    NotFound {
        /// The fqn that was searched for.
        fqn: Fqn,
    },

    /// A package fingerprint was assigned a second time.
    #[error("fingerprint for '{fqn}' is already set")]
    FingerprintAlreadySet {
        /// The package whose fingerprint was re-assigned.
        fqn: Fqn,
    },
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
