//! File-system collaborator consumed by the package subsystem.
//!
//! The store and manager never touch the filesystem directly; they go
//! through [`Platform`], so hosts can substitute their own I/O layer and
//! tests can inject failures. [`LocalPlatform`] is the stock
//! implementation over `std::fs`.
//!
//! Every method returns an [`Outcome`]: I/O problems are runtime data
//! conditions here, not programming errors.

use crate::error::CoreError;
use crate::outcome::Outcome;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File-system primitives the package subsystem delegates to.
///
/// Implementations must be safe to share across threads; the manager calls
/// them from both blocking and async paths.
pub trait Platform: fmt::Debug + Send + Sync {
    /// Lists the files directly inside `directory`.
    ///
    /// Failure when the directory is missing or unreadable. An empty,
    /// readable directory is `Success` with an empty sequence. Ordering is
    /// stable within one call but otherwise unspecified.
    fn list_files(&self, directory: &Path) -> Outcome<Vec<PathBuf>>;

    /// Reads the full contents of `path`.
    fn read_file_bytes(&self, path: &Path) -> Outcome<Vec<u8>>;

    /// Writes `bytes` to `path`, creating parent directories as needed.
    ///
    /// Returns the written path on success.
    fn write_file_bytes(&self, path: &Path, bytes: &[u8]) -> Outcome<PathBuf>;

    /// Copies `source` to `dest`, creating parent directories as needed.
    ///
    /// With `overwrite` unset, an existing destination is a Failure.
    /// Returns the destination path on success.
    fn copy_file(&self, source: &Path, dest: &Path, overwrite: bool) -> Outcome<PathBuf>;

    /// Deletes the file at `path`.
    ///
    /// Returns the deleted path on success; a missing file is a Failure.
    fn delete_file(&self, path: &Path) -> Outcome<PathBuf>;
}

/// [`Platform`] implementation over the local filesystem.
///
/// # Examples
///
/// ```
/// use hangar_core::{LocalPlatform, Platform};
///
/// let platform = LocalPlatform::new();
/// let listing = platform.list_files(std::path::Path::new("/nonexistent-hangar"));
/// assert!(listing.is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPlatform;

impl LocalPlatform {
    /// Creates a local platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl Platform for LocalPlatform {
    fn list_files(&self, directory: &Path) -> Outcome<Vec<PathBuf>> {
        if !directory.is_dir() {
            let error = CoreError::ListDirectory {
                path: directory.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            };
            return Outcome::failure(error.to_string());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        files.push(entry.into_path());
                    }
                }
                Err(error) => {
                    let source = error
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed"));
                    let error = CoreError::ListDirectory {
                        path: directory.to_path_buf(),
                        source,
                    };
                    return Outcome::failure(error.to_string());
                }
            }
        }
        Outcome::success(files)
    }

    fn read_file_bytes(&self, path: &Path) -> Outcome<Vec<u8>> {
        fs::read(path)
            .map_err(|source| CoreError::ReadFile {
                path: path.to_path_buf(),
                source,
            })
            .into()
    }

    fn write_file_bytes(&self, path: &Path, bytes: &[u8]) -> Outcome<PathBuf> {
        let result = Self::ensure_parent(path)
            .and_then(|()| fs::write(path, bytes))
            .map(|()| path.to_path_buf())
            .map_err(|source| CoreError::WriteFile {
                path: path.to_path_buf(),
                source,
            });
        if result.is_ok() {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "file written");
        }
        result.into()
    }

    fn copy_file(&self, source: &Path, dest: &Path, overwrite: bool) -> Outcome<PathBuf> {
        if !overwrite && dest.exists() {
            let error = CoreError::DestinationExists {
                to: dest.to_path_buf(),
            };
            return Outcome::failure(error.to_string());
        }
        let result = Self::ensure_parent(dest)
            .and_then(|()| fs::copy(source, dest))
            .map(|_| dest.to_path_buf())
            .map_err(|io_error| CoreError::CopyFile {
                from: source.to_path_buf(),
                to: dest.to_path_buf(),
                source: io_error,
            });
        if result.is_ok() {
            tracing::debug!(
                from = %source.display(),
                to = %dest.display(),
                "file copied"
            );
        }
        result.into()
    }

    fn delete_file(&self, path: &Path) -> Outcome<PathBuf> {
        let result = fs::remove_file(path)
            .map(|()| path.to_path_buf())
            .map_err(|source| CoreError::DeleteFile {
                path: path.to_path_buf(),
                source,
            });
        if result.is_ok() {
            tracing::debug!(path = %path.display(), "file deleted");
        }
        result.into()
    }
}
