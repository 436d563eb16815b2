//! Host-supplied directory configuration.
//!
//! The host application decides where installed packages live and where
//! staged writes go; the core only consumes the two paths. Keeping staging
//! separate from the packages directory is what makes a failed write inert:
//! nothing under the packages directory changes until the final copy.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directories the package subsystem operates on.
///
/// # Examples
///
/// ```
/// use hangar_core::Directories;
///
/// let dirs = Directories::new("/var/lib/app/packages", "/var/lib/app/temp");
/// assert!(dirs.validate().is_ok());
///
/// let nested = Directories::under_root("/var/lib/app");
/// assert_eq!(nested.packages.file_name().unwrap(), "packages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directories {
    /// Directory holding installed package archives.
    pub packages: PathBuf,

    /// Staging directory for in-flight writes.
    ///
    /// Package files are written here first and only copied into
    /// `packages` once the write has fully succeeded.
    pub temp: PathBuf,
}

impl Directories {
    /// Creates a configuration from explicit paths.
    #[must_use]
    pub fn new(packages: impl Into<PathBuf>, temp: impl Into<PathBuf>) -> Self {
        Self {
            packages: packages.into(),
            temp: temp.into(),
        }
    }

    /// Creates the conventional layout under a single root:
    /// `<root>/packages` and `<root>/temp`.
    #[must_use]
    pub fn under_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            packages: root.join("packages"),
            temp: root.join("temp"),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDirectories`] when either path is empty
    /// or the two paths coincide (staging inside the packages directory
    /// would make failed writes visible to scans).
    pub fn validate(&self) -> Result<()> {
        if self.packages.as_os_str().is_empty() {
            return Err(CoreError::InvalidDirectories {
                reason: "packages path is empty".to_string(),
            });
        }
        if self.temp.as_os_str().is_empty() {
            return Err(CoreError::InvalidDirectories {
                reason: "temp path is empty".to_string(),
            });
        }
        if self.packages == self.temp {
            return Err(CoreError::InvalidDirectories {
                reason: "packages and temp must be distinct directories".to_string(),
            });
        }
        Ok(())
    }
}
