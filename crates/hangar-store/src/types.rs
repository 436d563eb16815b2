//! The store-resident package entity.

use crate::error::StoreError;
use hangar_archive::Manifest;
use hangar_core::{Fqn, Version};
use std::path::{Path, PathBuf};

/// A package as the store sees it: a manifest bound to an on-disk archive.
///
/// The manifest and path are fixed at construction. The fingerprint is
/// absent until [`set_fingerprint`](Self::set_fingerprint) assigns it,
/// which is only possible once: it is computed over the fully-assembled
/// archive bytes, so it cannot exist before the archive does, and it must
/// never silently change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    manifest: Manifest,
    file_path: PathBuf,
    fingerprint: Option<String>,
}

impl Package {
    /// Creates a package with no fingerprint.
    #[must_use]
    pub fn new(manifest: Manifest, file_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            file_path: file_path.into(),
            fingerprint: None,
        }
    }

    /// The embedded manifest.
    #[must_use]
    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The package's fully-qualified name.
    #[must_use]
    pub const fn fqn(&self) -> &Fqn {
        &self.manifest.fqn
    }

    /// The package's version label.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.manifest.version
    }

    /// Location of the backing archive file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// The assigned fingerprint, if one has been set.
    #[must_use]
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Assigns the fingerprint computed over the assembled archive bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FingerprintAlreadySet`] if a fingerprint was
    /// assigned before.
    pub fn set_fingerprint(&mut self, fingerprint: impl Into<String>) -> Result<(), StoreError> {
        if self.fingerprint.is_some() {
            return Err(StoreError::FingerprintAlreadySet {
                fqn: self.manifest.fqn.clone(),
            });
        }
        self.fingerprint = Some(fingerprint.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::PluginKind;

    fn package() -> Package {
        let manifest = Manifest::new(
            "Test Plugin",
            "example.plugins.test",
            "1.2.3",
            PluginKind::App,
        );
        Package::new(manifest, "/store/example.plugins.test.1.2.3.hpk")
    }

    #[test]
    fn accessors_expose_the_identity() {
        let package = package();
        assert_eq!(package.fqn().as_str(), "example.plugins.test");
        assert_eq!(package.version().as_str(), "1.2.3");
        assert_eq!(
            package.file_path(),
            Path::new("/store/example.plugins.test.1.2.3.hpk")
        );
        assert!(package.fingerprint().is_none());
    }

    #[test]
    fn fingerprint_can_be_set_exactly_once() {
        let mut package = package();
        package.set_fingerprint("sha256:00ff").expect("first set");
        assert_eq!(package.fingerprint(), Some("sha256:00ff"));

        let second = package.set_fingerprint("sha256:ffee");
        assert!(matches!(
            second,
            Err(StoreError::FingerprintAlreadySet { .. })
        ));
        assert_eq!(package.fingerprint(), Some("sha256:00ff"));
    }
}
