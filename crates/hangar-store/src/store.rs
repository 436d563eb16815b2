//! Directory-backed package store.
//!
//! The store treats one filesystem directory as the source of truth for
//! installed packages and never touches the disk itself: every read,
//! write, copy and delete goes through the [`Platform`] collaborator it
//! was constructed with. Directories are method parameters, so one store
//! can serve any number of package locations.
//!
//! Installation is staged: [`PackageStore::add`] first writes the archive
//! into a staging directory the caller controls, then copies it into the
//! package directory with overwrite enabled. A failed write never leaves a
//! half-installed package behind; until the copy succeeds, the packages
//! directory is untouched, and a stale staging file is inert.

use crate::error::StoreError;
use crate::types::Package;
use hangar_archive::{archive, Manifest, ARCHIVE_EXTENSION};
use hangar_core::{Fqn, Outcome, Platform, Version};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// On-disk file name of a package: `{fqn}.{version}.hpk`.
///
/// # Examples
///
/// ```
/// use hangar_core::{Fqn, Version};
/// use hangar_store::package_file_name;
///
/// let name = package_file_name(&Fqn::new("example.app.dashboard"), &Version::new("1.0.0"));
/// assert_eq!(name, "example.app.dashboard.1.0.0.hpk");
/// ```
#[must_use]
pub fn package_file_name(fqn: &Fqn, version: &Version) -> String {
    format!("{fqn}.{version}.{ARCHIVE_EXTENSION}")
}

/// A package collection backed by a directory of archive files.
#[derive(Debug, Clone)]
pub struct PackageStore {
    platform: Arc<dyn Platform>,
}

impl PackageStore {
    /// Creates a store over the given platform.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    /// Lists candidate package files in `directory`.
    ///
    /// Failure when the directory cannot be read. An empty but readable
    /// directory is a Success with an empty list.
    pub fn list(&self, directory: &Path) -> Outcome<Vec<PathBuf>> {
        self.platform.list_files(directory)
    }

    /// Opens every candidate file in `directory` and returns the valid
    /// packages, in listing order.
    ///
    /// Files that cannot be read or are not package archives are skipped,
    /// not fatal. Success when there were no candidates at all or at least
    /// one opened; Warning when candidates existed but none were valid.
    pub fn scan_all(&self, directory: &Path) -> Outcome<Vec<Package>> {
        let (verdict, listed) = self.list(directory).split();
        let Some(candidates) = listed else {
            return verdict.retype();
        };

        let candidate_count = candidates.len();
        let mut packages = Vec::new();
        for path in candidates {
            if let Some(package) = self.open_candidate(&path) {
                packages.push(package);
            }
        }

        tracing::debug!(
            directory = %directory.display(),
            candidates = candidate_count,
            valid = packages.len(),
            "package scan complete"
        );

        let mut outcome = if packages.is_empty() && candidate_count > 0 {
            Outcome::warning(
                packages,
                format!("no valid packages among {candidate_count} candidate files"),
            )
        } else {
            Outcome::success(packages)
        };
        outcome.absorb(&verdict);
        outcome
    }

    /// Installs archive bytes as `{fqn}.{version}.hpk`: writes them into
    /// `staging`, then copies the staged file into `directory` with
    /// overwrite enabled.
    ///
    /// Failure when either delegate fails; the packages directory is only
    /// modified by the final copy. The returned package carries the
    /// install path and no fingerprint.
    pub fn add(
        &self,
        directory: &Path,
        staging: &Path,
        manifest: &Manifest,
        archive_bytes: &[u8],
    ) -> Outcome<Package> {
        let file_name = package_file_name(&manifest.fqn, &manifest.version);
        let staged_path = staging.join(&file_name);
        let install_path = directory.join(&file_name);

        let (write_verdict, written) = self
            .platform
            .write_file_bytes(&staged_path, archive_bytes)
            .split();
        let Some(staged) = written else {
            return write_verdict.retype();
        };

        let (copy_verdict, copied) = self.platform.copy_file(&staged, &install_path, true).split();
        let Some(installed) = copied else {
            return copy_verdict.retype();
        };

        tracing::info!(package = %file_name, path = %installed.display(), "package added to store");
        let mut outcome = Outcome::success(Package::new(manifest.clone(), installed));
        outcome.absorb(&write_verdict);
        outcome.absorb(&copy_verdict);
        outcome
    }

    /// Deletes the stored file whose name starts with `{fqn}.`.
    ///
    /// Failure when no file matches or the delete delegate fails.
    pub fn remove(&self, directory: &Path, fqn: &Fqn) -> Outcome<()> {
        let (verdict, listed) = self.list(directory).split();
        let Some(candidates) = listed else {
            return verdict.retype();
        };

        let prefix = format!("{fqn}.");
        let Some(target) = candidates.into_iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        }) else {
            return Outcome::failure(StoreError::NotFound { fqn: fqn.clone() }.to_string());
        };

        let (delete_verdict, deleted) = self.platform.delete_file(&target).split();
        if deleted.is_none() {
            return delete_verdict.retype();
        }

        tracing::info!(%fqn, path = %target.display(), "package removed from store");
        let mut outcome = Outcome::success(());
        outcome.absorb(&verdict);
        outcome.absorb(&delete_verdict);
        outcome
    }

    /// Reads and opens one candidate, or skips it with a debug log.
    fn open_candidate(&self, path: &Path) -> Option<Package> {
        let Some(bytes) = self.platform.read_file_bytes(path).into_value() else {
            tracing::debug!(path = %path.display(), "skipping unreadable file during scan");
            return None;
        };

        let opened = archive::open(&bytes);
        if opened.is_failure() {
            tracing::debug!(
                path = %path.display(),
                messages = ?opened.messages(),
                "skipping non-package file during scan"
            );
            return None;
        }
        if opened.is_warning() {
            tracing::debug!(
                path = %path.display(),
                messages = ?opened.messages(),
                "package opened with warnings"
            );
        }

        let contents = opened.into_value()?;
        Some(Package::new(contents.manifest, path))
    }
}
