//! The package manager orchestrator.
//!
//! [`PackageManager`] ties the pieces together: a [`Lifecycle`] that gates
//! when work may happen, a [`PackageStore`] over one packages directory,
//! the archive codec for validating payloads, and the fingerprint scheme
//! for integrity. It exposes create, scan and delete in blocking and
//! async form, plus a warm in-memory index of what the store holds.
//!
//! The manager is an explicitly constructed value, not a process-wide
//! singleton: the host builds one with its platform and directories,
//! clones the handle wherever it is needed (clones share state), calls
//! [`start`](PackageManager::start) before using it and
//! [`stop`](PackageManager::stop) when shutting down.
//!
//! Mutations are serialized per fqn: two concurrent creates, or a create
//! racing a delete, for the same fqn never interleave their file steps.
//! Operations on unrelated fqns proceed independently, and scans run
//! without any fqn lock at all.

use crate::loader::ModuleLoader;
use hangar_archive::{archive, fingerprint};
use hangar_core::{Directories, Fqn, Lifecycle, Outcome, Platform, State, Stateful, StopKind};
use hangar_store::{Package, PackageStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle-supervised orchestrator for one package directory.
///
/// Cheap to clone; all clones share the same lifecycle, index and locks.
#[derive(Debug, Clone)]
pub struct PackageManager {
    inner: Arc<ManagerInner>,
}

#[derive(Debug)]
struct ManagerInner {
    platform: Arc<dyn Platform>,
    directories: Directories,
    store: PackageStore,
    lifecycle: Mutex<Lifecycle>,
    index: Mutex<Vec<Package>>,
    fqn_locks: Mutex<HashMap<Fqn, Arc<Mutex<()>>>>,
}

/// Locks a mutex, continuing with the inner data if a holder panicked.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn not_indexed(fqn: &Fqn) -> String {
    format!("no indexed package for '{fqn}'; scan or create it first")
}

impl PackageManager {
    /// Creates a stopped manager over the given platform and directories.
    ///
    /// Nothing touches the filesystem until [`start`](Self::start).
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, directories: Directories) -> Self {
        let store = PackageStore::new(Arc::clone(&platform));
        Self {
            inner: Arc::new(ManagerInner {
                platform,
                directories,
                store,
                lifecycle: Mutex::new(Lifecycle::new()),
                index: Mutex::new(Vec::new()),
                fqn_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The directories this manager operates on.
    #[must_use]
    pub fn directories(&self) -> &Directories {
        &self.inner.directories
    }

    /// Starts the manager: Stopped → Starting → Running.
    ///
    /// The startup hook validates the directory configuration, then scans
    /// the packages directory to warm the index. A validation error or a
    /// scan Failure faults the manager instead of letting it run over a
    /// store it cannot read; a Warning (for example an empty or
    /// junk-littered store) is reported but still starts.
    pub fn start(&self) -> Outcome<State> {
        let mut lifecycle = lock_ignoring_poison(&self.inner.lifecycle);
        lifecycle.start_with(|| {
            if let Err(error) = self.inner.directories.validate() {
                return Outcome::failure(error.to_string());
            }
            let (verdict, packages) = self.scan_and_index().split();
            if let Some(packages) = packages {
                tracing::info!(indexed = packages.len(), "package manager started");
            }
            verdict
        })
    }

    /// Stops the manager from Running, always reaching Stopped.
    ///
    /// A graceful stop runs the teardown hook, which clears the index; an
    /// abortive stop skips it. Teardown problems are reported as warnings,
    /// never block reaching Stopped.
    pub fn stop(&self, kind: StopKind) -> Outcome<State> {
        let mut lifecycle = lock_ignoring_poison(&self.inner.lifecycle);
        lifecycle.stop_with(kind, || {
            let mut index = lock_ignoring_poison(&self.inner.index);
            let dropped = index.len();
            index.clear();
            tracing::info!(dropped, "package index cleared on stop");
            Outcome::success(())
        })
    }

    /// Recovers a Faulted manager back to Stopped.
    pub fn reset(&self) -> Outcome<State> {
        lock_ignoring_poison(&self.inner.lifecycle).reset()
    }

    /// Validates a payload as a ready package archive and installs it.
    ///
    /// Pipeline: open the payload (it must already be a well-formed
    /// archive with a manifest), compute the fingerprint of the payload
    /// bytes under the decoded identity, install through the store, and
    /// record the result in the index. The first failing stage
    /// short-circuits with that stage's messages; open and install
    /// warnings are carried on the success.
    pub fn create_package(&self, payload: &[u8]) -> Outcome<Package> {
        let gate = self.ensure_operational();
        if gate.is_failure() {
            return gate.retype();
        }

        let (open_verdict, contents) = archive::open(payload).split();
        let Some(contents) = contents else {
            let mut failure: Outcome<Package> =
                Outcome::failure("payload is not an installable package archive");
            failure.absorb(&open_verdict);
            return failure;
        };
        let manifest = contents.manifest;

        let (fingerprint_verdict, computed) =
            fingerprint::compute(payload, &manifest.fqn, &manifest.version).split();
        let Some(fingerprint) = computed else {
            return fingerprint_verdict.retype();
        };

        let lock = self.fqn_lock(&manifest.fqn);
        let _exclusive = lock_ignoring_poison(&lock);

        let (add_verdict, added) = self
            .inner
            .store
            .add(
                &self.inner.directories.packages,
                &self.inner.directories.temp,
                &manifest,
                payload,
            )
            .split();
        let Some(mut package) = added else {
            return add_verdict.retype();
        };

        if let Err(error) = package.set_fingerprint(fingerprint) {
            return Outcome::failure(error.to_string());
        }
        self.index_insert(package.clone());

        tracing::info!(fqn = %package.fqn(), version = %package.version(), "package created");
        let mut outcome = Outcome::success(package);
        outcome.absorb(&open_verdict);
        outcome.absorb(&fingerprint_verdict);
        outcome.absorb(&add_verdict);
        outcome
    }

    /// Scans the packages directory and refreshes the index.
    ///
    /// Returns the store's scan Outcome unchanged, including the Warning
    /// for a directory whose candidates all failed to open.
    pub fn scan_packages(&self) -> Outcome<Vec<Package>> {
        let gate = self.ensure_operational();
        if gate.is_failure() {
            return gate.retype();
        }
        self.scan_and_index()
    }

    /// Removes the stored package whose file name starts with `{fqn}.`.
    pub fn delete_package(&self, fqn: &Fqn) -> Outcome<()> {
        let gate = self.ensure_operational();
        if gate.is_failure() {
            return gate.retype();
        }

        let lock = self.fqn_lock(fqn);
        let _exclusive = lock_ignoring_poison(&lock);

        let removed = self
            .inner
            .store
            .remove(&self.inner.directories.packages, fqn);
        if !removed.is_failure() {
            lock_ignoring_poison(&self.inner.index).retain(|package| package.fqn() != fqn);
            tracing::info!(%fqn, "package deleted");
        }
        removed
    }

    /// Async [`create_package`](Self::create_package), run on the blocking
    /// pool. Same contract, same per-fqn exclusion.
    pub async fn create_package_async(&self, payload: Vec<u8>) -> Outcome<Package> {
        let manager = self.clone();
        run_blocking(move || manager.create_package(&payload)).await
    }

    /// Async [`scan_packages`](Self::scan_packages).
    pub async fn scan_packages_async(&self) -> Outcome<Vec<Package>> {
        let manager = self.clone();
        run_blocking(move || manager.scan_packages()).await
    }

    /// Async [`delete_package`](Self::delete_package).
    pub async fn delete_package_async(&self, fqn: Fqn) -> Outcome<()> {
        let manager = self.clone();
        run_blocking(move || manager.delete_package(&fqn)).await
    }

    /// Snapshot of the warm index.
    #[must_use]
    pub fn packages(&self) -> Vec<Package> {
        lock_ignoring_poison(&self.inner.index).clone()
    }

    /// Looks a package up in the warm index.
    #[must_use]
    pub fn find_package(&self, fqn: &Fqn) -> Option<Package> {
        lock_ignoring_poison(&self.inner.index)
            .iter()
            .find(|package| package.fqn() == fqn)
            .cloned()
    }

    /// Re-reads an indexed package's archive and checks it against the
    /// fingerprint recorded at creation.
    ///
    /// Failure when the package is not indexed, carries no fingerprint,
    /// cannot be read back, or the fingerprints disagree.
    pub fn verify_package(&self, fqn: &Fqn) -> Outcome<()> {
        let gate = self.ensure_operational();
        if gate.is_failure() {
            return gate.retype();
        }

        let Some(package) = self.find_package(fqn) else {
            return Outcome::failure(not_indexed(fqn));
        };
        let Some(expected) = package.fingerprint().map(str::to_string) else {
            return Outcome::failure(format!(
                "package '{fqn}' has no recorded fingerprint to verify against"
            ));
        };

        let (read_verdict, bytes) = self
            .inner
            .platform
            .read_file_bytes(package.file_path())
            .split();
        let Some(bytes) = bytes else {
            return read_verdict.retype();
        };

        fingerprint::verify(&bytes, package.fqn(), package.version(), &expected)
    }

    /// Hands an indexed package to a host-supplied [`ModuleLoader`].
    pub fn load_with<L: ModuleLoader>(&self, loader: &L, fqn: &Fqn) -> Outcome<L::Module> {
        let gate = self.ensure_operational();
        if gate.is_failure() {
            return gate.retype();
        }
        let Some(package) = self.find_package(fqn) else {
            return Outcome::failure(not_indexed(fqn));
        };
        loader.load(&package)
    }

    /// Fails unless the lifecycle is Starting or Running.
    fn ensure_operational(&self) -> Outcome<()> {
        lock_ignoring_poison(&self.inner.lifecycle).ensure_operational()
    }

    /// Scan without the lifecycle gate, for use from the startup hook.
    fn scan_and_index(&self) -> Outcome<Vec<Package>> {
        let scanned = self
            .inner
            .store
            .scan_all(&self.inner.directories.packages);
        if let Some(packages) = scanned.value() {
            self.refresh_index(packages);
        }
        scanned
    }

    /// Replaces the index with the scan result, carrying fingerprints
    /// recorded earlier for entries that still match on identity and path.
    fn refresh_index(&self, scanned: &[Package]) {
        let mut index = lock_ignoring_poison(&self.inner.index);
        let previous = std::mem::take(&mut *index);
        *index = scanned
            .iter()
            .cloned()
            .map(|mut fresh| {
                let prior = previous.iter().find(|p| {
                    p.fqn() == fresh.fqn()
                        && p.version() == fresh.version()
                        && p.file_path() == fresh.file_path()
                });
                if let Some(known) = prior.and_then(Package::fingerprint) {
                    if fresh.set_fingerprint(known).is_err() {
                        tracing::debug!(fqn = %fresh.fqn(), "scanned package already carried a fingerprint");
                    }
                }
                fresh
            })
            .collect();
    }

    /// Inserts a package, replacing any index entry with the same fqn.
    fn index_insert(&self, package: Package) {
        let mut index = lock_ignoring_poison(&self.inner.index);
        index.retain(|existing| existing.fqn() != package.fqn());
        index.push(package);
    }

    /// Returns the mutation lock for one fqn, creating it on first use.
    fn fqn_lock(&self, fqn: &Fqn) -> Arc<Mutex<()>> {
        let mut locks = lock_ignoring_poison(&self.inner.fqn_locks);
        Arc::clone(locks.entry(fqn.clone()).or_default())
    }
}

impl Stateful for PackageManager {
    fn state(&self) -> State {
        lock_ignoring_poison(&self.inner.lifecycle).state()
    }
}

/// Runs a blocking package operation on the tokio blocking pool.
///
/// A panicked or cancelled task surfaces as a Failure, never a propagated
/// panic.
async fn run_blocking<T, F>(task: F) -> Outcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(outcome) => outcome,
        Err(error) => Outcome::failure(format!("background package task failed: {error}")),
    }
}
