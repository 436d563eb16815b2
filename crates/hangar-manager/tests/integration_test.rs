//! Integration tests for hangar-manager
//!
//! These tests drive the full workflow over a real temporary directory:
//! starting the manager, creating, scanning, verifying and deleting
//! packages, and stopping again, in both blocking and async form.

use hangar_archive::{archive, ContentItem, Manifest, PayloadFile};
use hangar_core::{
    Directories, Fqn, LocalPlatform, PluginKind, State, Stateful, StopKind,
};
use hangar_manager::PackageManager;
use hangar_store::package_file_name;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn build_manager() -> (TempDir, PackageManager) {
    let root = TempDir::new().expect("tempdir");
    let directories = Directories::under_root(root.path());
    fs::create_dir_all(&directories.packages).expect("packages dir");
    fs::create_dir_all(&directories.temp).expect("temp dir");
    let manager = PackageManager::new(Arc::new(LocalPlatform::new()), directories);
    (root, manager)
}

fn started_manager() -> (TempDir, PackageManager) {
    let (root, manager) = build_manager();
    let started = manager.start();
    assert!(started.is_success(), "messages: {:?}", started.messages());
    (root, manager)
}

fn manifest_for(fqn: &str, version: &str) -> Manifest {
    let mut manifest = Manifest::new("Integration Fixture", fqn, version, PluginKind::Endpoint);
    manifest
        .content_items
        .push(ContentItem::new("module", "bin/module.bin"));
    manifest
}

fn payload_with(manifest: &Manifest, module_bytes: &[u8]) -> Vec<u8> {
    let payload = vec![PayloadFile::new("bin/module.bin", module_bytes.to_vec())];
    archive::assemble(manifest, &payload)
        .into_value()
        .expect("assembled payload")
}

fn package_files(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(directory)
        .expect("read packages dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Create, scan and delete one package end to end, checking the on-disk
/// file appears and disappears with the index.
#[test]
fn create_scan_delete_round_trip() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.endpoints.rest", "2.1.0");
    let payload = payload_with(&manifest, b"endpoint module");

    let created = manager.create_package(&payload);
    assert!(created.is_success(), "messages: {:?}", created.messages());

    let expected_file = package_file_name(&manifest.fqn, &manifest.version);
    assert_eq!(
        package_files(&manager.directories().packages),
        vec![expected_file]
    );

    let scanned = manager.scan_packages();
    let packages = scanned.into_value().expect("scan result");
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].fqn(), &manifest.fqn);
    assert_eq!(packages[0].version(), &manifest.version);

    assert!(manager.delete_package(&manifest.fqn).is_success());
    assert!(manager.find_package(&manifest.fqn).is_none());
    assert!(package_files(&manager.directories().packages).is_empty());

    let rescan = manager.scan_packages();
    assert!(rescan.into_value().expect("rescan").is_empty());
}

/// A payload that is not a valid archive is refused and leaves the
/// packages directory untouched.
#[test]
fn rejected_payload_leaves_the_store_unchanged() {
    let (_root, manager) = started_manager();

    let created = manager.create_package(b"not a package archive at all");
    assert!(created.is_failure());
    assert_eq!(
        created.messages()[0],
        "payload is not an installable package archive"
    );
    assert!(package_files(&manager.directories().packages).is_empty());
    assert!(manager.packages().is_empty());
}

/// Starting over a directory that already holds package files warms the
/// index from disk, skipping files that are not packages.
#[test]
fn start_warms_the_index_from_preexisting_files() {
    let (_root, manager) = build_manager();
    let packages_dir = manager.directories().packages.clone();

    for (fqn, version) in [
        ("example.connectors.modbus", "1.0.0"),
        ("example.endpoints.rest", "3.2.1"),
    ] {
        let manifest = manifest_for(fqn, version);
        let name = package_file_name(&manifest.fqn, &manifest.version);
        fs::write(packages_dir.join(name), payload_with(&manifest, b"bytes"))
            .expect("write fixture");
    }
    fs::write(packages_dir.join("notes.txt"), b"just a stray file").expect("write stray");

    let started = manager.start();
    assert!(started.is_success(), "messages: {:?}", started.messages());
    assert_eq!(manager.state(), State::Running);

    let mut indexed: Vec<String> = manager
        .packages()
        .iter()
        .map(|package| package.fqn().as_str().to_string())
        .collect();
    indexed.sort();
    assert_eq!(
        indexed,
        vec!["example.connectors.modbus", "example.endpoints.rest"]
    );
}

/// A graceful stop clears the index; a later start rebuilds it from disk.
#[test]
fn restart_rebuilds_the_index_from_disk() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.apps.dashboard", "1.0.0");
    manager
        .create_package(&payload_with(&manifest, b"dashboard"))
        .into_value()
        .expect("created");

    assert!(manager.stop(StopKind::Graceful).is_success());
    assert_eq!(manager.state(), State::Stopped);
    assert!(manager.packages().is_empty());

    assert!(manager.start().is_success());
    assert!(manager.find_package(&manifest.fqn).is_some());
}

/// An abortive stop still reaches Stopped but skips teardown, so the
/// index keeps its last contents.
#[test]
fn abortive_stop_skips_the_index_teardown() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.apps.dashboard", "1.0.0");
    manager
        .create_package(&payload_with(&manifest, b"dashboard"))
        .into_value()
        .expect("created");

    assert!(manager.stop(StopKind::Abort).is_success());
    assert_eq!(manager.state(), State::Stopped);
    assert_eq!(manager.packages().len(), 1);
}

/// Verification passes right after creation and fails once the stored
/// file is tampered with.
#[test]
fn verify_detects_on_disk_tampering() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.connectors.modbus", "1.4.0");
    let package = manager
        .create_package(&payload_with(&manifest, b"modbus module"))
        .into_value()
        .expect("created");

    assert!(manager.verify_package(&manifest.fqn).is_success());

    fs::write(package.file_path(), b"tampered contents").expect("tamper");

    let verified = manager.verify_package(&manifest.fqn);
    assert!(verified.is_failure());
    assert!(verified
        .messages()
        .iter()
        .any(|m| m.contains("fingerprint mismatch")));
}

/// Two concurrent creates for the same fqn serialize on the per-fqn lock:
/// neither fails, exactly one file remains, and the index agrees with the
/// bytes on disk.
#[test]
fn concurrent_creates_for_one_fqn_serialize() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.connectors.modbus", "1.0.0");
    let payload_a = payload_with(&manifest, b"first module build");
    let payload_b = payload_with(&manifest, b"second module build");

    let (outcome_a, outcome_b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| manager.create_package(&payload_a));
        let b = scope.spawn(|| manager.create_package(&payload_b));
        (a.join().expect("thread a"), b.join().expect("thread b"))
    });

    assert!(!outcome_a.is_failure(), "messages: {:?}", outcome_a.messages());
    assert!(!outcome_b.is_failure(), "messages: {:?}", outcome_b.messages());

    let files = package_files(&manager.directories().packages);
    assert_eq!(files.len(), 1);
    assert_eq!(manager.packages().len(), 1);

    // The last holder of the lock wrote both the file and the index
    // entry, so the recorded fingerprint matches the stored bytes.
    assert!(manager.verify_package(&manifest.fqn).is_success());
}

/// The async variants run the same pipeline on the blocking pool.
#[tokio::test]
async fn async_variants_mirror_the_blocking_contract() {
    let (_root, manager) = started_manager();
    let manifest = manifest_for("example.endpoints.rest", "2.0.0");
    let payload = payload_with(&manifest, b"endpoint module");

    let created = manager.create_package_async(payload).await;
    assert!(created.is_success(), "messages: {:?}", created.messages());

    let scanned = manager.scan_packages_async().await;
    assert_eq!(scanned.into_value().expect("scan result").len(), 1);

    let deleted = manager.delete_package_async(manifest.fqn.clone()).await;
    assert!(deleted.is_success(), "messages: {:?}", deleted.messages());

    let rescan = manager.scan_packages_async().await;
    assert!(rescan.into_value().expect("rescan").is_empty());
}

/// A junk payload fails through the async path exactly as it does through
/// the blocking one.
#[tokio::test]
async fn async_create_of_junk_bytes_fails() {
    let (_root, manager) = started_manager();

    let created = manager.create_package_async(b"junk".to_vec()).await;
    assert!(created.is_failure());
    assert_eq!(
        created.messages()[0],
        "payload is not an installable package archive"
    );
}

/// Operations before start are refused without creating any files.
#[test]
fn operations_before_start_are_refused() {
    let (_root, manager) = build_manager();
    let fqn = Fqn::new("example.apps.dashboard");

    assert!(manager.create_package(b"irrelevant").is_failure());
    assert!(manager.scan_packages().is_failure());
    assert!(manager.delete_package(&fqn).is_failure());
    assert!(package_files(&manager.directories().packages).is_empty());
}
