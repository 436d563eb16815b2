//! Package container codec.
//!
//! A package archive is a gzip-compressed tar container holding exactly one
//! manifest document at [`MANIFEST_PATH`] plus zero or more payload files
//! whose relative paths match the manifest's `contentItems`. On disk a
//! package file is named `{fqn}.{version}.hpk`.
//!
//! [`assemble`] produces the container bytes from a manifest and payload
//! slice; [`open`] is the inverse and is the single entry point through
//! which foreign bytes enter the system. Bad bytes of any shape come back
//! as a Failure, never a panic. Entry paths that point outside the archive
//! root (absolute or `..`-traversing) are rejected in both directions.
//!
//! # Examples
//!
//! ```
//! use hangar_archive::archive::{self, PayloadFile};
//! use hangar_archive::manifest::{ContentItem, Manifest};
//! use hangar_core::PluginKind;
//!
//! let mut manifest = Manifest::new("Demo", "example.demo", "1.0.0", PluginKind::App);
//! manifest.content_items.push(ContentItem::new("module", "bin/module.so"));
//!
//! let payload = vec![PayloadFile::new("bin/module.so", b"module bytes".to_vec())];
//! let assembled = archive::assemble(&manifest, &payload);
//! assert!(assembled.is_success());
//!
//! let opened = archive::open(assembled.value().unwrap());
//! assert!(opened.is_success());
//! assert_eq!(opened.value().unwrap().manifest, manifest);
//! ```

use crate::error::ArchiveError;
use crate::manifest::{self, Manifest};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use hangar_core::Outcome;
use std::io::Read;
use std::path::{Component, Path};

/// Well-known archive path of the manifest document.
pub const MANIFEST_PATH: &str = "manifest.json";

/// File extension of an on-disk package archive.
pub const ARCHIVE_EXTENSION: &str = "hpk";

/// One file carried inside a package archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    /// Entry path relative to the archive root.
    pub path: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl PayloadFile {
    /// Creates a payload file.
    #[must_use]
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Everything recovered from a package archive by [`open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveContents {
    /// The embedded manifest.
    pub manifest: Manifest,
    /// Payload files in archive entry order, manifest excluded.
    pub payload: Vec<PayloadFile>,
}

/// Writes a manifest and payload files into a new archive.
///
/// The manifest entry is written first, then the payload files in slice
/// order. Failure when a payload path is unsafe, the manifest cannot be
/// serialized, or the container cannot be finalized.
pub fn assemble(manifest: &Manifest, payload: &[PayloadFile]) -> Outcome<Vec<u8>> {
    for file in payload {
        if let Err(error) = check_entry_path(&file.path) {
            return Outcome::failure(error.to_string());
        }
    }

    let manifest_bytes = match manifest::encode(manifest) {
        Ok(bytes) => bytes,
        Err(error) => return Outcome::failure(error.to_string()),
    };

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    if let Err(error) = append_entry(&mut builder, MANIFEST_PATH, &manifest_bytes) {
        return Outcome::failure(error.to_string());
    }
    for file in payload {
        if let Err(error) = append_entry(&mut builder, &file.path, &file.bytes) {
            return Outcome::failure(error.to_string());
        }
    }

    let encoder = match builder.into_inner() {
        Ok(encoder) => encoder,
        Err(error) => return Outcome::failure(ArchiveError::Finalize(error).to_string()),
    };
    match encoder.finish() {
        Ok(bytes) => Outcome::success(bytes),
        Err(error) => Outcome::failure(ArchiveError::Finalize(error).to_string()),
    }
}

/// Parses archive bytes back into a manifest and payload files.
///
/// Failure when the bytes are not a gzip tar container, an entry is unsafe,
/// the manifest entry is absent, or the manifest fails to decode. A
/// manifest decoded with a warning keeps that warning on the returned
/// Outcome, and payload entries that disagree with `contentItems` degrade
/// the result to Warning with one message per discrepancy.
pub fn open(archive_bytes: &[u8]) -> Outcome<ArchiveContents> {
    let mut entries = match read_entries(archive_bytes) {
        Ok(entries) => entries,
        Err(error) => return Outcome::failure(error.to_string()),
    };

    let Some(manifest_index) = entries.iter().position(|e| e.path == MANIFEST_PATH) else {
        return Outcome::failure(ArchiveError::MissingManifest.to_string());
    };
    let manifest_entry = entries.remove(manifest_index);

    let (verdict, decoded) = manifest::decode(&manifest_entry.bytes).split();
    let Some(manifest) = decoded else {
        return verdict.retype();
    };

    let mut outcome = collate(manifest, entries);
    outcome.absorb(&verdict);
    outcome
}

/// Builds the open result, degrading to Warning on declared/found payload
/// discrepancies.
fn collate(manifest: Manifest, payload: Vec<PayloadFile>) -> Outcome<ArchiveContents> {
    let declared: Vec<&str> = manifest
        .content_items
        .iter()
        .map(|item| item.path.as_str())
        .collect();
    let found: Vec<&str> = payload.iter().map(|file| file.path.as_str()).collect();

    let mut notes = Vec::new();
    if declared.is_empty() && !found.is_empty() {
        notes.push(format!(
            "archive carries {} payload entries not declared in the manifest",
            found.len()
        ));
    } else {
        for path in &declared {
            if !found.contains(path) {
                notes.push(format!(
                    "declared payload file '{path}' is missing from the archive"
                ));
            }
        }
        for path in &found {
            if !declared.contains(path) {
                notes.push(format!("archive entry '{path}' is not declared in contentItems"));
            }
        }
    }

    let mut outcome = Outcome::success(ArchiveContents { manifest, payload });
    for note in notes {
        tracing::debug!(%note, "archive payload discrepancy");
        outcome.add_warning(note);
    }
    outcome
}

/// Decompresses and walks the tar stream, normalizing entry paths.
fn read_entries(archive_bytes: &[u8]) -> Result<Vec<PayloadFile>, ArchiveError> {
    let mut decompressed = Vec::new();
    GzDecoder::new(archive_bytes)
        .read_to_end(&mut decompressed)
        .map_err(ArchiveError::InvalidContainer)?;

    let mut archive = tar::Archive::new(decompressed.as_slice());
    let mut files = Vec::new();
    for entry in archive.entries().map_err(ArchiveError::InvalidContainer)? {
        let mut entry = entry.map_err(ArchiveError::EntryRead)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let raw_path = entry
            .path()
            .map_err(ArchiveError::EntryRead)?
            .to_string_lossy()
            .into_owned();
        let path = raw_path.strip_prefix("./").unwrap_or(&raw_path).to_string();
        check_entry_path(&path)?;

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(ArchiveError::EntryRead)?;
        files.push(PayloadFile { path, bytes });
    }
    Ok(files)
}

/// Appends one regular-file entry to the tar stream.
fn append_entry<W: std::io::Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    bytes: &[u8],
) -> Result<(), ArchiveError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(bytes.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, path, bytes)
        .map_err(|source| ArchiveError::EntryWrite {
            path: path.to_string(),
            source,
        })
}

/// Rejects entry paths that could escape the archive root.
fn check_entry_path(path: &str) -> Result<(), ArchiveError> {
    let reject = |reason| {
        Err(ArchiveError::UnsafeEntry {
            path: path.to_string(),
            reason,
        })
    };

    if path.trim().is_empty() {
        return reject("empty path");
    }
    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => return reject("absolute path"),
            Component::ParentDir => return reject("parent-directory traversal"),
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}
