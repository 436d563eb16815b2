//! Package archive format for hangar.
//!
//! An extension package travels as a single `.hpk` file: a gzip-compressed
//! tar container carrying one `manifest.json` descriptor at its root plus
//! the payload files the manifest declares. This crate owns everything
//! about that format:
//!
//! - [`manifest`]: the JSON descriptor and its tolerant codec
//! - [`archive`]: assembling and opening the container itself
//! - [`fingerprint`]: the identity-salted SHA-256 content fingerprint
//!
//! All parsing entry points return [`hangar_core::Outcome`] and treat
//! foreign bytes as data, not as trust: malformed containers, missing
//! manifests and escaping entry paths come back as Failures, never panics.
//!
//! # Examples
//!
//! ```
//! use hangar_archive::archive::{self, PayloadFile};
//! use hangar_archive::fingerprint;
//! use hangar_archive::manifest::{ContentItem, Manifest};
//! use hangar_core::PluginKind;
//!
//! // Describe and assemble a package.
//! let mut manifest = Manifest::new(
//!     "Modbus Connector",
//!     "example.connectors.modbus",
//!     "1.0.0",
//!     PluginKind::Connector,
//! );
//! manifest.content_items.push(ContentItem::new("module", "bin/module.so"));
//! let payload = vec![PayloadFile::new("bin/module.so", b"module bytes".to_vec())];
//!
//! let assembled = archive::assemble(&manifest, &payload);
//! assert!(assembled.is_success());
//!
//! // Fingerprint the assembled bytes under the declared identity.
//! let bytes = assembled.value().unwrap();
//! let computed = fingerprint::compute(bytes, &manifest.fqn, &manifest.version);
//! assert!(computed.is_success());
//!
//! // Opening recovers the manifest and payload.
//! let opened = archive::open(bytes);
//! assert_eq!(opened.value().unwrap().manifest, manifest);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod error;
pub mod fingerprint;
pub mod manifest;

pub use archive::{ArchiveContents, PayloadFile, ARCHIVE_EXTENSION, MANIFEST_PATH};
pub use error::{ArchiveError, ManifestError, Result};
pub use manifest::{ContentItem, Manifest};
