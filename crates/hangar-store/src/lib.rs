//! Directory-backed package storage for hangar.
//!
//! A [`PackageStore`] indexes one or more directories of `.hpk` archives
//! through the [`hangar_core::Platform`] file-system collaborator. It
//! answers three questions: what files are there ([`PackageStore::list`]),
//! which of them are real packages ([`PackageStore::scan_all`]), and how
//! does a new archive get installed or removed ([`PackageStore::add`],
//! [`PackageStore::remove`]).
//!
//! Scanning is deliberately tolerant: any file can sit next to the
//! archives, and files that fail to open are skipped rather than failing
//! the scan. A directory full of candidates where none open as packages
//! degrades the scan to a Warning, which is still a usable (empty) result.
//!
//! # Examples
//!
//! ```
//! use hangar_core::LocalPlatform;
//! use hangar_store::PackageStore;
//! use std::sync::Arc;
//!
//! let temp = tempfile::tempdir()?;
//! let store = PackageStore::new(Arc::new(LocalPlatform::new()));
//!
//! let scanned = store.scan_all(temp.path());
//! assert!(scanned.is_success());
//! assert!(scanned.value().unwrap().is_empty());
//! # Ok::<(), std::io::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::{package_file_name, PackageStore};
pub use types::Package;
