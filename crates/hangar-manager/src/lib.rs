//! Lifecycle-supervised package manager for Hangar extension packages.
//!
//! This crate sits on top of [`hangar_store`] and [`hangar_archive`]: it
//! owns the lifecycle state machine that gates when package operations may
//! run, serializes mutations per fully-qualified name, keeps a warm
//! in-memory index of the store, and offers async variants of the blocking
//! operations via the tokio blocking pool.
//!
//! # Examples
//!
//! ```
//! use hangar_core::{Directories, LocalPlatform, State, Stateful, StopKind};
//! use hangar_manager::PackageManager;
//! use std::sync::Arc;
//!
//! let root = tempfile::tempdir()?;
//! let directories = Directories::under_root(root.path());
//! std::fs::create_dir_all(&directories.packages)?;
//! std::fs::create_dir_all(&directories.temp)?;
//!
//! let manager = PackageManager::new(Arc::new(LocalPlatform::new()), directories);
//! assert!(manager.start().is_success());
//! assert_eq!(manager.state(), State::Running);
//! assert!(manager.packages().is_empty());
//! assert!(manager.stop(StopKind::Graceful).is_success());
//! # Ok::<(), std::io::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod loader;
pub mod manager;

pub use loader::ModuleLoader;
pub use manager::PackageManager;
