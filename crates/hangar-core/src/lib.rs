//! Core types and abstractions for the hangar package subsystem.
//!
//! This crate provides the foundations every other crate in the workspace
//! builds on:
//!
//! - The [`Outcome`] carrier: tri-state results (success/warning/failure)
//!   with ordered diagnostics, used by every fallible operation.
//! - Strong identity types ([`Fqn`], [`Version`], [`PluginKind`]).
//! - The [`Platform`] trait: the file-system seam the store and manager
//!   consume, with [`LocalPlatform`] as the stock implementation.
//! - The [`Lifecycle`] state machine gating when a managing component may
//!   perform work, and the [`Stateful`] vocabulary trait.
//! - [`Directories`]: the host-supplied packages/staging configuration.
//!
//! # Architecture
//!
//! Higher layers compose these pieces: the archive codec turns bytes into
//! manifests, the store turns directories into package collections, and
//! the manager wires both behind a lifecycle. Nothing in this crate does
//! package-format work; it only defines the contracts.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod lifecycle;
mod outcome;
mod platform;
mod types;

pub use config::Directories;
pub use error::{CoreError, Result};
pub use lifecycle::{Lifecycle, State, Stateful, StopKind, Transition};
pub use outcome::{Outcome, OutcomeCode};
pub use platform::{LocalPlatform, Platform};
pub use types::{Fqn, PluginKind, Version};
