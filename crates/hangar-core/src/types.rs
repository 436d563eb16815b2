//! Strong domain types for package identity.
//!
//! This module implements the newtype pattern for the identity primitives
//! used throughout the workspace, so fully-qualified names, versions and
//! plain strings cannot be mixed up at call sites.
//!
//! # Examples
//!
//! ```
//! use hangar_core::{Fqn, PluginKind, Version};
//!
//! let fqn = Fqn::new("example.connectors.modbus");
//! let version = Version::new("1.4.0");
//! assert_eq!(fqn.as_str(), "example.connectors.modbus");
//! assert_eq!(PluginKind::Connector.as_str(), "connector");
//! # let _ = version;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified package name (newtype over `String`).
///
/// Globally unique identity for a package family, stable across versions.
/// Using a strong type prevents mixing the fqn with display names or
/// version strings.
///
/// # Examples
///
/// ```
/// use hangar_core::Fqn;
///
/// let fqn = Fqn::new("example.endpoints.rest");
/// assert_eq!(fqn.as_str(), "example.endpoints.rest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fqn(String);

impl Fqn {
    /// Creates a new fully-qualified name.
    #[inline]
    #[must_use]
    pub fn new(fqn: impl Into<String>) -> Self {
        Self(fqn.into())
    }

    /// Returns the fqn as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Fqn` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fqn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Fqn {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Package version (newtype over `String`).
///
/// Versions are opaque labels compared for equality only; the type
/// deliberately implements neither `PartialOrd` nor `Ord`, because no part
/// of the system may rank versions.
///
/// # Examples
///
/// ```
/// use hangar_core::Version;
///
/// let a = Version::new("1.0.0");
/// let b = Version::new("1.0.0");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version(String);

impl Version {
    /// Creates a new version label.
    #[inline]
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Returns the version as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Version` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of extension a package delivers.
///
/// Serialized in camelCase inside manifest documents (`"connector"`,
/// `"endpoint"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginKind {
    /// A self-contained application extension.
    App,
    /// A binding between two host subsystems.
    Binding,
    /// A connector to an external data source.
    Connector,
    /// An endpoint exposing host data outward.
    Endpoint,
}

impl PluginKind {
    /// Returns the manifest spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Binding => "binding",
            Self::Connector => "connector",
            Self::Endpoint => "endpoint",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
