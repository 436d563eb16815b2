//! Identity-salted content fingerprints.
//!
//! A fingerprint binds archive bytes to the identity that claims them: the
//! payload is hashed with SHA-256, and that digest is hashed again together
//! with the package's fqn and version. Two packages with identical bytes
//! but different declared identities therefore carry different
//! fingerprints, and a fingerprint lifted from one package is useless under
//! another identity. Fingerprints are rendered `"sha256:<hex>"`.
//!
//! # Examples
//!
//! ```
//! use hangar_archive::fingerprint;
//! use hangar_core::{Fqn, Version};
//!
//! let fqn = Fqn::new("example.connectors.modbus");
//! let version = Version::new("1.0.0");
//!
//! let computed = fingerprint::compute(b"payload bytes", &fqn, &version);
//! assert!(computed.is_success());
//! assert!(computed.value().unwrap().starts_with("sha256:"));
//! ```

use hangar_core::{Fqn, Outcome, Version};
use sha2::{Digest, Sha256};

/// Rendering prefix of every fingerprint.
const FINGERPRINT_PREFIX: &str = "sha256:";

/// Computes the fingerprint of a payload under the given identity.
///
/// SHA-256 over the payload, then SHA-256 over the digest bytes followed
/// by the fqn and version strings. Failure only when the payload is empty;
/// hashing itself cannot fail.
pub fn compute(payload: &[u8], fqn: &Fqn, version: &Version) -> Outcome<String> {
    if payload.is_empty() {
        return Outcome::failure("cannot fingerprint an empty payload");
    }

    let content_digest = Sha256::digest(payload);

    let mut salted = Sha256::new();
    salted.update(content_digest);
    salted.update(fqn.as_str().as_bytes());
    salted.update(version.as_str().as_bytes());

    Outcome::success(format!(
        "{FINGERPRINT_PREFIX}{}",
        hex::encode(salted.finalize())
    ))
}

/// Recomputes a payload's fingerprint and compares it against `expected`.
///
/// The comparison runs in constant time. Failure when the payload is empty
/// or the fingerprints disagree.
pub fn verify(payload: &[u8], fqn: &Fqn, version: &Version, expected: &str) -> Outcome<()> {
    let (verdict, computed) = compute(payload, fqn, version).split();
    let Some(actual) = computed else {
        return verdict.retype();
    };

    if constant_time_compare(&actual, expected) {
        Outcome::success(())
    } else {
        tracing::warn!(%fqn, %version, "fingerprint mismatch");
        Outcome::failure(format!(
            "fingerprint mismatch for '{fqn}' version '{version}': expected {expected}, computed {actual}"
        ))
    }
}

/// Checks the `sha256:` + 64-lowercase-hex shape without verifying content.
///
/// # Examples
///
/// ```
/// use hangar_archive::fingerprint::is_valid_format;
///
/// assert!(is_valid_format(
///     "sha256:0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
/// ));
/// assert!(!is_valid_format("md5:abc123"));
/// assert!(!is_valid_format("sha256:short"));
/// ```
#[must_use]
pub fn is_valid_format(fingerprint: &str) -> bool {
    let Some(hex_part) = fingerprint.strip_prefix(FINGERPRINT_PREFIX) else {
        return false;
    };
    hex_part.len() == 64
        && hex_part
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Compares two strings in constant time.
///
/// Always processes the full length of both inputs, accumulating
/// differences with bitwise OR instead of short-circuiting on the first
/// mismatch.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let left = a.as_bytes();
    let right = b.as_bytes();
    let max_len = left.len().max(right.len());

    let mut diff = 0u8;
    for i in 0..max_len {
        let left_byte = left.get(i).copied().unwrap_or(0);
        let right_byte = right.get(i).copied().unwrap_or(0);
        diff |= left_byte ^ right_byte;
    }

    left.len() == right.len() && diff == 0
}
