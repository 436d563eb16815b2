//! Manifest document codec.
//!
//! A manifest is the JSON descriptor embedded in every package archive. It
//! names the package (`name`), its identity (`fqn` + `version`), the kind
//! of extension it delivers (`pluginType`) and the payload files the
//! archive carries (`contentItems`, paths relative to the archive root).
//!
//! [`decode`] is tolerant exactly where the format allows tolerance: absent
//! `contentItems` is a warning (normalized to an empty list), while a
//! missing or blank required field is a failure. [`encode`] writes the
//! canonical pretty-printed form; decoding it reproduces the manifest
//! field for field.
//!
//! # Examples
//!
//! ```
//! use hangar_archive::manifest;
//!
//! let document = br#"{
//!     "name": "Modbus Connector",
//!     "fqn": "example.connectors.modbus",
//!     "version": "1.0.0",
//!     "pluginType": "connector",
//!     "contentItems": [{ "name": "module", "path": "bin/module.so" }]
//! }"#;
//!
//! let decoded = manifest::decode(document);
//! assert!(decoded.is_success());
//! assert_eq!(decoded.value().unwrap().fqn.as_str(), "example.connectors.modbus");
//! ```

use crate::error::ManifestError;
use hangar_core::{Fqn, Outcome, PluginKind, Version};
use serde::{Deserialize, Serialize};

/// One payload file declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Human-readable label for the payload file.
    pub name: String,
    /// Path of the file inside the archive, relative to its root.
    pub path: String,
}

impl ContentItem {
    /// Creates a content item.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Structured descriptor embedded in a package archive.
///
/// `fqn` and `version` together identify exactly one package instance in a
/// store; the remaining fields describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Display name of the package.
    pub name: String,
    /// Fully-qualified name; the store key.
    pub fqn: Fqn,
    /// Version label; equality-compared only.
    pub version: Version,
    /// Kind of extension the package delivers.
    pub plugin_type: PluginKind,
    /// Identity-salted content digest, absent until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Payload files inside the archive.
    #[serde(default)]
    pub content_items: Vec<ContentItem>,
}

impl Manifest {
    /// Creates a manifest with no fingerprint and no content items.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        fqn: impl Into<Fqn>,
        version: impl Into<Version>,
        plugin_type: PluginKind,
    ) -> Self {
        Self {
            name: name.into(),
            fqn: fqn.into(),
            version: version.into(),
            plugin_type,
            fingerprint: None,
            content_items: Vec::new(),
        }
    }
}

/// Decode-side mirror of [`Manifest`] where everything is optional, so
/// field-level problems can be reported instead of one opaque parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    name: Option<String>,
    fqn: Option<String>,
    version: Option<String>,
    plugin_type: Option<PluginKind>,
    fingerprint: Option<String>,
    content_items: Option<Vec<ContentItem>>,
}

/// Parses a manifest document.
///
/// Failure when the document is not well-formed JSON or any required field
/// (`name`, `fqn`, `version`, `pluginType`) is missing or blank. Warning
/// when `contentItems` is absent; the manifest is still usable and the
/// list is normalized to empty.
pub fn decode(manifest_bytes: &[u8]) -> Outcome<Manifest> {
    let raw: RawManifest = match serde_json::from_slice(manifest_bytes) {
        Ok(raw) => raw,
        Err(error) => {
            return Outcome::failure(ManifestError::Malformed(error).to_string());
        }
    };

    let mut problems: Vec<ManifestError> = Vec::new();
    let name = required_string(raw.name, "name", &mut problems);
    let fqn = required_string(raw.fqn, "fqn", &mut problems);
    let version = required_string(raw.version, "version", &mut problems);
    if raw.plugin_type.is_none() {
        problems.push(ManifestError::MissingField {
            field: "pluginType",
        });
    }

    // problems is empty exactly when all four required fields are usable
    let (Some(name), Some(fqn), Some(version), Some(plugin_type)) =
        (name, fqn, version, raw.plugin_type)
    else {
        let mut outcome = Outcome::failure("manifest is missing required fields");
        for problem in problems {
            outcome.add_message(problem.to_string());
        }
        return outcome;
    };

    let items_declared = raw.content_items.is_some();
    let manifest = Manifest {
        name,
        fqn: Fqn::new(fqn),
        version: Version::new(version),
        plugin_type,
        fingerprint: raw.fingerprint,
        content_items: raw.content_items.unwrap_or_default(),
    };

    if items_declared {
        Outcome::success(manifest)
    } else {
        Outcome::warning(
            manifest,
            "manifest has no contentItems; treating the payload as empty",
        )
    }
}

/// Serializes a manifest as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ManifestError::Serialize`] if the document cannot be
/// rendered, which for this shape indicates an exhausted allocator rather
/// than bad data.
pub fn encode(manifest: &Manifest) -> Result<Vec<u8>, ManifestError> {
    serde_json::to_vec_pretty(manifest).map_err(ManifestError::Serialize)
}

fn required_string(
    value: Option<String>,
    field: &'static str,
    problems: &mut Vec<ManifestError>,
) -> Option<String> {
    match value {
        None => {
            problems.push(ManifestError::MissingField { field });
            None
        }
        Some(s) if s.trim().is_empty() => {
            problems.push(ManifestError::BlankField { field });
            None
        }
        Some(s) => Some(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::OutcomeCode;

    fn full_manifest() -> Manifest {
        let mut manifest = Manifest::new(
            "Test Plugin",
            "example.plugins.test",
            "1.0.0",
            PluginKind::Connector,
        );
        manifest.content_items = vec![
            ContentItem::new("module", "bin/module.so"),
            ContentItem::new("schema", "schema/points.json"),
        ];
        manifest
    }

    #[test]
    fn roundtrip_reproduces_all_persistent_fields() {
        let mut original = full_manifest();
        original.fingerprint = Some("sha256:00ff".to_string());

        let encoded = encode(&original).expect("encode");
        let decoded = decode(&encoded);
        assert!(decoded.is_success());
        assert_eq!(decoded.into_value(), Some(original));
    }

    #[test]
    fn roundtrip_without_fingerprint_omits_the_key() {
        let original = full_manifest();
        let encoded = encode(&original).expect("encode");
        let text = String::from_utf8(encoded.clone()).expect("utf8");
        assert!(!text.contains("fingerprint"));

        let decoded = decode(&encoded);
        assert_eq!(decoded.into_value(), Some(original));
    }

    #[test]
    fn keys_are_camel_case() {
        let encoded = encode(&full_manifest()).expect("encode");
        let text = String::from_utf8(encoded).expect("utf8");
        assert!(text.contains("\"pluginType\""));
        assert!(text.contains("\"contentItems\""));
        assert!(!text.contains("plugin_type"));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let decoded = decode(b"{ this is not json");
        assert!(decoded.is_failure());
        assert!(decoded.messages()[0].contains("not well-formed"));
    }

    #[test]
    fn decode_rejects_non_object_documents() {
        assert!(decode(b"[1, 2, 3]").is_failure());
        assert!(decode(b"\"just a string\"").is_failure());
    }

    #[test]
    fn decode_reports_each_missing_required_field() {
        let decoded = decode(br#"{ "name": "Only A Name" }"#);
        assert!(decoded.is_failure());
        let joined = decoded.messages().join("\n");
        assert!(joined.contains("'fqn'"));
        assert!(joined.contains("'version'"));
        assert!(joined.contains("'pluginType'"));
        assert!(!joined.contains("'name'"));
    }

    #[test]
    fn decode_treats_blank_fields_as_invalid() {
        let decoded = decode(
            br#"{
                "name": "X",
                "fqn": "   ",
                "version": "1.0.0",
                "pluginType": "app"
            }"#,
        );
        assert!(decoded.is_failure());
        assert!(decoded.messages().join("\n").contains("'fqn' is blank"));
    }

    #[test]
    fn decode_rejects_unknown_plugin_type() {
        let decoded = decode(
            br#"{
                "name": "X",
                "fqn": "a.b",
                "version": "1",
                "pluginType": "gizmo"
            }"#,
        );
        assert!(decoded.is_failure());
    }

    #[test]
    fn absent_content_items_warns_and_normalizes_to_empty() {
        let decoded = decode(
            br#"{
                "name": "X",
                "fqn": "a.b",
                "version": "1",
                "pluginType": "endpoint"
            }"#,
        );
        assert_eq!(decoded.code(), OutcomeCode::Warning);
        assert!(decoded.messages()[0].contains("contentItems"));
        let manifest = decoded.into_value().expect("usable manifest");
        assert!(manifest.content_items.is_empty());
    }

    #[test]
    fn explicit_empty_content_items_is_a_plain_success() {
        let decoded = decode(
            br#"{
                "name": "X",
                "fqn": "a.b",
                "version": "1",
                "pluginType": "endpoint",
                "contentItems": []
            }"#,
        );
        assert!(decoded.is_success());
        assert!(decoded.messages().is_empty());
    }

    #[test]
    fn content_item_order_is_preserved() {
        let decoded = decode(
            br#"{
                "name": "X",
                "fqn": "a.b",
                "version": "1",
                "pluginType": "app",
                "contentItems": [
                    { "name": "z", "path": "z.bin" },
                    { "name": "a", "path": "a.bin" }
                ]
            }"#,
        );
        let manifest = decoded.into_value().expect("manifest");
        let paths: Vec<_> = manifest
            .content_items
            .iter()
            .map(|i| i.path.as_str())
            .collect();
        assert_eq!(paths, ["z.bin", "a.bin"]);
    }
}
