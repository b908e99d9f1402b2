// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `manifest.json` files.
//!
//! Every plugin directory may carry a `manifest.json` directly inside it.
//! A directory without one is not a plugin and is skipped; a directory with
//! a malformed one aborts initialization for the whole host.

use std::fs;
use std::path::Path;

use arbor_core::ArborError;
use serde::Deserialize;

/// Parsed plugin manifest describing one extension package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    /// Unique identifier of the plugin.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Higher priorities load and start earlier. Defaults to 0.
    #[serde(default)]
    pub load_priority: i32,
}

/// Parse a plugin manifest from JSON content.
///
/// Validates that `id` and `name` are present and non-empty. Unknown fields
/// are ignored so manifests may carry extra metadata for other tools.
pub fn parse_plugin_manifest(json_content: &str) -> Result<PluginManifest, String> {
    let manifest: PluginManifest =
        serde_json::from_str(json_content).map_err(|e| e.to_string())?;

    if manifest.id.is_empty() {
        return Err("plugin manifest: id must not be empty".to_string());
    }
    if manifest.name.is_empty() {
        return Err("plugin manifest: name must not be empty".to_string());
    }

    Ok(manifest)
}

/// Read the manifest of the plugin directory at `dir`, if one exists.
///
/// Returns `Ok(None)` when the directory has no `manifest.json`. Any read or
/// parse failure is fatal and carries the offending file path.
pub fn load_manifest(dir: &Path) -> Result<Option<PluginManifest>, ArborError> {
    let path = dir.join("manifest.json");
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| ArborError::Io {
        path: path.clone(),
        source,
    })?;

    parse_plugin_manifest(&content)
        .map(Some)
        .map_err(|message| ArborError::ManifestParse {
            path,
            source: message.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let json = r#"{
            "id": "crm",
            "name": "Customer Relations",
            "loadPriority": 10
        }"#;
        let manifest = parse_plugin_manifest(json).unwrap();
        assert_eq!(manifest.id, "crm");
        assert_eq!(manifest.name, "Customer Relations");
        assert_eq!(manifest.load_priority, 10);
    }

    #[test]
    fn parse_defaults_priority_to_zero() {
        let json = r#"{ "id": "crm", "name": "Customer Relations" }"#;
        let manifest = parse_plugin_manifest(json).unwrap();
        assert_eq!(manifest.load_priority, 0);
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let json = r#"{
            "id": "crm",
            "name": "Customer Relations",
            "loadPriority": 2,
            "author": "Arbor Contributors",
            "homepage": "https://example.com"
        }"#;
        let manifest = parse_plugin_manifest(json).unwrap();
        assert_eq!(manifest.load_priority, 2);
    }

    #[test]
    fn parse_malformed_json_fails() {
        assert!(parse_plugin_manifest("{ not json").is_err());
    }

    #[test]
    fn parse_missing_id_fails() {
        let json = r#"{ "name": "No id" }"#;
        assert!(parse_plugin_manifest(json).is_err());
    }

    #[test]
    fn parse_empty_name_fails() {
        let json = r#"{ "id": "crm", "name": "" }"#;
        let err = parse_plugin_manifest(json).unwrap_err();
        assert!(err.contains("name must not be empty"));
    }

    #[test]
    fn load_manifest_absent_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_manifest(dir.path()).unwrap().is_none());
    }

    #[test]
    fn load_manifest_present_returns_some() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("manifest.json"),
            r#"{ "id": "crm", "name": "Customer Relations", "loadPriority": 7 }"#,
        )
        .unwrap();
        let manifest = load_manifest(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.id, "crm");
        assert_eq!(manifest.load_priority, 7);
    }

    #[test]
    fn load_manifest_malformed_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), "{ broken").unwrap();
        let err = load_manifest(dir.path()).unwrap_err();
        match err {
            ArborError::ManifestParse { path, .. } => {
                assert!(path.ends_with("manifest.json"));
            }
            other => panic!("expected ManifestParse, got {other}"),
        }
    }
}
