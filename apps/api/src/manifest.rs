//! Dependency manifest parsing — line-oriented `name>=version` constraints.
//!
//! Format: one constraint per line; blank lines and `#`-prefixed comment
//! lines are ignored. Order is insertion order.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A single parsed manifest constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub package: String,
    pub min_version: String,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("line {line}: expected 'name>=version', got '{text}'")]
    InvalidLine { line: usize, text: String },

    #[error("line {line}: invalid package name '{name}'")]
    InvalidPackageName { line: usize, name: String },

    #[error("line {line}: invalid version '{version}'")]
    InvalidVersion { line: usize, version: String },
}

/// Parses a dependency manifest. Every non-comment, non-blank line must match
/// `name>=version`; the first offending line fails the whole parse.
pub fn parse_manifest(content: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (package, min_version) =
            line.split_once(">=").ok_or_else(|| ManifestError::InvalidLine {
                line: line_no,
                text: line.to_string(),
            })?;

        let package = package.trim();
        let min_version = min_version.trim();

        if !is_valid_package_name(package) {
            return Err(ManifestError::InvalidPackageName {
                line: line_no,
                name: package.to_string(),
            });
        }

        if !is_valid_version(min_version) {
            return Err(ManifestError::InvalidVersion {
                line: line_no,
                version: min_version.to_string(),
            });
        }

        entries.push(ManifestEntry {
            package: package.to_string(),
            min_version: min_version.to_string(),
        });
    }

    Ok(entries)
}

/// Package names: alphanumerics plus `.`, `_`, `-`; must start alphanumeric.
fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Versions: dot-separated segments, each starting with a digit. Allows a
/// trailing alphanumeric suffix within a segment (`1.0rc1`, `2.0.0b3`).
fn is_valid_version(version: &str) -> bool {
    if version.is_empty() {
        return false;
    }
    version.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric())
    })
}

#[derive(Debug, Deserialize)]
pub struct ValidateManifestRequest {
    pub content: String,
}

/// POST /api/v1/manifest/validate
///
/// Validation outcome is part of the response, not an error status; only
/// transport-level problems map to an `AppError`.
pub async fn handle_validate_manifest(
    Json(request): Json<ValidateManifestRequest>,
) -> Json<Value> {
    match parse_manifest(&request.content) {
        Ok(entries) => Json(json!({
            "valid": true,
            "entries": entries,
        })),
        Err(e) => Json(json!({
            "valid": false,
            "error": e.to_string(),
        })),
    }
}
