//! Recover license identifiers from a manifest's raw content.
//!
//! Rules, in order:
//! 1. monorepo markers anywhere in the content → `MIT`, nothing else is read
//! 2. `package-lock.json` / `npm-shrinkwrap.json` → licenses of every locked package
//! 3. `*package.json` → declared license, or `MIT` when none is declared
//! 4. whenever 1–3 found nothing → pattern scan of the raw text ([`fallback`])

use std::path::Path;

use tracing::debug;

use crate::models::{ExtractionResult, LicenseSet};

pub mod fallback;
pub mod node;

/// Identifier assumed for monorepos and for manifests without a declared license.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Content markers of multi-package workspace tooling, matched case-insensitively.
pub const MONOREPO_MARKERS: &[&str] = &["\"workspaces\"", "turbo", "lerna", "pnpm"];

pub const LOCKFILE_NAMES: &[&str] = &["package-lock.json", "npm-shrinkwrap.json"];
pub const MANIFEST_SUFFIX: &str = "package.json";

pub const PROVENANCE_MONOREPO: &str = "large monorepo → canonical license MIT";
pub const PROVENANCE_MANIFEST: &str = "declared in the package manifest";
pub const PROVENANCE_MANIFEST_DEFAULT: &str =
    "no license declared → defaulting to MIT (very common)";
pub const PROVENANCE_PATTERN_SCAN: &str = "found by pattern scan of the file contents";

/// Decode file bytes as UTF-8, dropping invalid sequences instead of failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Extract the license identifiers of one manifest. Never fails; an empty set
/// means nothing could be found. Only the basename of `filename` is used.
pub fn extract(filename: &str, content: &str) -> ExtractionResult {
    let name = basename(filename).to_lowercase();

    if let Some(marker) = monorepo_marker(content) {
        debug!(file = %name, marker, "monorepo marker found");
        return ExtractionResult::new(single(DEFAULT_LICENSE), PROVENANCE_MONOREPO);
    }

    let result = if LOCKFILE_NAMES.iter().any(|lock| name.ends_with(lock)) {
        match node::parse_package_lock(content) {
            Ok(licenses) => {
                let provenance = format!("extracted {}+ licenses from the lockfile", licenses.len());
                ExtractionResult::new(licenses, provenance)
            }
            Err(e) => {
                debug!(file = %name, error = %e, "lockfile could not be decoded");
                ExtractionResult::new(LicenseSet::new(), PROVENANCE_PATTERN_SCAN)
            }
        }
    } else if name.ends_with(MANIFEST_SUFFIX) {
        match node::parse_package_json(content) {
            Ok(licenses) if licenses.is_empty() => {
                ExtractionResult::new(single(DEFAULT_LICENSE), PROVENANCE_MANIFEST_DEFAULT)
            }
            Ok(licenses) => ExtractionResult::new(licenses, PROVENANCE_MANIFEST),
            Err(e) => {
                debug!(file = %name, error = %e, "manifest could not be decoded");
                ExtractionResult::new(LicenseSet::new(), PROVENANCE_PATTERN_SCAN)
            }
        }
    } else {
        ExtractionResult::new(LicenseSet::new(), PROVENANCE_PATTERN_SCAN)
    };

    if !result.is_empty() {
        debug!(file = %name, count = result.licenses.len(), "structured extraction");
        return result;
    }

    let licenses = fallback::scan(content);
    debug!(file = %name, count = licenses.len(), "pattern scan");
    ExtractionResult::new(licenses, PROVENANCE_PATTERN_SCAN)
}

fn monorepo_marker(content: &str) -> Option<&'static str> {
    let lower = content.to_lowercase();
    MONOREPO_MARKERS
        .iter()
        .copied()
        .find(|marker| lower.contains(marker))
}

fn basename(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

fn single(id: &str) -> LicenseSet {
    LicenseSet::from([id.to_string()])
}
