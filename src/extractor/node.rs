//! Structured decoding of npm `package.json` and `package-lock.json`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::models::LicenseSet;

/// Identifier recorded for a `licenses` object entry without a `type`.
const UNTYPED_LICENSE: &str = "Unknown";

/// A `license` value or one entry of a `licenses` list, in any of the shapes
/// found in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Name(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl LicenseField {
    /// `{"type": "MIT", "url": "..."}` → `MIT`.
    fn type_name(&self) -> Option<String> {
        match self {
            LicenseField::Object(map) => map.get("type").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    /// Strings, numbers and booleans as text; objects, arrays and null are not scalars.
    fn scalar(&self) -> Option<String> {
        match self {
            LicenseField::Name(name) => Some(name.clone()),
            LicenseField::Other(Value::Number(n)) => Some(n.to_string()),
            LicenseField::Other(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// A `licenses` field is meant to be a list; anything else is ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseList {
    Entries(Vec<LicenseField>),
    Other(Value),
}

impl LicenseList {
    fn entries(&self) -> &[LicenseField] {
        match self {
            LicenseList::Entries(entries) => entries,
            LicenseList::Other(_) => &[],
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageLock {
    packages: BTreeMap<String, LockEntry>,
}

#[derive(Debug, Deserialize)]
struct LockEntry {
    #[serde(default)]
    license: Option<LicenseField>,
    #[serde(default)]
    licenses: Option<LicenseList>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    license: Option<LicenseField>,
    #[serde(default)]
    licenses: Option<LicenseList>,
}

/// Decode `content` as `T`, requiring a JSON object at the top level.
fn decode_object<T: DeserializeOwned>(content: &str) -> Result<T, ParseError> {
    match serde_json::from_str::<Value>(content)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(ParseError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collect licenses from the `packages` map of a v2/v3 lockfile.
///
/// Each entry contributes its scalar `license`, and for every `licenses` item
/// either the object's `type` or the item itself when it is a scalar.
pub fn parse_package_lock(content: &str) -> Result<LicenseSet, ParseError> {
    let lock: PackageLock = decode_object(content)?;
    let mut licenses = LicenseSet::new();

    for entry in lock.packages.values() {
        if let Some(name) = entry.license.as_ref().and_then(LicenseField::scalar) {
            licenses.insert(name);
        }
        for item in entry.licenses.iter().flat_map(LicenseList::entries) {
            if let Some(name) = item.type_name().or_else(|| item.scalar()) {
                licenses.insert(name);
            }
        }
    }

    Ok(licenses)
}

/// Collect the top-level `license` and `licenses` of a package manifest.
///
/// An empty result is valid here; the caller decides on the default.
pub fn parse_package_json(content: &str) -> Result<LicenseSet, ParseError> {
    let manifest: PackageJson = decode_object(content)?;
    let mut licenses = LicenseSet::new();

    match &manifest.license {
        Some(LicenseField::Name(name)) => {
            licenses.insert(name.clone());
        }
        Some(field) => {
            if let Some(name) = field.type_name() {
                licenses.insert(name);
            }
        }
        None => {}
    }

    for item in manifest.licenses.iter().flat_map(LicenseList::entries) {
        match item {
            LicenseField::Name(name) => {
                licenses.insert(name.clone());
            }
            LicenseField::Object(map) => {
                let name = match map.get("type") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => UNTYPED_LICENSE.to_string(),
                    Some(other) => other.to_string(),
                };
                licenses.insert(name);
            }
            LicenseField::Other(_) => {}
        }
    }

    Ok(licenses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> LicenseSet {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_package_lock() {
        let json = r#"{
  "name": "my-app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app", "version": "1.0.0" },
    "node_modules/express": { "version": "4.18.2", "license": "MIT" },
    "node_modules/gpl-thing": { "version": "1.0.0", "license": "GPL-3.0" },
    "node_modules/isc-thing": { "version": "2.0.0", "license": "ISC" }
  }
}"#;
        assert_eq!(parse_package_lock(json).unwrap(), set(&["GPL-3.0", "ISC", "MIT"]));
    }

    #[test]
    fn test_parse_package_lock_licenses_list() {
        let json = r#"{
  "packages": {
    "node_modules/old": {
      "licenses": [
        { "type": "BSD-2-Clause", "url": "http://example.com" },
        "Apache-2.0",
        { "url": "http://example.com/untyped" }
      ]
    },
    "node_modules/odd": { "license": { "type": "ignored-object" } }
  }
}"#;
        assert_eq!(
            parse_package_lock(json).unwrap(),
            set(&["Apache-2.0", "BSD-2-Clause"])
        );
    }

    #[test]
    fn test_parse_package_lock_without_packages_fails() {
        let json = r#"{ "lockfileVersion": 1, "dependencies": {} }"#;
        assert!(parse_package_lock(json).is_err());
    }

    #[test]
    fn test_parse_package_lock_malformed() {
        assert!(matches!(
            parse_package_lock("{ not json"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_parse_package_json_license_string() {
        let json = r#"{ "name": "x", "license": "Apache-2.0" }"#;
        assert_eq!(parse_package_json(json).unwrap(), set(&["Apache-2.0"]));
    }

    #[test]
    fn test_parse_package_json_license_object() {
        let json = r#"{ "license": { "type": "MPL-2.0", "url": "https://mozilla.org" } }"#;
        assert_eq!(parse_package_json(json).unwrap(), set(&["MPL-2.0"]));
    }

    #[test]
    fn test_parse_package_json_licenses_list() {
        let json = r#"{
  "licenses": [
    "MIT",
    { "type": "GPL-2.0" },
    { "url": "https://example.com" },
    42
  ]
}"#;
        assert_eq!(
            parse_package_json(json).unwrap(),
            set(&["GPL-2.0", "MIT", "Unknown"])
        );
    }

    #[test]
    fn test_parse_package_json_no_license() {
        let json = r#"{ "name": "x", "version": "1.0.0" }"#;
        assert!(parse_package_json(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_package_json_wrong_shapes_ignored() {
        let json = r#"{ "license": ["MIT"], "licenses": "MIT" }"#;
        assert!(parse_package_json(json).unwrap().is_empty());
    }

    #[test]
    fn test_top_level_array_rejected() {
        assert!(matches!(
            parse_package_json("[1, 2]"),
            Err(ParseError::NotAnObject("array"))
        ));
    }
}
