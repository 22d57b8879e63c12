use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::LicenseSet;

static RE_LICENSE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)"license"\s*:\s*"([^"]+)""#).unwrap());

static RE_TYPE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)"type"\s*:\s*"([^"]+)""#).unwrap());

static RE_SPDX_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SPDX-License-Identifier:\s*([A-Za-z0-9.\-+]+)").unwrap());

/// Scan arbitrary text for license declarations: `"license": "..."`, `"type": "..."`
/// and `SPDX-License-Identifier:` tags. Matches are trimmed; empty ones are dropped.
pub fn scan(content: &str) -> LicenseSet {
    [&*RE_LICENSE_KEY, &*RE_TYPE_KEY, &*RE_SPDX_TAG]
        .into_iter()
        .flat_map(|re| re.captures_iter(content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
