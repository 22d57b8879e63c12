use crate::license::normalize::upper;

/// A risky license token and the alternative recommended in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub pattern: &'static str,
    pub recommendation: &'static str,
}

/// Recommendation returned when no entry of [`ALTERNATIVES`] matches.
pub const DEFAULT_RECOMMENDATION: &str = "MIT or Apache-2.0 — most commercially permissive";

/// Ranked priority list, checked top to bottom; the first pattern contained in the
/// identifier wins. Specific tokens must precede the broader tokens they contain
/// (`AGPL-3.0` contains `GPL-3.0`, `LGPL` contains `GPL`).
pub const ALTERNATIVES: &[Alternative] = &[
    Alternative {
        pattern: "AGPL-3.0",
        recommendation: "MIT or Apache-2.0 (AGPL requires releasing source even for network use)",
    },
    Alternative {
        pattern: "AGPL",
        recommendation: "MIT or Apache-2.0",
    },
    Alternative {
        pattern: "LGPL-3.0",
        recommendation: "MIT (fewer restrictions)",
    },
    Alternative {
        pattern: "LGPL",
        recommendation: "MIT",
    },
    Alternative {
        pattern: "GPL-3.0",
        recommendation: "MIT or Apache-2.0 (more flexible, no copyleft obligations)",
    },
    Alternative {
        pattern: "GPL-2.0",
        recommendation: "MIT or Apache-2.0",
    },
    Alternative {
        pattern: "GPL",
        recommendation: "MIT or Apache-2.0",
    },
    Alternative {
        pattern: "MPL-2.0",
        recommendation: "Apache-2.0 or MIT (easier to combine)",
    },
    Alternative {
        pattern: "CC-BY-SA-4.0",
        recommendation: "MIT (Creative Commons share-alike is not suited to code)",
    },
    Alternative {
        pattern: "CC-BY-SA",
        recommendation: "MIT",
    },
    Alternative {
        pattern: "CC0-1.0",
        recommendation: "Very safe already (but not a software license)",
    },
    Alternative {
        pattern: "EPL",
        recommendation: "Apache-2.0 or MIT",
    },
    Alternative {
        pattern: "CDDL",
        recommendation: "Apache-2.0",
    },
];

/// First entry of [`ALTERNATIVES`] whose pattern occurs in `identifier` (case-insensitive).
pub fn lookup(identifier: &str) -> Option<&'static Alternative> {
    let upper = upper(identifier);
    ALTERNATIVES.iter().find(|alt| upper.contains(alt.pattern))
}

/// Recommended alternative for a risky identifier.
pub fn suggest(identifier: &str) -> &'static str {
    lookup(identifier)
        .map(|alt| alt.recommendation)
        .unwrap_or(DEFAULT_RECOMMENDATION)
}
