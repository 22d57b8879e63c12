use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifiers recovered from one manifest. Uniqueness is by exact string, so
/// `mit` and `MIT` are kept as two entries. Iteration order is the sorted order.
pub type LicenseSet = BTreeSet<String>;

/// Placeholder shown in place of an alternative for non-risky rows.
pub const NO_ALTERNATIVE: &str = "—";

/// Identifiers found in a manifest and a human-readable note on how they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub licenses: LicenseSet,
    pub provenance: String,
}

impl ExtractionResult {
    pub fn new(licenses: LicenseSet, provenance: impl Into<String>) -> Self {
        Self {
            licenses,
            provenance: provenance.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    Risky,
    Unknown,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::Safe => write!(f, "Safe"),
            RiskLabel::Risky => write!(f, "Risky"),
            RiskLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classification outcome for a single identifier. `confidence` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub identifier: String,
    pub label: RiskLabel,
    pub confidence: f64,
}

impl ClassificationVerdict {
    pub fn new(identifier: impl Into<String>, label: RiskLabel, confidence: f64) -> Self {
        Self {
            identifier: identifier.into(),
            label,
            confidence,
        }
    }

    pub fn is_risky(&self) -> bool {
        self.label == RiskLabel::Risky
    }
}

/// One line of an analysis: the verdict, the suggested alternative (risky rows only)
/// and where the identifier came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub identifier: String,
    pub label: RiskLabel,
    pub confidence: f64,
    pub alternative: Option<String>,
    pub provenance: String,
}

impl ResultRow {
    /// Build a row, attaching `alternative` only when the verdict is risky.
    pub fn new(verdict: ClassificationVerdict, alternative: Option<&str>, provenance: &str) -> Self {
        let alternative = if verdict.is_risky() {
            alternative.map(str::to_string)
        } else {
            None
        };
        Self {
            identifier: verdict.identifier,
            label: verdict.label,
            confidence: verdict.confidence,
            alternative,
            provenance: provenance.to_string(),
        }
    }

    pub fn is_risky(&self) -> bool {
        self.label == RiskLabel::Risky
    }

    /// The alternative, or [`NO_ALTERNATIVE`] when there is none.
    pub fn alternative_or_dash(&self) -> &str {
        self.alternative.as_deref().unwrap_or(NO_ALTERNATIVE)
    }

    /// Confidence as a percentage with one decimal, e.g. `85.0%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Rows produced for one manifest, sorted by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub provenance: String,
    pub rows: Vec<ResultRow>,
    /// True iff at least one row is risky.
    pub has_risky: bool,
}

impl Analysis {
    pub fn new(provenance: impl Into<String>, rows: Vec<ResultRow>) -> Self {
        let has_risky = rows.iter().any(ResultRow::is_risky);
        Self {
            provenance: provenance.into(),
            rows,
            has_risky,
        }
    }

    pub fn risky_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_risky()).count()
    }

    /// Overall advisory message for the analysis.
    pub fn summary(&self) -> String {
        let verdict = if self.has_risky {
            "risky licenses found!"
        } else {
            "all licenses are safe"
        };
        format!("Analyzed {} licenses: {}", self.rows.len(), verdict)
    }
}
