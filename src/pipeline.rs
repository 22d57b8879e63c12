use thiserror::Error;
use tracing::{debug, info};

use crate::extractor::{decode_lossy, extract};
use crate::license::alternatives::suggest;
use crate::license::classifier::Classifier;
use crate::models::{Analysis, ExtractionResult, ResultRow};

pub const PROVENANCE_MANUAL: &str = "manual entry";

/// No license identifier could be recovered from a file. Callers report this
/// as a warning: the file was read, it just declares nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no licenses found in {provenance}")]
pub struct NoLicensesFound {
    pub provenance: String,
}

/// Turns identifiers into classified result rows. Holds no per-request state and
/// can be shared across threads.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Classify a single identifier typed in by the user.
    pub fn analyze_manual(&self, identifier: &str) -> Vec<ResultRow> {
        vec![self.row(identifier.trim(), PROVENANCE_MANUAL)]
    }

    /// Classify every extracted identifier. Rows come back sorted by identifier.
    pub fn analyze_extraction(
        &self,
        extraction: &ExtractionResult,
    ) -> Result<Analysis, NoLicensesFound> {
        if extraction.is_empty() {
            return Err(NoLicensesFound {
                provenance: extraction.provenance.clone(),
            });
        }

        // LicenseSet iterates in sorted order.
        let rows: Vec<ResultRow> = extraction
            .licenses
            .iter()
            .map(|id| self.row(id, &extraction.provenance))
            .collect();

        let analysis = Analysis::new(extraction.provenance.clone(), rows);
        info!(
            licenses = analysis.rows.len(),
            risky = analysis.risky_count(),
            "analysis complete"
        );
        Ok(analysis)
    }

    /// Decode, extract and classify one uploaded file.
    pub fn analyze_file(&self, filename: &str, bytes: &[u8]) -> Result<Analysis, NoLicensesFound> {
        let content = decode_lossy(bytes);
        let extraction = extract(filename, &content);
        debug!(
            file = filename,
            provenance = %extraction.provenance,
            count = extraction.licenses.len(),
            "extracted"
        );
        self.analyze_extraction(&extraction)
    }

    fn row(&self, identifier: &str, provenance: &str) -> ResultRow {
        let verdict = self.classifier.classify(identifier);
        let alternative = verdict.is_risky().then(|| suggest(identifier));
        ResultRow::new(verdict, alternative, provenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::license::model::NoModel;
    use crate::models::{LicenseSet, RiskLabel, NO_ALTERNATIVE};

    fn pipeline() -> Pipeline {
        Pipeline::new(Classifier::new(Arc::new(NoModel)))
    }

    fn extraction(ids: &[&str]) -> ExtractionResult {
        let licenses: LicenseSet = ids.iter().map(|s| s.to_string()).collect();
        ExtractionResult::new(licenses, "test")
    }

    #[test]
    fn test_manual_risky() {
        let rows = pipeline().analyze_manual("  GPL-3.0 ");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].identifier, "GPL-3.0");
        assert_eq!(rows[0].label, RiskLabel::Risky);
        assert_eq!(rows[0].provenance, PROVENANCE_MANUAL);
        assert_eq!(rows[0].alternative_or_dash(), suggest("GPL-3.0"));
    }

    #[test]
    fn test_manual_blank_is_unknown() {
        for input in ["", "   "] {
            let rows = pipeline().analyze_manual(input);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].label, RiskLabel::Unknown);
            assert_eq!(rows[0].confidence, 0.0);
            assert_eq!(rows[0].alternative_or_dash(), NO_ALTERNATIVE);
        }
    }

    #[test]
    fn test_empty_extraction_is_signalled() {
        let err = pipeline().analyze_extraction(&extraction(&[])).unwrap_err();
        assert_eq!(err.provenance, "test");
    }

    #[test]
    fn test_rows_sorted_case_sensitively() {
        let analysis = pipeline()
            .analyze_extraction(&extraction(&["mit", "MIT", "Apache-2.0", "GPL-2.0"]))
            .unwrap();
        let ids: Vec<&str> = analysis.rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["Apache-2.0", "GPL-2.0", "MIT", "mit"]);
    }

    #[test]
    fn test_aggregate_flag() {
        let safe = pipeline()
            .analyze_extraction(&extraction(&["MIT", "BSD-3-Clause"]))
            .unwrap();
        assert!(!safe.has_risky);

        let mixed = pipeline()
            .analyze_extraction(&extraction(&["MIT", "AGPL-3.0"]))
            .unwrap();
        assert!(mixed.has_risky);
        assert_eq!(mixed.risky_count(), 1);
    }

    #[test]
    fn test_alternative_iff_risky() {
        let analysis = pipeline()
            .analyze_extraction(&extraction(&["MIT", "LGPL-2.1", "CDDL-1.0", "ISC", ""]))
            .unwrap();
        for row in &analysis.rows {
            assert_eq!(row.is_risky(), row.alternative_or_dash() != NO_ALTERNATIVE);
        }
    }

    #[test]
    fn test_analyze_file() {
        let json = br#"{ "name": "app", "license": "EPL-2.0" }"#;
        let analysis = pipeline().analyze_file("package.json", json).unwrap();
        assert_eq!(analysis.rows.len(), 1);
        assert_eq!(analysis.rows[0].label, RiskLabel::Risky);
        assert_eq!(analysis.rows[0].alternative_or_dash(), "Apache-2.0 or MIT");
    }

    #[test]
    fn test_analyze_file_nothing_found() {
        assert!(pipeline().analyze_file("README.md", b"hello").is_err());
    }
}
