use std::sync::Arc;

use tracing::debug;

use crate::error::ClassifierError;
use crate::license::model::{FeatureRow, LicenseModel};
use crate::license::normalize::contains_any;
use crate::models::{ClassificationVerdict, RiskLabel};

/// Tokens that make an identifier risky when the model cannot be used.
pub const RISK_KEYWORDS: &[&str] = &["GPL", "AGPL", "CC-BY-SA", "EPL", "CDDL"];

/// Fixed confidence reported by the rule-based tier for a risky match.
pub const FALLBACK_RISKY_CONFIDENCE: f64 = 0.85;
/// Fixed confidence reported by the rule-based tier when no risk keyword matches.
pub const FALLBACK_SAFE_CONFIDENCE: f64 = 0.95;

/// Classifies license identifiers with the trained model, falling back to keyword
/// rules whenever the model fails.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn LicenseModel>,
}

impl Classifier {
    pub fn new(model: Arc<dyn LicenseModel>) -> Self {
        Self { model }
    }

    /// Classify one identifier. Never fails:
    ///
    /// - blank identifier → `Unknown` with confidence `0.0`
    /// - model answers → `Safe` for class 1, `Risky` for class 0, max class probability
    /// - model fails → [`rule_based`]
    pub fn classify(&self, identifier: &str) -> ClassificationVerdict {
        if identifier.trim().is_empty() {
            return ClassificationVerdict::new(identifier, RiskLabel::Unknown, 0.0);
        }

        match self.classify_with_model(identifier) {
            Ok(verdict) => verdict,
            Err(e) => {
                debug!(identifier, error = %e, "model unusable, using rule-based classification");
                rule_based(identifier)
            }
        }
    }

    /// The model tier alone, with the failure cause kept.
    pub fn classify_with_model(
        &self,
        identifier: &str,
    ) -> Result<ClassificationVerdict, ClassifierError> {
        let row = FeatureRow::from_identifier(identifier).to_vec();

        let prediction = self.model.predict(&row)?;
        let confidence = self
            .model
            .predict_proba(&row)?
            .into_iter()
            .fold(None, |max: Option<f64>, p| Some(max.map_or(p, |m| m.max(p))))
            .ok_or_else(|| ClassifierError::InvalidOutput("empty probability vector".into()))?;

        if !(0.0..=1.0).contains(&confidence) {
            return Err(ClassifierError::InvalidOutput(format!(
                "probability {confidence} outside [0, 1]"
            )));
        }

        let label = match prediction {
            1 => RiskLabel::Safe,
            0 => RiskLabel::Risky,
            other => {
                return Err(ClassifierError::InvalidOutput(format!(
                    "unexpected class {other}"
                )))
            }
        };

        Ok(ClassificationVerdict::new(identifier, label, confidence))
    }
}

/// Deterministic keyword classification with fixed confidences.
pub fn rule_based(identifier: &str) -> ClassificationVerdict {
    if contains_any(identifier, RISK_KEYWORDS) {
        ClassificationVerdict::new(identifier, RiskLabel::Risky, FALLBACK_RISKY_CONFIDENCE)
    } else {
        ClassificationVerdict::new(identifier, RiskLabel::Safe, FALLBACK_SAFE_CONFIDENCE)
    }
}
