//! Trained safety model and the feature row it is evaluated on.
//!
//! The model is an opaque artifact exported by the training pipeline. It is loaded
//! once, never mutated, and shared read-only between concurrent analyses.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ClassifierError, ModelError};
use crate::license::normalize::{char_len, contains_token};

/// Column order of [`FeatureRow::to_vec`]. The artifact must list the same names.
pub const FEATURE_NAMES: [&str; 9] = [
    "name_length",
    "has_gpl",
    "has_lgpl",
    "has_mpl",
    "has_apache",
    "has_bsd",
    "has_mit",
    "is_osi",
    "is_deprecated",
];

/// Features computed from a license identifier.
///
/// `is_osi` and `is_deprecated` are constants: the model was trained on OSI
/// identifiers only, so every input is presented as a current OSI identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub name_length: usize,
    pub has_gpl: bool,
    pub has_lgpl: bool,
    pub has_mpl: bool,
    pub has_apache: bool,
    pub has_bsd: bool,
    pub has_mit: bool,
    pub is_osi: bool,
    pub is_deprecated: bool,
}

impl FeatureRow {
    pub fn from_identifier(identifier: &str) -> Self {
        Self {
            name_length: char_len(identifier),
            has_gpl: contains_token(identifier, "GPL"),
            has_lgpl: contains_token(identifier, "LGPL"),
            has_mpl: contains_token(identifier, "MPL"),
            has_apache: contains_token(identifier, "APACHE"),
            has_bsd: contains_token(identifier, "BSD"),
            has_mit: contains_token(identifier, "MIT"),
            is_osi: true,
            is_deprecated: false,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        vec![
            self.name_length as f64,
            flag(self.has_gpl),
            flag(self.has_lgpl),
            flag(self.has_mpl),
            flag(self.has_apache),
            flag(self.has_bsd),
            flag(self.has_mit),
            flag(self.is_osi),
            flag(self.is_deprecated),
        ]
    }
}

/// A trained binary classifier: class `1` means safe, class `0` means risky.
pub trait LicenseModel: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<u8, ClassifierError>;

    /// Per-class probabilities, indexed like the model's classes.
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}

/// Placeholder used when no artifact is configured. Every call fails, which sends
/// all classification through the rule-based fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoModel;

impl LicenseModel for NoModel {
    fn predict(&self, _row: &[f64]) -> Result<u8, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }

    fn predict_proba(&self, _row: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }
}

/// Logistic-regression artifact, serialized as JSON:
///
/// ```json
/// { "features": ["name_length", ...], "classes": [0, 1],
///   "coefficients": [-0.02, ...], "intercept": 2.0 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub features: Vec<String>,
    #[serde(default = "default_classes")]
    pub classes: Vec<u8>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_classes() -> Vec<u8> {
    vec![0, 1]
}

impl LogisticModel {
    /// Load and sanity-check an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let model: LogisticModel = serde_json::from_str(content)?;
        if model.coefficients.len() != model.features.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficients for {} features",
                model.coefficients.len(),
                model.features.len()
            )));
        }
        if model.classes.len() != 2 {
            return Err(ModelError::Invalid(format!(
                "expected a binary model, found {} classes",
                model.classes.len()
            )));
        }
        if model.features.iter().map(String::as_str).ne(FEATURE_NAMES) {
            // Still usable when only the names drift; a width mismatch fails per call.
            tracing::warn!(
                features = ?model.features,
                "model artifact feature names differ from the extracted features"
            );
        }
        Ok(model)
    }

    fn positive_probability(&self, row: &[f64]) -> Result<f64, ClassifierError> {
        if row.len() != self.coefficients.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        let z: f64 = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());
        if !p.is_finite() {
            return Err(ClassifierError::InvalidOutput(format!(
                "non-finite probability for z = {z}"
            )));
        }
        Ok(p)
    }
}

impl LicenseModel for LogisticModel {
    fn predict(&self, row: &[f64]) -> Result<u8, ClassifierError> {
        let p = self.positive_probability(row)?;
        Ok(if p >= 0.5 { self.classes[1] } else { self.classes[0] })
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        let p = self.positive_probability(row)?;
        Ok(vec![1.0 - p, p])
    }
}
