//! `license-guard` — flag dependency licenses that are risky for commercial use.
//!
//! - [`extractor`] recovers license identifiers from manifest content.
//! - [`license`] classifies identifiers (trained model, keyword fallback) and
//!   suggests alternatives for risky ones.
//! - [`pipeline`] combines both into sorted [`models::ResultRow`]s.
//!
//! Results are advisory heuristics, not legal determinations.

pub mod config;
pub mod error;
pub mod extractor;
pub mod license;
pub mod models;
pub mod pipeline;
pub mod report;

pub use error::{ClassifierError, ModelError, ParseError};
pub use license::classifier::Classifier;
pub use license::model::{LicenseModel, LogisticModel, NoModel};
pub use models::{Analysis, ClassificationVerdict, ExtractionResult, LicenseSet, ResultRow, RiskLabel};
pub use pipeline::{NoLicensesFound, Pipeline};
