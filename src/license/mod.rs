//! License identifier matching, classification and alternatives.
//!
//! - [`normalize`] — case-insensitive token matching shared by the others.
//! - [`model`] — the trained safety model and its feature row.
//! - [`classifier`] — two-tier classification: model first, keyword rules on failure.
//! - [`alternatives`] — ranked table of safer replacements for risky licenses.

pub mod alternatives;
pub mod classifier;
pub mod model;
pub mod normalize;
