//! Report renderers for analysis results.
//!
//! - [`terminal`] — colored table per analyzed source with a summary line; respects `--quiet`.
//! - JSON output is the serde form of [`crate::models::ResultRow`], printed by the binary.

pub mod terminal;
