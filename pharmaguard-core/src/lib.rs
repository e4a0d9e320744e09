//! Core types for pharmaguard.
//!
//! This crate holds everything the interpretation stages share:
//!
//! - the data model ([models::VariantRecord], [models::PharmacogenomicProfile],
//!   [models::RiskAssessment], [models::ClinicalRecommendation])
//! - the fixed reference tables in [reference], keyed by [Gene] and [Drug]
//! - request limits loaded from TOML ([config::PharmaGuardConfig])
//! - small io helpers

pub mod config;
pub mod errors;
pub mod models;
pub mod reference;
pub mod utils;

// re-exports
pub use config::PharmaGuardConfig;
pub use reference::{Drug, Gene, REFERENCE_TABLE_VERSION};
