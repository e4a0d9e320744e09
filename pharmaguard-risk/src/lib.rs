//! # Drug risk rules
//!
//! Maps a metabolizer phenotype to a [RiskAssessment](pharmaguard_core::models::RiskAssessment)
//! and a [ClinicalRecommendation](pharmaguard_core::models::ClinicalRecommendation).
//! Both lookups are pure functions over the static tables in [rules] and [dosing].
pub mod dosing;
pub mod engine;
pub mod rules;

// re-exports
pub use engine::{assess_drug_risk, assess_risk, recommend, recommend_for_drug};
pub use rules::{RISK_RULES, RiskRule};
