use log::warn;

use pharmaguard_core::Drug;
use pharmaguard_core::models::{ClinicalRecommendation, PharmacogenomicProfile, RiskAssessment};

use crate::dosing::{dosing_guideline, fallback_recommendation, specialist_recommendation};
use crate::rules::{UNRECOGNIZED_DRUG_ASSESSMENT, risk_rule};

///
/// Risk of a resolved drug for a profile. Phenotypes without a rule fall
/// back to the drug's `Unknown` row.
///
pub fn assess_drug_risk(drug: Drug, profile: &PharmacogenomicProfile) -> RiskAssessment {
    risk_rule(drug, profile.phenotype)
        .map(|rule| rule.assessment())
        .unwrap_or(UNRECOGNIZED_DRUG_ASSESSMENT)
}

///
/// Assess the risk of a drug given by name.
///
/// # Arguments
/// - drug: drug name, case-insensitive
/// - profile: the patient's profile for this drug
pub fn assess_risk(drug: &str, profile: &PharmacogenomicProfile) -> RiskAssessment {
    match drug.parse::<Drug>() {
        Ok(drug) => assess_drug_risk(drug, profile),
        Err(e) => {
            warn!("{}; no risk rules apply", e);
            UNRECOGNIZED_DRUG_ASSESSMENT
        }
    }
}

pub fn recommend_for_drug(
    drug: Drug,
    profile: &PharmacogenomicProfile,
    assessment: &RiskAssessment,
) -> ClinicalRecommendation {
    match dosing_guideline(drug, profile.phenotype) {
        Some(guideline) => guideline.to_recommendation(),
        None => fallback_recommendation(assessment.risk_label),
    }
}

///
/// Clinical recommendation for a drug given by name. Unrecognized drugs get
/// the specialist-consult recommendation whatever the profile says.
///
pub fn recommend(
    drug: &str,
    profile: &PharmacogenomicProfile,
    assessment: &RiskAssessment,
) -> ClinicalRecommendation {
    match drug.parse::<Drug>() {
        Ok(drug) => recommend_for_drug(drug, profile, assessment),
        Err(_) => specialist_recommendation(),
    }
}
