//! Per-drug, per-phenotype risk table.

use std::sync::LazyLock;

use fxhash::FxHashMap;

use pharmaguard_core::Drug;
use pharmaguard_core::models::{Phenotype, RiskAssessment, RiskLabel, Severity};

use Phenotype::{Intermediate as IM, Normal as NM, Poor as PM, Rapid as RM, Ultrarapid as URM};
use RiskLabel::{AdjustDosage, Ineffective, Safe, Toxic};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskRule {
    pub drug: Drug,
    pub phenotype: Phenotype,
    pub risk_label: RiskLabel,
    pub severity: Severity,
    pub confidence: f64,
}

impl RiskRule {
    pub fn assessment(&self) -> RiskAssessment {
        RiskAssessment {
            risk_label: self.risk_label,
            confidence_score: self.confidence,
            severity: self.severity,
        }
    }
}

const fn rule(
    drug: Drug,
    phenotype: Phenotype,
    risk_label: RiskLabel,
    severity: Severity,
    confidence: f64,
) -> RiskRule {
    RiskRule {
        drug,
        phenotype,
        risk_label,
        severity,
        confidence,
    }
}

/// Six drugs, six phenotypes each.
pub static RISK_RULES: [RiskRule; 36] = [
    // CODEINE
    rule(Drug::Codeine, PM, Ineffective, Severity::Moderate, 0.9),
    rule(Drug::Codeine, IM, AdjustDosage, Severity::Low, 0.7),
    rule(Drug::Codeine, NM, Safe, Severity::None, 0.9),
    rule(Drug::Codeine, RM, Safe, Severity::None, 0.8),
    rule(Drug::Codeine, URM, Toxic, Severity::High, 0.9),
    rule(Drug::Codeine, Phenotype::Unknown, RiskLabel::Unknown, Severity::Low, 0.3),
    // WARFARIN
    rule(Drug::Warfarin, PM, Toxic, Severity::High, 0.9),
    rule(Drug::Warfarin, IM, AdjustDosage, Severity::Moderate, 0.8),
    rule(Drug::Warfarin, NM, Safe, Severity::None, 0.8),
    rule(Drug::Warfarin, RM, AdjustDosage, Severity::Low, 0.7),
    rule(Drug::Warfarin, URM, Ineffective, Severity::Moderate, 0.8),
    rule(Drug::Warfarin, Phenotype::Unknown, RiskLabel::Unknown, Severity::Low, 0.3),
    // CLOPIDOGREL
    rule(Drug::Clopidogrel, PM, Ineffective, Severity::Critical, 0.95),
    rule(Drug::Clopidogrel, IM, AdjustDosage, Severity::Moderate, 0.8),
    rule(Drug::Clopidogrel, NM, Safe, Severity::None, 0.9),
    rule(Drug::Clopidogrel, RM, Safe, Severity::None, 0.8),
    rule(Drug::Clopidogrel, URM, Safe, Severity::None, 0.8),
    rule(Drug::Clopidogrel, Phenotype::Unknown, RiskLabel::Unknown, Severity::Low, 0.3),
    // SIMVASTATIN
    rule(Drug::Simvastatin, PM, Toxic, Severity::High, 0.9),
    rule(Drug::Simvastatin, IM, AdjustDosage, Severity::Moderate, 0.8),
    rule(Drug::Simvastatin, NM, Safe, Severity::None, 0.9),
    rule(Drug::Simvastatin, RM, Safe, Severity::None, 0.8),
    rule(Drug::Simvastatin, URM, Safe, Severity::None, 0.8),
    rule(Drug::Simvastatin, Phenotype::Unknown, RiskLabel::Unknown, Severity::Low, 0.3),
    // AZATHIOPRINE
    rule(Drug::Azathioprine, PM, Toxic, Severity::Critical, 0.95),
    rule(Drug::Azathioprine, IM, AdjustDosage, Severity::High, 0.9),
    rule(Drug::Azathioprine, NM, Safe, Severity::None, 0.9),
    rule(Drug::Azathioprine, RM, Safe, Severity::None, 0.8),
    rule(Drug::Azathioprine, URM, Safe, Severity::None, 0.8),
    rule(Drug::Azathioprine, Phenotype::Unknown, RiskLabel::Unknown, Severity::Moderate, 0.5),
    // FLUOROURACIL
    rule(Drug::Fluorouracil, PM, Toxic, Severity::Critical, 0.95),
    rule(Drug::Fluorouracil, IM, AdjustDosage, Severity::High, 0.9),
    rule(Drug::Fluorouracil, NM, Safe, Severity::None, 0.9),
    rule(Drug::Fluorouracil, RM, Safe, Severity::None, 0.8),
    rule(Drug::Fluorouracil, URM, Safe, Severity::None, 0.8),
    rule(Drug::Fluorouracil, Phenotype::Unknown, RiskLabel::Unknown, Severity::Moderate, 0.5),
];

static RULE_INDEX: LazyLock<FxHashMap<(Drug, Phenotype), &'static RiskRule>> =
    LazyLock::new(|| {
        RISK_RULES
            .iter()
            .map(|rule| ((rule.drug, rule.phenotype), rule))
            .collect()
    });

/// Returned for drugs without a rule set.
pub const UNRECOGNIZED_DRUG_ASSESSMENT: RiskAssessment = RiskAssessment {
    risk_label: RiskLabel::Unknown,
    confidence_score: 0.0,
    severity: Severity::Low,
};

///
/// Look up the rule for a drug and phenotype.
///
/// Every drug has an entry for every phenotype, so this only returns `None`
/// if the table itself is incomplete.
///
pub fn risk_rule(drug: Drug, phenotype: Phenotype) -> Option<&'static RiskRule> {
    RULE_INDEX
        .get(&(drug, phenotype))
        .or_else(|| RULE_INDEX.get(&(drug, Phenotype::Unknown)))
        .copied()
}
