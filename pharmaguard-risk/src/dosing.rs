//! Phenotype-specific dosing guidance and label-keyed fallbacks.

use pharmaguard_core::Drug;
use pharmaguard_core::models::{ClinicalRecommendation, Phenotype, RiskLabel};

use Phenotype::{Intermediate as IM, Poor as PM, Ultrarapid as URM};

///
/// One dosing entry. Only `recommendation` is required; everything else is
/// copied into the [ClinicalRecommendation] when present.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DosingGuideline {
    pub drug: Drug,
    pub phenotype: Phenotype,
    pub recommendation: &'static str,
    pub dosing_adjustment: Option<&'static str>,
    pub monitoring: Option<&'static str>,
    pub alternative_drugs: &'static [&'static str],
    pub rationale: Option<&'static str>,
}

impl DosingGuideline {
    const fn new(drug: Drug, phenotype: Phenotype, recommendation: &'static str) -> Self {
        DosingGuideline {
            drug,
            phenotype,
            recommendation,
            dosing_adjustment: None,
            monitoring: None,
            alternative_drugs: &[],
            rationale: None,
        }
    }

    const fn adjust(mut self, dosing_adjustment: &'static str) -> Self {
        self.dosing_adjustment = Some(dosing_adjustment);
        self
    }

    const fn monitor(mut self, monitoring: &'static str) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    const fn alternatives(mut self, alternative_drugs: &'static [&'static str]) -> Self {
        self.alternative_drugs = alternative_drugs;
        self
    }

    const fn because(mut self, rationale: &'static str) -> Self {
        self.rationale = Some(rationale);
        self
    }

    pub fn to_recommendation(&self) -> ClinicalRecommendation {
        let alternative_drugs = if self.alternative_drugs.is_empty() {
            None
        } else {
            Some(
                self.alternative_drugs
                    .iter()
                    .map(|drug| drug.to_string())
                    .collect(),
            )
        };

        ClinicalRecommendation {
            action: self.recommendation.to_string(),
            dosing_adjustment: self.dosing_adjustment.map(str::to_string),
            monitoring: self.monitoring.map(str::to_string),
            alternative_drugs,
            rationale: self.rationale.map(str::to_string),
        }
    }
}

pub static DOSING_GUIDELINES: [DosingGuideline; 13] = [
    DosingGuideline::new(
        Drug::Codeine,
        PM,
        "Avoid codeine. Use alternative analgesic (e.g., morphine, oxycodone)",
    )
    .alternatives(&["Morphine", "Oxycodone", "Hydromorphone"])
    .because("CYP2D6 poor metabolizers cannot convert codeine to active morphine metabolite"),
    DosingGuideline::new(Drug::Codeine, IM, "Reduce initial dose by 25-50%")
        .adjust("25-50% reduction")
        .monitor("Monitor for reduced efficacy"),
    DosingGuideline::new(Drug::Codeine, URM, "Avoid codeine or use reduced dose")
        .adjust("50% reduction or avoid")
        .monitor("Monitor for increased adverse effects (respiratory depression)"),
    DosingGuideline::new(Drug::Warfarin, PM, "Reduce initial dose by 30-50%")
        .adjust("30-50% reduction")
        .monitor("Frequent INR monitoring (daily initially)"),
    DosingGuideline::new(Drug::Warfarin, IM, "Reduce initial dose by 20-30%")
        .adjust("20-30% reduction")
        .monitor("Frequent INR monitoring"),
    DosingGuideline::new(
        Drug::Clopidogrel,
        PM,
        "Use alternative antiplatelet agent (prasugrel or ticagrelor)",
    )
    .alternatives(&["Prasugrel", "Ticagrelor"])
    .because("CYP2C19 poor metabolizers have reduced clopidogrel activation"),
    DosingGuideline::new(
        Drug::Clopidogrel,
        IM,
        "Consider alternative agent or increased dose",
    )
    .adjust("Consider 150mg daily (if alternative not available)")
    .monitor("Monitor platelet function"),
    DosingGuideline::new(
        Drug::Simvastatin,
        PM,
        "Reduce dose by 50% or use alternative statin",
    )
    .adjust("50% reduction")
    .alternatives(&["Pravastatin", "Rosuvastatin"])
    .monitor("Monitor for myopathy (CK levels)"),
    DosingGuideline::new(Drug::Simvastatin, IM, "Reduce dose by 25-50%")
        .adjust("25-50% reduction")
        .monitor("Monitor for myopathy"),
    DosingGuideline::new(
        Drug::Azathioprine,
        PM,
        "Reduce dose by 90% or use alternative immunosuppressant",
    )
    .adjust("90% reduction (10% of standard dose)")
    .alternatives(&["Mercaptopurine (at reduced dose)", "Mycophenolate"])
    .monitor("Monitor for severe myelosuppression")
    .because("TPMT poor metabolizers have severe toxicity risk"),
    DosingGuideline::new(Drug::Azathioprine, IM, "Reduce dose by 30-50%")
        .adjust("30-50% reduction")
        .monitor("Monitor for myelosuppression"),
    DosingGuideline::new(
        Drug::Fluorouracil,
        PM,
        "Avoid fluorouracil or reduce dose by 50% with close monitoring",
    )
    .adjust("50% reduction or avoid")
    .alternatives(&["Capecitabine (with caution)", "Alternative chemotherapy"])
    .monitor("Monitor for severe toxicity (mucositis, diarrhea, neutropenia)")
    .because("DPYD poor metabolizers have life-threatening toxicity risk"),
    DosingGuideline::new(Drug::Fluorouracil, IM, "Reduce dose by 25-50%")
        .adjust("25-50% reduction")
        .monitor("Monitor for toxicity"),
];

pub fn dosing_guideline(drug: Drug, phenotype: Phenotype) -> Option<&'static DosingGuideline> {
    DOSING_GUIDELINES
        .iter()
        .find(|guideline| guideline.drug == drug && guideline.phenotype == phenotype)
}

fn recommendation(action: &str, dosing_adjustment: &str, monitoring: &str) -> ClinicalRecommendation {
    ClinicalRecommendation {
        action: action.to_string(),
        dosing_adjustment: Some(dosing_adjustment.to_string()),
        monitoring: Some(monitoring.to_string()),
        alternative_drugs: None,
        rationale: None,
    }
}

///
/// Default recommendation when no phenotype-specific entry exists.
///
pub fn fallback_recommendation(risk_label: RiskLabel) -> ClinicalRecommendation {
    match risk_label {
        RiskLabel::Safe => recommendation(
            "Standard dosing recommended",
            "None",
            "Standard monitoring",
        ),
        RiskLabel::AdjustDosage => recommendation(
            "Consider dose adjustment",
            "Consult dosing guidelines",
            "Enhanced monitoring recommended",
        ),
        RiskLabel::Toxic | RiskLabel::Ineffective => recommendation(
            "Consider alternative therapy",
            "Not recommended",
            "If used, close monitoring required",
        ),
        RiskLabel::Unknown => recommendation(
            "Insufficient data for recommendation",
            "Standard dosing",
            "Standard monitoring",
        ),
    }
}

///
/// Recommendation for drugs with no dosing table at all.
///
pub fn specialist_recommendation() -> ClinicalRecommendation {
    recommendation(
        "Consult clinical pharmacogenomics specialist",
        "None specified",
        "Standard monitoring recommended",
    )
}
