//! Per-drug report assembly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pharmaguard_core::REFERENCE_TABLE_VERSION;
use pharmaguard_core::models::{
    ClinicalRecommendation, CoverageQuality, DetectedVariant, Diplotype, PharmacogenomicProfile,
    Phenotype, RiskAssessment,
};
use pharmaguard_core::utils::serialize_or_unknown;
use pharmaguard_core::Gene;
use pharmaguard_phenotype::classify;
use pharmaguard_risk::{assess_risk, recommend};
use pharmaguard_vcf::ParsedVcf;

///
/// Profile as it appears in a report; coverage moves to [QualityMetrics].
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileSummary {
    #[serde(serialize_with = "serialize_or_unknown")]
    pub primary_gene: Option<Gene>,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub variants_analyzed: usize,
    pub pgx_variants_found: usize,
    pub coverage_quality: CoverageQuality,
    pub reference_version: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrugReport {
    pub patient_id: String,
    pub drug: String,
    pub timestamp: DateTime<Utc>,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: ProfileSummary,
    pub clinical_recommendation: ClinicalRecommendation,
    pub quality_metrics: QualityMetrics,
}

impl DrugReport {
    fn new(
        parsed: &ParsedVcf,
        drug: &str,
        timestamp: DateTime<Utc>,
        profile: PharmacogenomicProfile,
        risk_assessment: RiskAssessment,
        clinical_recommendation: ClinicalRecommendation,
    ) -> DrugReport {
        let quality_metrics = QualityMetrics {
            vcf_parsing_success: true,
            variants_analyzed: parsed.total_variants,
            pgx_variants_found: profile.detected_variants.len(),
            coverage_quality: profile.coverage_quality,
            reference_version: REFERENCE_TABLE_VERSION,
        };

        DrugReport {
            patient_id: parsed.patient_id.clone(),
            drug: drug.to_string(),
            timestamp,
            risk_assessment,
            pharmacogenomic_profile: ProfileSummary {
                primary_gene: profile.primary_gene,
                diplotype: profile.diplotype,
                phenotype: profile.phenotype,
                detected_variants: profile.detected_variants,
            },
            clinical_recommendation,
            quality_metrics,
        }
    }
}

///
/// Run the classifier and the rule engine for each drug, in request order.
///
/// Drug names are matched case-insensitively; an unrecognized name still
/// gets a report, with an unknown profile and the specialist-consult
/// recommendation.
///
pub fn analyze<S: AsRef<str>>(parsed: &ParsedVcf, drugs: &[S]) -> Vec<DrugReport> {
    let timestamp = Utc::now();

    drugs
        .iter()
        .map(|drug| {
            let drug = drug.as_ref().trim().to_uppercase();
            let profile = classify(&parsed.variants, &drug);
            let risk_assessment = assess_risk(&drug, &profile);
            let recommendation = recommend(&drug, &profile, &risk_assessment);
            DrugReport::new(
                parsed,
                &drug,
                timestamp,
                profile,
                risk_assessment,
                recommendation,
            )
        })
        .collect()
}

///
/// One report is emitted as an object, several as an array.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResults {
    Single(Box<DrugReport>),
    Many(Vec<DrugReport>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub results: AnalysisResults,
}

impl AnalysisResponse {
    pub fn new(mut reports: Vec<DrugReport>) -> AnalysisResponse {
        let results = match reports.len() {
            1 => match reports.pop() {
                Some(report) => AnalysisResults::Single(Box::new(report)),
                None => AnalysisResults::Many(reports),
            },
            _ => AnalysisResults::Many(reports),
        };

        AnalysisResponse {
            success: true,
            results,
        }
    }

    pub fn reports(&self) -> Vec<&DrugReport> {
        match &self.results {
            AnalysisResults::Single(report) => vec![report.as_ref()],
            AnalysisResults::Many(reports) => reports.iter().collect(),
        }
    }
}
