use std::io::Write;
use std::path::PathBuf;

use rstest::*;

use pharmaguard::core::models::{CoverageQuality, Phenotype, RiskLabel, Severity};
use pharmaguard::vcf::read_vcf;
use pharmaguard::{AnalysisError, AnalysisRequest, PharmaGuardConfig, RequestError, analyze};

#[fixture]
fn path_to_data() -> PathBuf {
    std::env::current_dir().unwrap().join("../tests/data")
}

#[fixture]
fn config() -> PharmaGuardConfig {
    PharmaGuardConfig::default()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_codeine_poor_metabolizer(path_to_data: PathBuf, config: PharmaGuardConfig) {
        let request =
            AnalysisRequest::new(path_to_data.join("vcf/codeine_pm.vcf"), "CODEINE", &config)
                .unwrap();
        let response = request.run().unwrap();
        let reports = response.reports();

        assert!(response.success);
        assert_eq!(reports.len(), 1);

        let report = reports[0];
        assert_eq!(report.patient_id, "PATIENT_001");
        assert_eq!(report.pharmacogenomic_profile.diplotype.to_string(), "*4/*4");
        assert_eq!(report.pharmacogenomic_profile.phenotype, Phenotype::Poor);
        assert_eq!(report.risk_assessment.risk_label, RiskLabel::Ineffective);
        assert_eq!(report.risk_assessment.severity, Severity::Moderate);
        assert_eq!(report.risk_assessment.confidence_score, 0.9);
        assert_eq!(
            report.clinical_recommendation.action,
            "Avoid codeine. Use alternative analgesic (e.g., morphine, oxycodone)"
        );
    }

    #[rstest]
    fn test_warfarin_without_pgx_variants(path_to_data: PathBuf, config: PharmaGuardConfig) {
        let request =
            AnalysisRequest::new(path_to_data.join("vcf/no_pgx.vcf"), "warfarin", &config)
                .unwrap();
        let response = request.run().unwrap();
        let report = response.reports()[0];

        assert_eq!(report.pharmacogenomic_profile.phenotype, Phenotype::Unknown);
        assert_eq!(report.risk_assessment.risk_label, RiskLabel::Unknown);
        assert_eq!(report.risk_assessment.confidence_score, 0.3);
        assert_eq!(report.risk_assessment.severity, Severity::Low);
        assert_eq!(report.quality_metrics.pgx_variants_found, 0);
        assert_eq!(
            report.quality_metrics.coverage_quality,
            CoverageQuality::Limited
        );
    }

    #[rstest]
    fn test_all_drugs_on_mixed_file(path_to_data: PathBuf, config: PharmaGuardConfig) {
        let request = AnalysisRequest::new(
            path_to_data.join("vcf/mixed.vcf"),
            "CODEINE,WARFARIN,CLOPIDOGREL,SIMVASTATIN,AZATHIOPRINE,FLUOROURACIL",
            &config,
        )
        .unwrap();
        let response = request.run().unwrap();
        let reports = response.reports();

        let summary: Vec<(&str, Phenotype, RiskLabel)> = reports
            .iter()
            .map(|r| {
                (
                    r.drug.as_str(),
                    r.pharmacogenomic_profile.phenotype,
                    r.risk_assessment.risk_label,
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("CODEINE", Phenotype::Intermediate, RiskLabel::AdjustDosage),
                ("WARFARIN", Phenotype::Intermediate, RiskLabel::AdjustDosage),
                ("CLOPIDOGREL", Phenotype::Intermediate, RiskLabel::AdjustDosage),
                ("SIMVASTATIN", Phenotype::Normal, RiskLabel::Safe),
                // TPMT 0/0 with a *3A identifier still counts one *3A copy
                ("AZATHIOPRINE", Phenotype::Intermediate, RiskLabel::AdjustDosage),
                ("FLUOROURACIL", Phenotype::Intermediate, RiskLabel::AdjustDosage),
            ]
        );

        assert!(reports.iter().all(|r| r.patient_id == "SAMPLE_MIXED"));
        assert!(reports.iter().all(|r| r.quality_metrics.variants_analyzed == 9));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["results"].as_array().map(|a| a.len()), Some(6));
    }

    #[rstest]
    fn test_gzipped_input(path_to_data: PathBuf, config: PharmaGuardConfig) {
        let content = std::fs::read(path_to_data.join("vcf/codeine_pm.vcf")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("codeine_pm.vcf.gz");
        {
            let file = std::fs::File::create(&gz_path).unwrap();
            let mut encoder =
                flate2::write::GzEncoder::new(file, flate2::Compression::default());
            encoder.write_all(&content).unwrap();
        }

        let response = AnalysisRequest::new(&gz_path, "codeine", &config)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(
            response.reports()[0].pharmacogenomic_profile.phenotype,
            Phenotype::Poor
        );
    }

    #[rstest]
    fn test_unreadable_gzip_is_an_error(config: PharmaGuardConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.vcf.gz");
        std::fs::write(&path, b"definitely not gzip").unwrap();

        let result = AnalysisRequest::new(&path, "codeine", &config)
            .unwrap()
            .run();
        assert!(matches!(result, Err(AnalysisError::Vcf(_))));
    }

    #[rstest]
    fn test_invalid_drug_is_rejected(path_to_data: PathBuf, config: PharmaGuardConfig) {
        let result =
            AnalysisRequest::new(path_to_data.join("vcf/mixed.vcf"), "ASPIRIN", &config);
        let err = result.unwrap_err();
        assert!(matches!(err, RequestError::InvalidDrugs(_)));
        assert_eq!(err.to_string(), "Invalid drug names: ASPIRIN");
    }

    #[rstest]
    fn test_analyze_is_deterministic(path_to_data: PathBuf) {
        let parsed = read_vcf(path_to_data.join("vcf/mixed.vcf")).unwrap();
        let drugs = ["CODEINE", "CLOPIDOGREL"];

        let first = analyze(&parsed, &drugs);
        let second = analyze(&parsed, &drugs);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.pharmacogenomic_profile, b.pharmacogenomic_profile);
            assert_eq!(a.risk_assessment, b.risk_assessment);
            assert_eq!(a.clinical_recommendation, b.clinical_recommendation);
        }
    }
}
