pub mod assessment;
pub mod profile;
pub mod variant;

// re-export for cleaner imports
pub use self::assessment::{ClinicalRecommendation, RiskAssessment, RiskLabel, Severity};
pub use self::profile::{
    ClinicalSignificance, CoverageQuality, DetectedVariant, Diplotype, PharmacogenomicProfile,
    Phenotype, split_alleles,
};
pub use self::variant::{InfoValue, VariantRecord, Zygosity};
