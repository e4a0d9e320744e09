//! # Metabolizer phenotype classification
//!
//! Turns the pharmacogenomic records of a parsed variant file into a
//! [PharmacogenomicProfile](pharmaguard_core::models::PharmacogenomicProfile)
//! for one drug.
//!
//! ## Example
//! ```rust,no_run
//! use pharmaguard_phenotype::classify;
//! use pharmaguard_vcf::read_vcf;
//!
//! let parsed = read_vcf("patient.vcf").unwrap();
//! let profile = classify(&parsed.variants, "CODEINE");
//! println!("{} {}", profile.diplotype, profile.phenotype);
//! ```
pub mod cascade;
pub mod classifier;
pub mod diplotype;

// re-exports
pub use cascade::{AlleleTally, phenotype_from_diplotype};
pub use classifier::{PharmacogenomicProfiling, classify, classify_drug};
pub use diplotype::{AlleleEvidence, DiplotypeCall, infer_diplotype};
