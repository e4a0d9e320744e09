//! # pharmaguard
//!
//! Pharmacogenomic interpretation of a patient's variant file: which
//! metabolizer phenotype the patient has for the genes behind a drug, what
//! that means for the drug's risk, and how to dose it.
//!
//! The work is split across crates, re-exported here:
//!
//! - [core]: shared models and the static reference tables
//! - [vcf]: variant file parsing and PGx filtering
//! - [phenotype]: diplotype inference and phenotype classification
//! - [risk]: risk labels and dosing recommendations
//!
//! [AnalysisRequest] and [analyze] tie them together.
//!
//! ```rust,no_run
//! use pharmaguard::{AnalysisRequest, PharmaGuardConfig};
//!
//! let config = PharmaGuardConfig::default();
//! let request = AnalysisRequest::new("patient.vcf", "codeine,warfarin", &config).unwrap();
//! let response = request.run().unwrap();
//! for report in response.reports() {
//!     println!("{}: {}", report.drug, report.risk_assessment.risk_label);
//! }
//! ```
pub mod errors;
pub mod report;
pub mod request;

#[doc(inline)]
pub use pharmaguard_core as core;

#[doc(inline)]
pub use pharmaguard_vcf as vcf;

#[doc(inline)]
pub use pharmaguard_phenotype as phenotype;

#[doc(inline)]
pub use pharmaguard_risk as risk;

// re-exports
pub use errors::{AnalysisError, RequestError};
pub use pharmaguard_core::PharmaGuardConfig;
pub use report::{AnalysisResponse, DrugReport, analyze};
pub use request::AnalysisRequest;
