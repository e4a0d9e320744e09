//! # Variant call file parsing
//!
//! Reads a VCF file (plain text or gzipped) and keeps the records that matter
//! for pharmacogenomics:
//!
//! - records annotated (INFO `GENE`) with one of the target pharmacogenes
//! - records whose identifier is a known pharmacogenomic rsID
//!
//! Malformed data lines are skipped and counted; only an unreadable file is
//! an error.
//!
//! # Example
//!
//! ```no_run
//! use pharmaguard_vcf::read_vcf;
//!
//! let parsed = read_vcf("patient.vcf").unwrap();
//! println!("{}: {} of {} variants are PGx-relevant",
//!     parsed.patient_id, parsed.pgx_variants(), parsed.total_variants);
//! ```

pub mod errors;
pub mod filter;
pub mod parser;
pub mod reader;

pub use errors::{VcfError, VcfResult};
pub use parser::VcfParser;
pub use reader::{ParsedVcf, read_vcf};
