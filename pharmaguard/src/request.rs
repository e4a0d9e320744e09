use std::path::{Path, PathBuf};

use log::info;

use pharmaguard_core::{Drug, PharmaGuardConfig};
use pharmaguard_vcf::read_vcf;

use crate::errors::{AnalysisResult, RequestError, RequestResult};
use crate::report::{AnalysisResponse, analyze};

///
/// Split a comma separated drug list into trimmed, uppercased names.
/// Empty entries are dropped.
///
pub fn parse_drug_list(drugs: &str) -> Vec<String> {
    drugs
        .split(',')
        .map(|drug| drug.trim().to_uppercase())
        .filter(|drug| !drug.is_empty())
        .collect()
}

///
/// A validated analysis request: an existing variant file within the
/// configured limits, and at least one supported drug.
///
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    pub vcf_path: PathBuf,
    pub drugs: Vec<Drug>,
}

impl AnalysisRequest {
    ///
    /// Validate a request.
    ///
    /// # Arguments
    /// - vcf_path: path to the variant file
    /// - drugs: comma separated drug names, any case
    /// - config: limits to check against
    pub fn new<P: AsRef<Path>>(
        vcf_path: P,
        drugs: &str,
        config: &PharmaGuardConfig,
    ) -> RequestResult<AnalysisRequest> {
        let vcf_path = vcf_path.as_ref();

        if !vcf_path.is_file() {
            return Err(RequestError::MissingFile(vcf_path.to_path_buf()));
        }

        let file_name = vcf_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        if !config.allows_file_name(&file_name) {
            return Err(RequestError::InvalidFileType(
                file_name,
                config.allowed_extensions.join(", "),
            ));
        }

        let size = std::fs::metadata(vcf_path)?.len();
        if size > config.max_file_size {
            return Err(RequestError::FileTooLarge {
                size,
                max: config.max_file_size,
            });
        }

        let names = parse_drug_list(drugs);
        if names.is_empty() {
            return Err(RequestError::NoDrugs);
        }

        let invalid: Vec<String> = names
            .iter()
            .filter(|name| !config.supports(name))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(RequestError::InvalidDrugs(invalid));
        }

        let drugs = names
            .iter()
            .map(|name| name.parse::<Drug>())
            .collect::<Result<Vec<Drug>, _>>()
            .map_err(|_| RequestError::InvalidDrugs(names.clone()))?;

        Ok(AnalysisRequest {
            vcf_path: vcf_path.to_path_buf(),
            drugs,
        })
    }

    ///
    /// Parse the file and build one report per requested drug.
    ///
    pub fn run(&self) -> AnalysisResult<AnalysisResponse> {
        let parsed = read_vcf(&self.vcf_path)?;
        let names: Vec<&str> = self.drugs.iter().map(|drug| drug.name()).collect();

        info!(
            "Analyzing {} for {}",
            self.vcf_path.display(),
            names.join(", ")
        );

        Ok(AnalysisResponse::new(analyze(&parsed, &names)))
    }
}
