use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::reference::Drug;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["vcf".to_string(), "vcf.gz".to_string()]
}

fn default_supported_drugs() -> Vec<String> {
    Drug::ALL.iter().map(|d| d.name().to_string()).collect()
}

///
/// Limits applied to incoming analysis requests.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// max_file_size = 5242880
/// allowed_extensions = ["vcf", "vcf.gz"]
/// supported_drugs = ["CODEINE", "WARFARIN"]
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PharmaGuardConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_supported_drugs")]
    pub supported_drugs: Vec<String>,
}

impl Default for PharmaGuardConfig {
    fn default() -> Self {
        PharmaGuardConfig {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
            supported_drugs: default_supported_drugs(),
        }
    }
}

impl PharmaGuardConfig {
    ///
    /// Parse and validate a config from TOML text.
    ///
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        let mut config: PharmaGuardConfig = toml::from_str(toml_str)?;

        if config.max_file_size == 0 {
            return Err(ConfigError::InvalidMaxFileSize(config.max_file_size));
        }

        for drug in config.supported_drugs.iter_mut() {
            let parsed: Drug = drug
                .parse()
                .map_err(|_| ConfigError::UnsupportedDrug(drug.clone()))?;
            *drug = parsed.name().to_string();
        }

        for ext in config.allowed_extensions.iter_mut() {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }

        Ok(config)
    }

    pub fn supports(&self, drug: &str) -> bool {
        self.supported_drugs.iter().any(|d| d == drug)
    }

    ///
    /// Check a file name against the allowed extensions. Multi-part
    /// extensions such as `vcf.gz` are matched as a suffix.
    ///
    pub fn allows_file_name(&self, file_name: &str) -> bool {
        let file_name = file_name.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| file_name.ends_with(&format!(".{}", ext)))
    }
}

impl TryFrom<&Path> for PharmaGuardConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        PharmaGuardConfig::from_toml_str(&toml_str)
    }
}
