use std::path::PathBuf;

use thiserror::Error;

use pharmaguard_vcf::VcfError;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("No VCF file provided: {0} does not exist")]
    MissingFile(PathBuf),

    #[error("Invalid file type: {0}. Allowed extensions: {1}")]
    InvalidFileType(String, String),

    #[error("File is {size} bytes, the limit is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("No drug names provided")]
    NoDrugs,

    #[error("Invalid drug names: {}", .0.join(", "))]
    InvalidDrugs(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RequestResult<T> = std::result::Result<T, RequestError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("VCF parsing failed: {0}")]
    Vcf(#[from] VcfError),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
