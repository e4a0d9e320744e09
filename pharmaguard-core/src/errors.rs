use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Unrecognized drug: {0}")]
    UnknownDrug(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_file_size in config: {0}")]
    InvalidMaxFileSize(u64),

    #[error("Config lists unsupported drug: {0}")]
    UnsupportedDrug(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
