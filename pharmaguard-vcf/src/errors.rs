use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcfError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type VcfResult<T> = std::result::Result<T, VcfError>;
