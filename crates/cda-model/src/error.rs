use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid HL7 timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("unknown vocabulary code: {0}")]
    UnknownCode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
