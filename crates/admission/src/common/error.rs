use thiserror::Error;

use crate::validate::InvalidResourceRequest;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    InvalidRequest(#[from] InvalidResourceRequest),
    #[error("Error: {0}")]
    GenericError(String),
}

impl From<String> for AdmissionError {
    fn from(e: String) -> Self {
        Self::GenericError(e)
    }
}
impl From<&str> for AdmissionError {
    fn from(e: &str) -> Self {
        Self::GenericError(e.to_string())
    }
}
