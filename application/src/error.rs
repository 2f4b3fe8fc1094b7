use sentiment_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ApplicationError::Domain(err) => err.reason(),
            ApplicationError::Validation(_) => "validation_error",
            ApplicationError::Internal(_) => "internal_error",
        }
    }
}
