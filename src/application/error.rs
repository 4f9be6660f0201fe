use thiserror::Error;

use crate::{domain::error::DomainError, infra::error::InfraError};

/// Top-level failure for bootstrap and process-level paths. Request-level
/// failures use the per-service error enums and the HTTP error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
