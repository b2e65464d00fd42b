use models::errors::{DataValidationError, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] DataValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{} with id '{}' was not found.", entity, id))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(v) => Self::Validation(v),
            ModelError::NotFound { entity, id } => Self::not_found(entity, id),
            ModelError::MissingId => Self::Internal("update called with empty id field".into()),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
