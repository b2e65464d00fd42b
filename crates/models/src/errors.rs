use thiserror::Error;

/// Why a JSON payload could not be turned into a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    #[error("invalid product: body of request contained bad or no data ({0} is not an object)")]
    NotAnObject(&'static str),
    #[error("invalid product: missing {0}")]
    MissingField(&'static str),
    #[error("invalid type for {expected} [{field}]")]
    InvalidType { field: &'static str, expected: &'static str },
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
}

impl DataValidationError {
    /// Name of the offending field, if the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject(_) => None,
            Self::MissingField(f) | Self::InvalidType { field: f, .. } => Some(f),
            Self::InvalidPrice(_) => Some("price"),
            Self::InvalidCategory(_) => Some("category"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] DataValidationError),
    #[error("update called with empty id field")]
    MissingId,
    #[error("{entity} with id '{id}' was not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::Db(e.to_string())
    }
}
