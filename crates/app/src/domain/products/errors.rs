//! Products service errors.

use frutos::products::ValidationErrors;
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// Document store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this UUID is already stored.
    #[error("product {0} already exists")]
    AlreadyExists(ProductUuid),

    /// Reading or writing the backing file failed.
    #[error("failed to access product store: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds invalid JSON.
    #[error("failed to decode product store: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("storage error")]
    Storage(#[from] StoreError),
}

impl ProductsServiceError {
    /// Field level messages for a rejected submission, empty for other failures.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        match self {
            Self::Validation(errors) => errors
                .field_messages()
                .into_iter()
                .map(|(field, message)| (field.to_string(), message))
                .collect(),
            Self::NotFound | Self::Storage(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use frutos::products::ValidationError;

    use super::*;

    #[test]
    fn validation_errors_expose_field_messages() {
        let error = ProductsServiceError::from(ValidationErrors::from(ValidationError::NoImages));

        let messages = error.field_messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages.first().map(|(field, _)| field.as_str()), Some("images"));
    }

    #[test]
    fn not_found_has_no_field_messages() {
        assert!(ProductsServiceError::NotFound.field_messages().is_empty());
    }
}
