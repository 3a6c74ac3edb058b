use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::retry::RetryError;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Invalid product data: {}", .0.join(", "))]
    InvalidProduct(Vec<String>),
    #[error("Product not found: {0}")]
    ProductNotFound(u64),
    #[error("Network request failed: {0}")]
    StorageUnavailable(String),
    #[error("Failed after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last: Box<ProductError>,
    },
}

impl ProductError {
    /// Only storage failures can succeed on a later attempt with the same input.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProductError::StorageUnavailable(_))
    }

    /// Translate a store failure for the record `id` into the domain error.
    pub fn from_store(id: u64, error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(_) => ProductError::ProductNotFound(id),
            other => ProductError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(error: FrameworkError) -> Self {
        ProductError::StorageUnavailable(error.to_string())
    }
}

impl From<RetryError<ProductError>> for ProductError {
    fn from(error: RetryError<ProductError>) -> Self {
        match error {
            RetryError::Exhausted { attempts, last } => ProductError::RetryExhausted {
                attempts,
                last: Box::new(last),
            },
            RetryError::Permanent(error) => error,
        }
    }
}
