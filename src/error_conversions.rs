//! Error conversion glue between the domain and the outer layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions live here.

use crate::domain::page::PageRequestError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::SearchError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<PageRequestError> for SearchError {
    fn from(val: PageRequestError) -> Self {
        SearchError::InvalidArgument(val.to_string())
    }
}
