//! Query-string forms accepted by the HTTP routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::page::PageRequestError;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing request parameters.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid sort: {0}")]
    InvalidSort(String),

    #[error("page size {requested} exceeds the maximum of {max}")]
    PageTooLarge { requested: usize, max: usize },

    #[error("invalid page: {0}")]
    InvalidPage(PageRequestError),
}
