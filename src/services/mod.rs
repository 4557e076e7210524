//! Service layer orchestrating repository calls for member searches.

pub mod errors;
pub mod search;
pub mod seed;

pub use errors::{SearchError, ServiceResult};
