//! Data transfer objects produced by the search services.

pub mod api;
pub mod member;
