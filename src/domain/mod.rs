//! Domain aggregates and query inputs exposed by the search service layer.

pub mod condition;
pub mod member;
pub mod page;
pub mod team;
pub mod types;
