//! HTTP routes wrapping the search services.

pub mod api;
