//! DTOs exposed by the member search API endpoints.

use serde::Serialize;

use crate::domain::page::PageResult;
use crate::dto::member::MemberTeamDto;

/// JSON body returned by the paginated member endpoints.
#[derive(Debug, Serialize)]
pub struct MemberPageResponse {
    pub content: Vec<MemberTeamDto>,
    /// Total number of members matching the filter.
    pub total_count: Option<u64>,
    /// 1-based page number.
    pub page: usize,
    pub size: i64,
    pub total_pages: Option<usize>,
    pub has_next: bool,
}

impl From<PageResult<MemberTeamDto>> for MemberPageResponse {
    fn from(result: PageResult<MemberTeamDto>) -> Self {
        let page = result.page_number();
        let total_pages = result.total_pages();
        let has_next = result.has_next();
        Self {
            total_count: result.total_count,
            page,
            size: result.limit,
            total_pages,
            has_next,
            content: result.content,
        }
    }
}

/// JSON body returned when a request is rejected.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
