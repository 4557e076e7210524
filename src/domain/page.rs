//! Pagination request and result types.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a [`PageRequest`] cannot be executed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("page limit must be greater than zero, got {0}")]
    NonPositiveLimit(i64),
    #[error("page offset must not be negative, got {0}")]
    NegativeOffset(i64),
    #[error("page {page} with {per_page} rows per page is out of range")]
    PageOutOfRange { page: usize, per_page: usize },
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),
}

/// Member attributes a page can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Username,
    Age,
    TeamName,
}

impl SortField {
    /// Returns `true` when ordering by this field reads the joined team.
    pub fn references_team(self) -> bool {
        matches!(self, SortField::TeamName)
    }
}

impl FromStr for SortField {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "username" => Ok(SortField::Username),
            "age" => Ok(SortField::Age),
            "team_name" | "teamname" | "team" => Ok(SortField::TeamName),
            other => Err(PageRequestError::UnknownSortField(other.to_string())),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortField::Id => "id",
            SortField::Username => "username",
            SortField::Age => "age",
            SortField::TeamName => "team_name",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(PageRequestError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// Placement of NULL values for nullable sort fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    /// Whatever the store does (SQLite sorts NULL as the smallest value).
    #[default]
    StoreDefault,
    First,
    Last,
}

/// One `(field, direction)` sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
    #[serde(default)]
    pub nulls: NullOrdering,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
            nulls: NullOrdering::StoreDefault,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
            nulls: NullOrdering::StoreDefault,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }
}

/// Parses `"field"` or `"field,direction"`, e.g. `"age,desc"`.
impl FromStr for SortOrder {
    type Err = PageRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Asc),
        };
        Ok(Self {
            field: field.parse()?,
            direction,
            nulls: NullOrdering::StoreDefault,
        })
    }
}

/// Window of results to load plus its ordering.
///
/// Offsets and limits are signed so malformed input from callers can be
/// represented and rejected by [`PageRequest::validate`] instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
    #[serde(default)]
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            sort: Vec::new(),
        }
    }

    /// Builds a request for a 1-based page number; page `0` is treated as page `1`.
    ///
    /// Fails when the resulting row offset does not fit in an `i64`.
    pub fn of_page(page: usize, per_page: usize) -> Result<Self, PageRequestError> {
        let out_of_range = || PageRequestError::PageOutOfRange { page, per_page };
        let index = i64::try_from(page.max(1) - 1).map_err(|_| out_of_range())?;
        let limit = i64::try_from(per_page).map_err(|_| out_of_range())?;
        let offset = index.checked_mul(limit).ok_or_else(out_of_range)?;
        Ok(Self::new(offset, limit))
    }

    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort.push(SortOrder {
            field,
            direction,
            nulls: NullOrdering::StoreDefault,
        });
        self
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    pub fn validate(&self) -> Result<(), PageRequestError> {
        if self.limit <= 0 {
            return Err(PageRequestError::NonPositiveLimit(self.limit));
        }
        if self.offset < 0 {
            return Err(PageRequestError::NegativeOffset(self.offset));
        }
        Ok(())
    }
}

/// One page of results and, when known, the total number of matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub total_count: Option<u64>,
    pub offset: i64,
    pub limit: i64,
}

impl<T> PageResult<T> {
    pub fn new(content: Vec<T>, total_count: Option<u64>, request: &PageRequest) -> Self {
        Self {
            content,
            total_count,
            offset: request.offset,
            limit: request.limit,
        }
    }

    /// 1-based page number this result represents.
    pub fn page_number(&self) -> usize {
        if self.limit <= 0 {
            return 1;
        }
        (self.offset / self.limit) as usize + 1
    }

    pub fn total_pages(&self) -> Option<usize> {
        let total = self.total_count?;
        if self.limit <= 0 {
            return Some(0);
        }
        Some((total as usize).div_ceil(self.limit as usize))
    }

    pub fn has_next(&self) -> bool {
        match self.total_count {
            Some(total) => (self.offset as u64).saturating_add(self.content.len() as u64) < total,
            None => self.content.len() as i64 == self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_windows() {
        assert_eq!(
            PageRequest::new(0, 0).validate(),
            Err(PageRequestError::NonPositiveLimit(0))
        );
        assert_eq!(
            PageRequest::new(-1, 5).validate(),
            Err(PageRequestError::NegativeOffset(-1))
        );
        assert!(PageRequest::new(0, 1).validate().is_ok());
    }

    #[test]
    fn of_page_treats_zero_as_first_page() {
        assert_eq!(PageRequest::of_page(0, 20).unwrap().offset, 0);
        assert_eq!(PageRequest::of_page(3, 20).unwrap().offset, 40);
        assert_eq!(PageRequest::of_page(3, 20).unwrap().limit, 20);
    }

    #[test]
    fn of_page_rejects_offsets_beyond_i64() {
        assert_eq!(
            PageRequest::of_page(4_611_686_018_427_387_904, 10),
            Err(PageRequestError::PageOutOfRange {
                page: 4_611_686_018_427_387_904,
                per_page: 10,
            })
        );
        assert!(PageRequest::of_page(usize::MAX, 1).is_err());
        assert_eq!(
            PageRequest::of_page(i64::MAX as usize, 1).unwrap().offset,
            i64::MAX - 1
        );
    }

    #[test]
    fn sort_order_parses_field_and_direction() {
        let order: SortOrder = "age,desc".parse().unwrap();
        assert_eq!(order, SortOrder::desc(SortField::Age));
        let order: SortOrder = "team_name".parse().unwrap();
        assert_eq!(order, SortOrder::asc(SortField::TeamName));
        assert!(matches!(
            "height,asc".parse::<SortOrder>(),
            Err(PageRequestError::UnknownSortField(_))
        ));
        assert!(matches!(
            "age,sideways".parse::<SortOrder>(),
            Err(PageRequestError::UnknownSortDirection(_))
        ));
    }

    #[test]
    fn page_result_math() {
        let request = PageRequest::new(2, 2);
        let page = PageResult::new(vec![20, 10], Some(4), &request);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_pages(), Some(2));
        assert!(!page.has_next());

        let first = PageResult::new(vec![40, 30], Some(4), &PageRequest::new(0, 2));
        assert!(first.has_next());
    }
}
