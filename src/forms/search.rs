//! Member search parameters parsed from the query string.

use serde::Deserialize;
use validator::Validate;

use crate::domain::condition::SearchCondition;
use crate::domain::page::{PageRequest, SortOrder};
use crate::forms::FormError;

/// Parameters shared by the member list and page endpoints.
///
/// `sort` holds one or more `field[,direction]` keys separated by `;`, for
/// example `age,desc;username`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MemberSearchParams {
    pub username: Option<String>,
    #[validate(range(min = 0))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0))]
    pub age_loe: Option<i32>,
    pub team_name: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort: Option<String>,
}

impl MemberSearchParams {
    /// Builds the search condition; blank text filters stay inactive.
    pub fn condition(&self) -> Result<SearchCondition, FormError> {
        self.validate()?;
        Ok(SearchCondition {
            username: self.username.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
            team_name: self.team_name.clone(),
        })
    }

    /// Builds the page request using `default_size` when no size is given.
    ///
    /// A size of zero is passed through so the search layer reports it as an
    /// invalid argument.
    pub fn page_request(
        &self,
        default_size: usize,
        max_size: usize,
    ) -> Result<PageRequest, FormError> {
        self.validate()?;

        let size = self.size.unwrap_or(default_size);
        if size > max_size {
            return Err(FormError::PageTooLarge {
                requested: size,
                max: max_size,
            });
        }

        let mut request =
            PageRequest::of_page(self.page.unwrap_or(1), size).map_err(FormError::InvalidPage)?;
        for key in self
            .sort
            .iter()
            .flat_map(|sort| sort.split(';'))
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            let order: SortOrder = key
                .parse()
                .map_err(|err| FormError::InvalidSort(format!("{err}")))?;
            request = request.with_sort(order);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::{SortDirection, SortField};

    #[test]
    fn builds_condition_and_page() {
        let params = MemberSearchParams {
            age_goe: Some(25),
            team_name: Some("teamB".into()),
            page: Some(2),
            size: Some(3),
            sort: Some("age,desc; username".into()),
            ..MemberSearchParams::default()
        };
        let condition = params.condition().unwrap();
        assert_eq!(condition.age_goe, Some(25));
        assert_eq!(condition.active_team_name(), Some("teamB"));

        let page = params.page_request(20, 100).unwrap();
        assert_eq!(page.offset, 3);
        assert_eq!(page.limit, 3);
        assert_eq!(
            page.sort,
            vec![
                SortOrder::desc(SortField::Age),
                SortOrder {
                    field: SortField::Username,
                    direction: SortDirection::Asc,
                    nulls: Default::default(),
                },
            ]
        );
    }

    #[test]
    fn defaults_page_size() {
        let page = MemberSearchParams::default().page_request(20, 100).unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 20);
        assert!(page.sort.is_empty());
    }

    #[test]
    fn rejects_page_zero_and_negative_age() {
        let params = MemberSearchParams {
            page: Some(0),
            ..MemberSearchParams::default()
        };
        assert!(matches!(
            params.page_request(20, 100),
            Err(FormError::Validation(_))
        ));

        let params = MemberSearchParams {
            age_goe: Some(-5),
            ..MemberSearchParams::default()
        };
        assert!(matches!(params.condition(), Err(FormError::Validation(_))));
    }

    #[test]
    fn rejects_oversized_pages_and_unknown_sorts() {
        let params = MemberSearchParams {
            size: Some(500),
            ..MemberSearchParams::default()
        };
        assert!(matches!(
            params.page_request(20, 100),
            Err(FormError::PageTooLarge { requested: 500, max: 100 })
        ));

        let params = MemberSearchParams {
            page: Some(usize::MAX),
            size: Some(10),
            ..MemberSearchParams::default()
        };
        assert!(matches!(
            params.page_request(20, 100),
            Err(FormError::InvalidPage(_))
        ));

        let params = MemberSearchParams {
            sort: Some("shoe_size".into()),
            ..MemberSearchParams::default()
        };
        assert!(matches!(
            params.page_request(20, 100),
            Err(FormError::InvalidSort(_))
        ));
    }
}
