//! Member search operations: plain listing, always-counted pages and pages
//! whose count query is skipped when the content already reveals the total.

use crate::domain::condition::SearchCondition;
use crate::domain::member::MemberTeamRow;
use crate::domain::page::{PageRequest, PageResult};
use crate::dto::member::MemberTeamDto;
use crate::repository::MemberSearchReader;
use crate::repository::errors::RepositoryError;
use crate::repository::plan::{JoinRequirement, QueryPlan};
use crate::services::{SearchError, ServiceResult};

/// Execution switches for a [`SearchExecutor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Issue the content and count queries of an always-counted page in
    /// parallel, each on its own pooled connection.
    pub concurrent_count: bool,
    /// Load and project team fields. When off, members are returned with
    /// absent team fields and teams are joined only to filter or sort.
    pub projection_needs_team: bool,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            concurrent_count: false,
            projection_needs_team: true,
        }
    }
}

/// Decides whether a page needs a separate count query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountPolicy {
    Always,
    ElideOnShortPage,
}

impl CountPolicy {
    /// Returns the total when it follows from the loaded page alone.
    ///
    /// A page shorter than its limit is the last page, so the total is
    /// `offset + content_len`. An empty page past offset zero says nothing
    /// about where the results end and still needs the count query.
    pub fn total_from_page(self, offset: i64, limit: i64, content_len: usize) -> Option<u64> {
        match self {
            CountPolicy::Always => None,
            CountPolicy::ElideOnShortPage => {
                let content_len = i64::try_from(content_len).ok()?;
                if content_len >= limit || (content_len == 0 && offset > 0) {
                    return None;
                }
                u64::try_from(offset + content_len).ok()
            }
        }
    }
}

/// Checks that a row carries exactly the team data the plan's join promises.
fn verify_projection(row: &MemberTeamRow, join: JoinRequirement) -> ServiceResult<()> {
    let member_id = row.member.id;
    match (join, row.member.team_id, row.team.as_ref()) {
        (JoinRequirement::None, _, Some(team)) => Err(SearchError::InconsistentProjection(
            format!("member {member_id}: carries team {} but teams were not joined", team.id),
        )),
        (JoinRequirement::None, _, None) => Ok(()),
        (JoinRequirement::Inner, _, None) => Err(SearchError::InconsistentProjection(format!(
            "member {member_id}: inner join returned no team"
        ))),
        (_, Some(team_id), Some(team)) if team.id != team_id => {
            Err(SearchError::InconsistentProjection(format!(
                "member {member_id}: references team {team_id} but was joined with team {}",
                team.id
            )))
        }
        (_, Some(team_id), None) => Err(SearchError::InconsistentProjection(format!(
            "member {member_id}: team {team_id} missing from join"
        ))),
        (_, None, Some(team)) => Err(SearchError::InconsistentProjection(format!(
            "member {member_id}: has no team but was joined with team {}",
            team.id
        ))),
        _ => Ok(()),
    }
}

fn store_error(operation: &str) -> impl FnOnce(RepositoryError) -> SearchError + '_ {
    move |err| {
        log::error!("Failed to {operation}: {err}");
        SearchError::from(err)
    }
}

/// Runs member searches against one store with fixed options.
pub struct SearchExecutor<'a, R: ?Sized> {
    repo: &'a R,
    options: ExecutorOptions,
}

impl<'a, R> SearchExecutor<'a, R>
where
    R: MemberSearchReader + ?Sized,
{
    pub fn new(repo: &'a R) -> Self {
        Self::with_options(repo, ExecutorOptions::default())
    }

    pub fn with_options(repo: &'a R, options: ExecutorOptions) -> Self {
        Self { repo, options }
    }

    /// Returns every member matching `condition`, ordered by member id.
    pub fn search(&self, condition: &SearchCondition) -> ServiceResult<Vec<MemberTeamDto>> {
        let plan = self.plan(condition, None);
        let rows = self.fetch(&plan)?;
        self.project(rows, &plan)
    }

    /// Loads one page and always runs the count query.
    pub fn search_page_simple(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> ServiceResult<PageResult<MemberTeamDto>>
    where
        R: Sync,
    {
        if !self.options.concurrent_count {
            return self.search_page(condition, page, CountPolicy::Always);
        }

        page.validate()?;
        let plan = self.plan(condition, Some(page));
        let (rows, total) = self.fetch_and_count_concurrently(&plan)?;
        let content = self.project(rows, &plan)?;
        Ok(PageResult::new(content, Some(total), page))
    }

    /// Loads one page, running the count query only when the page is full or
    /// otherwise cannot reveal the total.
    pub fn search_page_complex(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> ServiceResult<PageResult<MemberTeamDto>> {
        self.search_page(condition, page, CountPolicy::ElideOnShortPage)
    }

    fn search_page(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
        policy: CountPolicy,
    ) -> ServiceResult<PageResult<MemberTeamDto>> {
        page.validate()?;

        let plan = self.plan(condition, Some(page));
        let rows = self.fetch(&plan)?;

        let total = match policy.total_from_page(page.offset, page.limit, rows.len()) {
            Some(total) => {
                log::debug!(
                    "Skipping count query: {} rows at offset {} with limit {}",
                    rows.len(),
                    page.offset,
                    page.limit
                );
                total
            }
            None => self.count(&plan.for_count())?,
        };

        let content = self.project(rows, &plan)?;
        Ok(PageResult::new(content, Some(total), page))
    }

    fn plan(&self, condition: &SearchCondition, page: Option<&PageRequest>) -> QueryPlan {
        QueryPlan::build(condition, page, self.options.projection_needs_team)
    }

    fn fetch(&self, plan: &QueryPlan) -> ServiceResult<Vec<MemberTeamRow>> {
        self.repo
            .fetch_member_rows(plan)
            .map_err(store_error("search members"))
    }

    fn count(&self, plan: &QueryPlan) -> ServiceResult<u64> {
        self.repo
            .count_member_rows(plan)
            .map_err(store_error("count members"))
    }

    fn fetch_and_count_concurrently(
        &self,
        plan: &QueryPlan,
    ) -> ServiceResult<(Vec<MemberTeamRow>, u64)>
    where
        R: Sync,
    {
        let count_plan = plan.for_count();
        std::thread::scope(|scope| {
            let counter = scope.spawn(|| self.count(&count_plan));
            let rows = self.fetch(plan);
            let total = counter.join().map_err(|_| {
                log::error!("Count query thread panicked");
                SearchError::StoreUnavailable(RepositoryError::Unexpected(
                    "count query thread panicked".into(),
                ))
            })?;
            Ok((rows?, total?))
        })
    }

    /// Verifies every row against the plan and flattens it. Team fields stay
    /// absent unless the projection asks for them.
    fn project(
        &self,
        rows: Vec<MemberTeamRow>,
        plan: &QueryPlan,
    ) -> ServiceResult<Vec<MemberTeamDto>> {
        rows.into_iter()
            .map(|row| {
                verify_projection(&row, plan.join)?;
                if self.options.projection_needs_team {
                    Ok(MemberTeamDto::from(row))
                } else {
                    Ok(MemberTeamDto::project(&row.member, None))
                }
            })
            .collect()
    }
}
