//! Join requirements and the full query plan shared by content and count
//! queries.

use crate::domain::condition::SearchCondition;
use crate::domain::page::{PageRequest, SortField, SortOrder};
use crate::repository::predicate::{Conjunction, compose};

/// How the `teams` table takes part in a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinRequirement {
    /// Members only.
    None,
    /// Members without a matching team are dropped.
    Inner,
    /// Members without a team are kept with absent team columns.
    LeftOuter,
}

/// Declarative decision on joining teams, computed once per query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinPlan {
    pub requirement: JoinRequirement,
}

impl JoinPlan {
    /// Resolves the join for a condition and projection shape.
    ///
    /// An active team name filter forces an inner join; otherwise team fields
    /// needed for display are loaded through a left outer join so members
    /// without a team still appear.
    pub fn resolve(condition: &SearchCondition, projection_needs_team: bool) -> Self {
        let requirement = if condition.active_team_name().is_some() {
            JoinRequirement::Inner
        } else if projection_needs_team {
            JoinRequirement::LeftOuter
        } else {
            JoinRequirement::None
        };
        Self { requirement }
    }
}

/// Offset and limit applied to the content query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// Everything a store needs to run one member query.
///
/// Built from a single condition snapshot; the count query for a page is
/// derived from the same plan through [`QueryPlan::for_count`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryPlan {
    pub predicates: Conjunction,
    pub join: JoinRequirement,
    pub sort: Vec<SortOrder>,
    pub window: Option<Window>,
}

impl QueryPlan {
    /// Plans a query for `condition`, optionally restricted to one page.
    ///
    /// Ordering is the requested sort followed by member id ascending, unless
    /// the id is already part of the sort, so equal keys never reorder
    /// between pages.
    pub fn build(
        condition: &SearchCondition,
        page: Option<&PageRequest>,
        projection_needs_team: bool,
    ) -> Self {
        let mut sort = page.map(|p| p.sort.clone()).unwrap_or_default();
        if !sort.iter().any(|order| order.field == SortField::Id) {
            sort.push(SortOrder::asc(SortField::Id));
        }

        let sort_needs_team = sort.iter().any(|order| order.field.references_team());
        let join = JoinPlan::resolve(condition, projection_needs_team || sort_needs_team);

        Self {
            predicates: compose(condition),
            join: join.requirement,
            sort,
            window: page.map(|p| Window {
                offset: p.offset,
                limit: p.limit,
            }),
        }
    }

    /// Derives the aggregate count query for this plan.
    ///
    /// Sorting and the page window are dropped. A left outer join cannot
    /// change the number of members (each member has at most one team), so it
    /// is dropped as well; an inner join stays because it filters.
    pub fn for_count(&self) -> Self {
        let join = match self.join {
            JoinRequirement::LeftOuter => JoinRequirement::None,
            other => other,
        };
        Self {
            predicates: self.predicates.clone(),
            join,
            sort: Vec::new(),
            window: None,
        }
    }
}
