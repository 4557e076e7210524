//! Repository traits and their Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::member::{Member, MemberTeamRow, NewMember};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{MemberId, TeamId};
use crate::repository::errors::RepositoryResult;
use crate::repository::plan::QueryPlan;

pub mod errors;
pub mod member;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod plan;
pub mod predicate;
pub mod team;

/// Diesel-backed repository sharing one connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checks a connection out of the pool; it returns to the pool on drop.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Store capability consumed by the search services.
///
/// Both methods receive a [`QueryPlan`]; implementations must honour its
/// predicates and join, and for [`MemberSearchReader::fetch_member_rows`]
/// also its sort and window.
pub trait MemberSearchReader {
    fn fetch_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<Vec<MemberTeamRow>>;
    fn count_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<u64>;
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    fn count_members(&self) -> RepositoryResult<u64>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}
