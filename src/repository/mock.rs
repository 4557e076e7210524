//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, MemberTeamRow, NewMember};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{MemberId, TeamId};
use crate::repository::errors::RepositoryResult;
use crate::repository::plan::QueryPlan;
use crate::repository::{
    MemberReader, MemberSearchReader, MemberWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl MemberSearchReader for Repository {
        fn fetch_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<Vec<MemberTeamRow>>;
        fn count_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<u64>;
    }

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn count_members(&self) -> RepositoryResult<u64>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    }

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }
}
