//! Flattened member/team view returned by searches.

use serde::Serialize;

use crate::domain::member::{Member, MemberTeamRow};
use crate::domain::team::Team;

/// Read-only projection of one `(member, team)` pair.
///
/// Team fields are `None` when the member has no team; an empty team name is
/// reported as `Some("")`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberTeamDto {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    pub fn project(member: &Member, team: Option<&Team>) -> Self {
        Self {
            member_id: member.id.get(),
            username: member.username.clone(),
            age: member.age,
            team_id: team.map(|t| t.id.get()),
            team_name: team.map(|t| t.name.clone()),
        }
    }
}

impl From<MemberTeamRow> for MemberTeamDto {
    fn from(row: MemberTeamRow) -> Self {
        Self::project(&row.member, row.team.as_ref())
    }
}
