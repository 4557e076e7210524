use serde::{Deserialize, Serialize};

use crate::domain::team::Team;
use crate::domain::types::{Age, MemberId, TeamId, Username};

/// Member record holding a non-owning reference to its team.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMember {
    pub username: Option<Username>,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Option<Username>, age: Age, team_id: Option<TeamId>) -> Self {
        Self {
            username,
            age,
            team_id,
        }
    }
}

/// One joined `(member, team)` row as returned by the store.
///
/// `team` is `None` when the member has no team, or when the query plan did
/// not join teams at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberTeamRow {
    pub member: Member,
    pub team: Option<Team>,
}
