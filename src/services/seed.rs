//! Demo roster used by the `seed_members` binary and by tests.

use crate::domain::member::{Member, NewMember};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{Age, TeamName, Username};
use crate::repository::errors::RepositoryError;
use crate::repository::{MemberWriter, TeamReader, TeamWriter};
use crate::services::{SearchError, ServiceResult};

/// Teams and `(username, age)` pairs of the demo roster.
pub const DEMO_ROSTER: [(&str, [(&str, i32); 2]); 2] = [
    ("teamA", [("member1", 10), ("member2", 20)]),
    ("teamB", [("member3", 30), ("member4", 40)]),
];

fn find_or_create_team<R>(repo: &R, name: &str) -> ServiceResult<Team>
where
    R: TeamReader + TeamWriter + ?Sized,
{
    if let Some(team) = repo.get_team_by_name(name)? {
        return Ok(team);
    }
    let name = TeamName::new(name).map_err(RepositoryError::from)?;
    Ok(repo.create_team(&NewTeam::new(name))?)
}

/// Inserts the demo roster, reusing teams that already exist by name.
pub fn seed_demo_roster<R>(repo: &R) -> ServiceResult<Vec<Member>>
where
    R: TeamReader + TeamWriter + MemberWriter + ?Sized,
{
    let mut created = Vec::new();
    for (team_name, members) in DEMO_ROSTER {
        let team = find_or_create_team(repo, team_name)?;
        for (username, age) in members {
            let new_member = NewMember::new(
                Some(Username::new(username).map_err(RepositoryError::from)?),
                Age::new(age).map_err(RepositoryError::from)?,
                Some(team.id),
            );
            let member = repo.create_member(&new_member).map_err(|err| {
                log::error!("Failed to create member {username}: {err}");
                SearchError::from(err)
            })?;
            created.push(member);
        }
        log::info!("Seeded team {team_name} with {} members", members.len());
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::types::{MemberId, TeamId};
    use crate::repository::errors::RepositoryResult;

    #[derive(Default)]
    struct MockRepo {
        teams: RefCell<Vec<Team>>,
        members: RefCell<Vec<Member>>,
    }

    impl TeamReader for MockRepo {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
            Ok(self.teams.borrow().iter().find(|t| t.id == id).cloned())
        }

        fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
            Ok(self.teams.borrow().iter().find(|t| t.name == name).cloned())
        }

        fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
            Ok(self.teams.borrow().clone())
        }
    }

    impl TeamWriter for MockRepo {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
            let mut teams = self.teams.borrow_mut();
            let team = Team {
                id: TeamId::new(teams.len() as i32 + 1)?,
                name: new_team.name.to_string(),
            };
            teams.push(team.clone());
            Ok(team)
        }
    }

    impl MemberWriter for MockRepo {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
            let mut members = self.members.borrow_mut();
            let member = Member {
                id: MemberId::new(members.len() as i32 + 1)?,
                username: new_member.username.as_ref().map(|u| u.to_string()),
                age: new_member.age.get(),
                team_id: new_member.team_id,
            };
            members.push(member.clone());
            Ok(member)
        }
    }

    #[test]
    fn seeds_two_teams_and_four_members() {
        let repo = MockRepo::default();
        let members = seed_demo_roster(&repo).unwrap();
        assert_eq!(members.len(), 4);
        assert_eq!(repo.teams.borrow().len(), 2);
        let ages: Vec<i32> = members.iter().map(|m| m.age).collect();
        assert_eq!(ages, vec![10, 20, 30, 40]);
        assert_eq!(members[0].team_id, members[1].team_id);
        assert_ne!(members[1].team_id, members[2].team_id);
    }

    #[test]
    fn reseeding_reuses_existing_teams() {
        let repo = MockRepo::default();
        seed_demo_roster(&repo).unwrap();
        seed_demo_roster(&repo).unwrap();
        assert_eq!(repo.teams.borrow().len(), 2);
        assert_eq!(repo.members.borrow().len(), 8);
    }
}
