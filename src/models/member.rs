//! Diesel models representing members.

use diesel::prelude::*;

use crate::domain::member::{Member as DomainMember, NewMember as DomainNewMember};
use crate::domain::types::{MemberId, TeamId, TypeConstraintError};
use crate::models::team::Team;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::members)]
#[diesel(belongs_to(Team, foreign_key = team_id))]
/// Diesel model for [`crate::domain::member::Member`].
pub struct Member {
    pub id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
/// Insertable form of [`Member`].
pub struct NewMember<'a> {
    pub username: Option<&'a str>,
    pub age: i32,
    pub team_id: Option<i32>,
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::try_from(member.id)?,
            username: member.username,
            age: member.age,
            team_id: member.team_id.map(TeamId::try_from).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            username: member.username.as_ref().map(|u| u.as_str()),
            age: member.age.get(),
            team_id: member.team_id.map(TeamId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Age, Username};

    #[test]
    fn from_db_maps_optional_team() {
        let member = DomainMember::try_from(Member {
            id: 1,
            username: None,
            age: 100,
            team_id: None,
        })
        .unwrap();
        assert_eq!(member.team_id, None);
        assert_eq!(member.username, None);

        let member = DomainMember::try_from(Member {
            id: 2,
            username: Some("member1".into()),
            age: 10,
            team_id: Some(5),
        })
        .unwrap();
        assert_eq!(member.team_id.map(TeamId::get), Some(5));
    }

    #[test]
    fn from_db_rejects_invalid_team_reference() {
        let result = DomainMember::try_from(Member {
            id: 2,
            username: None,
            age: 10,
            team_id: Some(0),
        });
        assert_eq!(result, Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewMember::new(
            Some(Username::new("member1").unwrap()),
            Age::new(10).unwrap(),
            Some(TeamId::new(1).unwrap()),
        );
        let new: NewMember = (&domain).into();
        assert_eq!(new.username, Some("member1"));
        assert_eq!(new.age, 10);
        assert_eq!(new.team_id, Some(1));
    }
}
