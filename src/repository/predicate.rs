//! Translation of a [`SearchCondition`] into an immutable conjunction of
//! member predicates.

use crate::domain::condition::SearchCondition;
use crate::domain::member::MemberTeamRow;

/// Boolean condition over a single member or team attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    UsernameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
    TeamNameEq(String),
}

impl Predicate {
    /// Evaluates the predicate against an already loaded row.
    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        match self {
            Predicate::UsernameEq(name) => row.member.username.as_deref() == Some(name.as_str()),
            Predicate::AgeGoe(age) => row.member.age >= *age,
            Predicate::AgeLoe(age) => row.member.age <= *age,
            Predicate::TeamNameEq(name) => row
                .team
                .as_ref()
                .is_some_and(|team| team.name == *name),
        }
    }
}

/// Predicates combined with logical AND.
///
/// An empty conjunction is the always-true predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conjunction(Vec<Predicate>);

impl Conjunction {
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.0.iter()
    }

    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        self.0.iter().all(|predicate| predicate.matches(row))
    }
}

impl FromIterator<Predicate> for Conjunction {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds the conjunction of every active filter in `condition`.
///
/// Each filter contributes at most one predicate; inactive filters contribute
/// nothing. An inverted age range (`age_goe > age_loe`) is kept as is and
/// simply matches no member.
pub fn compose(condition: &SearchCondition) -> Conjunction {
    [
        condition
            .active_username()
            .map(|name| Predicate::UsernameEq(name.to_string())),
        condition.age_goe.map(Predicate::AgeGoe),
        condition.age_loe.map(Predicate::AgeLoe),
        condition
            .active_team_name()
            .map(|name| Predicate::TeamNameEq(name.to_string())),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::Member;
    use crate::domain::team::Team;
    use crate::domain::types::{MemberId, TeamId};

    fn row(username: Option<&str>, age: i32, team: Option<&str>) -> MemberTeamRow {
        let team = team.map(|name| Team {
            id: TeamId::new(1).unwrap(),
            name: name.to_string(),
        });
        MemberTeamRow {
            member: Member {
                id: MemberId::new(1).unwrap(),
                username: username.map(str::to_string),
                age,
                team_id: team.as_ref().map(|t| t.id),
            },
            team,
        }
    }

    #[test]
    fn empty_condition_composes_always_true() {
        let conjunction = compose(&SearchCondition::new());
        assert_eq!(conjunction, Conjunction::default());
        assert!(conjunction.matches(&row(None, 0, None)));
    }

    #[test]
    fn each_active_filter_emits_one_predicate() {
        let condition = SearchCondition::new()
            .username("member1")
            .age_goe(10)
            .age_loe(30)
            .team_name("teamA");
        let conjunction = compose(&condition);
        assert_eq!(
            conjunction.iter().cloned().collect::<Vec<_>>(),
            vec![
                Predicate::UsernameEq("member1".into()),
                Predicate::AgeGoe(10),
                Predicate::AgeLoe(30),
                Predicate::TeamNameEq("teamA".into()),
            ]
        );
    }

    #[test]
    fn blank_text_filters_are_skipped() {
        let conjunction = compose(&SearchCondition::new().username(" ").age_goe(25));
        assert_eq!(
            conjunction.iter().cloned().collect::<Vec<_>>(),
            vec![Predicate::AgeGoe(25)]
        );
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let conjunction = compose(&SearchCondition::new().age_goe(40).age_loe(10));
        for age in [0, 10, 25, 40, 100] {
            assert!(!conjunction.matches(&row(Some("m"), age, Some("teamA"))));
        }
    }

    #[test]
    fn team_filter_rejects_members_without_team() {
        let conjunction = compose(&SearchCondition::new().team_name("teamA"));
        assert!(conjunction.matches(&row(None, 10, Some("teamA"))));
        assert!(!conjunction.matches(&row(None, 10, Some("teamB"))));
        assert!(!conjunction.matches(&row(None, 10, None)));
    }
}
