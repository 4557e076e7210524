//! Repository implementation for members and the member search queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::member::{Member, MemberTeamRow, NewMember};
use crate::domain::page::{NullOrdering, SortDirection, SortField};
use crate::domain::team::Team;
use crate::domain::types::MemberId;
use crate::models::member::{Member as DbMember, NewMember as DbNewMember};
use crate::models::team::Team as DbTeam;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::plan::{JoinRequirement, QueryPlan};
use crate::repository::predicate::Predicate;
use crate::repository::{DieselRepository, MemberReader, MemberSearchReader, MemberWriter};
use crate::schema::{members, teams};

fn unjoined_team_reference() -> RepositoryError {
    RepositoryError::Unexpected("query references teams but the plan does not join them".into())
}

/// Applies every plan predicate to a boxed query.
///
/// `joined` accepts team predicates; `unjoined` rejects them since the
/// `teams` table is not part of the query source.
macro_rules! filter_members {
    ($query:expr, $plan:expr, joined) => {{
        let mut query = $query;
        for predicate in $plan.predicates.iter() {
            query = match predicate {
                Predicate::UsernameEq(name) => query.filter(members::username.eq(name.clone())),
                Predicate::AgeGoe(age) => query.filter(members::age.ge(*age)),
                Predicate::AgeLoe(age) => query.filter(members::age.le(*age)),
                Predicate::TeamNameEq(name) => query.filter(teams::name.eq(name.clone())),
            };
        }
        query
    }};
    ($query:expr, $plan:expr, unjoined) => {{
        let mut query = $query;
        for predicate in $plan.predicates.iter() {
            query = match predicate {
                Predicate::UsernameEq(name) => query.filter(members::username.eq(name.clone())),
                Predicate::AgeGoe(age) => query.filter(members::age.ge(*age)),
                Predicate::AgeLoe(age) => query.filter(members::age.le(*age)),
                Predicate::TeamNameEq(_) => return Err(unjoined_team_reference()),
            };
        }
        query
    }};
}

/// Orders by one column honouring direction and NULL placement.
///
/// NULL placement is expressed as a leading `column IS NULL` term, which
/// SQLite evaluates the same way on every version.
macro_rules! order_by_column {
    ($query:expr, $column:expr, $order:expr) => {{
        let query = match $order.nulls {
            NullOrdering::First => $query.then_order_by($column.is_null().desc()),
            NullOrdering::Last => $query.then_order_by($column.is_null().asc()),
            NullOrdering::StoreDefault => $query,
        };
        match $order.direction {
            SortDirection::Asc => query.then_order_by($column.asc()),
            SortDirection::Desc => query.then_order_by($column.desc()),
        }
    }};
}

macro_rules! order_members {
    ($query:expr, $plan:expr, joined) => {{
        let mut query = $query;
        for order in &$plan.sort {
            query = match order.field {
                SortField::Id => order_by_column!(query, members::id, order),
                SortField::Username => order_by_column!(query, members::username, order),
                SortField::Age => order_by_column!(query, members::age, order),
                SortField::TeamName => order_by_column!(query, teams::name, order),
            };
        }
        query
    }};
    ($query:expr, $plan:expr, unjoined) => {{
        let mut query = $query;
        for order in &$plan.sort {
            query = match order.field {
                SortField::Id => order_by_column!(query, members::id, order),
                SortField::Username => order_by_column!(query, members::username, order),
                SortField::Age => order_by_column!(query, members::age, order),
                SortField::TeamName => return Err(unjoined_team_reference()),
            };
        }
        query
    }};
}

macro_rules! window {
    ($query:expr, $plan:expr) => {{
        let query = $query;
        match $plan.window {
            Some(window) => query.offset(window.offset).limit(window.limit),
            None => query,
        }
    }};
}

fn into_row(member: DbMember, team: Option<DbTeam>) -> RepositoryResult<MemberTeamRow> {
    Ok(MemberTeamRow {
        member: Member::try_from(member)?,
        team: team.map(Team::try_from).transpose()?,
    })
}

impl MemberSearchReader for DieselRepository {
    fn fetch_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<Vec<MemberTeamRow>> {
        log::debug!("Fetching member rows for plan {plan:?}");

        let mut conn = self.conn()?;

        let rows: Vec<(DbMember, Option<DbTeam>)> = match plan.join {
            JoinRequirement::None => {
                let query = members::table
                    .select(members::all_columns)
                    .into_boxed::<Sqlite>();
                let query = filter_members!(query, plan, unjoined);
                let query = order_members!(query, plan, unjoined);
                window!(query, plan)
                    .load::<DbMember>(&mut conn)?
                    .into_iter()
                    .map(|member| (member, None))
                    .collect()
            }
            JoinRequirement::Inner => {
                let query = members::table
                    .inner_join(teams::table)
                    .select((members::all_columns, teams::all_columns.nullable()))
                    .into_boxed::<Sqlite>();
                let query = filter_members!(query, plan, joined);
                let query = order_members!(query, plan, joined);
                window!(query, plan).load::<(DbMember, Option<DbTeam>)>(&mut conn)?
            }
            JoinRequirement::LeftOuter => {
                let query = members::table
                    .left_join(teams::table)
                    .select((members::all_columns, teams::all_columns.nullable()))
                    .into_boxed::<Sqlite>();
                let query = filter_members!(query, plan, joined);
                let query = order_members!(query, plan, joined);
                window!(query, plan).load::<(DbMember, Option<DbTeam>)>(&mut conn)?
            }
        };

        rows.into_iter()
            .map(|(member, team)| into_row(member, team))
            .collect()
    }

    fn count_member_rows(&self, plan: &QueryPlan) -> RepositoryResult<u64> {
        log::debug!("Counting member rows for plan {plan:?}");

        let mut conn = self.conn()?;

        let total: i64 = match plan.join {
            JoinRequirement::None => {
                let query = members::table.into_boxed::<Sqlite>();
                filter_members!(query, plan, unjoined)
                    .count()
                    .get_result(&mut conn)?
            }
            JoinRequirement::Inner => {
                let query = members::table.inner_join(teams::table).into_boxed::<Sqlite>();
                filter_members!(query, plan, joined)
                    .count()
                    .get_result(&mut conn)?
            }
            JoinRequirement::LeftOuter => {
                let query = members::table.left_join(teams::table).into_boxed::<Sqlite>();
                filter_members!(query, plan, joined)
                    .count()
                    .get_result(&mut conn)?
            }
        };

        u64::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count {total}")))
    }
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?;

        match db_member {
            Some(db_member) => Ok(Some(Member::try_from(db_member)?)),
            None => Ok(None),
        }
    }

    fn count_members(&self) -> RepositoryResult<u64> {
        let mut conn = self.conn()?;
        let total: i64 = members::table.count().get_result(&mut conn)?;
        u64::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count {total}")))
    }
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        let mut conn = self.conn()?;

        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .get_result::<DbMember>(&mut conn)?;

        Ok(Member::try_from(db_member)?)
    }
}
