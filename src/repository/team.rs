//! Repository implementation for teams.

use diesel::prelude::*;

use crate::domain::team::{NewTeam, Team};
use crate::domain::types::TeamId;
use crate::models::team::{NewTeam as DbNewTeam, Team as DbTeam};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, TeamReader, TeamWriter};
use crate::schema::teams;

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        let mut conn = self.conn()?;

        let db_new_team: DbNewTeam = new_team.into();

        let db_team = diesel::insert_into(teams::table)
            .values(&db_new_team)
            .get_result::<DbTeam>(&mut conn)?;

        Ok(Team::try_from(db_team)?)
    }
}

impl TeamReader for DieselRepository {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
        let mut conn = self.conn()?;
        let db_team = teams::table
            .find(id.get())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        match db_team {
            Some(db_team) => Ok(Some(Team::try_from(db_team)?)),
            None => Ok(None),
        }
    }

    fn get_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let mut conn = self.conn()?;
        let db_team = teams::table
            .filter(teams::name.eq(name))
            .order(teams::id.asc())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        match db_team {
            Some(db_team) => Ok(Some(Team::try_from(db_team)?)),
            None => Ok(None),
        }
    }

    fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        let mut conn = self.conn()?;
        let db_teams = teams::table
            .order(teams::name.asc())
            .load::<DbTeam>(&mut conn)?;

        let teams = db_teams
            .into_iter()
            .map(Team::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }
}
