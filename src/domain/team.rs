use serde::{Deserialize, Serialize};

use crate::domain::types::{TeamId, TeamName};

/// Team referenced by zero or more members.
///
/// The name is kept as stored; an empty name is a legal value and is distinct
/// from a member having no team at all.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: TeamName,
}

impl NewTeam {
    #[must_use]
    pub fn new(name: TeamName) -> Self {
        Self { name }
    }
}
