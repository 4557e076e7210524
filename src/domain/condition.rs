//! Optional member filters supplied by the caller for one search.

use serde::{Deserialize, Serialize};

/// Set of independent, optional member filters.
///
/// Every absent field means "no constraint on this dimension", so the default
/// value matches every member. Text filters holding only whitespace count as
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    pub username: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    pub team_name: Option<String>,
}

impl SearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn team_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = Some(name.into());
        self
    }

    /// Username filter if it carries any text.
    pub fn active_username(&self) -> Option<&str> {
        has_text(self.username.as_deref())
    }

    /// Team name filter if it carries any text.
    pub fn active_team_name(&self) -> Option<&str> {
        has_text(self.team_name.as_deref())
    }
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
