//! Team entity - a group of users competing together

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Snowflake,
    pub name: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            avatar_path: None,
            created_at: Utc::now(),
        }
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.avatar_path
            .as_ref()
            .map(|name| format!("/uploads/teams/{name}"))
    }
}
