//! Reaction entity - one user's reaction of one kind on a post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// The fixed set of reactions a post can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Celebrate,
    Idea,
    Fire,
    Applause,
}

impl ReactionType {
    pub const ALL: [ReactionType; 6] = [
        Self::Like,
        Self::Love,
        Self::Celebrate,
        Self::Idea,
        Self::Fire,
        Self::Applause,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Celebrate => "celebrate",
            Self::Idea => "idea",
            Self::Fire => "fire",
            Self::Applause => "applause",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidReactionType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> Self {
        Self {
            id,
            post_id,
            user_id,
            reaction_type,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated reaction count for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionCount {
    pub reaction_type: ReactionType,
    pub count: i64,
    pub user_reacted: bool,
}

impl ReactionCount {
    /// One entry per reaction type, zero-filled, in [`ReactionType::ALL`] order
    pub fn summarize(counts: &[(ReactionType, i64)], mine: &[ReactionType]) -> Vec<Self> {
        ReactionType::ALL
            .into_iter()
            .map(|reaction_type| ReactionCount {
                reaction_type,
                count: counts
                    .iter()
                    .filter(|(kind, _)| *kind == reaction_type)
                    .map(|(_, n)| *n)
                    .sum(),
                user_reacted: mine.contains(&reaction_type),
            })
            .collect()
    }
}
