//! Mention entity - links authored text to the user it `@`-references

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Where the mention was written. Exactly one source per mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MentionSource {
    Post(Snowflake),
    Comment(Snowflake),
}

impl MentionSource {
    pub fn post_id(&self) -> Option<Snowflake> {
        match self {
            Self::Post(id) => Some(*id),
            Self::Comment(_) => None,
        }
    }

    pub fn comment_id(&self) -> Option<Snowflake> {
        match self {
            Self::Comment(id) => Some(*id),
            Self::Post(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub id: Snowflake,
    pub source: MentionSource,
    pub mentioned_user_id: Snowflake,
    pub mentioner_user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Mention {
    pub fn new(
        id: Snowflake,
        source: MentionSource,
        mentioned_user_id: Snowflake,
        mentioner_user_id: Snowflake,
    ) -> Self {
        Self {
            id,
            source,
            mentioned_user_id,
            mentioner_user_id,
            created_at: Utc::now(),
        }
    }
}
