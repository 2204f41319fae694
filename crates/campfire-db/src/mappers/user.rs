//! User model -> entity

use campfire_core::{Snowflake, SocialLinks, User};

use super::opt_id;
use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            is_admin: model.is_admin,
            is_judge: model.is_judge,
            team_id: opt_id(model.team_id),
            profile_picture: model.profile_picture,
            theme: model.theme.parse().unwrap_or_default(),
            is_banned: model.is_banned,
            ban_reason: model.ban_reason,
            banned_until: model.banned_until,
            social: SocialLinks {
                github_url: model.github_url,
                linkedin_url: model.linkedin_url,
                twitter_url: model.twitter_url,
                portfolio_url: model.portfolio_url,
            },
            created_at: model.created_at,
        }
    }
}
