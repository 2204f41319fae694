//! Post and media model -> entity

use campfire_core::{MediaType, Post, PostMedia, Snowflake};

use crate::models::{PostMediaModel, PostModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            team_id: Snowflake::new(model.team_id),
            description: model.description,
            is_global: model.is_global,
            is_hidden: model.is_hidden,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
        }
    }
}

impl From<PostMediaModel> for PostMedia {
    fn from(model: PostMediaModel) -> Self {
        PostMedia {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            media_type: model.media_type.parse().unwrap_or(MediaType::Image),
            file_path: model.file_path,
            display_order: model.display_order,
            created_at: model.created_at,
        }
    }
}
