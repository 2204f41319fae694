//! Entity to DTO mappers
//!
//! Plain `From` conversions live here. Responses that need extra lookups
//! (post author, team name, reaction counts) are assembled by their services.

use campfire_core::entities::{
    Announcement, AuditLog, PostMedia, RegistrationCode, Report, SiteSettings, SocialLinks, Team,
    User, Vote,
};
use campfire_core::{Mention, MentionSource};
use chrono::{DateTime, Utc};

use super::responses::{
    AdminUserResponse, AnnouncementResponse, AuditLogResponse, CurrentUserResponse,
    MediaResponse, MentionResponse, RegistrationCodeResponse, ReportResponse,
    SiteSettingsResponse, SocialLinksResponse, TeamResponse, UserProfileResponse, UserSummary,
    VoteResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            profile_picture: user.profile_picture_url(),
        }
    }
}

impl From<&SocialLinks> for SocialLinksResponse {
    fn from(links: &SocialLinks) -> Self {
        Self {
            github_url: links.github_url.clone(),
            linkedin_url: links.linkedin_url.clone(),
            twitter_url: links.twitter_url.clone(),
            portfolio_url: links.portfolio_url.clone(),
        }
    }
}

impl CurrentUserResponse {
    pub fn new(user: &User, team: Option<&Team>) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            is_judge: user.is_judge,
            roles: user.roles().names(),
            team_id: user.team_id.map(|id| id.to_string()),
            team_name: team.map(|t| t.name.clone()),
            profile_picture: user.profile_picture_url(),
            theme: user.theme,
            social: SocialLinksResponse::from(&user.social),
            created_at: user.created_at,
        }
    }
}

impl UserProfileResponse {
    pub fn new(user: &User, team: Option<&Team>) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            is_judge: user.is_judge,
            team_id: user.team_id.map(|id| id.to_string()),
            team_name: team.map(|t| t.name.clone()),
            profile_picture: user.profile_picture_url(),
            social: SocialLinksResponse::from(&user.social),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            is_judge: user.is_judge,
            team_id: user.team_id.map(|id| id.to_string()),
            is_banned: user.is_banned,
            ban_reason: user.ban_reason.clone(),
            banned_until: user.banned_until,
            created_at: user.created_at,
        }
    }
}

impl MentionResponse {
    pub fn new(mention: &Mention, mentioner: Option<&User>, now: DateTime<Utc>) -> Self {
        let source_type = match mention.source {
            MentionSource::Post(_) => "post",
            MentionSource::Comment(_) => "comment",
        };
        Self {
            id: mention.id.to_string(),
            source_type,
            post_id: mention.source.post_id().map(|id| id.to_string()),
            comment_id: mention.source.comment_id().map(|id| id.to_string()),
            mentioner: mentioner.map(UserSummary::from),
            time_ago: campfire_common::time_ago(mention.created_at, now),
            created_at: mention.created_at,
        }
    }
}

// ============================================================================
// Team Mappers
// ============================================================================

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.clone(),
            avatar_url: team.avatar_url(),
            created_at: team.created_at,
        }
    }
}

// ============================================================================
// Content Mappers
// ============================================================================

impl From<&PostMedia> for MediaResponse {
    fn from(media: &PostMedia) -> Self {
        Self {
            id: media.id.to_string(),
            media_type: media.media_type,
            url: media.url(),
            display_order: media.display_order,
        }
    }
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            team_id: vote.team_id.to_string(),
            innovation: vote.scores.innovation,
            implementation: vote.scores.implementation,
            design: vote.scores.design,
            presentation: vote.scores.presentation,
            total_score: vote.total_score(),
            comments: vote.comments.clone(),
            updated_at: vote.updated_at,
        }
    }
}

impl From<&Announcement> for AnnouncementResponse {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            content: a.content.clone(),
            announcement_type: a.announcement_type,
            is_pinned: a.is_pinned,
            created_by_admin_id: a.created_by_admin_id.to_string(),
            created_at: a.created_at,
            expires_at: a.expires_at,
        }
    }
}

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.to_string(),
            content_type: report.target.content_type(),
            content_id: report.target.id().to_string(),
            reported_by_user_id: report.reported_by_user_id.to_string(),
            reason: report.reason,
            details: report.details.clone(),
            status: report.status,
            created_at: report.created_at,
            resolved_at: report.resolved_at,
            resolved_by_admin_id: report.resolved_by_admin_id.map(|id| id.to_string()),
        }
    }
}

impl From<AuditLog> for AuditLogResponse {
    fn from(entry: AuditLog) -> Self {
        Self {
            id: entry.id.to_string(),
            user_id: entry.user_id.map(|id| id.to_string()),
            action_type: entry.action_type,
            action_details: entry.action_details,
            ip_address: entry.ip_address,
            created_at: entry.created_at,
        }
    }
}

// ============================================================================
// Admin Mappers
// ============================================================================

impl From<&RegistrationCode> for RegistrationCodeResponse {
    fn from(code: &RegistrationCode) -> Self {
        Self {
            id: code.id.to_string(),
            code: code.code.clone(),
            is_used: code.is_used,
            used_by_user_id: code.used_by_user_id.map(|id| id.to_string()),
            created_at: code.created_at,
        }
    }
}

impl From<&SiteSettings> for SiteSettingsResponse {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            logo_url: settings
                .logo_path
                .as_ref()
                .map(|name| format!("/uploads/branding/{name}")),
            favicon_url: settings
                .favicon_path
                .as_ref()
                .map(|name| format!("/uploads/branding/{name}")),
            primary_color: settings.primary_color.clone(),
            secondary_color: settings.secondary_color.clone(),
            font_family: settings.font_family.clone(),
            custom_css: settings.custom_css.clone(),
            updated_at: settings.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campfire_core::{ReportReason, ReportTarget, Snowflake, VoteScores};

    #[test]
    fn test_current_user_includes_team_and_roles() {
        let mut user = User::new(Snowflake::new(1), "alice".to_string());
        user.is_judge = true;
        user.profile_picture = Some("a.png".to_string());
        let team = Team::new(Snowflake::new(9), "Rustaceans".to_string());
        user.team_id = Some(team.id);

        let resp = CurrentUserResponse::new(&user, Some(&team));
        assert_eq!(resp.team_name.as_deref(), Some("Rustaceans"));
        assert_eq!(resp.team_id.as_deref(), Some("9"));
        assert_eq!(resp.roles, vec!["judge"]);
        assert_eq!(resp.profile_picture.as_deref(), Some("/uploads/profiles/a.png"));
    }

    #[test]
    fn test_vote_response_total() {
        let vote = Vote::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            VoteScores::new(10, 10, 10, 10).unwrap(),
            None,
        );
        let resp = VoteResponse::from(&vote);
        assert!((resp.total_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(resp.team_id, "3");
    }

    #[test]
    fn test_report_response_target() {
        let report = Report::new(
            Snowflake::new(1),
            ReportTarget::Comment(Snowflake::new(44)),
            Snowflake::new(2),
            ReportReason::Spam,
            None,
        );
        let resp = ReportResponse::from(&report);
        assert_eq!(resp.content_type, "comment");
        assert_eq!(resp.content_id, "44");
    }

    #[test]
    fn test_settings_urls() {
        let settings = SiteSettings {
            logo_path: Some("logo.svg".to_string()),
            ..SiteSettings::default()
        };
        let resp = SiteSettingsResponse::from(&settings);
        assert_eq!(resp.logo_url.as_deref(), Some("/uploads/branding/logo.svg"));
        assert!(resp.favicon_url.is_none());
    }
}
