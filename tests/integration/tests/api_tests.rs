//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_with_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let code = server.generate_code(&admin.access_token).await.unwrap();

    let request = RegisterRequest::unique(&code);
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.user.is_admin);
    assert!(auth.user.team_id.is_none());
    assert_eq!(auth.user.theme, "light");
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_code_is_single_use() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let code = server.generate_code(&admin.access_token).await.unwrap();

    let first = server
        .post("/auth/register", &RegisterRequest::unique(&code))
        .await
        .unwrap();
    assert_status(first, StatusCode::CREATED).await.unwrap();

    let second = server
        .post("/auth/register", &RegisterRequest::unique(&code))
        .await
        .unwrap();
    let error = assert_error(second, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error, "INVALID_REGISTRATION_CODE");
}

#[tokio::test]
async fn test_register_rejects_malformed_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/auth/register", &RegisterRequest::unique("12ab"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (existing, _) = server.register_member(&admin.access_token).await.unwrap();

    let code = server.generate_code(&admin.access_token).await.unwrap();
    let request = RegisterRequest {
        registration_code: code,
        username: existing.username,
        password: TEST_PASSWORD.to_string(),
    };
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        username: unique_username("ghost"),
        password: "wrong-password".to_string(),
    };

    let response = server.post("/auth/login", &request).await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth) = server.register_member(&admin.access_token).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/auth/refresh", &request).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // The old refresh token belongs to a rotated session
    let response = server.post("/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth) = server.register_member(&admin.access_token).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post("/auth/logout", &request).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.post("/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth, team) = server.member_with_team(&admin.access_token).await.unwrap();

    let response = server
        .get_auth("/users/@me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.team_id.as_deref(), Some(team.id.as_str()));
    assert_eq!(me.team_name.as_deref(), Some(team.name.as_str()));
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_theme_and_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (request, auth) = server.register_member(&admin.access_token).await.unwrap();

    let response = server
        .put_auth("/users/@me/theme", &auth.access_token, &json!({ "theme": "dark" }))
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.theme, "dark");

    let response = server
        .get_auth(
            &format!("/users/search?q={}", request.username),
            &auth.access_token,
        )
        .await
        .unwrap();
    let found: Vec<UserSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(found.iter().any(|u| u.username == request.username));
}

#[tokio::test]
async fn test_upload_profile_picture() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth) = server.register_member(&admin.access_token).await.unwrap();

    let response = server
        .upload_auth("/users/@me/avatar", &auth.access_token, "me.png", vec![137, 80, 78, 71])
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    let picture = me.profile_picture.expect("picture set");

    let response = server.get_raw(&picture).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_upload_rejects_unknown_extension() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth) = server.register_member(&admin.access_token).await.unwrap();

    let response = server
        .upload_auth("/users/@me/avatar", &auth.access_token, "run.exe", vec![1, 2, 3])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Timeline Tests
// ============================================================================

#[tokio::test]
async fn test_post_requires_team() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, auth) = server.register_member(&admin.access_token).await.unwrap();

    let post = CreatePostRequest {
        description: "No team yet".to_string(),
        is_global: false,
    };
    let response = server
        .post_auth("/posts", &auth.access_token, &post)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error, "NO_TEAM_ASSIGNED");
}

#[tokio::test]
async fn test_team_and_global_timelines() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, alice, _) = server.member_with_team(&admin.access_token).await.unwrap();
    let (_, bob, _) = server.member_with_team(&admin.access_token).await.unwrap();

    let team_only = CreatePostRequest {
        description: "Team standup notes".to_string(),
        is_global: false,
    };
    let response = server
        .post_auth("/posts", &alice.access_token, &team_only)
        .await
        .unwrap();
    let team_post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(team_post.can_delete);

    let global = CreatePostRequest {
        description: "Demo at **noon**".to_string(),
        is_global: true,
    };
    let response = server
        .post_auth("/posts", &alice.access_token, &global)
        .await
        .unwrap();
    let global_post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(global_post.content_html.contains("<strong>noon</strong>"));

    // Bob's team timeline never shows Alice's team post
    let response = server
        .get_auth("/timeline/team", &bob.access_token)
        .await
        .unwrap();
    let page: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().all(|p| p.id != team_post.id));

    let response = server
        .get_auth("/timeline/global?limit=50", &bob.access_token)
        .await
        .unwrap();
    let page: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.iter().any(|p| p.id == global_post.id));
    assert!(page.data.iter().all(|p| p.id != team_post.id));
}

#[tokio::test]
async fn test_timeline_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, member, _) = server.member_with_team(&admin.access_token).await.unwrap();

    for i in 0..3 {
        let post = CreatePostRequest {
            description: format!("Update {i}"),
            is_global: false,
        };
        let response = server
            .post_auth("/posts", &member.access_token, &post)
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth("/timeline/team?limit=2", &member.access_token)
        .await
        .unwrap();
    let first: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.data.len(), 2);
    assert!(first.pagination.has_more);
    assert_eq!(first.data[0].description, "Update 2");

    let cursor = first.pagination.next_before.expect("cursor");
    let response = server
        .get_auth(
            &format!("/timeline/team?limit=2&before={cursor}"),
            &member.access_token,
        )
        .await
        .unwrap();
    let second: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.data.len(), 1);
    assert!(!second.pagination.has_more);
    assert_eq!(second.data[0].description, "Update 0");
}

#[tokio::test]
async fn test_only_author_or_admin_deletes_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, alice, _) = server.member_with_team(&admin.access_token).await.unwrap();
    let (_, bob, _) = server.member_with_team(&admin.access_token).await.unwrap();

    let post = CreatePostRequest {
        description: "Mine".to_string(),
        is_global: true,
    };
    let response = server
        .post_auth("/posts", &alice.access_token, &post)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/posts/{}", post.id), &bob.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/posts/{}", post.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &alice.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction, Comment and Mention Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, member, _) = server.member_with_team(&admin.access_token).await.unwrap();

    let post = CreatePostRequest {
        description: "React to me".to_string(),
        is_global: false,
    };
    let response = server
        .post_auth("/posts", &member.access_token, &post)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.reactions["like"]["count"], 0);

    let path = format!("/posts/{}/reactions", post.id);
    let body = json!({ "reaction_type": "fire" });

    let response = server
        .post_auth(&path, &member.access_token, &body)
        .await
        .unwrap();
    let summary: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary["fire"]["count"], 1);
    assert_eq!(summary["fire"]["user_reacted"], true);

    let response = server
        .post_auth(&path, &member.access_token, &body)
        .await
        .unwrap();
    let summary: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary["fire"]["count"], 0);
    assert_eq!(summary["fire"]["user_reacted"], false);
}

#[tokio::test]
async fn test_comment_mentions_reach_inbox() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, alice, _) = server.member_with_team(&admin.access_token).await.unwrap();
    let (bob_request, bob) = server.register_member(&admin.access_token).await.unwrap();

    let post = CreatePostRequest {
        description: "Anyone want to pair?".to_string(),
        is_global: true,
    };
    let response = server
        .post_auth("/posts", &alice.access_token, &post)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let content = format!("@{} and @nobody_here_at_all, thoughts?", bob_request.username);
    let response = server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &alice.access_token,
            &json!({ "content": content }),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.post_id, post.id);
    assert!(comment.content_html.contains("mention"));

    let response = server
        .get_auth("/users/@me/mentions", &bob.access_token)
        .await
        .unwrap();
    let mentions: Vec<MentionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].source_type, "comment");
    assert_eq!(mentions[0].comment_id.as_deref(), Some(comment.id.as_str()));

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &bob.access_token)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.comment_count, 1);

    // Only the author or an admin removes a comment
    let response = server
        .delete_auth(&format!("/comments/{}", comment.id), &bob.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/comments/{}", comment.id), &alice.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Judging Tests
// ============================================================================

#[tokio::test]
async fn test_judge_votes_and_leaderboard() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, judge) = server.register_member(&admin.access_token).await.unwrap();
    let team = server.create_team(&admin.access_token).await.unwrap();

    let vote = json!({
        "innovation": 8,
        "implementation": 7,
        "design": 9,
        "presentation": 6,
        "comments": "Solid demo"
    });
    let vote_path = format!("/judging/teams/{}/vote", team.id);

    // Not a judge yet
    let response = server
        .put_auth(&vote_path, &judge.access_token, &vote)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(
            &format!("/admin/users/{}/roles", judge.user.id),
            &admin.access_token,
            &json!({ "is_admin": false, "is_judge": true }),
        )
        .await
        .unwrap();
    let updated: AdminUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.is_judge);

    let response = server
        .put_auth(&vote_path, &judge.access_token, &vote)
        .await
        .unwrap();
    let cast: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cast.team_id, team.id);
    assert!((cast.total_score - 75.0).abs() < 1e-9);

    // Voting again replaces the earlier vote
    let revote = json!({
        "innovation": 10,
        "implementation": 10,
        "design": 10,
        "presentation": 10
    });
    let response = server
        .put_auth(&vote_path, &judge.access_token, &revote)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/judging/votes", &judge.access_token)
        .await
        .unwrap();
    let votes: Vec<VoteResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(votes.len(), 1);

    let response = server
        .get_auth("/admin/leaderboard", &admin.access_token)
        .await
        .unwrap();
    let board: Vec<LeaderboardEntry> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = board
        .iter()
        .find(|e| e.team_id == team.id)
        .expect("team on leaderboard");
    assert_eq!(entry.vote_count, 1);
    assert!((entry.avg_total - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_vote_score_out_of_range() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, judge) = server.register_member(&admin.access_token).await.unwrap();
    let team = server.create_team(&admin.access_token).await.unwrap();

    let response = server
        .put_auth(
            &format!("/admin/users/{}/roles", judge.user.id),
            &admin.access_token,
            &json!({ "is_admin": false, "is_judge": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth(
            &format!("/judging/teams/{}/vote", team.id),
            &judge.access_token,
            &json!({ "innovation": 11, "implementation": 5, "design": 5, "presentation": 5 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Announcement Tests
// ============================================================================

#[tokio::test]
async fn test_announcement_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let title = format!("Lunch {}", unique_suffix());

    let response = server
        .post_auth(
            "/admin/announcements",
            &admin.access_token,
            &json!({
                "title": title,
                "content": "Pizza in the atrium",
                "announcement_type": "success",
                "is_pinned": true
            }),
        )
        .await
        .unwrap();
    let created: AnnouncementResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(created.is_pinned);

    let response = server.get("/announcements").await.unwrap();
    let active: Vec<AnnouncementResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.iter().any(|a| a.id == created.id));

    // Already expired announcements drop off the public list
    let response = server
        .patch_auth(
            &format!("/admin/announcements/{}", created.id),
            &admin.access_token,
            &json!({ "expires_at": "2000-01-01T00:00:00Z" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/announcements").await.unwrap();
    let active: Vec<AnnouncementResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.iter().all(|a| a.id != created.id));

    let response = server
        .delete_auth(
            &format!("/admin/announcements/{}", created.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_report_and_hide_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, author, _) = server.member_with_team(&admin.access_token).await.unwrap();
    let (_, reporter) = server.register_member(&admin.access_token).await.unwrap();

    let post = CreatePostRequest {
        description: "Buy cheap watches".to_string(),
        is_global: true,
    };
    let response = server
        .post_auth("/posts", &author.access_token, &post)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let report_path = format!("/reports/post/{}", post.id);
    let body = json!({ "reason": "spam" });
    let response = server
        .post_auth(&report_path, &reporter.access_token, &body)
        .await
        .unwrap();
    let report: ReportResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(report.status, "pending");
    assert_eq!(report.content_type, "post");

    // One pending report per reporter and target
    let response = server
        .post_auth(&report_path, &reporter.access_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .post_auth(
            &format!("/admin/reports/{}/resolve", report.id),
            &admin.access_token,
            &json!({ "action": "hide_content" }),
        )
        .await
        .unwrap();
    let resolved: ReportResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(resolved.status, "pending");

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &reporter.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            &format!("/admin/posts/{}/unhide", post.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &reporter.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_report_unknown_content_type() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();

    let response = server
        .post_auth(
            "/reports/team/123",
            &admin.access_token,
            &json!({ "reason": "other" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_banned_user_is_locked_out() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (request, member) = server.register_member(&admin.access_token).await.unwrap();
    let ban_path = format!("/admin/users/{}/ban", member.user.id);

    let response = server
        .post_auth(
            &ban_path,
            &admin.access_token,
            &json!({ "reason": "spam", "duration_hours": 24 }),
        )
        .await
        .unwrap();
    let banned: AdminUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banned.is_banned);

    let response = server
        .get_auth("/users/@me", &member.access_token)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error, "USER_BANNED");

    let login = LoginRequest::from_register(&request);
    let response = server.post("/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&ban_path, &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post("/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_admin_cannot_ban_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();

    let response = server
        .post_auth(
            &format!("/admin/users/{}/ban", admin.user.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, member) = server.register_member(&admin.access_token).await.unwrap();

    let response = server
        .get_auth("/admin/dashboard", &member.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/admin/dashboard", &admin.access_token)
        .await
        .unwrap();
    let dashboard: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(dashboard["user_count"].as_i64().unwrap_or_default() >= 2);
}

#[tokio::test]
async fn test_team_management() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let (_, member, team) = server.member_with_team(&admin.access_token).await.unwrap();

    // Names are unique
    let response = server
        .post_auth(
            "/admin/teams",
            &admin.access_token,
            &json!({ "name": team.name }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let new_name = format!("Renamed {}", unique_suffix());
    let response = server
        .patch_auth(
            &format!("/admin/teams/{}", team.id),
            &admin.access_token,
            &json!({ "name": new_name }),
        )
        .await
        .unwrap();
    let renamed: TeamResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(renamed.name, new_name);

    let response = server
        .get_auth(&format!("/teams/{}", team.id), &member.access_token)
        .await
        .unwrap();
    let detail: TeamDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.id, team.id);
    assert!(detail.members.iter().any(|m| m.id == member.user.id));

    let response = server
        .upload_auth(
            &format!("/admin/teams/{}/avatar", team.id),
            &admin.access_token,
            "crest.png",
            vec![137, 80, 78, 71],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/admin/teams/{}", team.id), &admin.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Members are left without a team
    let response = server
        .get_auth("/users/@me", &member.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(me.team_id.is_none());
}

#[tokio::test]
async fn test_registration_code_reset() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    let code = server.generate_code(&admin.access_token).await.unwrap();

    let response = server
        .post("/auth/register", &RegisterRequest::unique(&code))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth("/admin/codes", &admin.access_token)
        .await
        .unwrap();
    let codes: Vec<CodeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let used = codes.iter().find(|c| c.code == code).expect("code listed");
    assert!(used.is_used);

    let response = server
        .post_auth(
            &format!("/admin/codes/{}/reset", used.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let reset: CodeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!reset.is_used);

    let response = server
        .post("/auth/register", &RegisterRequest::unique(&code))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_audit_log_records_admin_actions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();
    server.create_team(&admin.access_token).await.unwrap();

    let response = server
        .get_auth(
            "/admin/audit-logs?action_type=team_create&limit=10",
            &admin.access_token,
        )
        .await
        .unwrap();
    let page: Page<AuditEntry> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!page.data.is_empty());
    assert!(page.data.iter().all(|e| e.action_type == "team_create"));
    assert_eq!(page.data[0].user_id.as_deref(), Some(admin.user.id.as_str()));
}

// ============================================================================
// Site Settings Tests
// ============================================================================

#[tokio::test]
async fn test_site_settings() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_login().await.unwrap();

    let response = server.get("/settings").await.unwrap();
    let current: SettingsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!current.site_name.is_empty());

    let response = server
        .patch_auth(
            "/admin/settings",
            &admin.access_token,
            &json!({ "primary_color": "not-a-color" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .patch_auth(
            "/admin/settings",
            &admin.access_token,
            &json!({ "primary_color": current.primary_color }),
        )
        .await
        .unwrap();
    let updated: SettingsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.primary_color, current.primary_color);
    assert_eq!(updated.site_name, current.site_name);
}
