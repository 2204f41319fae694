//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and setting up accounts, codes and teams through the admin API.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use campfire_api::{bootstrap, create_app, create_app_state};
use campfire_common::{AppConfig, RateRule};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{
    AuthResponse, CodeResponse, LoginRequest, RegisterRequest, TeamResponse, unique_suffix,
};

/// Seeded by bootstrap on the first test run against a database
pub const ADMIN_USERNAME: &str = "it_admin";
pub const ADMIN_PASSWORD: &str = "it-admin-password";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;

        // Parallel tests race to seed the same admin; the loser sees it on retry
        if bootstrap(&state).await.is_err() {
            bootstrap(&state).await?;
        }

        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// GET outside `/api/v1` (health, uploads)
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.api(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.api(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.api(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.api(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.api(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.api(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.api(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// POST a single file as `multipart/form-data`
    pub async fn upload_auth(
        &self,
        path: &str,
        token: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Response> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);
        Ok(self
            .client
            .post(self.api(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    // ========================================================================
    // Account setup
    // ========================================================================

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/auth/login", &request).await?;
        assert_json(response, StatusCode::OK).await
    }

    pub async fn admin_login(&self) -> Result<AuthResponse> {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Fresh unused registration code
    pub async fn generate_code(&self, admin_token: &str) -> Result<String> {
        let response = self
            .post_auth("/admin/codes", admin_token, &json!({ "count": 5 }))
            .await?;
        let codes: Vec<CodeResponse> = assert_json(response, StatusCode::CREATED).await?;
        codes
            .into_iter()
            .find(|c| !c.is_used)
            .map(|c| c.code)
            .ok_or_else(|| anyhow::anyhow!("No unused code generated"))
    }

    /// Register a new member with a freshly generated code
    pub async fn register_member(
        &self,
        admin_token: &str,
    ) -> Result<(RegisterRequest, AuthResponse)> {
        let code = self.generate_code(admin_token).await?;
        let request = RegisterRequest::unique(&code);
        let response = self.post("/auth/register", &request).await?;
        let auth = assert_json(response, StatusCode::CREATED).await?;
        Ok((request, auth))
    }

    pub async fn create_team(&self, admin_token: &str) -> Result<TeamResponse> {
        let name = format!("Team {}", unique_suffix());
        let response = self
            .post_auth("/admin/teams", admin_token, &json!({ "name": name }))
            .await?;
        assert_json(response, StatusCode::CREATED).await
    }

    pub async fn assign_team(
        &self,
        admin_token: &str,
        user_id: &str,
        team_id: &str,
    ) -> Result<()> {
        let response = self
            .put_auth(
                &format!("/admin/users/{user_id}/team"),
                admin_token,
                &json!({ "team_id": team_id }),
            )
            .await?;
        assert_status(response, StatusCode::OK).await
    }

    /// Member placed in a new team
    ///
    /// The token stays valid: roles and team are read from the database per request.
    pub async fn member_with_team(
        &self,
        admin_token: &str,
    ) -> Result<(RegisterRequest, AuthResponse, TeamResponse)> {
        let (request, auth) = self.register_member(admin_token).await?;
        let team = self.create_team(admin_token).await?;
        self.assign_team(admin_token, &auth.user.id, &team.id).await?;
        Ok((request, auth, team))
    }
}

/// Configuration from the environment with test-only overrides
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Tests run from the crate directory, not the workspace root
    if std::env::var("DATABASE_MIGRATIONS_PATH").is_err() {
        config.database.migrations_path =
            format!("{}/../../migrations", env!("CARGO_MANIFEST_DIR"));
    }
    config.bootstrap.admin_username = Some(ADMIN_USERNAME.to_string());
    config.bootstrap.admin_password = Some(ADMIN_PASSWORD.to_string());
    // Every test client shares 127.0.0.1, so the per-IP auth limits would trip
    config.rate_limit.actions.login = RateRule::new(1_000, 15);
    config.rate_limit.actions.register = RateRule::new(1_000, 60);
    config.storage.upload_dir = std::env::temp_dir()
        .join("campfire-integration-uploads")
        .display()
        .to_string();

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error status and return the `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorBody = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
