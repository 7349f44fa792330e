//! Test helpers for integration tests
//!
//! Provides a test server wrapper, request shortcuts, and helpers that set up
//! the users and universities most tests need.

use std::time::Duration;

use anyhow::Result;
use campus_api::{create_app, create_app_state};
use campus_common::AppConfig;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{
    run_tag, unique_suffix, AuthResponse, CreateUniversityRequest, ErrorEnvelope,
    LoginRequest, RegisterRequest, UniversityResponse,
};

/// Running application bound to an ephemeral local port
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    /// Registering this email yields a super admin
    pub bootstrap_email: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let mut config = test_config()?;
        let bootstrap_email = format!("root-{}-{}@campus.test", run_tag(), unique_suffix());
        config.bootstrap.super_admin_email = Some(bootstrap_email.clone());
        Self::start_with_config(config, bootstrap_email).await
    }

    async fn start_with_config(config: AppConfig, bootstrap_email: String) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            base_url: format!("http://{addr}"),
            client,
            bootstrap_email,
            _handle: handle,
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = if path.starts_with("/health") {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/api/v1{path}", self.base_url)
        };
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(Method::POST, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(Method::PATCH, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path, Some(token))
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(token)).send().await?)
    }

    /// Register and return the auth response
    pub async fn register(&self, email: &str, university_id: Option<&str>) -> Result<AuthResponse> {
        let response = self
            .post("/auth/register", &RegisterRequest::new(email, university_id))
            .await?;
        assert_json(response, StatusCode::CREATED).await
    }

    /// Token for the bootstrap account, registering it on first use
    pub async fn super_admin(&self) -> Result<String> {
        let request = RegisterRequest::new(&self.bootstrap_email, None);
        let response = self.post("/auth/register", &request).await?;
        if response.status() != StatusCode::CONFLICT {
            let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await?;
            return Ok(auth.access_token);
        }
        let response = self
            .post("/auth/login", &LoginRequest::from_register(&request))
            .await?;
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;
        Ok(auth.access_token)
    }

    pub async fn create_university(&self, super_admin_token: &str) -> Result<UniversityResponse> {
        let response = self
            .post_auth(
                "/universities",
                super_admin_token,
                &CreateUniversityRequest::unique(),
            )
            .await?;
        assert_json(response, StatusCode::CREATED).await
    }
}

/// Configuration from the environment, with migrations on and limits raised
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config.database.run_migrations = true;
    config.database.max_connections = 5;
    config.database.min_connections = 0;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;

    Ok(config)
}

/// Whether the database-backed tests can run
pub fn check_test_env() -> bool {
    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error status and return the error body
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<crate::fixtures::ErrorBody> {
    let envelope: ErrorEnvelope = assert_json(response, expected_status).await?;
    Ok(envelope.error)
}
