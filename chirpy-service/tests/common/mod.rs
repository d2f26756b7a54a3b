#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chirpy_service::config::Platform;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::Chirp;
use chirpy_service::domain::chirp::models::ChirpBody;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::models::ChirpSort;
use chirpy_service::domain::chirp::models::CreateChirpCommand;
use chirpy_service::domain::chirp::ports::ChirpServicePort;
use chirpy_service::domain::session::errors::SessionError;
use chirpy_service::domain::session::models::LoginCommand;
use chirpy_service::domain::session::models::Session;
use chirpy_service::domain::session::ports::SessionServicePort;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::CreateUserCommand;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::UpdateUserCommand;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserServicePort;
use chirpy_service::inbound::http::middleware::FileServerHits;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chrono::Duration;
use chrono::Utc;
use mockall::mock;
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

mock! {
    pub UserService {}

    #[async_trait]
    impl UserServicePort for UserService {
        async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
        async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
        async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;
        async fn update_user(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;
        async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<(), UserError>;
        async fn delete_all_users(&self) -> Result<u64, UserError>;
    }
}

mock! {
    pub ChirpService {}

    #[async_trait]
    impl ChirpServicePort for ChirpService {
        async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;
        async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;
        async fn list_chirps(&self, author: Option<UserId>, sort: ChirpSort) -> Result<Vec<Chirp>, ChirpError>;
        async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;
    }
}

mock! {
    pub SessionService {}

    #[async_trait]
    impl SessionServicePort for SessionService {
        async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;
        async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;
        async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
    }
}

/// Service mocks handed to the router. Unconfigured calls panic.
pub struct Mocks {
    pub users: MockUserService,
    pub chirps: MockChirpService,
    pub sessions: MockSessionService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            users: MockUserService::new(),
            chirps: MockChirpService::new(),
            sessions: MockSessionService::new(),
        }
    }
}

/// Router wired to mocked services, with a temporary static file root.
pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
    pub file_server_hits: Arc<FileServerHits>,
    pub file_root: TempDir,
}

impl TestApp {
    pub fn new(mocks: Mocks) -> Self {
        Self::with_platform(mocks, Platform::Production)
    }

    pub fn with_platform(mocks: Mocks, platform: Platform) -> Self {
        let file_root = tempfile::tempdir().expect("Failed to create file root");
        fs::write(
            file_root.path().join("index.html"),
            "<html><body><h1>Welcome to Chirpy</h1></body></html>",
        )
        .expect("Failed to write index.html");

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::minutes(60)));
        let file_server_hits = Arc::new(FileServerHits::new());

        let state = AppState {
            user_service: Arc::new(mocks.users),
            chirp_service: Arc::new(mocks.chirps),
            session_service: Arc::new(mocks.sessions),
            authenticator: Arc::clone(&authenticator),
            file_server_hits: Arc::clone(&file_server_hits),
            platform,
            polka_key: Arc::from(POLKA_KEY),
        };

        Self {
            router: create_router(state, file_root.path()),
            authenticator,
            file_server_hits,
            file_root,
        }
    }

    /// Session token for `user_id` signed with the app's secret.
    pub fn token_for(&self, user_id: UserId) -> String {
        self.authenticator
            .generate_token(user_id.0)
            .expect("Failed to issue token")
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            content_type,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("Response body is not UTF-8")
    }
}

/// Request builder shorthand.
pub fn request(method: Method, uri: &str, authorization: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        is_chirpy_red: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_chirp(user_id: UserId, body: &str) -> Chirp {
    let now = Utc::now();
    Chirp {
        id: ChirpId::new(),
        user_id,
        body: ChirpBody::from_trusted(body.to_string()),
        created_at: now,
        updated_at: now,
    }
}
