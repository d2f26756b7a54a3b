mod common;

use axum::http::Method;
use axum::http::StatusCode;
use chirpy_service::config::Platform;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::models::ChirpSort;
use chirpy_service::domain::session::errors::SessionError;
use chirpy_service::domain::session::models::Session;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::UserId;
use chrono::Duration;
use common::request;
use common::test_chirp;
use common::test_user;
use common::Mocks;
use common::TestApp;
use common::JWT_SECRET;
use common::POLKA_KEY;
use serde_json::json;

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::new(Mocks::default());

    let response = app
        .send(request(Method::GET, "/api/healthz", None, None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|value| value.starts_with("text/plain")));
}

#[tokio::test]
async fn test_create_user_success() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_create_user()
        .withf(|command| {
            command.email.as_str() == "walt@breakingbad.com" && command.password == "04234"
        })
        .times(1)
        .returning(|command| {
            let mut user = test_user(command.email.as_str());
            user.email = command.email;
            Ok(user)
        });
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "walt@breakingbad.com", "password": "04234" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["email"], "walt@breakingbad.com");
    assert_eq!(body["is_chirpy_red"], false);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let mut mocks = Mocks::default();
    mocks.users.expect_create_user().times(0);
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "not-an-email", "password": "04234" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let mut mocks = Mocks::default();
    mocks.users.expect_create_user().times(0);
    let app = TestApp::new(mocks);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"email\": "))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let mut mocks = Mocks::default();
    mocks.users.expect_create_user().times(0);
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "walt@breakingbad.com" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let mut mocks = Mocks::default();
    mocks.users.expect_create_user().times(1).returning(|command| {
        Err(UserError::EmailAlreadyExists(
            command.email.as_str().to_string(),
        ))
    });
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "walt@breakingbad.com", "password": "04234" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.json()["error"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_login_returns_tokens() {
    let mut mocks = Mocks::default();
    let user = test_user("saul@bettercall.com");
    let user_id = user.id;
    mocks
        .sessions
        .expect_login()
        .withf(|command| {
            command.email.as_str() == "saul@bettercall.com" && command.password == "123456"
        })
        .times(1)
        .returning(move |_| {
            Ok(Session {
                user: user.clone(),
                access_token: "access".to_string(),
                refresh_token: "a".repeat(64),
            })
        });
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "saul@bettercall.com", "password": "123456" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["email"], "saul@bettercall.com");
    assert_eq!(body["token"], "access");
    assert_eq!(body["refresh_token"], "a".repeat(64));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut mocks = Mocks::default();
    mocks
        .sessions
        .expect_login()
        .times(1)
        .returning(|_| Err(SessionError::InvalidCredentials));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "saul@bettercall.com", "password": "wrong" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_update_user_requires_token() {
    let mut mocks = Mocks::default();
    mocks.users.expect_update_user().times(0);
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::PUT,
            "/api/users",
            None,
            Some(json!({ "email": "walt@breakingbad.com", "password": "losPollosHermanos" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_user_uses_token_subject() {
    let mut mocks = Mocks::default();
    let user_id = UserId::new();
    mocks
        .users
        .expect_update_user()
        .withf(move |id, command| {
            *id == user_id
                && command.email.as_str() == "walter@breakingbad.com"
                && command.password == "losPollosHermanos"
        })
        .times(1)
        .returning(|id, command| {
            let mut user = test_user(command.email.as_str());
            user.id = *id;
            Ok(user)
        });
    let app = TestApp::new(mocks);
    let token = app.token_for(user_id);

    let response = app
        .send(request(
            Method::PUT,
            "/api/users",
            Some(&bearer(&token)),
            Some(json!({ "email": "walter@breakingbad.com", "password": "losPollosHermanos" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["email"], "walter@breakingbad.com");
}

#[tokio::test]
async fn test_create_chirp_success() {
    let mut mocks = Mocks::default();
    let user_id = UserId::new();
    mocks
        .chirps
        .expect_create_chirp()
        .withf(move |command| {
            command.user_id == user_id && command.body.as_str() == "I had something **** to say"
        })
        .times(1)
        .returning(|command| Ok(test_chirp(command.user_id, command.body.as_str())));
    let app = TestApp::new(mocks);
    let token = app.token_for(user_id);

    let response = app
        .send(request(
            Method::POST,
            "/api/chirps",
            Some(&bearer(&token)),
            Some(json!({ "body": "I had something Fornax to say" })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["body"], "I had something **** to say");
    assert_eq!(body["user_id"], user_id.to_string());
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_chirp_too_long() {
    let mut mocks = Mocks::default();
    mocks.chirps.expect_create_chirp().times(0);
    let app = TestApp::new(mocks);
    let token = app.token_for(UserId::new());

    let response = app
        .send(request(
            Method::POST,
            "/api/chirps",
            Some(&bearer(&token)),
            Some(json!({ "body": "x".repeat(141) })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "Chirp is too long" }));
}

#[tokio::test]
async fn test_create_chirp_rejects_bad_tokens() {
    let mut mocks = Mocks::default();
    mocks.chirps.expect_create_chirp().times(0);
    let app = TestApp::new(mocks);

    let expired = auth::jwt::issue(uuid::Uuid::new_v4(), JWT_SECRET, Duration::seconds(-1)).unwrap();
    let foreign = auth::jwt::issue(uuid::Uuid::new_v4(), b"other-secret", Duration::minutes(5)).unwrap();
    let valid = app.token_for(UserId::new());

    for authorization in [
        None,
        Some(bearer(&expired)),
        Some(bearer(&foreign)),
        Some(format!("Basic {}", valid)),
        Some("Bearer garbage".to_string()),
    ] {
        let response = app
            .send(request(
                Method::POST,
                "/api/chirps",
                authorization.as_deref(),
                Some(json!({ "body": "hello" })),
            ))
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{:?}", authorization);
        assert!(response.json()["error"].is_string());
    }
}

#[tokio::test]
async fn test_list_chirps_filters_and_sorts() {
    let mut mocks = Mocks::default();
    let author = UserId::new();
    mocks
        .chirps
        .expect_list_chirps()
        .withf(move |filter, sort| *filter == Some(author) && *sort == ChirpSort::Desc)
        .times(1)
        .returning(move |_, _| Ok(vec![test_chirp(author, "second"), test_chirp(author, "first")]));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::GET,
            &format!("/api/chirps?author_id={}&sort=desc", author),
            None,
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let chirps = body.as_array().unwrap();
    assert_eq!(chirps.len(), 2);
    assert_eq!(chirps[0]["body"], "second");
    assert_eq!(chirps[1]["body"], "first");
}

#[tokio::test]
async fn test_list_chirps_defaults_to_ascending() {
    let mut mocks = Mocks::default();
    mocks
        .chirps
        .expect_list_chirps()
        .withf(|filter, sort| filter.is_none() && *sort == ChirpSort::Asc)
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(Method::GET, "/api/chirps", None, None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_list_chirps_bad_author() {
    let mut mocks = Mocks::default();
    mocks.chirps.expect_list_chirps().times(0);
    let app = TestApp::new(mocks);

    let response = app
        .send(request(Method::GET, "/api/chirps?author_id=nope", None, None))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_chirp() {
    let mut mocks = Mocks::default();
    let chirp = test_chirp(UserId::new(), "hello");
    let chirp_id = chirp.id;
    mocks
        .chirps
        .expect_get_chirp()
        .withf(move |id| *id == chirp_id)
        .times(1)
        .returning(move |_| Ok(chirp.clone()));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::GET,
            &format!("/api/chirps/{}", chirp_id),
            None,
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], chirp_id.to_string());
}

#[tokio::test]
async fn test_get_chirp_errors() {
    let mut mocks = Mocks::default();
    mocks
        .chirps
        .expect_get_chirp()
        .times(1)
        .returning(|id| Err(ChirpError::NotFound(*id)));
    let app = TestApp::new(mocks);

    let missing = app
        .send(request(
            Method::GET,
            &format!("/api/chirps/{}", ChirpId::new()),
            None,
            None,
        ))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app
        .send(request(Method::GET, "/api/chirps/42", None, None))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_chirp() {
    let mut mocks = Mocks::default();
    let user_id = UserId::new();
    let chirp_id = ChirpId::new();
    mocks
        .chirps
        .expect_delete_chirp()
        .withf(move |id, requester| *id == chirp_id && *requester == user_id)
        .times(1)
        .returning(|_, _| Ok(()));
    let app = TestApp::new(mocks);
    let token = app.token_for(user_id);

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/api/chirps/{}", chirp_id),
            Some(&bearer(&token)),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_delete_chirp_of_another_user() {
    let mut mocks = Mocks::default();
    mocks
        .chirps
        .expect_delete_chirp()
        .times(1)
        .returning(|id, _| Err(ChirpError::Forbidden(*id)));
    let app = TestApp::new(mocks);
    let token = app.token_for(UserId::new());

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/api/chirps/{}", ChirpId::new()),
            Some(&bearer(&token)),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh() {
    let mut mocks = Mocks::default();
    mocks
        .sessions
        .expect_refresh()
        .withf(|token| token == "refresh-me")
        .times(1)
        .returning(|_| Ok("new-access".to_string()));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/refresh",
            Some("Bearer refresh-me"),
            None,
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "token": "new-access" }));
}

#[tokio::test]
async fn test_refresh_rejected() {
    let mut mocks = Mocks::default();
    mocks
        .sessions
        .expect_refresh()
        .times(1)
        .returning(|_| Err(SessionError::InvalidRefreshToken));
    let app = TestApp::new(mocks);

    let revoked = app
        .send(request(Method::POST, "/api/refresh", Some("Bearer revoked"), None))
        .await;
    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);

    let missing = app
        .send(request(Method::POST, "/api/refresh", None, None))
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke() {
    let mut mocks = Mocks::default();
    mocks
        .sessions
        .expect_revoke()
        .withf(|token| token == "revoke-me")
        .times(1)
        .returning(|_| Ok(()));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(Method::POST, "/api/revoke", Some("Bearer revoke-me"), None))
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_polka_webhook_upgrades_user() {
    let mut mocks = Mocks::default();
    let user_id = UserId::new();
    mocks
        .users
        .expect_upgrade_to_chirpy_red()
        .withf(move |id| *id == user_id)
        .times(1)
        .returning(|_| Ok(()));
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/polka/webhooks",
            Some(&format!("ApiKey {}", POLKA_KEY)),
            Some(json!({ "event": "user.upgraded", "data": { "user_id": user_id.to_string() } })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_polka_webhook_ignores_other_events() {
    let mut mocks = Mocks::default();
    mocks.users.expect_upgrade_to_chirpy_red().times(0);
    let app = TestApp::new(mocks);

    let response = app
        .send(request(
            Method::POST,
            "/api/polka/webhooks",
            Some(&format!("ApiKey {}", POLKA_KEY)),
            Some(json!({ "event": "user.payment_failed", "data": { "user_id": "whatever" } })),
        ))
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_polka_webhook_rejects_wrong_key() {
    let mut mocks = Mocks::default();
    mocks.users.expect_upgrade_to_chirpy_red().times(0);
    let app = TestApp::new(mocks);

    let body = json!({ "event": "user.upgraded", "data": { "user_id": UserId::new().to_string() } });

    for authorization in [None, Some("ApiKey wrong"), Some("Bearer f271c81ff7084ee5b99a5091b42d486e")] {
        let response = app
            .send(request(
                Method::POST,
                "/api/polka/webhooks",
                authorization,
                Some(body.clone()),
            ))
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{:?}", authorization);
    }
}

#[tokio::test]
async fn test_polka_webhook_checks_key_before_body() {
    let mut mocks = Mocks::default();
    mocks.users.expect_upgrade_to_chirpy_red().times(0);
    let app = TestApp::new(mocks);

    let rejected = app
        .send(request(Method::POST, "/api/polka/webhooks", Some("ApiKey wrong"), None))
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.json()["error"], "Invalid API key");

    let accepted = app
        .send(request(
            Method::POST,
            "/api/polka/webhooks",
            Some(&format!("ApiKey {}", POLKA_KEY)),
            None,
        ))
        .await;
    assert_eq!(accepted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_polka_webhook_tolerates_garbage_body() {
    let mut mocks = Mocks::default();
    mocks.users.expect_upgrade_to_chirpy_red().times(0);
    let app = TestApp::new(mocks);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/polka/webhooks")
        .header("authorization", format!("ApiKey {}", POLKA_KEY))
        .header("content-type", "text/plain")
        .body(axum::body::Body::from("not json"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_polka_webhook_bad_and_unknown_user() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_upgrade_to_chirpy_red()
        .times(1)
        .returning(|id| Err(UserError::NotFound(id.to_string())));
    let app = TestApp::new(mocks);
    let authorization = format!("ApiKey {}", POLKA_KEY);

    let unknown = app
        .send(request(
            Method::POST,
            "/api/polka/webhooks",
            Some(&authorization),
            Some(json!({ "event": "user.upgraded", "data": { "user_id": UserId::new().to_string() } })),
        ))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .send(request(
            Method::POST,
            "/api/polka/webhooks",
            Some(&authorization),
            Some(json!({ "event": "user.upgraded", "data": { "user_id": "not-a-uuid" } })),
        ))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_file_server_hits_are_reported() {
    let app = TestApp::new(Mocks::default());

    for _ in 0..3 {
        let response = app
            .send(request(Method::GET, "/app/index.html", None, None))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.text().contains("Welcome to Chirpy"));
    }

    let response = app
        .send(request(Method::GET, "/admin/metrics", None, None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .content_type
        .as_deref()
        .is_some_and(|value| value.starts_with("text/html")));
    let page = response.text();
    assert!(page.contains("Welcome, Chirpy Admin"));
    assert!(page.contains("Chirpy has been visited 3 times!"));
}

#[tokio::test]
async fn test_reset_forbidden_outside_dev() {
    let mut mocks = Mocks::default();
    mocks.users.expect_delete_all_users().times(0);
    let app = TestApp::new(mocks);
    app.file_server_hits.increment();

    let response = app
        .send(request(Method::POST, "/admin/reset", None, None))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.file_server_hits.get(), 1);
}

#[tokio::test]
async fn test_reset_in_dev() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_delete_all_users()
        .times(1)
        .returning(|| Ok(2));
    let app = TestApp::with_platform(mocks, Platform::Dev);
    app.file_server_hits.increment();

    let response = app
        .send(request(Method::POST, "/admin/reset", None, None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");
    assert_eq!(app.file_server_hits.get(), 0);
}
