//! Login, session persistence and route guards

use mini_library::{
    error::ClientError,
    models::Role,
    routes::{AuthState, Route},
    session::SessionStore,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::common::spawn;

async fn mount_login(app: &crate::common::TestApp, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "kim", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "token=abc; Path=/"))
        .expect(1)
        .mount(&app.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/auth/me"))
        .and(header("cookie", "token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 7, "username": "kim", "role": role }
        })))
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn login_lands_by_role_and_saves_session() {
    let app = spawn().await;
    mount_login(&app, "ADMIN").await;

    let landing = app.services.auth.login("kim", "secret").await.unwrap();
    assert_eq!(landing, Route::AdminUsers);

    let saved = SessionStore::new(app.session_path()).load().unwrap();
    assert_eq!(saved.cookie, "token=abc");
    assert_eq!(saved.username.as_deref(), Some("kim"));
    assert_eq!(saved.role, Some(Role::Admin));
}

#[tokio::test]
async fn reader_lands_on_catalog() {
    let app = spawn().await;
    mount_login(&app, "USER").await;

    let landing = app.services.auth.login("kim", "secret").await.unwrap();
    assert_eq!(landing, Route::UserHome);
}

#[tokio::test]
async fn saved_session_is_restored_on_next_run() {
    let app = spawn().await;
    mount_login(&app, "USER").await;
    app.services.auth.login("kim", "secret").await.unwrap();

    let services = app.restart();
    let auth = services.auth.check_auth().await;
    assert_eq!(
        auth,
        AuthState::Authenticated {
            id: Some(7),
            name: "kim".into(),
            role: Role::User
        }
    );
}

#[tokio::test]
async fn failed_session_check_means_anonymous() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/user/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    assert_eq!(app.services.auth.check_auth().await, AuthState::Anonymous);
    assert!(app.services.auth.current_user().await.is_none());
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad credentials" })))
        .mount(&app.server)
        .await;

    let err = app.services.auth.login("kim", "nope").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "bad credentials"));
    assert!(SessionStore::new(app.session_path()).load().is_none());
}

#[tokio::test]
async fn guard_blocks_readers_from_admin_routes() {
    let app = spawn().await;
    mount_login(&app, "USER").await;
    app.services.auth.login("kim", "secret").await.unwrap();

    let err = app.services.auth.authorize(Route::AdminBooks).await.unwrap_err();
    assert!(matches!(err, ClientError::AccessDenied { .. }));

    let auth = app.services.auth.authorize(Route::UserHome).await.unwrap();
    assert_eq!(auth.role(), Some(Role::User));
}

#[tokio::test]
async fn guard_blocks_admins_from_reader_routes() {
    let app = spawn().await;
    mount_login(&app, "ADMIN").await;
    app.services.auth.login("kim", "secret").await.unwrap();

    assert!(app.services.auth.authorize(Route::UserHome).await.is_err());
    assert!(app.services.auth.authorize(Route::BookDetail(1)).await.is_ok());
    assert!(app.services.auth.authorize(Route::UserDetail(3)).await.is_ok());
}

#[tokio::test]
async fn public_routes_skip_the_session_check() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/user/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&app.server)
        .await;

    assert!(app.services.auth.authorize(Route::Login).await.is_ok());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let app = spawn().await;
    mount_login(&app, "USER").await;
    app.services.auth.login("kim", "secret").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/user/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.server)
        .await;

    app.services.auth.logout().await.unwrap();
    assert!(!app.session_path().exists());
}

#[tokio::test]
async fn saved_session_survives_backend_rejection_for_whoami() {
    let app = spawn().await;
    mount_login(&app, "USER").await;
    app.services.auth.login("kim", "secret").await.unwrap();

    app.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/user/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    let services = app.restart();
    assert!(services.auth.current_user().await.is_none());
    let saved = services.auth.saved_session().unwrap();
    assert_eq!(saved.username.as_deref(), Some("kim"));
    assert_eq!(saved.role, Some(Role::User));
}
