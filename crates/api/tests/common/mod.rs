#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use webresources_api::auth::jwt::{generate_access_token, JwtConfig};
use webresources_api::config::ServerConfig;
use webresources_api::router::build_app_router;
use webresources_api::state::AppState;
use webresources_core::access::ProjectRole;
use webresources_core::data_format::DataFormat;
use webresources_db::models::project::CreateProject;
use webresources_db::models::user::CreateUser;
use webresources_db::models::webresource::{CreateWebResource, WebResource};
use webresources_db::repositories::{ProjectRepo, UserRepo, WebResourceRepo};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        url_check_timeout_secs: 5,
        media_url: "/media/".to_string(),
        login_url: "/admin/account/login/".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router, middleware included.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A project with one admin, one contributor and one unrelated user.
pub struct Fixture {
    pub project_id: i64,
    pub admin_id: i64,
    pub admin: String,
    pub contributor: String,
    pub outsider: String,
}

pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

pub async fn create_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(pool, &CreateUser { display_name: name.to_string() })
        .await
        .unwrap()
        .id
}

pub async fn fixture(pool: &PgPool) -> Fixture {
    let admin_id = create_user(pool, "admin").await;
    let contributor_id = create_user(pool, "contributor").await;
    let outsider_id = create_user(pool, "outsider").await;

    let project = ProjectRepo::create(
        pool,
        &CreateProject { name: "Mapping".to_string(), status_id: None, islocked: None },
    )
    .await
    .unwrap();
    ProjectRepo::add_member(pool, project.id, admin_id, ProjectRole::Admin)
        .await
        .unwrap();
    ProjectRepo::add_member(pool, project.id, contributor_id, ProjectRole::Contributor)
        .await
        .unwrap();

    Fixture {
        project_id: project.id,
        admin_id,
        admin: token_for(admin_id),
        contributor: token_for(contributor_id),
        outsider: token_for(outsider_id),
    }
}

pub async fn seed_resource(pool: &PgPool, f: &Fixture, name: &str) -> WebResource {
    let input = CreateWebResource {
        name: name.to_string(),
        description: Some(format!("{name} layer")),
        data_format: DataFormat::GeoJson,
        url: format!("http://example.com/{name}.json"),
        colour: None,
        symbol: None,
    };
    WebResourceRepo::create(pool, f.project_id, f.admin_id, &input)
        .await
        .unwrap()
}

pub async fn lock(pool: &PgPool, f: &Fixture) {
    assert!(ProjectRepo::set_locked(pool, f.project_id, true).await.unwrap());
}
