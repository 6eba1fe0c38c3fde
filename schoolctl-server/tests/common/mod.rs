//! Shared harness: a fresh database per test, driven through the router with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use schoolctl_core::SchoolConfig;
use schoolctl_server::{build_router, prepare_state, AppState};

pub const ADMIN_EMAIL: &str = "admin@colegio.edu";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub token: String,
    _dir: TempDir,
}

impl TestApp {
    /// Migrated, seeded database with an admin token ready to use
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = SchoolConfig::default();
        config.database.path = dir.path().join("school.sqlite");
        config.auth.jwt_secret = "test-secret".to_string();

        let state = prepare_state(&config).await.expect("prepare state");
        let router = build_router(state.clone(), CorsLayer::permissive());

        let mut app = Self {
            router,
            state,
            token: String::new(),
            _dir: dir,
        };

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "seed login failed: {body}");
        app.token = body["token"].as_str().expect("token").to_string();
        app
    }

    /// Send a request; an empty response body decodes as `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, Some(self.token.as_str())).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), Some(self.token.as_str())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), Some(self.token.as_str())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, Some(self.token.as_str())).await
    }

    /// Create a student and return its id
    pub async fn student(&self, first: &str, last: &str, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/students",
                json!({ "first_name": first, "last_name": last, "email": email }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("student id")
    }

    /// Create a course (optionally taught by `teacher_id`) and return its id
    pub async fn course(&self, name: &str, teacher_id: Option<i64>) -> i64 {
        let (status, body) = self
            .post("/courses", json!({ "name": name, "teacher_id": teacher_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().expect("course id")
    }
}
