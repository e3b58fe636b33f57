// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use cargo_admin::{
    build_router,
    common::clock::FixedClock,
    config::{AppState, Config},
    db::seed::DEMO_PASSWORD,
};

pub const SUPER_ADMIN: &str = "superadmin@cargo-admin.test";
pub const ADMIN: &str = "admin@sinoafrica.test";
pub const OTHER_ADMIN: &str = "admin@dakarlink.test";
pub const AGENT: &str = "agent@sinoafrica.test";
pub const CLIENT: &str = "client@sinoafrica.test";

pub struct TestApp {
    pub router: Router,
    pub clock: FixedClock,
}

pub async fn spawn_app() -> TestApp {
    let clock = FixedClock::at(Utc::now());
    let state = AppState::with_clock(Config::for_tests(), Arc::new(clock.clone()))
        .await
        .expect("estado de teste");
    TestApp { router: build_router(state), clock }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("resposta");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("corpo");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(json_request("POST", "/api/auth/login", None, json!({ "email": email, "password": DEMO_PASSWORD })))
            .await;
        assert_eq!(status, StatusCode::OK, "login de {} falhou: {}", email, body);
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(get_request(uri, token)).await
    }
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}
