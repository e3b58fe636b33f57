// tests/access_control.rs

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use cargo_admin::db::seed::{SINO_AFRICA_CARGO, SUPER_ADMIN_ID};
use common::{json_request, spawn_app, ADMIN, AGENT, CLIENT, OTHER_ADMIN, SUPER_ADMIN};

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn packages_without_token_redirect_to_signin() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/packages", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthenticated");
    assert_eq!(body["details"]["redirectTo"], "/auth/signin");
}

#[tokio::test]
async fn packages_screen_is_super_admin_only() {
    let app = spawn_app().await;

    for email in [ADMIN, AGENT, CLIENT] {
        let token = app.login(email).await;
        let (status, body) = app.get("/api/packages", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", email);
        assert_eq!(body["kind"], "access_denied");
        assert_eq!(body["details"]["screen"], "packages");
        assert_eq!(body["details"]["redirectTo"], "/dashboard");
    }

    let token = app.login(SUPER_ADMIN).await;
    let (status, body) = app.get("/api/packages", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(7));
}

#[tokio::test]
async fn quotes_screen_admits_agents_but_not_clients() {
    let app = spawn_app().await;

    let agent = app.login(AGENT).await;
    assert_eq!(app.get("/api/quotes", Some(&agent)).await.0, StatusCode::OK);

    let client = app.login(CLIENT).await;
    assert_eq!(app.get("/api/quotes", Some(&client)).await.0, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_only_see_their_own_company() {
    let app = spawn_app().await;
    let token = app.login(OTHER_ADMIN).await;

    let (status, body) = app.get("/api/users", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = body
        .as_array()
        .expect("lista")
        .iter()
        .filter_map(|u| u["email"].as_str())
        .collect();
    assert!(emails.contains(&"admin@dakarlink.test"));
    assert!(emails.contains(&"client@dakarlink.test"));
    assert!(!emails.iter().any(|e| e.ends_with("@sinoafrica.test")));
    assert!(!emails.contains(&SUPER_ADMIN));
    assert!(body[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn company_admin_cannot_touch_another_company_agent() {
    let app = spawn_app().await;
    let root = app.login(SUPER_ADMIN).await;

    let (status, created) = app
        .send(json_request(
            "POST",
            "/api/users",
            Some(&root),
            json!({
                "email": "agent2@sinoafrica.test",
                "name": "Li Wei",
                "password": "password123",
                "role": "AGENT",
                "companyId": SINO_AFRICA_CARGO
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["data"]["companyId"], SINO_AFRICA_CARGO.to_string());
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let dakar = app.login(OTHER_ADMIN).await;
    let (status, _) = app.get(&format!("/api/users/{}", id), Some(&dakar)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(json_request("POST", &format!("/api/users/{}/toggle-active", id), Some(&dakar), json!({})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(json_request("DELETE", &format!("/api/users/{}", id), Some(&dakar), json!({})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Continua intacto para a própria empresa
    let (status, still_there) = app.get(&format!("/api/users/{}", id), Some(&root)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["isActive"], true);
}

#[tokio::test]
async fn company_admin_cannot_reach_the_super_admin() {
    let app = spawn_app().await;
    let dakar = app.login(OTHER_ADMIN).await;
    let uri = format!("/api/users/{}", SUPER_ADMIN_ID);

    assert_eq!(app.get(&uri, Some(&dakar)).await.0, StatusCode::NOT_FOUND);
    let (status, _) = app.send(json_request("DELETE", &uri, Some(&dakar), json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let root = app.login(SUPER_ADMIN).await;
    assert_eq!(app.get(&uri, Some(&root)).await.0, StatusCode::OK);
}

#[tokio::test]
async fn platform_created_agents_need_a_company() {
    let app = spawn_app().await;
    let root = app.login(SUPER_ADMIN).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/users",
            Some(&root),
            json!({
                "email": "floating@cargo-admin.test",
                "name": "Sans Société",
                "password": "password123",
                "role": "AGENT"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, users) = app.get("/api/users?search=floating", Some(&root)).await;
    assert_eq!(users.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn session_status_follows_the_clock() {
    let app = spawn_app().await;

    let (_, anonymous) = app.get("/api/auth/session", None).await;
    assert_eq!(anonymous["status"], "unauthenticated");

    let token = app.login(SUPER_ADMIN).await;
    let (_, session) = app.get("/api/auth/session", Some(&token)).await;
    assert_eq!(session["status"], "authenticated");
    assert_eq!(session["user"]["role"], "SUPER_ADMIN");

    // Token de teste vale 1 hora
    app.clock.advance(Duration::hours(2));
    let (_, expired) = app.get("/api/auth/session", Some(&token)).await;
    assert_eq!(expired["status"], "unauthenticated");
    assert_eq!(app.get("/api/users/me", Some(&token)).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected_in_the_client_language() {
    let app = spawn_app().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("accept-language", "en-US,en;q=0.9")
        .body(axum::body::Body::from(
            serde_json::json!({ "email": SUPER_ADMIN, "password": "wrong-password" }).to_string(),
        ))
        .expect("request");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthenticated");
    assert_eq!(body["error"], "Invalid e-mail or password.");
}

#[tokio::test]
async fn missing_token_is_reported_in_the_client_language() {
    let app = spawn_app().await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/packages")
        .header("accept-language", "en")
        .body(axum::body::Body::empty())
        .expect("request");

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthenticated");
    assert_eq!(body["error"], "Please sign in.");

    // Sem cabeçalho, francês
    let (_, default) = app.get("/api/packages", None).await;
    assert_eq!(default["error"], "Veuillez vous connecter.");
}
