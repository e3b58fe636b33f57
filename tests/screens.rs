// tests/screens.rs

mod common;

use axum::http::{Request, StatusCode};
use chrono::Duration;
use serde_json::json;

use cargo_admin::db::seed::{DEMO_API_KEY, SINO_AFRICA_CARGO};
use common::{json_request, spawn_app, AGENT, CLIENT, SUPER_ADMIN};

#[tokio::test]
async fn package_filters_intersect_with_search() {
    let app = spawn_app().await;
    let token = app.login(SUPER_ADMIN).await;

    let count = |body: serde_json::Value| body.as_array().map(Vec::len).unwrap_or_default();

    let (_, in_transit) = app.get("/api/packages?status=IN_TRANSIT", Some(&token)).await;
    assert_eq!(count(in_transit), 2);

    let (_, narrowed) = app
        .get("/api/packages?status=IN_TRANSIT&transportMode=AERIAL", Some(&token))
        .await;
    assert_eq!(count(narrowed.clone()), 1);
    assert_eq!(narrowed[0]["trackingPin"], "CA-7K2M9QXA");

    let (_, by_client) = app.get("/api/packages?search=FATOU", Some(&token)).await;
    assert_eq!(count(by_client), 2);

    let (_, none) = app
        .get("/api/packages?search=fatou&status=PLANNED", Some(&token))
        .await;
    assert_eq!(count(none), 0);
}

#[tokio::test]
async fn welcome_coupon_expires_when_the_clock_moves() {
    let app = spawn_app().await;
    let token = app.login(SUPER_ADMIN).await;

    let (status, before) = app.get("/api/coupons?search=WELCOME10", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before[0]["statusLabel"], "Actif");
    assert_eq!(before[0]["usageCount"], 245);

    app.clock.advance(Duration::days(400));
    // O token antigo também expirou
    let token = app.login(SUPER_ADMIN).await;

    let (_, after) = app.get("/api/coupons?search=WELCOME10", Some(&token)).await;
    assert_eq!(after[0]["statusLabel"], "Expiré");
    assert_eq!(after[0]["status"], "EXPIRED");
    assert_eq!(after[0]["usageCount"], before[0]["usageCount"]);
    assert_eq!(after[0]["validTo"], before[0]["validTo"]);
}

#[tokio::test]
async fn coupon_update_returns_a_notice() {
    let app = spawn_app().await;
    let token = app.login(SUPER_ADMIN).await;

    let (_, coupons) = app.get("/api/coupons?search=WELCOME10", Some(&token)).await;
    let id = coupons[0]["id"].as_str().expect("id").to_string();

    let (status, toggled) = app
        .send(json_request("POST", &format!("/api/coupons/{}/toggle", id), Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["statusLabel"], "Inactif");
    assert_eq!(toggled["notice"]["outcome"], "success");
    assert_eq!(toggled["notice"]["message"], "Désactivé.");
}

#[tokio::test]
async fn public_quote_flows_to_the_agent_screen() {
    let app = spawn_app().await;

    let (status, created) = app
        .send(json_request(
            "POST",
            "/api/public/quotes",
            None,
            json!({
                "clientName": "Oumar Cissé",
                "clientEmail": "Oumar@Example.com",
                "origin": "Guangzhou",
                "destination": "Bamako",
                "transportMode": "AERIAL",
                "weightKg": 10,
                "volumeM3": 0.12
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "PENDING");
    assert_eq!(created["data"]["clientEmail"], "oumar@example.com");
    let id = created["data"]["id"].as_str().expect("id").to_string();

    let agent = app.login(AGENT).await;
    let (status, quoted) = app
        .send(json_request("POST", &format!("/api/quotes/{}/respond", id), Some(&agent), json!({ "price": 240 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quoted["data"]["status"], "QUOTED");

    // Responder de novo não é uma transição válida
    let (status, again) = app
        .send(json_request("POST", &format!("/api/quotes/{}/respond", id), Some(&agent), json!({ "price": 200 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["kind"], "invalid_transition");
}

#[tokio::test]
async fn aerial_estimate_uses_volumetric_weight() {
    let app = spawn_app().await;
    let (status, estimate) = app
        .send(json_request(
            "POST",
            "/api/public/pricing/estimate",
            None,
            json!({ "transportMode": "AERIAL", "weightKg": 10, "volumeM3": 0.12 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(estimate["chargeableWeightKg"], 20.0);
    assert_eq!(estimate["amount"], 250.0);
}

#[tokio::test]
async fn test_api_authenticates_the_demo_key() {
    let app = spawn_app().await;

    let request = |key: Option<&str>| {
        let mut builder = Request::builder().method("GET").uri("/api/test-api");
        if let Some(key) = key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(axum::body::Body::empty()).expect("request")
    };

    let (status, body) = app.send(request(Some(DEMO_API_KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["scopes"][0], "tracking:read");

    assert_eq!(app.send(request(None)).await.0, StatusCode::UNAUTHORIZED);
    assert_eq!(app.send(request(Some("ck_live_demo5f2c-not-the-key"))).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_tracking_ignores_case() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/public/track/ca-7k2m9qxa", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "IN_TRANSIT");

    let (status, _) = app.get("/api/public/track/CA-00000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_estimates_are_rejected_not_crashed() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/public/pricing/estimate",
            None,
            json!({ "transportMode": "MARITIME", "weightKg": 1, "volumeM3": 7e25 }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/public/quotes",
            None,
            json!({
                "clientName": "Oumar Cissé",
                "clientEmail": "oumar@example.com",
                "origin": "Guangzhou",
                "destination": "Bamako",
                "transportMode": "AERIAL",
                "weightKg": 7e25,
                "volumeM3": 7e25
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    // O servidor continua respondendo
    assert_eq!(app.get("/api/health", None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn simultaneous_signups_with_one_email_keep_a_single_user() {
    let app = spawn_app().await;
    let token = app.login(SUPER_ADMIN).await;

    let payload = || {
        json_request(
            "POST",
            "/api/users",
            Some(&token),
            json!({
                "email": "twin@sinoafrica.test",
                "name": "Jumeau",
                "password": "password123",
                "role": "CLIENT",
                "companyId": SINO_AFRICA_CARGO
            }),
        )
    };

    let ((first, _), (second, _)) = tokio::join!(app.send(payload()), app.send(payload()));
    let mut statuses = [first, second];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, users) = app.get("/api/users?search=twin@", Some(&token)).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn coupon_codes_stay_unique_regardless_of_case() {
    let app = spawn_app().await;
    let token = app.login(SUPER_ADMIN).await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/coupons",
            Some(&token),
            json!({
                "code": "welcome10",
                "discountType": "FIXED",
                "value": 5,
                "validFrom": "2026-01-01T00:00:00Z",
                "validTo": "2027-01-01T00:00:00Z"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");

    let (_, coupons) = app.get("/api/coupons?search=WELCOME10", Some(&token)).await;
    assert_eq!(coupons.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn first_order_coupon_only_works_once_per_customer() {
    let app = spawn_app().await;
    let token = app.login(CLIENT).await;
    let order = || {
        json_request(
            "POST",
            "/api/coupons/redeem",
            Some(&token),
            json!({ "code": "AIRFREE", "orderAmount": 300, "shippingCost": 30, "transportMode": "AERIAL" }),
        )
    };

    let (status, discount) = app.send(order()).await;
    assert_eq!(status, StatusCode::OK, "{}", discount);
    assert_eq!(discount["discountAmount"], 30.0);

    let (status, body) = app.send(order()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "coupon_rejected");
    assert_eq!(body["details"]["reason"], "firstOrderOnly");
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let app = spawn_app().await;
    let (status, doc) = app.get("/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/public/pricing/estimate"]["post"].is_object());
    assert!(doc["paths"]["/api/users/{id}"]["delete"].is_object());
    assert_eq!(doc["components"]["securitySchemes"]["api_jwt"]["scheme"], "bearer");
}
