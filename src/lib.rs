// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, middleware::auth::auth_guard};

/// Monta todas as rotas da API. Público primeiro, depois o que passa pelo `auth_guard`.
pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/session", get(handlers::auth::session));

    // Site vitrine, simulador e rastreio
    let public_routes = Router::new()
        .route("/plans", get(handlers::public::list_plans))
        .route("/addons", get(handlers::public::list_addons))
        .route("/pricing/settings", get(handlers::public::pricing_settings))
        .route("/pricing/estimate", post(handlers::public::estimate))
        .route("/quotes", post(handlers::public::request_quote))
        .route("/track/{pin}", get(handlers::public::track_package))
        .route("/footer-config", get(handlers::public::footer_config))
        .route("/docs", get(handlers::docs::list_articles))
        .route("/docs/{slug}", get(handlers::docs::get_article));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users).post(handlers::users::create_user))
        .route("/stats", get(handlers::users::user_stats))
        .route("/me", get(handlers::users::get_me))
        .route(
            "/me/preferences",
            get(handlers::users::get_preferences).put(handlers::users::set_preferences),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/{id}/toggle-active", post(handlers::users::toggle_user_active));

    let package_routes = Router::new()
        .route("/", get(handlers::packages::list_packages).post(handlers::packages::create_package))
        .route("/stats", get(handlers::packages::package_stats))
        .route("/{id}", get(handlers::packages::get_package).put(handlers::packages::update_package))
        .route("/{id}/label", get(handlers::documents::shipping_label_pdf));

    let coupon_routes = Router::new()
        .route("/", get(handlers::coupons::list_coupons).post(handlers::coupons::create_coupon))
        .route("/stats", get(handlers::coupons::coupon_stats))
        .route("/validate", post(handlers::coupons::validate_coupon))
        .route("/redeem", post(handlers::coupons::redeem_coupon))
        .route(
            "/{id}",
            get(handlers::coupons::get_coupon)
                .put(handlers::coupons::update_coupon)
                .delete(handlers::coupons::delete_coupon),
        )
        .route("/{id}/toggle", post(handlers::coupons::toggle_coupon));

    let policy_routes = Router::new()
        .route("/", get(handlers::policies::list_policies).post(handlers::policies::create_policy))
        .route("/stats", get(handlers::policies::policy_stats))
        .route("/{id}", get(handlers::policies::get_policy).put(handlers::policies::update_policy))
        .route("/{id}/archive", post(handlers::policies::archive_policy))
        .route("/{id}/acknowledge", post(handlers::policies::acknowledge_policy));

    let payment_routes = Router::new()
        .route("/providers", get(handlers::payments::list_providers))
        .route("/stats", get(handlers::payments::payment_stats))
        .route(
            "/providers/{id}",
            get(handlers::payments::get_provider).put(handlers::payments::update_credentials),
        )
        .route("/providers/{id}/test", post(handlers::payments::test_connection))
        .route("/providers/{id}/toggle", post(handlers::payments::toggle_provider));

    let quote_routes = Router::new()
        .route("/", get(handlers::quotes::list_quotes))
        .route("/stats", get(handlers::quotes::quote_stats))
        .route("/{id}", get(handlers::quotes::get_quote))
        .route("/{id}/respond", post(handlers::quotes::respond_quote))
        .route("/{id}/decision", post(handlers::quotes::decide_quote));

    let subscription_routes = Router::new()
        .route("/", get(handlers::subscriptions::list_subscriptions))
        .route("/stats", get(handlers::subscriptions::subscription_stats))
        .route("/{id}", get(handlers::subscriptions::get_subscription))
        .route("/{id}/plan", put(handlers::subscriptions::change_plan))
        .route("/{id}/cancel", post(handlers::subscriptions::cancel_subscription))
        .route("/{id}/reactivate", post(handlers::subscriptions::reactivate_subscription));

    let api_key_routes = Router::new()
        .route("/", get(handlers::api_keys::list_api_keys).post(handlers::api_keys::create_api_key))
        .route("/{id}", delete(handlers::api_keys::delete_api_key))
        .route("/{id}/revoke", post(handlers::api_keys::revoke_api_key));

    let system_routes = Router::new()
        .route(
            "/settings",
            get(handlers::system::get_settings).put(handlers::system::update_settings),
        )
        .route("/backup", post(handlers::system::run_backup))
        .route("/database", get(handlers::system::database_overview));

    let support_routes = Router::new()
        .route("/tickets", get(handlers::support::list_tickets))
        .route(
            "/tickets/{id}",
            get(handlers::support::get_ticket).patch(handlers::support::update_ticket),
        )
        .route("/analytics", get(handlers::support::support_analytics));

    let marketplace_routes = Router::new()
        .route(
            "/requests",
            get(handlers::marketplace::list_requests).post(handlers::marketplace::create_request),
        )
        .route("/stats", get(handlers::marketplace::marketplace_stats))
        .route("/requests/{id}", get(handlers::marketplace::get_request))
        .route("/requests/{id}/bids", post(handlers::marketplace::place_bid))
        .route("/requests/{id}/close", post(handlers::marketplace::close_request))
        .route("/requests/{id}/bids/{bid_id}/withdraw", post(handlers::marketplace::withdraw_bid))
        .route("/requests/{id}/bids/{bid_id}/award", post(handlers::marketplace::award_bid));

    let admin_routes = Router::new()
        .route("/footer-config", post(handlers::system::replace_footer))
        .route("/docs", post(handlers::docs::create_article))
        .route(
            "/docs/{slug}",
            put(handlers::docs::update_article).delete(handlers::docs::delete_article),
        );

    // Tudo abaixo exige token válido; o papel é checado por tela (RequireRole)
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/packages", package_routes)
        .nest("/coupons", coupon_routes)
        .nest("/policies", policy_routes)
        .nest("/payments", payment_routes)
        .nest("/quotes", quote_routes)
        .nest("/subscriptions", subscription_routes)
        .nest("/api-keys", api_key_routes)
        .nest("/system", system_routes)
        .nest("/support", support_routes)
        .nest("/marketplace", marketplace_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/test-api", get(handlers::api_keys::test_api))
        .nest("/api/auth", auth_routes)
        .nest("/api/public", public_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
