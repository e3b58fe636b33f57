// src/handlers/subscriptions.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, SubscriptionsScreen},
        tenancy::TenantContext,
    },
    models::subscription::{ChangePlanForm, Subscription, SubscriptionQuery, SubscriptionStats},
};

#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "Assinaturas", body = Vec<Subscription>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        SubscriptionQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_subscriptions(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
    Query(query): Query<SubscriptionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let subscriptions = app_state
        .subscription_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(subscriptions))
}

// MRR, churn, trial...
#[utoipa::path(
    get,
    path = "/api/subscriptions/stats",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "MRR e churn", body = SubscriptionStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn subscription_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .subscription_service
        .stats(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions/{id}",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "Assinatura", body = Subscription),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_subscription(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = app_state
        .subscription_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(subscription))
}

#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}/plan",
    tag = "Subscriptions",
    request_body = ChangePlanForm,
    responses(
        (status = 200, description = "Plano trocado", body = ActionResponse<Subscription>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(form): Json<ChangePlanForm>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = app_state
        .subscription_service
        .change_plan(&guard.session, &tenant.0, id, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(subscription, notice)))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/cancel",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "Assinatura cancelada", body = ActionResponse<Subscription>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_subscription(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = app_state
        .subscription_service
        .cancel(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deactivated");
    Ok(Json(ActionResponse::new(subscription, notice)))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/reactivate",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "Assinatura reativada", body = ActionResponse<Subscription>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn reactivate_subscription(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SubscriptionsScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = app_state
        .subscription_service
        .reactivate(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.activated");
    Ok(Json(ActionResponse::new(subscription, notice)))
}
