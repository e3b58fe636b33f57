// src/handlers/policies.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
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
        rbac::{PoliciesScreen, RequireRole},
        tenancy::TenantContext,
    },
    models::policy::{Policy, PolicyForm, PolicyQuery, PolicyStats},
};

#[utoipa::path(
    get,
    path = "/api/policies",
    tag = "Policies",
    responses(
        (status = 200, description = "Políticas filtradas", body = Vec<Policy>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        PolicyQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_policies(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Query(query): Query<PolicyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let policies = app_state
        .policy_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(policies)))
}

#[utoipa::path(
    get,
    path = "/api/policies/stats",
    tag = "Policies",
    responses(
        (status = 200, description = "Indicadores de conformidade", body = PolicyStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn policy_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .policy_service
        .stats(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/policies/{id}",
    tag = "Policies",
    responses(
        (status = 200, description = "Política", body = Policy),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(policy))
}

#[utoipa::path(
    post,
    path = "/api/policies",
    tag = "Policies",
    request_body = PolicyForm,
    responses(
        (status = 201, description = "Política criada", body = ActionResponse<Policy>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Json(form): Json<PolicyForm>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .create(&guard.session, &tenant.0, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(policy, notice))))
}

#[utoipa::path(
    put,
    path = "/api/policies/{id}",
    tag = "Policies",
    request_body = PolicyForm,
    responses(
        (status = 200, description = "Política atualizada", body = ActionResponse<Policy>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(form): Json<PolicyForm>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .update(&guard.session, &tenant.0, id, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(policy, notice)))
}

#[utoipa::path(
    post,
    path = "/api/policies/{id}/archive",
    tag = "Policies",
    responses(
        (status = 200, description = "Política arquivada", body = ActionResponse<Policy>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .archive(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(policy, notice)))
}

// Um funcionário a mais ciente da política
#[utoipa::path(
    post,
    path = "/api/policies/{id}/acknowledge",
    tag = "Policies",
    responses(
        (status = 200, description = "Ciência registrada", body = ActionResponse<Policy>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn acknowledge_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PoliciesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .acknowledge(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(policy, notice)))
}
