// src/handlers/api_keys.rs

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ApiKeysScreen, RequireRole},
        tenancy::TenantContext,
    },
    models::api_key::{ApiKey, ApiKeyQuery, ApiTestResponse, CreateApiKeyPayload, CreatedApiKey},
};

const API_KEY_HEADER: &str = "x-api-key";

#[utoipa::path(
    get,
    path = "/api/api-keys",
    tag = "API Keys",
    responses(
        (status = 200, description = "Chaves (sem o hash)", body = Vec<ApiKey>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        ApiKeyQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_api_keys(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<ApiKeysScreen>,
    tenant: TenantContext,
    Query(query): Query<ApiKeyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let keys = app_state
        .api_key_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(keys))
}

// ---
// Handler: create_api_key
// A chave em texto puro volta só aqui, uma única vez.
// ---
#[utoipa::path(
    post,
    path = "/api/api-keys",
    tag = "API Keys",
    request_body = CreateApiKeyPayload,
    responses(
        (status = 201, description = "Chave criada; o texto puro aparece só aqui", body = ActionResponse<CreatedApiKey>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_api_key(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ApiKeysScreen>,
    tenant: TenantContext,
    Json(payload): Json<CreateApiKeyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = app_state
        .api_key_service
        .create(&guard.session, &tenant.0, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(created, notice))))
}

#[utoipa::path(
    post,
    path = "/api/api-keys/{id}/revoke",
    tag = "API Keys",
    responses(
        (status = 200, description = "Chave revogada", body = ActionResponse<ApiKey>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_api_key(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ApiKeysScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let key = app_state
        .api_key_service
        .revoke(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deactivated");
    Ok(Json(ActionResponse::new(key, notice)))
}

#[utoipa::path(
    delete,
    path = "/api/api-keys/{id}",
    tag = "API Keys",
    responses(
        (status = 200, description = "Chave excluída", body = ActionResponse<ApiKey>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_api_key(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<ApiKeysScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .api_key_service
        .delete(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deleted");
    Ok(Json(ActionResponse::new(removed, notice)))
}

// ---
// Handler: test_api (GET /api/test-api, autenticado por X-Api-Key)
// ---
#[utoipa::path(
    get,
    path = "/api/test-api",
    tag = "API Keys",
    responses(
        (status = 200, description = "Chave válida", body = ApiTestResponse),
        (status = 401, description = "Chave ausente, revogada ou desconhecida")
    ),
    params(
        ("x-api-key" = String, Header, description = "Chave de API")
    )
)]
pub async fn test_api(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, app_state.i18n_store))?;

    let response = app_state
        .api_key_service
        .authenticate(presented)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(response))
}
