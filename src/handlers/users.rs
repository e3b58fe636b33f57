// src/handlers/users.rs

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
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, UsersScreen},
        tenancy::TenantContext,
    },
    models::user::{CreateUserPayload, User, UserForm, UserPreferences, UserQuery, UserStats},
};

// ---
// Handler: list_users
// ---
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Usuários visíveis no escopo", body = Vec<User>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        UserQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "Users",
    responses(
        (status = 200, description = "Faixa de indicadores", body = UserStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn user_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .user_service
        .stats(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário", body = User),
        (status = 404, description = "Fora do escopo ou inexistente"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(user))
}

// ---
// Handler: create_user
// ---
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = ActionResponse<User>),
        (status = 409, description = "E-mail já usado"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .create(&guard.session, &tenant.0, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(user, notice))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    request_body = UserForm,
    responses(
        (status = 200, description = "Usuário atualizado", body = ActionResponse<User>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(form): Json<UserForm>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .update(&guard.session, &tenant.0, id, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(user, notice)))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/toggle-active",
    tag = "Users",
    responses(
        (status = 200, description = "Status ativo invertido", body = ActionResponse<User>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_user_active(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .toggle_active(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let key = if user.is_active { "notice.activated" } else { "notice.deactivated" };
    let notice = Notice::success(&locale, app_state.i18n_store, key);
    Ok(Json(ActionResponse::new(user, notice)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário excluído", body = ActionResponse<User>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<UsersScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .user_service
        .delete(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deleted");
    Ok(Json(ActionResponse::new(removed, notice)))
}

// ---
// Rotas do próprio usuário (qualquer papel autenticado)
// ---
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário da sessão", body = User),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .me(&session)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/me/preferences",
    tag = "Users",
    responses(
        (status = 200, description = "Preferências", body = UserPreferences),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let preferences = app_state
        .user_service
        .preferences(session.user_id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(preferences))
}

#[utoipa::path(
    put,
    path = "/api/users/me/preferences",
    tag = "Users",
    request_body = UserPreferences,
    responses(
        (status = 200, description = "Preferências salvas", body = ActionResponse<UserPreferences>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_preferences(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(preferences): Json<UserPreferences>,
) -> Result<impl IntoResponse, ApiError> {
    let preferences = app_state
        .user_service
        .set_preferences(session.user_id, preferences)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(preferences, notice)))
}
