// src/handlers/system.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{FooterAdminScreen, RequireRole, SystemScreen},
    },
    models::{
        footer::FooterConfig,
        system::{DatabaseOverview, DatabaseSettings, SystemSettings},
    },
};

// ====================================================================
//  CONFIGURAÇÕES DO SISTEMA
// ====================================================================

#[utoipa::path(
    get,
    path = "/api/system/settings",
    tag = "System",
    responses(
        (status = 200, description = "Configurações da plataforma", body = SystemSettings),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SystemScreen>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .system_service
        .get()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/system/settings",
    tag = "System",
    request_body = SystemSettings,
    responses(
        (status = 200, description = "Configurações salvas", body = ActionResponse<SystemSettings>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SystemScreen>,
    Json(settings): Json<SystemSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .system_service
        .update(&guard.session, settings)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(settings, notice)))
}

#[utoipa::path(
    post,
    path = "/api/system/backup",
    tag = "System",
    responses(
        (status = 200, description = "Backup concluído", body = ActionResponse<DatabaseSettings>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn run_backup(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SystemScreen>,
) -> Result<impl IntoResponse, ApiError> {
    let database = app_state
        .system_service
        .run_backup(&guard.session)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.backup_done");
    Ok(Json(ActionResponse::new(database, notice)))
}

#[utoipa::path(
    get,
    path = "/api/system/database",
    tag = "System",
    responses(
        (status = 200, description = "Registros por store", body = DatabaseOverview),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn database_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SystemScreen>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state
        .system_service
        .database_overview()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(overview))
}

// ====================================================================
//  RODAPÉ DO SITE
// ====================================================================

#[utoipa::path(
    post,
    path = "/api/admin/footer-config",
    tag = "System",
    request_body = FooterConfig,
    responses(
        (status = 200, description = "Rodapé substituído", body = ActionResponse<FooterConfig>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn replace_footer(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<FooterAdminScreen>,
    Json(config): Json<FooterConfig>,
) -> Result<impl IntoResponse, ApiError> {
    let config = app_state
        .footer_service
        .replace(&guard.session, config)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(config, notice)))
}
