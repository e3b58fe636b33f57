// src/handlers/auth.rs

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::bearer_token, i18n::Locale},
    models::auth::{AuthResponse, LoginUserPayload, SessionResponse},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Token JWT e papel do usuário", body = AuthResponse),
        (status = 401, description = "E-mail ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, app_state.i18n_store))?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(response))
}

// Pública: o frontend pergunta se ainda há sessão válida
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Estado da sessão (authenticated, expired ou anonymous)", body = SessionResponse)
    )
)]
pub async fn session(State(app_state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = bearer_token(&headers);
    Json(app_state.auth_service.session_status(token.as_deref()))
}
