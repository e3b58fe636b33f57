// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    config::AppState,
    middleware::{i18n::Locale, rbac::DenialReason},
    models::auth::Session,
};

/// Lê o token `Authorization: Bearer ...` dos cabeçalhos, se houver.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

// O middleware em si: valida o token e insere a Sessão nas extensions
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_header(
        request
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    );

    // Sem token: o frontend deve mandar para a tela de login
    let session = bearer_token(request.headers())
        .ok_or(AppError::AccessDenied(DenialReason::Unauthenticated))
        .and_then(|token| app_state.auth_service.validate_token(&token))
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão diretamente nos handlers
pub struct AuthenticatedUser(pub Session);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| {
                AppError::AccessDenied(DenialReason::Unauthenticated)
                    .to_api_error(&locale, I18nStore::global())
            })
    }
}
