// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    middleware::{i18n::Locale, rbac::DenialReason},
    models::coupon::CouponRejection,
};

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Campo obrigatório: {0}")]
    RequiredField(&'static str),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado: {0:?}")]
    AccessDenied(DenialReason),

    #[error("{resource} {id} não encontrado")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Transição inválida: {0}")]
    InvalidTransition(String),

    #[error("Cupom recusado: {0:?}")]
    CouponRejected(CouponRejection),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        AppError::NotFound { resource, id: id.to_string() }
    }

    /// Chave estável enviada ao frontend para distinguir erro de usuário,
    /// falha de acesso e falha interna.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::RequiredField(_) => "validation",
            AppError::EmailAlreadyExists | AppError::Conflict(_) => "conflict",
            AppError::InvalidCredentials | AppError::InvalidToken => "unauthenticated",
            AppError::AccessDenied(DenialReason::Unauthenticated) => "unauthenticated",
            AppError::AccessDenied(_) => "access_denied",
            AppError::UserNotFound | AppError::NotFound { .. } => "not_found",
            AppError::InvalidTransition(_) => "invalid_transition",
            AppError::CouponRejected(_) => "coupon_rejected",
            _ => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::RequiredField(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(DenialReason::Unauthenticated) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidTransition(_) => StatusCode::CONFLICT,
            AppError::CouponRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro de domínio na resposta HTTP, traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();
        let kind = self.kind();

        let (error, details) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| i18n.translate(lang, &format!("validation.{}", e.code)))
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                (i18n.translate(lang, "error.validation"), Some(Value::Object(details)))
            }
            AppError::RequiredField(field) => (
                i18n.format(lang, "error.required_field", &[("field", *field)]),
                Some(json!({ "field": field })),
            ),
            AppError::EmailAlreadyExists => (i18n.translate(lang, "error.email_exists"), None),
            AppError::InvalidCredentials => (i18n.translate(lang, "error.invalid_credentials"), None),
            AppError::InvalidToken => (i18n.translate(lang, "error.invalid_token"), None),
            AppError::UserNotFound => (i18n.translate(lang, "error.user_not_found"), None),
            AppError::AccessDenied(reason) => match reason {
                DenialReason::Unauthenticated => (
                    i18n.translate(lang, "error.unauthenticated"),
                    Some(json!({ "redirectTo": "/auth/signin" })),
                ),
                DenialReason::RoleNotAllowed { role, screen } => (
                    i18n.format(lang, "error.access_denied", &[("screen", *screen)]),
                    Some(json!({ "role": role, "screen": screen, "redirectTo": "/dashboard" })),
                ),
                DenialReason::OutsideCompany => (i18n.translate(lang, "error.outside_company"), None),
            },
            AppError::NotFound { resource, id } => (
                i18n.format(lang, "error.not_found", &[("resource", *resource)]),
                Some(json!({ "resource": resource, "id": id })),
            ),
            AppError::Conflict(message) | AppError::InvalidTransition(message) => {
                (message.clone(), None)
            }
            AppError::CouponRejected(rejection) => (
                i18n.translate(lang, rejection.message_key()),
                Some(json!({ "reason": rejection })),
            ),
            // Todos os outros erros viram 500. O `tracing` loga a mensagem detalhada.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (i18n.translate(lang, "error.internal"), None)
            }
        };

        ApiError { status, kind, error, details }
    }
}

// A face HTTP de um erro: status, chave estável e mensagem já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "kind": self.kind, "error": self.error });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

// Para os pontos onde não há Locale disponível (middlewares), usamos o idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::global()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    #[test]
    fn denials_map_to_distinct_statuses() {
        let unauthenticated = AppError::AccessDenied(DenialReason::Unauthenticated);
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let forbidden = AppError::AccessDenied(DenialReason::RoleNotAllowed {
            role: Role::Client,
            screen: "packages",
        });
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(forbidden.kind(), "access_denied");
    }

    #[test]
    fn not_found_is_localized() {
        let i18n = I18nStore::global();
        let api = AppError::not_found("package", Uuid::nil())
            .to_api_error(&Locale("en".into()), i18n);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "package not found");
    }

    #[test]
    fn internal_errors_hide_details() {
        let i18n = I18nStore::global();
        let api = AppError::InternalServerError(anyhow::anyhow!("lock poisoned"))
            .to_api_error(&Locale("fr".into()), i18n);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("lock"));
    }
}
