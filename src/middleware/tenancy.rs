// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{error::{ApiError, AppError}, i18n::I18nStore},
    db::store::TenantScope,
    middleware::{i18n::Locale, rbac::DenialReason},
    models::{auth::Session, user::Role},
};

// O nome do nosso cabeçalho HTTP customizado
const COMPANY_ID_HEADER: &str = "x-company-id";

// O escopo de empresa da requisição.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub TenantScope);

/// SUPER_ADMIN enxerga tudo (ou uma empresa, se pedir); os demais só a própria empresa.
pub fn resolve_scope(session: &Session, requested: Option<&str>) -> Result<TenantScope, AppError> {
    let requested = match requested {
        None => None,
        Some(raw) => Some(Uuid::parse_str(raw.trim()).map_err(|_| {
            let mut err = ValidationError::new("uuid");
            err.message = Some("L'en-tête X-Company-ID doit être un UUID.".into());
            let mut errors = ValidationErrors::new();
            errors.add("x-company-id", err);
            AppError::ValidationError(errors)
        })?),
    };

    if session.role == Role::SuperAdmin {
        return Ok(requested.map(TenantScope::Company).unwrap_or(TenantScope::Global));
    }

    let own = session.company_id.unwrap_or(Uuid::nil());
    match requested {
        Some(other) if other != own => Err(AppError::AccessDenied(DenialReason::OutsideCompany)),
        _ => Ok(TenantScope::Company(own)),
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;
        let i18n = I18nStore::global();

        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AppError::AccessDenied(DenialReason::Unauthenticated))
            .map_err(|e| e.to_api_error(&locale, i18n))?;

        let requested = parts
            .headers
            .get(COMPANY_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        resolve_scope(session, requested)
            .map(TenantContext)
            .map_err(|e| e.to_api_error(&locale, i18n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role, company_id: Option<Uuid>) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "x@example.com".into(),
            name: "X".into(),
            role,
            company_id,
        }
    }

    #[test]
    fn super_admin_is_global_unless_narrowed() {
        let s = session(Role::SuperAdmin, None);
        assert_eq!(resolve_scope(&s, None).unwrap(), TenantScope::Global);

        let company = Uuid::new_v4();
        assert_eq!(
            resolve_scope(&s, Some(&company.to_string())).unwrap(),
            TenantScope::Company(company)
        );
    }

    #[test]
    fn admin_is_pinned_to_own_company() {
        let own = Uuid::new_v4();
        let s = session(Role::Admin, Some(own));
        assert_eq!(resolve_scope(&s, None).unwrap(), TenantScope::Company(own));

        let other = Uuid::new_v4().to_string();
        assert!(matches!(
            resolve_scope(&s, Some(&other)),
            Err(AppError::AccessDenied(DenialReason::OutsideCompany))
        ));
    }

    #[test]
    fn malformed_header_is_a_validation_error() {
        let s = session(Role::SuperAdmin, None);
        assert!(matches!(resolve_scope(&s, Some("not-a-uuid")), Err(AppError::ValidationError(_))));
    }
}
