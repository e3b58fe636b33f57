// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

use crate::{
    common::{error::{ApiError, AppError}, i18n::I18nStore},
    middleware::i18n::Locale,
    models::{auth::Session, user::Role},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum DenialReason {
    Unauthenticated,
    #[serde(rename_all = "camelCase")]
    RoleNotAllowed { role: Role, screen: &'static str },
    OutsideCompany,
}

/// Resultado tipado do portão de acesso de uma tela.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Authorized(Session),
    Denied(DenialReason),
}

impl Access {
    pub fn into_result(self) -> Result<Session, AppError> {
        match self {
            Access::Authorized(session) => Ok(session),
            Access::Denied(reason) => Err(AppError::AccessDenied(reason)),
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Access::Authorized(_))
    }
}

/// A checagem em si: sem sessão -> login; papel fora do conjunto -> negado.
pub fn authorize(session: Option<&Session>, allowed: &[Role], screen: &'static str) -> Access {
    match session {
        None => Access::Denied(DenialReason::Unauthenticated),
        Some(s) if allowed.contains(&s.role) => Access::Authorized(s.clone()),
        Some(s) => Access::Denied(DenialReason::RoleNotAllowed { role: s.role, screen }),
    }
}

/// 1. O Trait que define o conjunto de papéis de uma tela
pub trait RoleSet: Send + Sync + 'static {
    const SCREEN: &'static str;
    fn allowed() -> &'static [Role];
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T: RoleSet> {
    pub session: Session,
    _screen: PhantomData<T>,
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(locale) = Locale::from_request_parts(parts, state).await;

        let access = authorize(parts.extensions.get::<Session>(), T::allowed(), T::SCREEN);

        match access.into_result() {
            Ok(session) => Ok(RequireRole { session, _screen: PhantomData }),
            Err(err) => {
                tracing::warn!("⛔ Acesso negado à tela '{}': {}", T::SCREEN, err);
                Err(err.to_api_error(&locale, I18nStore::global()))
            }
        }
    }
}

// ---
// DEFINIÇÃO DAS TELAS (TIPOS)
// ---

macro_rules! role_set {
    ($name:ident, $screen:literal, [$($role:ident),+ $(,)?]) => {
        pub struct $name;
        impl RoleSet for $name {
            const SCREEN: &'static str = $screen;
            fn allowed() -> &'static [Role] {
                &[$(Role::$role),+]
            }
        }
    };
}

role_set!(PackagesScreen, "packages", [SuperAdmin]);
role_set!(UsersScreen, "users", [SuperAdmin, Admin]);
role_set!(CouponsScreen, "coupons", [SuperAdmin, Admin]);
role_set!(PoliciesScreen, "policies", [SuperAdmin, Admin]);
role_set!(QuotesScreen, "quotes", [SuperAdmin, Admin, Agent]);
role_set!(SupportScreen, "support", [SuperAdmin, Admin, Agent]);
role_set!(PaymentsScreen, "payments", [SuperAdmin]);
role_set!(SubscriptionsScreen, "subscriptions", [SuperAdmin]);
role_set!(ApiKeysScreen, "api-keys", [SuperAdmin]);
role_set!(SystemScreen, "system", [SuperAdmin]);
role_set!(FooterAdminScreen, "footer", [SuperAdmin]);
role_set!(DocsAdminScreen, "docs-admin", [SuperAdmin]);
role_set!(MarketplaceBidders, "marketplace-bids", [Agent, Affiliate]);
role_set!(MarketplaceManagers, "marketplace", [SuperAdmin, Admin, Client]);
role_set!(AnyRole, "dashboard", [SuperAdmin, Admin, Agent, Client, Affiliate]);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(role: Role) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            name: "Someone".into(),
            role,
            company_id: None,
        }
    }

    #[test]
    fn packages_screen_admits_only_super_admin() {
        for role in Role::ALL {
            let s = session(role);
            let access = authorize(Some(&s), PackagesScreen::allowed(), PackagesScreen::SCREEN);
            assert_eq!(access.is_authorized(), role == Role::SuperAdmin, "role {:?}", role);
        }
    }

    #[test]
    fn gate_passes_iff_role_in_set() {
        for role in Role::ALL {
            let s = session(role);
            let access = authorize(Some(&s), QuotesScreen::allowed(), QuotesScreen::SCREEN);
            assert_eq!(access.is_authorized(), QuotesScreen::allowed().contains(&role));
            if let Access::Denied(reason) = access {
                assert_eq!(reason, DenialReason::RoleNotAllowed { role, screen: "quotes" });
            }
        }
    }

    #[test]
    fn missing_session_is_unauthenticated() {
        let access = authorize(None, AnyRole::allowed(), AnyRole::SCREEN);
        assert_eq!(access, Access::Denied(DenialReason::Unauthenticated));
    }
}
