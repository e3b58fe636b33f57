// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::{clock::Clock, error::AppError},
    db::ResourceStore,
    models::{
        auth::{AuthResponse, Claims, Session, SessionResponse, SessionStatus},
        user::User,
    },
};

#[derive(Clone)]
pub struct AuthService {
    users: ResourceStore<User>,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        users: ResourceStore<User>,
        jwt_secret: String,
        token_ttl: chrono::Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { users, jwt_secret, token_ttl, clock }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by(|u| u.email == email)?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        // Conta desativada não entra, mas sem revelar que o e-mail existe
        if !is_password_valid || !user.is_active {
            tracing::warn!("Tentativa de login recusada para {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        tracing::info!("🔑 Login de {} ({:?})", user.email, user.role);

        Ok(AuthResponse { token, user: session_of(&user).user() })
    }

    /// Decodifica o token e reconstrói a sessão a partir do usuário atual
    /// (papel alterado ou conta desativada valem na hora).
    pub fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        // A expiração é checada contra o nosso relógio, não o do sistema.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.exp < self.clock.now().timestamp() as usize {
            return Err(AppError::InvalidToken);
        }

        let user = self
            .users
            .find_by(|u| u.id == token_data.claims.sub)?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(session_of(&user))
    }

    /// `GET /api/auth/session`: nunca falha, só informa o estado.
    pub fn session_status(&self, token: Option<&str>) -> SessionResponse {
        match token.map(|t| self.validate_token(t)) {
            Some(Ok(session)) => SessionResponse {
                status: SessionStatus::Authenticated,
                user: Some(session.user()),
            },
            _ => SessionResponse { status: SessionStatus::Unauthenticated, user: None },
        }
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = self.clock.now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id,
            role: user.role,
            company_id: user.company_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

fn session_of(user: &User) -> Session {
    Session {
        user_id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        company_id: user.company_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        models::{auth::SessionStatus, user::Role},
    };
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn service(clock: FixedClock, active: bool) -> (AuthService, Uuid) {
        let id = Uuid::new_v4();
        let now = clock.now();
        let users = ResourceStore::seeded(vec![User {
            id,
            email: "agent@example.com".into(),
            name: "Agent".into(),
            role: Role::Agent,
            is_active: active,
            company_id: Some(Uuid::new_v4()),
            password_hash: bcrypt::hash("password123", 4).unwrap(),
            created_at: now,
            updated_at: now,
        }]);
        (AuthService::new(users, "secret".into(), Duration::hours(1), Arc::new(clock)), id)
    }

    #[tokio::test]
    async fn login_issues_token_carrying_role_and_company() {
        let (auth, id) = service(FixedClock::at(Utc::now()), true);
        let response = auth.login_user(" Agent@Example.com ", "password123").await.unwrap();

        let session = auth.validate_token(&response.token).unwrap();
        assert_eq!(session.user_id, id);
        assert_eq!(session.role, Role::Agent);
        assert_eq!(response.user.company_id, session.company_id);
    }

    #[tokio::test]
    async fn wrong_password_and_inactive_accounts_are_rejected() {
        let (auth, _) = service(FixedClock::at(Utc::now()), true);
        assert!(matches!(
            auth.login_user("agent@example.com", "nope-nope").await,
            Err(AppError::InvalidCredentials)
        ));

        let (inactive, _) = service(FixedClock::at(Utc::now()), false);
        assert!(matches!(
            inactive.login_user("agent@example.com", "password123").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn token_expires_with_the_clock() {
        let clock = FixedClock::at(Utc::now());
        let (auth, _) = service(clock.clone(), true);
        let token = auth.login_user("agent@example.com", "password123").await.unwrap().token;

        clock.advance(Duration::hours(2));

        assert!(matches!(auth.validate_token(&token), Err(AppError::InvalidToken)));
        assert_eq!(auth.session_status(Some(&token)).status, SessionStatus::Unauthenticated);
    }
}
