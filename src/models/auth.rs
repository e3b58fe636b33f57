// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::Role;

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub role: Role,
    pub company_id: Option<Uuid>,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// A sessão resolvida a partir do token, inserida nas extensions da requisição.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

impl Session {
    pub fn user(&self) -> SessionUser {
        SessionUser { id: self.user_id, role: self.role, company_id: self.company_id }
    }
}

// O formato `{ user: { role, companyId, id } }` consumido pelas telas
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}
