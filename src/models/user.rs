// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin, // Vira "SUPER_ADMIN"
    Admin,
    Agent,
    Client,
    Affiliate,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::SuperAdmin, Role::Admin, Role::Agent, Role::Client, Role::Affiliate];
}

// Usuário da plataforma
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
    pub company_id: Option<Uuid>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for User {
    const RESOURCE: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }

    const UNOWNED_IS_SHARED: bool = false;
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), self.name.as_str()]
    }
}

// Campos editáveis no modal de usuário
#[derive(Debug, Clone, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

impl Editable for User {
    type Form = UserForm;

    fn to_form(&self) -> UserForm {
        UserForm {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }

    fn apply_form(&self, form: UserForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(User {
            email: form.email.trim().to_lowercase(),
            name: form.name.trim().to_string(),
            role: form.role,
            is_active: form.is_active,
            updated_at: now,
            ..self.clone()
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub name: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleCount {
    pub role: Role,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub by_role: Vec<RoleCount>,
}

// Preferências do usuário (antes guardadas no localStorage do navegador)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub finance_mode: bool,
}
