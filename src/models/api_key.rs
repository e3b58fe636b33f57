// src/models/api_key.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{common::filter::Searchable, db::store::Record};

pub const KEY_PREFIX: &str = "ck_live_";
/// Quantos caracteres da chave ficam visíveis (e indexam a busca).
pub const VISIBLE_PREFIX_LEN: usize = 12;

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub prefix: String,

    #[serde(skip_serializing)] // Nunca sai na API
    pub key_hash: String,

    pub scopes: Vec<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Record for ApiKey {
    const RESOURCE: &'static str = "api key";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for ApiKey {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.prefix.as_str()]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyPayload {
    #[validate(length(min = 1, max = 64, message = "Le nom est obligatoire (64 caractères max)."))]
    pub name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub company_id: Option<Uuid>,
}

// A chave em texto puro só aparece nesta resposta.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApiKey {
    #[serde(flatten)]
    pub key: ApiKey,
    pub plaintext: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyQuery {
    pub search: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestResponse {
    pub status: &'static str,
    pub key_name: String,
    pub scopes: Vec<String>,
    pub checked_at: DateTime<Utc>,
}
