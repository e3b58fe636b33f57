// src/models/payment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentEnvironment {
    Sandbox,
    Production,
}

// Configuração de um agregador de pagamento (CinetPay, Flutterwave, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentProvider {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub api_key: String,
    pub secret_key: String,
    pub merchant_id: String,
    pub webhook_url: String,
    pub environment: PaymentEnvironment,
    pub is_connected: bool,
    pub is_active: bool,
    pub last_tested_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentProvider {
    pub fn has_credentials(&self) -> bool {
        [&self.api_key, &self.secret_key, &self.merchant_id]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

impl Record for PaymentProvider {
    const RESOURCE: &'static str = "payment provider";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for PaymentProvider {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.kind.as_str(), self.merchant_id.as_str()]
    }
}

/// Mostra só os 4 últimos caracteres.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 4 {
        return "•".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "•".repeat(8), tail)
}

// O que sai na API: segredos mascarados
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProviderView {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub api_key: String,
    pub secret_key: String,
    pub merchant_id: String,
    pub webhook_url: String,
    pub environment: PaymentEnvironment,
    pub is_connected: bool,
    pub is_active: bool,
    pub last_tested_at: Option<DateTime<Utc>>,
}

impl From<&PaymentProvider> for PaymentProviderView {
    fn from(p: &PaymentProvider) -> Self {
        PaymentProviderView {
            id: p.id,
            name: p.name.clone(),
            kind: p.kind.clone(),
            api_key: mask_secret(&p.api_key),
            secret_key: mask_secret(&p.secret_key),
            merchant_id: p.merchant_id.clone(),
            webhook_url: p.webhook_url.clone(),
            environment: p.environment,
            is_connected: p.is_connected,
            is_active: p.is_active,
            last_tested_at: p.last_tested_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsForm {
    #[serde(default)]
    pub api_key: String,
    /// Vazio mantém o segredo atual.
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub merchant_id: String,
    #[validate(url(message = "L'URL du webhook est invalide."))]
    pub webhook_url: String,
    pub environment: Option<PaymentEnvironment>,
}

impl Editable for PaymentProvider {
    type Form = CredentialsForm;

    fn to_form(&self) -> CredentialsForm {
        CredentialsForm {
            api_key: self.api_key.clone(),
            secret_key: String::new(),
            merchant_id: self.merchant_id.clone(),
            webhook_url: self.webhook_url.clone(),
            environment: Some(self.environment),
        }
    }

    fn apply_form(&self, form: CredentialsForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        let secret_key = if form.secret_key.trim().is_empty() {
            self.secret_key.clone()
        } else {
            form.secret_key.trim().to_string()
        };
        let updated = PaymentProvider {
            api_key: form.api_key.trim().to_string(),
            secret_key,
            merchant_id: form.merchant_id.trim().to_string(),
            webhook_url: form.webhook_url,
            environment: form.environment.unwrap_or(self.environment),
            updated_at: now,
            ..self.clone()
        };

        // Credencial nova precisa de novo teste de conexão.
        let changed = updated.api_key != self.api_key
            || updated.secret_key != self.secret_key
            || updated.merchant_id != self.merchant_id
            || updated.environment != self.environment;
        if changed {
            return Ok(PaymentProvider { is_connected: false, is_active: false, ..updated });
        }
        Ok(updated)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResult {
    pub provider_id: Uuid,
    pub connected: bool,
    pub latency_ms: u64,
    pub tested_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total: usize,
    pub connected: usize,
    pub active: usize,
    pub production: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_last_four() {
        assert_eq!(mask_secret("sk_live_123456"), "••••••••3456");
        assert_eq!(mask_secret("abc"), "•••");
        assert_eq!(mask_secret(""), "");
    }
}
