// src/models/quote.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::filter::Searchable,
    db::store::Record,
    models::package::{validate_not_negative, validate_positive, TransportMode},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Pending,
    Quoted,
    Accepted,
    Rejected,
}

// Pedido de cotação vindo do site público
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub reference: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub origin: String,
    pub destination: String,
    pub transport_mode: TransportMode,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub description: String,
    pub status: QuoteStatus,
    pub suggested_price: Option<Decimal>,
    pub quoted_price: Option<Decimal>,
    pub quoted_by: Option<Uuid>,
    pub quoted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Record for QuoteRequest {
    const RESOURCE: &'static str = "quote";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for QuoteRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.reference.as_str(),
            self.client_name.as_str(),
            self.client_email.as_str(),
            self.origin.as_str(),
            self.destination.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub client_name: String,
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub client_email: String,
    pub client_phone: Option<String>,
    #[validate(length(min = 1, message = "L'origine est obligatoire."))]
    pub origin: String,
    #[validate(length(min = 1, message = "La destination est obligatoire."))]
    pub destination: String,
    pub transport_mode: TransportMode,
    #[validate(custom(function = "validate_positive"))]
    pub weight_kg: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub volume_m3: Decimal,
    #[serde(default)]
    pub description: String,
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondQuotePayload {
    #[validate(custom(function = "validate_positive"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteDecision {
    Accepted,
    Rejected,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecideQuotePayload {
    pub decision: QuoteDecision,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub search: Option<String>,
    pub status: Option<QuoteStatus>,
    pub transport_mode: Option<TransportMode>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStats {
    pub total: usize,
    pub pending: usize,
    pub quoted: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub conversion_rate: f64,
    pub total_quoted_value: Decimal,
}
