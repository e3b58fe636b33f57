// src/models/marketplace.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::filter::Searchable,
    db::store::Record,
    models::package::validate_positive,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Freight,
    Customs,
    Warehousing,
    LastMile,
    Insurance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Open,
    Awarded,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl BidStatus {
    /// Lance que ainda conta para o pedido.
    pub fn is_live(&self) -> bool {
        matches!(self, BidStatus::Pending | BidStatus::Accepted)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub amount: Decimal,
    pub delivery_days: u32,
    pub message: String,
    pub status: BidStatus,
    pub submitted_at: DateTime<Utc>,
}

// Pedido de serviço publicado no marketplace
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub requester_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    pub origin: String,
    pub destination: String,
    pub budget: Decimal,
    pub deadline: DateTime<Utc>,
    pub status: RequestStatus,
    pub bids: Vec<Bid>,
    pub awarded_bid_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ServiceRequest {
    pub fn live_bids(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter().filter(|b| b.status.is_live())
    }

    pub fn lowest_bid(&self) -> Option<Decimal> {
        self.live_bids().map(|b| b.amount).min()
    }
}

impl Record for ServiceRequest {
    const RESOURCE: &'static str = "service request";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for ServiceRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.origin.as_str(),
            self.destination.as_str(),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequestPayload {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ServiceCategory,
    #[validate(length(min = 1, message = "L'origine est obligatoire."))]
    pub origin: String,
    #[validate(length(min = 1, message = "La destination est obligatoire."))]
    pub destination: String,
    #[validate(custom(function = "validate_positive"))]
    pub budget: Decimal,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    #[validate(range(min = 1, message = "Le délai de livraison doit être d'au moins un jour."))]
    pub delivery_days: u32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestQuery {
    pub search: Option<String>,
    pub status: Option<RequestStatus>,
    pub category: Option<ServiceCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceStats {
    pub total_requests: usize,
    pub open_requests: usize,
    pub awarded_requests: usize,
    pub total_bids: usize,
    pub average_bids_per_request: f64,
    /// Economia média do lance vencedor em relação ao orçamento, em %.
    pub average_savings_percent: f64,
}
