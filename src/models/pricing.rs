// src/models/pricing.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::store::Record,
    models::package::{validate_not_negative, validate_positive, TransportMode},
};

// Plano SaaS vendido às transportadoras
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    pub max_users: Option<u32>,
    pub max_packages_per_month: Option<u32>,
    pub features: Vec<String>,
    pub is_popular: bool,
}

impl Record for Plan {
    const RESOURCE: &'static str = "plan";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub monthly_price: Decimal,
}

impl Record for Addon {
    const RESOURCE: &'static str = "addon";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModeRate {
    pub transport_mode: TransportMode,
    /// Modos aéreos cobram por kg taxável.
    pub per_kg: Decimal,
    /// Modos marítimos cobram por m³.
    pub per_cubic_meter: Decimal,
    pub transit_days: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    pub currency: String,
    pub volumetric_divisor: Decimal,
    pub minimum_charge: Decimal,
    pub yearly_discount_percent: Decimal,
    pub rates: Vec<ModeRate>,
}

impl PricingSettings {
    pub fn rate_for(&self, mode: TransportMode) -> Option<&ModeRate> {
        self.rates.iter().find(|r| r.transport_mode == mode)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub transport_mode: TransportMode,
    #[validate(custom(function = "validate_positive"))]
    pub weight_kg: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub volume_m3: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub transport_mode: TransportMode,
    pub chargeable_weight_kg: Decimal,
    pub volume_m3: Decimal,
    pub amount: Decimal,
    pub currency: String,
    pub transit_days: String,
}
