// src/models/package.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Aerial,
    AerialExpress,
    Maritime,
    MaritimeExpress,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Aerial,
        TransportMode::AerialExpress,
        TransportMode::Maritime,
        TransportMode::MaritimeExpress,
    ];

    pub fn is_aerial(&self) -> bool {
        matches!(self, TransportMode::Aerial | TransportMode::AerialExpress)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Aerial => "Aérien",
            TransportMode::AerialExpress => "Aérien Express",
            TransportMode::Maritime => "Maritime",
            TransportMode::MaritimeExpress => "Maritime Express",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Planned,
    InTransit,
    Arrived,
    Collected,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 4] = [
        PackageStatus::Planned,
        PackageStatus::InTransit,
        PackageStatus::Arrived,
        PackageStatus::Collected,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[validate(range(min = 0.0, message = "La longueur ne peut pas être négative."))]
    pub length_cm: f64,
    #[validate(range(min = 0.0, message = "La largeur ne peut pas être négative."))]
    pub width_cm: f64,
    #[validate(range(min = 0.0, message = "La hauteur ne peut pas être négative."))]
    pub height_cm: f64,
}

impl Dimensions {
    pub fn volume_m3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / 1_000_000.0
    }
}

// --- Colis ---
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub tracking_pin: String,
    pub description: String,
    pub weight_kg: Decimal,
    pub dimensions: Dimensions,
    pub transport_mode: TransportMode,
    pub status: PackageStatus,
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Package {
    const RESOURCE: &'static str = "package";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for Package {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.tracking_pin.as_str(),
            self.description.as_str(),
            self.client_name.as_str(),
        ]
    }

    fn search_id(&self) -> Option<Uuid> {
        Some(self.id)
    }
}

/// Teto para qualquer quantidade ou valor digitado. Longe do limite do Decimal,
/// então as contas de tarifa e desconto não estouram.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn ensure_below_max(val: &Decimal) -> Result<(), ValidationError> {
    if *val > MAX_AMOUNT {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &MAX_AMOUNT.to_string());
        err.message = Some("La valeur est trop grande.".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("La valeur ne peut pas être négative.".into());
        return Err(err);
    }
    ensure_below_max(val)
}

pub(crate) fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("La valeur doit être supérieure à zéro.".into());
        return Err(err);
    }
    ensure_below_max(val)
}

// Campos editáveis no modal de colis
#[derive(Debug, Clone, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageForm {
    #[validate(length(min = 1, message = "La description est obligatoire."))]
    pub description: String,
    #[validate(custom(function = "validate_positive"))]
    pub weight_kg: Decimal,
    #[validate(nested)]
    pub dimensions: Dimensions,
    pub transport_mode: TransportMode,
    pub status: PackageStatus,
    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    #[validate(length(min = 1, message = "Le nom du client est obligatoire."))]
    pub client_name: String,
}

impl Editable for Package {
    type Form = PackageForm;

    fn to_form(&self) -> PackageForm {
        PackageForm {
            description: self.description.clone(),
            weight_kg: self.weight_kg,
            dimensions: self.dimensions.clone(),
            transport_mode: self.transport_mode,
            status: self.status,
            price: self.price,
            payment_status: self.payment_status,
            client_name: self.client_name.clone(),
        }
    }

    fn apply_form(&self, form: PackageForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(Package {
            description: form.description,
            weight_kg: form.weight_kg,
            dimensions: form.dimensions,
            transport_mode: form.transport_mode,
            status: form.status,
            price: form.price,
            payment_status: form.payment_status,
            client_name: form.client_name,
            updated_at: now,
            ..self.clone()
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PackageQuery {
    pub search: Option<String>,
    pub status: Option<PackageStatus>,
    pub transport_mode: Option<TransportMode>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: PackageStatus,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub total_revenue: Decimal,
    pub paid_percentage: f64,
    pub total_weight_kg: Decimal,
}

// O que o rastreio público expõe (sem preço nem cliente)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub tracking_pin: String,
    pub description: String,
    pub transport_mode: TransportMode,
    pub status: PackageStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<&Package> for TrackingInfo {
    fn from(p: &Package) -> Self {
        TrackingInfo {
            tracking_pin: p.tracking_pin.clone(),
            description: p.description.clone(),
            transport_mode: p.transport_mode,
            status: p.status,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackagePayload {
    #[serde(flatten)]
    pub form: PackageForm,
    pub company_id: Option<Uuid>,
}
