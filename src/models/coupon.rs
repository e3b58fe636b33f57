// src/models/coupon.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
    models::package::{validate_not_negative, TransportMode},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Fixed,
    FreeShipping,
}

/// Status calculado a partir do relógio; nunca é gravado.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponStatus {
    Active,
    Expired,
    Exhausted,
    Scheduled,
    Inactive,
}

impl CouponStatus {
    pub fn label_key(&self) -> &'static str {
        match self {
            CouponStatus::Active => "coupon.status.ACTIVE",
            CouponStatus::Expired => "coupon.status.EXPIRED",
            CouponStatus::Exhausted => "coupon.status.EXHAUSTED",
            CouponStatus::Scheduled => "coupon.status.SCHEDULED",
            CouponStatus::Inactive => "coupon.status.INACTIVE",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub usage_count: u32,
    pub usage_limit: Option<u32>,
    pub min_order_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Vazio = vale para todos os modos.
    pub transport_modes: Vec<TransportMode>,
    pub first_time_only: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    pub fn status_at(&self, now: DateTime<Utc>) -> CouponStatus {
        if !self.is_active {
            CouponStatus::Inactive
        } else if now < self.valid_from {
            CouponStatus::Scheduled
        } else if now > self.valid_to {
            CouponStatus::Expired
        } else if self.usage_limit.is_some_and(|limit| self.usage_count >= limit) {
            CouponStatus::Exhausted
        } else {
            CouponStatus::Active
        }
    }

    pub fn applies_to(&self, mode: TransportMode) -> bool {
        self.transport_modes.is_empty() || self.transport_modes.contains(&mode)
    }
}

impl Record for Coupon {
    const RESOURCE: &'static str = "coupon";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for Coupon {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.description.as_str()]
    }
}

fn validate_window(form: &CouponForm) -> Result<(), ValidationError> {
    if form.valid_to <= form.valid_from {
        let mut err = ValidationError::new("window");
        err.message = Some("La date de fin doit être postérieure à la date de début.".into());
        return Err(err);
    }
    if form.discount_type == DiscountType::Percentage && form.value > Decimal::from(100) {
        let mut err = ValidationError::new("range");
        err.message = Some("Un pourcentage ne peut pas dépasser 100.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window"))]
pub struct CouponForm {
    #[validate(length(min = 3, max = 32, message = "Le code doit contenir entre 3 et 32 caractères."))]
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub discount_type: DiscountType,
    #[validate(custom(function = "validate_not_negative"))]
    pub value: Decimal,
    pub usage_limit: Option<u32>,
    pub min_order_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default)]
    pub transport_modes: Vec<TransportMode>,
    #[serde(default)]
    pub first_time_only: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl Coupon {
    pub fn from_form(form: CouponForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(Coupon {
            id: Uuid::new_v4(),
            code: normalize_code(&form.code),
            description: form.description,
            discount_type: form.discount_type,
            value: form.value,
            usage_count: 0,
            usage_limit: form.usage_limit,
            min_order_amount: form.min_order_amount,
            max_discount: form.max_discount,
            valid_from: form.valid_from,
            valid_to: form.valid_to,
            transport_modes: form.transport_modes,
            first_time_only: form.first_time_only,
            is_active: form.is_active,
            created_at: now,
        })
    }
}

impl Editable for Coupon {
    type Form = CouponForm;

    fn to_form(&self) -> CouponForm {
        CouponForm {
            code: self.code.clone(),
            description: self.description.clone(),
            discount_type: self.discount_type,
            value: self.value,
            usage_limit: self.usage_limit,
            min_order_amount: self.min_order_amount,
            max_discount: self.max_discount,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            transport_modes: self.transport_modes.clone(),
            first_time_only: self.first_time_only,
            is_active: self.is_active,
        }
    }

    // O contador de uso não é editável.
    fn apply_form(&self, form: CouponForm, _now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(Coupon {
            code: normalize_code(&form.code),
            description: form.description,
            discount_type: form.discount_type,
            value: form.value,
            usage_limit: form.usage_limit,
            min_order_amount: form.min_order_amount,
            max_discount: form.max_discount,
            valid_from: form.valid_from,
            valid_to: form.valid_to,
            transport_modes: form.transport_modes,
            first_time_only: form.first_time_only,
            is_active: form.is_active,
            ..self.clone()
        })
    }
}

// Linha da tabela: o cupom + o badge calculado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponView {
    #[serde(flatten)]
    pub coupon: Coupon,
    pub status: CouponStatus,
    pub status_label: String,
    pub usage_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuery {
    pub search: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub status: Option<CouponStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_usage: u64,
    pub average_usage_rate: f64,
}

// --- Motor de promoções ---

/// Pedido contra o qual um cupom é avaliado.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderContext {
    #[validate(length(min = 1, message = "Le code est obligatoire."))]
    pub code: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub order_amount: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub shipping_cost: Decimal,
    pub transport_mode: TransportMode,
}

/// Histórico do cliente, calculado no servidor a partir dos resgates gravados.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerHistory {
    pub prior_redemptions: usize,
}

impl CustomerHistory {
    pub fn is_first_order(&self) -> bool {
        self.prior_redemptions == 0
    }
}

// Cada resgate confirmado fica registrado
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: Uuid,
    pub coupon_id: Uuid,
    pub code: String,
    pub user_id: Uuid,
    pub company_id: Option<Uuid>,
    pub discount_amount: Decimal,
    pub redeemed_at: DateTime<Utc>,
}

impl Record for Redemption {
    const RESOURCE: &'static str = "redemption";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CouponRejection {
    Inactive,
    NotYetValid,
    Expired,
    UsageLimitReached,
    MinimumNotMet,
    TransportModeNotEligible,
    FirstOrderOnly,
}

impl CouponRejection {
    pub fn message_key(&self) -> &'static str {
        match self {
            CouponRejection::Inactive => "coupon.rejected.inactive",
            CouponRejection::NotYetValid => "coupon.rejected.not_yet_valid",
            CouponRejection::Expired => "coupon.rejected.expired",
            CouponRejection::UsageLimitReached => "coupon.rejected.usage_limit",
            CouponRejection::MinimumNotMet => "coupon.rejected.minimum",
            CouponRejection::TransportModeNotEligible => "coupon.rejected.transport_mode",
            CouponRejection::FirstOrderOnly => "coupon.rejected.first_order",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_amount: Decimal,
    pub order_total: Decimal,
    pub final_total: Decimal,
}
