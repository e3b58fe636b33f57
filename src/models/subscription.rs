// src/models/subscription.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

// Assinatura SaaS de uma transportadora
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub company_name: String,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,
    pub amount: Decimal,
    pub addons: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub renews_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Valor normalizado por mês (anual / 12).
    pub fn monthly_amount(&self) -> Decimal {
        match self.billing_cycle {
            BillingCycle::Monthly => self.amount,
            BillingCycle::Yearly => (self.amount / Decimal::from(12)).round_dp(2),
        }
    }
}

impl Record for Subscription {
    const RESOURCE: &'static str = "subscription";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for Subscription {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.company_name.as_str(), self.plan_name.as_str()]
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlanForm {
    pub plan_id: Uuid,
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub addons: Vec<String>,
}

/// Troca de plano já resolvida contra o catálogo (nome e valor calculados).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub plan_id: Uuid,
    pub plan_name: String,
    pub billing_cycle: BillingCycle,
    pub amount: Decimal,
    pub addons: Vec<String>,
}

impl Editable for Subscription {
    type Form = PlanDraft;

    fn to_form(&self) -> PlanDraft {
        PlanDraft {
            plan_id: self.plan_id,
            plan_name: self.plan_name.clone(),
            billing_cycle: self.billing_cycle,
            amount: self.amount,
            addons: self.addons.clone(),
        }
    }

    fn apply_form(&self, form: PlanDraft, _now: DateTime<Utc>) -> Result<Self, AppError> {
        if form.amount.is_sign_negative() {
            return Err(AppError::Conflict("Le montant de l'abonnement ne peut pas être négatif.".into()));
        }
        Ok(Subscription {
            plan_id: form.plan_id,
            plan_name: form.plan_name,
            billing_cycle: form.billing_cycle,
            amount: form.amount,
            addons: form.addons,
            ..self.clone()
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionQuery {
    pub search: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub billing_cycle: Option<BillingCycle>,
    pub plan_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStats {
    pub total: usize,
    pub active: usize,
    pub trialing: usize,
    pub past_due: usize,
    pub cancelled: usize,
    pub monthly_recurring_revenue: Decimal,
    pub churn_rate: f64,
}
