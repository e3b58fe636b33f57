// src/services/subscription_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        clock::Clock,
        editor::Editor,
        error::AppError,
        filter::Projection,
        stats::{count_where, percentage, sum_decimal},
    },
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        pricing::{Addon, Plan},
        subscription::{
            BillingCycle, ChangePlanForm, PlanDraft, Subscription, SubscriptionQuery, SubscriptionStats,
            SubscriptionStatus,
        },
    },
};

fn next_renewal(from: DateTime<Utc>, cycle: BillingCycle) -> DateTime<Utc> {
    match cycle {
        BillingCycle::Monthly => from + Duration::days(30),
        BillingCycle::Yearly => from + Duration::days(365),
    }
}

#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: ResourceStore<Subscription>,
    plans: ResourceStore<Plan>,
    addons: ResourceStore<Addon>,
    clock: Arc<dyn Clock>,
}

impl SubscriptionService {
    pub fn new(
        subscriptions: ResourceStore<Subscription>,
        plans: ResourceStore<Plan>,
        addons: ResourceStore<Addon>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { subscriptions, plans, addons, clock }
    }

    pub fn list(&self, scope: &TenantScope, query: &SubscriptionQuery) -> Result<Vec<Subscription>, AppError> {
        let subscriptions = self.subscriptions.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.status, |s: &Subscription| s.status)
            .filter_eq(query.billing_cycle, |s: &Subscription| s.billing_cycle)
            .filter_eq(query.plan_id, |s: &Subscription| s.plan_id)
            .apply(&subscriptions))
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<Subscription, AppError> {
        self.subscriptions.find(id, scope)
    }

    /// Resolve o plano e os add-ons escolhidos e calcula o valor do ciclo.
    fn resolve(&self, form: ChangePlanForm) -> Result<PlanDraft, AppError> {
        let plan = self.plans.find(form.plan_id, &TenantScope::Global)?;

        let mut addons_monthly = Decimal::ZERO;
        for slug in &form.addons {
            let addon = self
                .addons
                .find_by(|a| &a.slug == slug)?
                .ok_or_else(|| AppError::NotFound { resource: "addon", id: slug.clone() })?;
            addons_monthly += addon.monthly_price;
        }

        let amount = match form.billing_cycle {
            BillingCycle::Monthly => plan.monthly_price + addons_monthly,
            BillingCycle::Yearly => plan.yearly_price + addons_monthly * Decimal::from(12),
        };

        Ok(PlanDraft {
            plan_id: plan.id,
            plan_name: plan.name,
            billing_cycle: form.billing_cycle,
            amount,
            addons: form.addons,
        })
    }

    pub fn change_plan(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        form: ChangePlanForm,
    ) -> Result<Subscription, AppError> {
        let current = self.subscriptions.find(id, scope)?;
        if current.status == SubscriptionStatus::Cancelled {
            return Err(AppError::InvalidTransition(format!(
                "L'abonnement de {} est résilié : réactivez-le avant de changer de formule.",
                current.company_name
            )));
        }

        let draft = self.resolve(form)?;
        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(draft)?;
        let subscription = self.subscriptions.apply(editor.submit(self.clock.now())?)?;

        tracing::info!(
            "🧾 {} passou para {} ({:?}) por {}",
            subscription.company_name,
            subscription.plan_name,
            subscription.billing_cycle,
            actor.email
        );
        Ok(subscription)
    }

    pub fn cancel(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<Subscription, AppError> {
        let now = self.clock.now();
        let subscription = self.subscriptions.update_with(id, scope, |s| {
            if s.status == SubscriptionStatus::Cancelled {
                return Err(AppError::InvalidTransition("Cet abonnement est déjà résilié.".into()));
            }
            s.status = SubscriptionStatus::Cancelled;
            s.cancelled_at = Some(now);
            Ok(())
        })?;

        tracing::info!("🧾 Assinatura de {} cancelada por {}", subscription.company_name, actor.email);
        Ok(subscription)
    }

    pub fn reactivate(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<Subscription, AppError> {
        let now = self.clock.now();
        let subscription = self.subscriptions.update_with(id, scope, |s| {
            if s.status != SubscriptionStatus::Cancelled {
                return Err(AppError::InvalidTransition("Seul un abonnement résilié peut être réactivé.".into()));
            }
            s.status = SubscriptionStatus::Active;
            s.cancelled_at = None;
            s.renews_at = next_renewal(now, s.billing_cycle);
            Ok(())
        })?;

        tracing::info!("🧾 Assinatura de {} reativada por {}", subscription.company_name, actor.email);
        Ok(subscription)
    }

    pub fn stats(&self, scope: &TenantScope) -> Result<SubscriptionStats, AppError> {
        let subscriptions = self.subscriptions.snapshot(scope)?;
        let cancelled = count_where(&subscriptions, |s| s.status == SubscriptionStatus::Cancelled);
        let paying: Vec<&Subscription> = subscriptions
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
            .collect();

        Ok(SubscriptionStats {
            total: subscriptions.len(),
            active: paying.len(),
            trialing: count_where(&subscriptions, |s| s.status == SubscriptionStatus::Trialing),
            past_due: count_where(&subscriptions, |s| s.status == SubscriptionStatus::PastDue),
            cancelled,
            monthly_recurring_revenue: sum_decimal(paying, |s| s.monthly_amount()),
            churn_rate: percentage(cancelled, subscriptions.len()),
        })
    }
}
