// src/services/coupon_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        editor::{Commit, Editor},
        error::AppError,
        filter::Projection,
        i18n::I18nStore,
        stats::{average, count_where, percentage},
    },
    db::{ResourceStore, TenantScope},
    middleware::i18n::Locale,
    models::{
        auth::Session,
        coupon::{
            normalize_code, Coupon, CouponForm, CouponQuery, CouponStats, CouponStatus, CouponView,
            CustomerHistory, Discount, OrderContext, Redemption,
        },
    },
    services::promotion_engine::PromotionEngine,
};

// Cupons são da plataforma: não pertencem a nenhuma empresa.
const SCOPE: TenantScope = TenantScope::Global;

#[derive(Clone)]
pub struct CouponService {
    coupons: ResourceStore<Coupon>,
    redemptions: ResourceStore<Redemption>,
    i18n: &'static I18nStore,
    clock: Arc<dyn Clock>,
}

fn usage_rate(coupon: &Coupon) -> Option<f64> {
    coupon
        .usage_limit
        .map(|limit| percentage(coupon.usage_count as usize, limit as usize))
}

impl CouponService {
    pub fn new(
        coupons: ResourceStore<Coupon>,
        redemptions: ResourceStore<Redemption>,
        i18n: &'static I18nStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { coupons, redemptions, i18n, clock }
    }

    fn view(&self, coupon: Coupon, now: DateTime<Utc>, locale: &Locale) -> CouponView {
        let status = coupon.status_at(now);
        CouponView {
            status_label: self.i18n.translate(&locale.0, status.label_key()),
            usage_rate: usage_rate(&coupon),
            status,
            coupon,
        }
    }

    pub fn list(&self, query: &CouponQuery, locale: &Locale) -> Result<Vec<CouponView>, AppError> {
        let now = self.clock.now();
        let coupons = self.coupons.snapshot(&SCOPE)?;
        let visible = Projection::new(query.search.as_deref())
            .filter_eq(query.discount_type, |c: &Coupon| c.discount_type)
            .filter_eq(query.status, move |c: &Coupon| c.status_at(now))
            .apply(&coupons);

        Ok(visible.into_iter().map(|c| self.view(c, now, locale)).collect())
    }

    pub fn get(&self, id: Uuid, locale: &Locale) -> Result<CouponView, AppError> {
        let coupon = self.coupons.find(id, &SCOPE)?;
        Ok(self.view(coupon, self.clock.now(), locale))
    }

    pub fn stats(&self) -> Result<CouponStats, AppError> {
        let now = self.clock.now();
        let coupons = self.coupons.snapshot(&SCOPE)?;
        Ok(CouponStats {
            total: coupons.len(),
            active: count_where(&coupons, |c| c.status_at(now) == CouponStatus::Active),
            expired: count_where(&coupons, |c| c.status_at(now) == CouponStatus::Expired),
            total_usage: coupons.iter().map(|c| u64::from(c.usage_count)).sum(),
            average_usage_rate: average(coupons.iter().filter_map(usage_rate)).unwrap_or(0.0),
        })
    }

    // Unicidade do código checada sob o lock de escrita do store
    fn save(&self, commit: Commit<Coupon>) -> Result<Coupon, AppError> {
        self.coupons.apply_unique(
            commit,
            |existing, candidate| existing.code == candidate.code,
            |candidate| AppError::Conflict(format!("Le code promo {} existe déjà.", candidate.code)),
        )
    }

    pub fn create(&self, actor: &Session, form: CouponForm, locale: &Locale) -> Result<CouponView, AppError> {
        let now = self.clock.now();

        let commit = Editor::<Coupon>::Closed
            .open_create(form)?
            .submit_with(now, |form| Coupon::from_form(form, now))?;
        let coupon = self.save(commit)?;

        tracing::info!("🏷️ Cupom {} criado por {}", coupon.code, actor.email);
        Ok(self.view(coupon, now, locale))
    }

    pub fn update(
        &self,
        actor: &Session,
        id: Uuid,
        form: CouponForm,
        locale: &Locale,
    ) -> Result<CouponView, AppError> {
        let now = self.clock.now();

        let current = self.coupons.find(id, &SCOPE)?;
        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(form)?;
        let coupon = self.save(editor.submit(now)?)?;

        tracing::info!("🏷️ Cupom {} atualizado por {}", coupon.code, actor.email);
        Ok(self.view(coupon, now, locale))
    }

    pub fn toggle(&self, actor: &Session, id: Uuid, locale: &Locale) -> Result<CouponView, AppError> {
        let coupon = self.coupons.update_with(id, &SCOPE, |c| {
            c.is_active = !c.is_active;
            Ok(())
        })?;
        tracing::info!("🏷️ Cupom {} ativo={} por {}", coupon.code, coupon.is_active, actor.email);
        Ok(self.view(coupon, self.clock.now(), locale))
    }

    pub fn delete(&self, actor: &Session, id: Uuid) -> Result<Coupon, AppError> {
        let target = self.coupons.find(id, &SCOPE)?;
        let commit = Editor::Closed.confirm_delete(target)?.submit(self.clock.now())?;
        let removed = self.coupons.apply(commit)?;

        tracing::info!("🗑️ Cupom {} excluído por {}", removed.code, actor.email);
        Ok(removed)
    }

    fn by_code(&self, code: &str) -> Result<Coupon, AppError> {
        let code = normalize_code(code);
        self.coupons
            .find_by(|c| c.code == code)?
            .ok_or(AppError::NotFound { resource: "coupon", id: code })
    }

    fn history(&self, customer: Uuid) -> Result<CustomerHistory, AppError> {
        let prior_redemptions = self.redemptions.all()?.iter().filter(|r| r.user_id == customer).count();
        Ok(CustomerHistory { prior_redemptions })
    }

    /// Pré-visualização: nada é gravado.
    pub fn validate(&self, actor: &Session, order: &OrderContext) -> Result<Discount, AppError> {
        order.validate()?;
        let coupon = self.by_code(&order.code)?;
        let history = self.history(actor.user_id)?;
        PromotionEngine::evaluate(&coupon, order, &history, self.clock.now()).map_err(AppError::CouponRejected)
    }

    /// Aplica o cupom e consome um uso. Avaliação, incremento e registro do resgate
    /// acontecem sob o lock do cupom.
    pub fn redeem(&self, actor: &Session, order: &OrderContext) -> Result<Discount, AppError> {
        order.validate()?;
        let coupon = self.by_code(&order.code)?;
        let now = self.clock.now();

        let mut applied = None;
        self.coupons.update_with(coupon.id, &SCOPE, |c| {
            let history = self.history(actor.user_id)?;
            let discount =
                PromotionEngine::evaluate(c, order, &history, now).map_err(AppError::CouponRejected)?;
            self.redemptions.insert(Redemption {
                id: Uuid::new_v4(),
                coupon_id: c.id,
                code: c.code.clone(),
                user_id: actor.user_id,
                company_id: actor.company_id,
                discount_amount: discount.discount_amount,
                redeemed_at: now,
            })?;
            c.usage_count += 1;
            applied = Some(discount);
            Ok(())
        })?;
        let discount = applied.ok_or_else(|| anyhow::anyhow!("resgate sem desconto calculado"))?;

        tracing::info!(
            "🏷️ Cupom {} resgatado por {} (-{})",
            discount.code,
            actor.email,
            discount.discount_amount
        );
        Ok(discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        models::{
            coupon::{CouponRejection, DiscountType},
            package::TransportMode,
            user::Role,
        },
    };
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn root() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "root@example.com".into(),
            name: "Root".into(),
            role: Role::SuperAdmin,
            company_id: None,
        }
    }

    fn form(code: &str, now: DateTime<Utc>) -> CouponForm {
        CouponForm {
            code: code.into(),
            description: "Bienvenue".into(),
            discount_type: DiscountType::Percentage,
            value: Decimal::from(10),
            usage_limit: Some(2),
            min_order_amount: Some(Decimal::from(50)),
            max_discount: None,
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(30),
            transport_modes: Vec::new(),
            first_time_only: false,
            is_active: true,
        }
    }

    fn order(code: &str, amount: i64) -> OrderContext {
        OrderContext {
            code: code.into(),
            order_amount: Decimal::from(amount),
            shipping_cost: Decimal::ZERO,
            transport_mode: TransportMode::Aerial,
        }
    }

    fn setup() -> (CouponService, FixedClock) {
        let clock = FixedClock::at(Utc::now());
        let service = CouponService::new(
            ResourceStore::default(),
            ResourceStore::default(),
            I18nStore::global(),
            Arc::new(clock.clone()),
        );
        (service, clock)
    }

    #[test]
    fn codes_are_normalized_and_unique() {
        let (service, clock) = setup();
        let fr = Locale("fr".into());
        let created = service.create(&root(), form(" hello10 ", clock.now()), &fr).unwrap();
        assert_eq!(created.coupon.code, "HELLO10");
        assert_eq!(created.status_label, "Actif");

        let err = service.create(&root(), form("Hello10", clock.now()), &fr).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn status_label_follows_the_clock() {
        let (service, clock) = setup();
        let fr = Locale("fr".into());
        let created = service.create(&root(), form("LATER", clock.now()), &fr).unwrap();

        clock.advance(Duration::days(31));
        let view = service.get(created.coupon.id, &fr).unwrap();
        assert_eq!(view.status, CouponStatus::Expired);
        assert_eq!(view.status_label, "Expiré");
        assert_eq!(view.coupon, created.coupon);

        let expired = CouponQuery { status: Some(CouponStatus::Expired), ..Default::default() };
        assert_eq!(service.list(&expired, &fr).unwrap().len(), 1);
    }

    #[test]
    fn redeem_consumes_usage_until_exhausted() {
        let (service, clock) = setup();
        let fr = Locale("fr".into());
        service.create(&root(), form("TWICE", clock.now()), &fr).unwrap();

        // Validar não consome
        service.validate(&root(), &order("twice", 100)).unwrap();
        service.redeem(&root(), &order("twice", 100)).unwrap();
        service.redeem(&root(), &order("twice", 100)).unwrap();

        let err = service.redeem(&root(), &order("twice", 100)).unwrap_err();
        assert!(matches!(err, AppError::CouponRejected(_)));

        let stats = service.stats().unwrap();
        assert_eq!(stats.total_usage, 2);
        assert_eq!(stats.average_usage_rate, 100.0);
    }

    #[test]
    fn rejected_redeem_does_not_count() {
        let (service, clock) = setup();
        let fr = Locale("fr".into());
        let created = service.create(&root(), form("MIN50", clock.now()), &fr).unwrap();

        let err = service.redeem(&root(), &order("MIN50", 10)).unwrap_err();
        assert!(matches!(err, AppError::CouponRejected(_)));
        assert_eq!(service.get(created.coupon.id, &fr).unwrap().coupon.usage_count, 0);
    }

    #[test]
    fn first_order_coupon_is_refused_after_a_redemption() {
        let (service, clock) = setup();
        let fr = Locale("fr".into());
        let mut first = form("PREMIER", clock.now());
        first.first_time_only = true;
        first.usage_limit = None;
        service.create(&root(), first, &fr).unwrap();
        service.create(&root(), form("AUTRE", clock.now()), &fr).unwrap();

        let customer = root();
        service.validate(&customer, &order("PREMIER", 100)).unwrap();
        service.redeem(&customer, &order("AUTRE", 100)).unwrap();

        let err = service.redeem(&customer, &order("PREMIER", 100)).unwrap_err();
        assert!(matches!(err, AppError::CouponRejected(CouponRejection::FirstOrderOnly)));

        // Outro cliente, sem histórico, ainda pode usar
        service.redeem(&root(), &order("PREMIER", 100)).unwrap();
    }

    #[test]
    fn unknown_code_is_not_found() {
        let (service, _) = setup();
        assert!(matches!(service.validate(&root(), &order("NOPE", 100)), Err(AppError::NotFound { .. })));
    }
}
