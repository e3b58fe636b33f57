// src/services/promotion_engine.rs

//! Regras de aplicação de cupons. Puro: não toca no store nem no relógio global.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::coupon::{Coupon, CouponRejection, CustomerHistory, Discount, DiscountType, OrderContext};

pub struct PromotionEngine;

impl PromotionEngine {
    /// Avalia o cupom contra o pedido. A primeira regra violada define a recusa.
    /// O histórico vem do servidor, nunca do corpo da requisição.
    pub fn evaluate(
        coupon: &Coupon,
        order: &OrderContext,
        history: &CustomerHistory,
        now: DateTime<Utc>,
    ) -> Result<Discount, CouponRejection> {
        if !coupon.is_active {
            return Err(CouponRejection::Inactive);
        }
        if now < coupon.valid_from {
            return Err(CouponRejection::NotYetValid);
        }
        if now > coupon.valid_to {
            return Err(CouponRejection::Expired);
        }
        if coupon.usage_limit.is_some_and(|limit| coupon.usage_count >= limit) {
            return Err(CouponRejection::UsageLimitReached);
        }
        if coupon.min_order_amount.is_some_and(|min| order.order_amount < min) {
            return Err(CouponRejection::MinimumNotMet);
        }
        if !coupon.applies_to(order.transport_mode) {
            return Err(CouponRejection::TransportModeNotEligible);
        }
        if coupon.first_time_only && !history.is_first_order() {
            return Err(CouponRejection::FirstOrderOnly);
        }

        let raw = match coupon.discount_type {
            DiscountType::Percentage => order.order_amount * coupon.value / Decimal::from(100),
            DiscountType::Fixed => coupon.value.min(order.order_amount),
            DiscountType::FreeShipping => order.shipping_cost,
        };
        let capped = match coupon.max_discount {
            Some(cap) => raw.min(cap),
            None => raw,
        };
        let discount_amount = capped.round_dp(2);

        let order_total = order.order_amount + order.shipping_cost;
        let final_total = (order_total - discount_amount).max(Decimal::ZERO);

        Ok(Discount {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_amount,
            order_total,
            final_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::TransportMode;
    use chrono::Duration;
    use uuid::Uuid;

    fn coupon(discount_type: DiscountType, value: i64) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: Uuid::new_v4(),
            code: "TEST".into(),
            description: String::new(),
            discount_type,
            value: Decimal::from(value),
            usage_count: 0,
            usage_limit: None,
            min_order_amount: None,
            max_discount: None,
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            transport_modes: Vec::new(),
            first_time_only: false,
            is_active: true,
            created_at: now,
        }
    }

    fn order(amount: i64, shipping: i64) -> OrderContext {
        OrderContext {
            code: "TEST".into(),
            order_amount: Decimal::from(amount),
            shipping_cost: Decimal::from(shipping),
            transport_mode: TransportMode::Maritime,
        }
    }

    const NEW: CustomerHistory = CustomerHistory { prior_redemptions: 0 };
    const RETURNING: CustomerHistory = CustomerHistory { prior_redemptions: 3 };

    #[test]
    fn percentage_is_capped_by_max_discount() {
        let mut c = coupon(DiscountType::Percentage, 10);
        let d = PromotionEngine::evaluate(&c, &order(200, 30), &RETURNING, Utc::now()).unwrap();
        assert_eq!(d.discount_amount, Decimal::from(20));
        assert_eq!(d.order_total, Decimal::from(230));
        assert_eq!(d.final_total, Decimal::from(210));

        c.max_discount = Some(Decimal::from(15));
        let d = PromotionEngine::evaluate(&c, &order(200, 30), &RETURNING, Utc::now()).unwrap();
        assert_eq!(d.discount_amount, Decimal::from(15));
    }

    #[test]
    fn fixed_never_exceeds_the_order_amount() {
        let c = coupon(DiscountType::Fixed, 100);
        let d = PromotionEngine::evaluate(&c, &order(40, 0), &RETURNING, Utc::now()).unwrap();
        assert_eq!(d.discount_amount, Decimal::from(40));
        assert_eq!(d.final_total, Decimal::ZERO);
    }

    #[test]
    fn free_shipping_discounts_the_shipping_cost() {
        let c = coupon(DiscountType::FreeShipping, 0);
        let d = PromotionEngine::evaluate(&c, &order(100, 35), &RETURNING, Utc::now()).unwrap();
        assert_eq!(d.discount_amount, Decimal::from(35));
        assert_eq!(d.final_total, Decimal::from(100));
    }

    #[test]
    fn rejections_follow_the_rule_order() {
        let now = Utc::now();

        let mut c = coupon(DiscountType::Percentage, 10);
        c.is_active = false;
        c.valid_to = now - Duration::hours(1);
        assert_eq!(PromotionEngine::evaluate(&c, &order(100, 0), &RETURNING, now), Err(CouponRejection::Inactive));

        c.is_active = true;
        assert_eq!(PromotionEngine::evaluate(&c, &order(100, 0), &RETURNING, now), Err(CouponRejection::Expired));

        let mut c = coupon(DiscountType::Percentage, 10);
        c.usage_limit = Some(5);
        c.usage_count = 5;
        assert_eq!(
            PromotionEngine::evaluate(&c, &order(100, 0), &RETURNING, now),
            Err(CouponRejection::UsageLimitReached)
        );

        let mut c = coupon(DiscountType::Percentage, 10);
        c.min_order_amount = Some(Decimal::from(50));
        assert_eq!(PromotionEngine::evaluate(&c, &order(49, 0), &RETURNING, now), Err(CouponRejection::MinimumNotMet));

        c.transport_modes = vec![TransportMode::Aerial];
        assert_eq!(
            PromotionEngine::evaluate(&c, &order(80, 0), &RETURNING, now),
            Err(CouponRejection::TransportModeNotEligible)
        );

        let mut c = coupon(DiscountType::Percentage, 10);
        c.first_time_only = true;
        assert_eq!(PromotionEngine::evaluate(&c, &order(80, 0), &RETURNING, now), Err(CouponRejection::FirstOrderOnly));
        assert!(PromotionEngine::evaluate(&c, &order(80, 0), &NEW, now).is_ok());
    }

    #[test]
    fn scheduled_coupon_is_not_yet_valid() {
        let now = Utc::now();
        let mut c = coupon(DiscountType::Fixed, 5);
        c.valid_from = now + Duration::days(2);
        c.valid_to = now + Duration::days(10);
        assert_eq!(PromotionEngine::evaluate(&c, &order(80, 0), &RETURNING, now), Err(CouponRejection::NotYetValid));
    }
}
