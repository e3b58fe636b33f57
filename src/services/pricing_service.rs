// src/services/pricing_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ResourceStore, TenantScope},
    models::{
        package::TransportMode,
        pricing::{Addon, Estimate, EstimateRequest, ModeRate, Plan, PricingSettings},
    },
};

// cm³ por m³: o divisor volumétrico é expresso em cm³/kg
const CM3_PER_M3: i64 = 1_000_000;
// Regra marítima "peso ou medida": 1 tonelada equivale a 1 m³
const KG_PER_FREIGHT_TON: i64 = 1_000;

#[derive(Clone)]
pub struct PricingService {
    plans: ResourceStore<Plan>,
    addons: ResourceStore<Addon>,
    settings: Arc<PricingSettings>,
}

impl PricingService {
    pub fn new(plans: ResourceStore<Plan>, addons: ResourceStore<Addon>, settings: PricingSettings) -> Self {
        Self { plans, addons, settings: Arc::new(settings) }
    }

    pub fn plans(&self) -> Result<Vec<Plan>, AppError> {
        self.plans.snapshot(&TenantScope::Global)
    }

    pub fn addons(&self) -> Result<Vec<Addon>, AppError> {
        self.addons.snapshot(&TenantScope::Global)
    }

    pub fn settings(&self) -> PricingSettings {
        self.settings.as_ref().clone()
    }

    fn rate(&self, mode: TransportMode) -> Result<&ModeRate, AppError> {
        self.settings
            .rate_for(mode)
            .ok_or_else(|| AppError::NotFound { resource: "rate", id: mode.label().to_string() })
    }

    pub fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, AppError> {
        request.validate()?;
        let rate = self.rate(request.transport_mode)?;

        let (chargeable_weight_kg, raw_amount) = if request.transport_mode.is_aerial() {
            let volumetric = request.volume_m3 * Decimal::from(CM3_PER_M3) / self.settings.volumetric_divisor;
            let chargeable = request.weight_kg.max(volumetric).round_dp(2);
            (chargeable, chargeable * rate.per_kg)
        } else {
            let freight_tons = request.weight_kg / Decimal::from(KG_PER_FREIGHT_TON);
            let units = request.volume_m3.max(freight_tons);
            (request.weight_kg, units * rate.per_cubic_meter)
        };

        Ok(Estimate {
            transport_mode: request.transport_mode,
            chargeable_weight_kg,
            volume_m3: request.volume_m3,
            amount: raw_amount.max(self.settings.minimum_charge).round_dp(2),
            currency: self.settings.currency.clone(),
            transit_days: rate.transit_days.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    fn service() -> PricingService {
        PricingService::new(
            ResourceStore::seeded(seed::plans()),
            ResourceStore::seeded(seed::addons()),
            seed::pricing_settings(),
        )
    }

    fn request(mode: TransportMode, weight: i64, volume: Decimal) -> EstimateRequest {
        EstimateRequest { transport_mode: mode, weight_kg: Decimal::from(weight), volume_m3: volume }
    }

    #[test]
    fn aerial_charges_the_volumetric_weight_when_larger() {
        // 0,12 m³ / 6000 = 20 kg volumétricos > 10 kg reais
        let estimate = service()
            .estimate(&request(TransportMode::Aerial, 10, Decimal::new(12, 2)))
            .unwrap();
        assert_eq!(estimate.chargeable_weight_kg, Decimal::from(20));
        assert_eq!(estimate.amount, Decimal::from(250));
    }

    #[test]
    fn maritime_uses_weight_or_measure() {
        // 3000 kg = 3 t > 2 m³
        let estimate = service()
            .estimate(&request(TransportMode::Maritime, 3000, Decimal::from(2)))
            .unwrap();
        assert_eq!(estimate.amount, Decimal::from(840));
        assert_eq!(estimate.transit_days, "45-60");
    }

    #[test]
    fn minimum_charge_applies() {
        let estimate = service()
            .estimate(&request(TransportMode::Aerial, 1, Decimal::ZERO))
            .unwrap();
        assert_eq!(estimate.amount, Decimal::from(25));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let result = service().estimate(&request(TransportMode::Aerial, 0, Decimal::ZERO));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn oversized_volume_is_rejected_before_any_arithmetic() {
        let result = service().estimate(&request(TransportMode::Aerial, 1, Decimal::MAX));
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let heavy = EstimateRequest {
            transport_mode: TransportMode::Maritime,
            weight_kg: Decimal::MAX,
            volume_m3: Decimal::ONE,
        };
        assert!(matches!(service().estimate(&heavy), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn catalog_is_public() {
        let service = service();
        assert_eq!(service.plans().unwrap().len(), 3);
        assert_eq!(service.addons().unwrap().len(), 3);
    }
}
