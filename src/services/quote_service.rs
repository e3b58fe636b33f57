// src/services/quote_service.rs

use std::sync::Arc;

use chrono::Datelike;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::AppError,
        filter::Projection,
        stats::{count_where, percentage, sum_decimal},
    },
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        pricing::EstimateRequest,
        quote::{
            CreateQuotePayload, QuoteDecision, QuoteQuery, QuoteRequest, QuoteStats, QuoteStatus,
            RespondQuotePayload,
        },
    },
    services::pricing_service::PricingService,
};

#[derive(Clone)]
pub struct QuoteService {
    quotes: ResourceStore<QuoteRequest>,
    pricing: PricingService,
    clock: Arc<dyn Clock>,
}

impl QuoteService {
    pub fn new(quotes: ResourceStore<QuoteRequest>, pricing: PricingService, clock: Arc<dyn Clock>) -> Self {
        Self { quotes, pricing, clock }
    }

    // QT-2026-0007: sequencial por ano
    fn next_reference(&self, year: i32) -> Result<String, AppError> {
        let prefix = format!("QT-{}-", year);
        let mut seq = self
            .quotes
            .all()?
            .iter()
            .filter(|q| q.reference.starts_with(&prefix))
            .count()
            + 1;
        loop {
            let reference = format!("{}{:04}", prefix, seq);
            if !self.quotes.exists(|q| q.reference == reference)? {
                return Ok(reference);
            }
            seq += 1;
        }
    }

    /// Formulário público do site. O preço sugerido vem da tabela de tarifas.
    pub fn create(&self, payload: CreateQuotePayload) -> Result<QuoteRequest, AppError> {
        payload.validate()?;
        let now = self.clock.now();

        let suggested_price = self
            .pricing
            .estimate(&EstimateRequest {
                transport_mode: payload.transport_mode,
                weight_kg: payload.weight_kg,
                volume_m3: payload.volume_m3,
            })
            .map(|estimate| estimate.amount)
            .ok();

        let quote = QuoteRequest {
            id: Uuid::new_v4(),
            company_id: payload.company_id,
            reference: self.next_reference(now.year())?,
            client_name: payload.client_name.trim().to_string(),
            client_email: payload.client_email.trim().to_lowercase(),
            client_phone: payload.client_phone,
            origin: payload.origin.trim().to_string(),
            destination: payload.destination.trim().to_string(),
            transport_mode: payload.transport_mode,
            weight_kg: payload.weight_kg,
            volume_m3: payload.volume_m3,
            description: payload.description,
            status: QuoteStatus::Pending,
            suggested_price,
            quoted_price: None,
            quoted_by: None,
            quoted_at: None,
            created_at: now,
        };

        let quote = self.quotes.insert(quote)?;
        tracing::info!("📨 Pedido de cotação {} recebido de {}", quote.reference, quote.client_email);
        Ok(quote)
    }

    pub fn list(&self, scope: &TenantScope, query: &QuoteQuery) -> Result<Vec<QuoteRequest>, AppError> {
        let quotes = self.quotes.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.status, |q: &QuoteRequest| q.status)
            .filter_eq(query.transport_mode, |q: &QuoteRequest| q.transport_mode)
            .apply(&quotes))
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<QuoteRequest, AppError> {
        self.quotes.find(id, scope)
    }

    pub fn respond(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        payload: RespondQuotePayload,
    ) -> Result<QuoteRequest, AppError> {
        payload.validate()?;
        let now = self.clock.now();
        let quote = self.quotes.update_with(id, scope, |q| {
            if q.status != QuoteStatus::Pending {
                return Err(AppError::InvalidTransition(format!(
                    "Le devis {} a déjà reçu une réponse.",
                    q.reference
                )));
            }
            q.status = QuoteStatus::Quoted;
            q.quoted_price = Some(payload.price.round_dp(2));
            q.quoted_by = Some(actor.user_id);
            q.quoted_at = Some(now);
            Ok(())
        })?;

        tracing::info!("📨 Cotação {} respondida por {}", quote.reference, actor.email);
        Ok(quote)
    }

    pub fn decide(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        decision: QuoteDecision,
    ) -> Result<QuoteRequest, AppError> {
        let quote = self.quotes.update_with(id, scope, |q| {
            if q.status != QuoteStatus::Quoted {
                return Err(AppError::InvalidTransition(format!(
                    "Le devis {} doit être chiffré avant d'être accepté ou refusé.",
                    q.reference
                )));
            }
            q.status = match decision {
                QuoteDecision::Accepted => QuoteStatus::Accepted,
                QuoteDecision::Rejected => QuoteStatus::Rejected,
            };
            Ok(())
        })?;

        tracing::info!("📨 Cotação {} -> {:?} por {}", quote.reference, quote.status, actor.email);
        Ok(quote)
    }

    pub fn stats(&self, scope: &TenantScope) -> Result<QuoteStats, AppError> {
        let quotes = self.quotes.snapshot(scope)?;
        let pending = count_where(&quotes, |q| q.status == QuoteStatus::Pending);
        let accepted = count_where(&quotes, |q| q.status == QuoteStatus::Accepted);
        Ok(QuoteStats {
            total: quotes.len(),
            pending,
            quoted: count_where(&quotes, |q| q.status == QuoteStatus::Quoted),
            accepted,
            rejected: count_where(&quotes, |q| q.status == QuoteStatus::Rejected),
            // Aceitos sobre os que receberam preço
            conversion_rate: percentage(accepted, quotes.len() - pending),
            total_quoted_value: sum_decimal(&quotes, |q| q.quoted_price.unwrap_or_default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        db::seed,
        models::{package::TransportMode, user::Role},
    };
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn service() -> QuoteService {
        let pricing = PricingService::new(
            ResourceStore::seeded(seed::plans()),
            ResourceStore::seeded(seed::addons()),
            seed::pricing_settings(),
        );
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap());
        QuoteService::new(ResourceStore::default(), pricing, Arc::new(clock))
    }

    fn payload(company: Option<Uuid>) -> CreateQuotePayload {
        CreateQuotePayload {
            client_name: "Aminata Diallo".into(),
            client_email: "Aminata@Example.com".into(),
            client_phone: None,
            origin: "Guangzhou".into(),
            destination: "Dakar".into(),
            transport_mode: TransportMode::Aerial,
            weight_kg: Decimal::from(40),
            volume_m3: Decimal::ZERO,
            description: "Pièces détachées".into(),
            company_id: company,
        }
    }

    fn agent(company: Uuid) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "agent@example.com".into(),
            name: "Agent".into(),
            role: Role::Agent,
            company_id: Some(company),
        }
    }

    #[test]
    fn public_quote_gets_reference_and_suggested_price() {
        let service = service();
        let first = service.create(payload(None)).unwrap();
        let second = service.create(payload(None)).unwrap();

        assert_eq!(first.reference, "QT-2026-0001");
        assert_eq!(second.reference, "QT-2026-0002");
        assert_eq!(first.suggested_price, Some(Decimal::from(500)));
        assert_eq!(first.client_email, "aminata@example.com");
    }

    #[test]
    fn quote_lifecycle_is_enforced() {
        let service = service();
        let company = Uuid::new_v4();
        let scope = TenantScope::Company(company);
        let quote = service.create(payload(Some(company))).unwrap();

        let err = service.decide(&agent(company), &scope, quote.id, QuoteDecision::Accepted).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let quoted = service
            .respond(&agent(company), &scope, quote.id, RespondQuotePayload { price: Decimal::new(45000, 2) })
            .unwrap();
        assert_eq!(quoted.status, QuoteStatus::Quoted);

        let again = service.respond(&agent(company), &scope, quote.id, RespondQuotePayload { price: Decimal::ONE });
        assert!(matches!(again, Err(AppError::InvalidTransition(_))));

        let accepted = service.decide(&agent(company), &scope, quote.id, QuoteDecision::Accepted).unwrap();
        assert_eq!(accepted.status, QuoteStatus::Accepted);

        let stats = service.stats(&scope).unwrap();
        assert_eq!(stats.conversion_rate, 100.0);
        assert_eq!(stats.total_quoted_value, Decimal::new(45000, 2));
    }

    #[test]
    fn other_company_cannot_respond() {
        let service = service();
        let owner = Uuid::new_v4();
        let quote = service.create(payload(Some(owner))).unwrap();

        let intruder = Uuid::new_v4();
        let result = service.respond(
            &agent(intruder),
            &TenantScope::Company(intruder),
            quote.id,
            RespondQuotePayload { price: Decimal::ONE },
        );
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
