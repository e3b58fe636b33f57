// src/services/marketplace_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        error::AppError,
        filter::Projection,
        stats::{average, count_where, decimal_percentage, round1},
    },
    db::{Record, ResourceStore, TenantScope},
    models::{
        auth::Session,
        marketplace::{
            Bid, BidStatus, CreateServiceRequestPayload, MarketplaceStats, PlaceBidPayload,
            RequestStatus, ServiceRequest, ServiceRequestQuery,
        },
        user::Role,
    },
};

fn is_bidder(session: &Session) -> bool {
    matches!(session.role, Role::Agent | Role::Affiliate)
}

fn bid_not_found(id: Uuid) -> AppError {
    AppError::not_found("bid", id)
}

#[derive(Clone)]
pub struct MarketplaceService {
    requests: ResourceStore<ServiceRequest>,
    clock: Arc<dyn Clock>,
}

impl MarketplaceService {
    pub fn new(requests: ResourceStore<ServiceRequest>, clock: Arc<dyn Clock>) -> Self {
        Self { requests, clock }
    }

    // Prestadores enxergam os pedidos abertos de todas as empresas;
    // quem publica enxerga só os da própria empresa.
    fn visible(&self, session: &Session, scope: &TenantScope) -> Result<Vec<ServiceRequest>, AppError> {
        if is_bidder(session) {
            let all = self.requests.snapshot(&TenantScope::Global)?;
            return Ok(all
                .into_iter()
                .filter(|r| r.status == RequestStatus::Open || r.bids.iter().any(|b| b.provider_id == session.user_id))
                .collect());
        }
        self.requests.snapshot(scope)
    }

    pub fn list(
        &self,
        session: &Session,
        scope: &TenantScope,
        query: &ServiceRequestQuery,
    ) -> Result<Vec<ServiceRequest>, AppError> {
        let requests = self.visible(session, scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.status, |r: &ServiceRequest| r.status)
            .filter_eq(query.category, |r: &ServiceRequest| r.category)
            .apply(&requests))
    }

    pub fn get(&self, session: &Session, scope: &TenantScope, id: Uuid) -> Result<ServiceRequest, AppError> {
        self.visible(session, scope)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(ServiceRequest::RESOURCE, id))
    }

    pub fn create_request(
        &self,
        actor: &Session,
        scope: &TenantScope,
        payload: CreateServiceRequestPayload,
    ) -> Result<ServiceRequest, AppError> {
        payload.validate()?;
        let now = self.clock.now();
        if payload.deadline <= now {
            return Err(AppError::Conflict("La date limite doit être dans le futur.".into()));
        }

        let request = ServiceRequest {
            id: Uuid::new_v4(),
            company_id: scope.company().or(actor.company_id),
            requester_id: actor.user_id,
            title: payload.title.trim().to_string(),
            description: payload.description,
            category: payload.category,
            origin: payload.origin.trim().to_string(),
            destination: payload.destination.trim().to_string(),
            budget: payload.budget,
            deadline: payload.deadline,
            status: RequestStatus::Open,
            bids: Vec::new(),
            awarded_bid_id: None,
            created_at: now,
        };
        let request = self.requests.insert(request)?;

        tracing::info!("🛒 Pedido '{}' publicado por {}", request.title, actor.email);
        Ok(request)
    }

    /// Lance de um prestador: pedido aberto, antes do prazo, um lance vivo por prestador.
    pub fn place_bid(&self, actor: &Session, request_id: Uuid, payload: PlaceBidPayload) -> Result<Bid, AppError> {
        payload.validate()?;
        let now = self.clock.now();

        let bid = Bid {
            id: Uuid::new_v4(),
            provider_id: actor.user_id,
            provider_name: actor.name.clone(),
            amount: payload.amount.round_dp(2),
            delivery_days: payload.delivery_days,
            message: payload.message.trim().to_string(),
            status: BidStatus::Pending,
            submitted_at: now,
        };

        let placed = bid.clone();
        self.requests.update_with(request_id, &TenantScope::Global, |r| {
            if r.status != RequestStatus::Open {
                return Err(AppError::InvalidTransition("Cette demande n'accepte plus d'offres.".into()));
            }
            if now >= r.deadline {
                return Err(AppError::InvalidTransition("La date limite de cette demande est dépassée.".into()));
            }
            if r.live_bids().any(|b| b.provider_id == actor.user_id) {
                return Err(AppError::Conflict("Vous avez déjà une offre en cours sur cette demande.".into()));
            }
            r.bids.push(bid);
            Ok(())
        })?;

        tracing::info!("🛒 Lance de {} ({}) no pedido {}", actor.email, placed.amount, request_id);
        Ok(placed)
    }

    pub fn withdraw_bid(&self, actor: &Session, request_id: Uuid, bid_id: Uuid) -> Result<Bid, AppError> {
        let mut withdrawn = None;
        self.requests.update_with(request_id, &TenantScope::Global, |r| {
            let bid = r
                .bids
                .iter_mut()
                .find(|b| b.id == bid_id && b.provider_id == actor.user_id)
                .ok_or_else(|| bid_not_found(bid_id))?;
            if bid.status != BidStatus::Pending {
                return Err(AppError::InvalidTransition("Seule une offre en attente peut être retirée.".into()));
            }
            bid.status = BidStatus::Withdrawn;
            withdrawn = Some(bid.clone());
            Ok(())
        })?;

        tracing::info!("🛒 Lance {} retirado por {}", bid_id, actor.email);
        withdrawn.ok_or_else(|| bid_not_found(bid_id))
    }

    /// Escolhe o vencedor: ele vira ACCEPTED e os demais pendentes, REJECTED.
    pub fn award(
        &self,
        actor: &Session,
        scope: &TenantScope,
        request_id: Uuid,
        bid_id: Uuid,
    ) -> Result<ServiceRequest, AppError> {
        let request = self.requests.update_with(request_id, scope, |r| {
            if r.status != RequestStatus::Open {
                return Err(AppError::InvalidTransition("Cette demande a déjà été attribuée ou clôturée.".into()));
            }
            let winner = r.bids.iter().find(|b| b.id == bid_id).ok_or_else(|| bid_not_found(bid_id))?;
            if winner.status != BidStatus::Pending {
                return Err(AppError::InvalidTransition("Seule une offre en attente peut être retenue.".into()));
            }

            for bid in r.bids.iter_mut() {
                if bid.id == bid_id {
                    bid.status = BidStatus::Accepted;
                } else if bid.status == BidStatus::Pending {
                    bid.status = BidStatus::Rejected;
                }
            }
            r.status = RequestStatus::Awarded;
            r.awarded_bid_id = Some(bid_id);
            Ok(())
        })?;

        tracing::info!("🛒 Pedido '{}' atribuído ao lance {} por {}", request.title, bid_id, actor.email);
        Ok(request)
    }

    pub fn close(&self, actor: &Session, scope: &TenantScope, request_id: Uuid) -> Result<ServiceRequest, AppError> {
        let request = self.requests.update_with(request_id, scope, |r| {
            if r.status != RequestStatus::Open {
                return Err(AppError::InvalidTransition("Seule une demande ouverte peut être clôturée.".into()));
            }
            for bid in r.bids.iter_mut().filter(|b| b.status == BidStatus::Pending) {
                bid.status = BidStatus::Rejected;
            }
            r.status = RequestStatus::Closed;
            Ok(())
        })?;

        tracing::info!("🛒 Pedido '{}' encerrado por {}", request.title, actor.email);
        Ok(request)
    }

    pub fn stats(&self, session: &Session, scope: &TenantScope) -> Result<MarketplaceStats, AppError> {
        let requests = self.visible(session, scope)?;
        let total_bids: usize = requests.iter().map(|r| r.bids.len()).sum();

        let savings = requests.iter().filter_map(|r| {
            let winner = r.awarded_bid_id?;
            let bid = r.bids.iter().find(|b| b.id == winner)?;
            Some(decimal_percentage(r.budget - bid.amount, r.budget))
        });

        Ok(MarketplaceStats {
            total_requests: requests.len(),
            open_requests: count_where(&requests, |r| r.status == RequestStatus::Open),
            awarded_requests: count_where(&requests, |r| r.status == RequestStatus::Awarded),
            total_bids,
            average_bids_per_request: if requests.is_empty() {
                0.0
            } else {
                round1(total_bids as f64 / requests.len() as f64)
            },
            average_savings_percent: average(savings).unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::FixedClock, models::marketplace::ServiceCategory};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn session(role: Role, company: Option<Uuid>, name: &str) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.into(),
            role,
            company_id: company,
        }
    }

    fn bid(amount: i64) -> PlaceBidPayload {
        PlaceBidPayload { amount: Decimal::from(amount), delivery_days: 10, message: String::new() }
    }

    struct Fixture {
        service: MarketplaceService,
        clock: FixedClock,
        client: Session,
        scope: TenantScope,
        request: ServiceRequest,
    }

    fn fixture() -> Fixture {
        let clock = FixedClock::at(Utc::now());
        let service = MarketplaceService::new(ResourceStore::default(), Arc::new(clock.clone()));
        let company = Uuid::new_v4();
        let client = session(Role::Client, Some(company), "Client");
        let scope = TenantScope::Company(company);
        let request = service
            .create_request(
                &client,
                &scope,
                CreateServiceRequestPayload {
                    title: "Dédouanement conteneur 40'".into(),
                    description: String::new(),
                    category: ServiceCategory::Customs,
                    origin: "Shenzhen".into(),
                    destination: "Abidjan".into(),
                    budget: Decimal::from(1000),
                    deadline: clock.now() + Duration::days(7),
                },
            )
            .unwrap();
        Fixture { service, clock, client, scope, request }
    }

    #[test]
    fn one_live_bid_per_provider() {
        let f = fixture();
        let agent = session(Role::Agent, Some(Uuid::new_v4()), "Agent");

        let first = f.service.place_bid(&agent, f.request.id, bid(900)).unwrap();
        assert!(matches!(f.service.place_bid(&agent, f.request.id, bid(850)), Err(AppError::Conflict(_))));

        // Depois de retirar, pode tentar de novo
        f.service.withdraw_bid(&agent, f.request.id, first.id).unwrap();
        f.service.place_bid(&agent, f.request.id, bid(850)).unwrap();
    }

    #[test]
    fn bids_after_deadline_are_refused() {
        let f = fixture();
        let agent = session(Role::Affiliate, None, "Affiliate");
        f.clock.advance(Duration::days(8));
        assert!(matches!(
            f.service.place_bid(&agent, f.request.id, bid(500)),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn award_accepts_winner_and_rejects_the_rest() {
        let f = fixture();
        let a = session(Role::Agent, None, "Alpha");
        let b = session(Role::Agent, None, "Bravo");
        let winner = f.service.place_bid(&a, f.request.id, bid(800)).unwrap();
        f.service.place_bid(&b, f.request.id, bid(950)).unwrap();

        let awarded = f.service.award(&f.client, &f.scope, f.request.id, winner.id).unwrap();
        assert_eq!(awarded.status, RequestStatus::Awarded);
        assert_eq!(awarded.awarded_bid_id, Some(winner.id));
        for bid in &awarded.bids {
            let expected = if bid.id == winner.id { BidStatus::Accepted } else { BidStatus::Rejected };
            assert_eq!(bid.status, expected);
        }

        let stats = f.service.stats(&f.client, &f.scope).unwrap();
        assert_eq!(stats.average_savings_percent, 20.0);
        assert_eq!(stats.total_bids, 2);

        let c = session(Role::Agent, None, "Charlie");
        assert!(matches!(f.service.place_bid(&c, f.request.id, bid(700)), Err(AppError::InvalidTransition(_))));
    }

    #[test]
    fn other_company_cannot_award() {
        let f = fixture();
        let a = session(Role::Agent, None, "Alpha");
        let offer = f.service.place_bid(&a, f.request.id, bid(800)).unwrap();

        let outsider = session(Role::Admin, Some(Uuid::new_v4()), "Outsider");
        let scope = TenantScope::Company(outsider.company_id.unwrap_or_default());
        assert!(matches!(
            f.service.award(&outsider, &scope, f.request.id, offer.id),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn bidders_only_see_open_requests() {
        let f = fixture();
        let agent = session(Role::Agent, None, "Alpha");
        assert_eq!(f.service.list(&agent, &TenantScope::Global, &ServiceRequestQuery::default()).unwrap().len(), 1);

        f.service.close(&f.client, &f.scope, f.request.id).unwrap();
        assert!(f.service.list(&agent, &TenantScope::Global, &ServiceRequestQuery::default()).unwrap().is_empty());
    }
}
