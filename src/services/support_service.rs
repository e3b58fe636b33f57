// src/services/support_service.rs

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::{
        clock::Clock,
        error::AppError,
        filter::Projection,
        stats::{average, count_where, percentage},
    },
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        support::{SupportAnalytics, Ticket, TicketQuery, TicketStatus, UpdateTicketPayload},
    },
};

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_minutes() as f64 / 60.0
}

#[derive(Clone)]
pub struct SupportService {
    tickets: ResourceStore<Ticket>,
    clock: Arc<dyn Clock>,
}

impl SupportService {
    pub fn new(tickets: ResourceStore<Ticket>, clock: Arc<dyn Clock>) -> Self {
        Self { tickets, clock }
    }

    pub fn list(&self, scope: &TenantScope, query: &TicketQuery) -> Result<Vec<Ticket>, AppError> {
        let tickets = self.tickets.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.status, |t: &Ticket| t.status)
            .filter_eq(query.category, |t: &Ticket| t.category)
            .filter_eq(query.priority, |t: &Ticket| t.priority)
            .apply(&tickets))
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<Ticket, AppError> {
        self.tickets.find(id, scope)
    }

    /// Muda o status do ticket, carimbando primeira resposta e resolução.
    pub fn update(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        payload: UpdateTicketPayload,
    ) -> Result<Ticket, AppError> {
        let now = self.clock.now();
        let ticket = self.tickets.update_with(id, scope, |t| {
            if t.status == TicketStatus::Closed && payload.status != TicketStatus::Closed {
                return Err(AppError::InvalidTransition(format!(
                    "Le ticket {} est clôturé.",
                    t.reference
                )));
            }

            if payload.status != TicketStatus::Open && t.first_response_at.is_none() {
                t.first_response_at = Some(now);
            }
            if payload.status.is_done() {
                t.resolved_at.get_or_insert(now);
            } else {
                // Reaberto
                t.resolved_at = None;
            }

            t.status = payload.status;
            if let Some(agent) = &payload.assigned_agent {
                let agent = agent.trim();
                t.assigned_agent = (!agent.is_empty()).then(|| agent.to_string());
            }
            Ok(())
        })?;

        tracing::info!("🎧 Ticket {} -> {:?} por {}", ticket.reference, ticket.status, actor.email);
        Ok(ticket)
    }

    pub fn analytics(&self, scope: &TenantScope) -> Result<SupportAnalytics, AppError> {
        let tickets = self.tickets.snapshot(scope)?;

        let mut by_category = BTreeMap::new();
        let mut by_priority = BTreeMap::new();
        for t in &tickets {
            *by_category.entry(t.category).or_insert(0) += 1;
            *by_priority.entry(t.priority).or_insert(0) += 1;
        }

        let done = count_where(&tickets, |t| t.status.is_done());
        Ok(SupportAnalytics {
            total: tickets.len(),
            open: count_where(&tickets, |t| t.status == TicketStatus::Open),
            in_progress: count_where(&tickets, |t| t.status == TicketStatus::InProgress),
            resolved: done,
            resolution_rate: percentage(done, tickets.len()),
            avg_first_response_hours: average(
                tickets
                    .iter()
                    .filter_map(|t| t.first_response_at.map(|at| hours_between(t.created_at, at))),
            ),
            avg_resolution_hours: average(
                tickets
                    .iter()
                    .filter_map(|t| t.resolved_at.map(|at| hours_between(t.created_at, at))),
            ),
            avg_satisfaction: average(tickets.iter().filter_map(|t| t.satisfaction.map(f64::from))),
            by_category,
            by_priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        models::{
            support::{TicketCategory, TicketPriority},
            user::Role,
        },
    };
    use chrono::Duration;

    fn ticket(now: DateTime<Utc>, category: TicketCategory, satisfaction: Option<u8>) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            company_id: None,
            reference: "TK-1001".into(),
            subject: "Colis bloqué en douane".into(),
            customer_name: "Ibrahim".into(),
            category,
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            assigned_agent: None,
            created_at: now,
            first_response_at: None,
            resolved_at: None,
            satisfaction,
        }
    }

    fn agent() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "agent@example.com".into(),
            name: "Agent".into(),
            role: Role::Agent,
            company_id: None,
        }
    }

    fn update(status: TicketStatus) -> UpdateTicketPayload {
        UpdateTicketPayload { status, assigned_agent: Some("Moussa".into()) }
    }

    #[test]
    fn status_changes_stamp_response_and_resolution() {
        let clock = FixedClock::at(Utc::now());
        let t = ticket(clock.now(), TicketCategory::Shipping, None);
        let service = SupportService::new(ResourceStore::seeded(vec![t.clone()]), Arc::new(clock.clone()));

        clock.advance(Duration::hours(2));
        let in_progress = service.update(&agent(), &TenantScope::Global, t.id, update(TicketStatus::InProgress)).unwrap();
        assert_eq!(in_progress.first_response_at, Some(clock.now()));
        assert_eq!(in_progress.assigned_agent.as_deref(), Some("Moussa"));

        clock.advance(Duration::hours(4));
        service.update(&agent(), &TenantScope::Global, t.id, update(TicketStatus::Resolved)).unwrap();

        let analytics = service.analytics(&TenantScope::Global).unwrap();
        assert_eq!(analytics.avg_first_response_hours, Some(2.0));
        assert_eq!(analytics.avg_resolution_hours, Some(6.0));
        assert_eq!(analytics.resolution_rate, 100.0);

        let reopened = service.update(&agent(), &TenantScope::Global, t.id, update(TicketStatus::Open)).unwrap();
        assert!(reopened.resolved_at.is_none());
    }

    #[test]
    fn closed_ticket_is_terminal() {
        let now = Utc::now();
        let mut t = ticket(now, TicketCategory::Billing, None);
        t.status = TicketStatus::Closed;
        let service = SupportService::new(ResourceStore::seeded(vec![t.clone()]), Arc::new(FixedClock::at(now)));

        let result = service.update(&agent(), &TenantScope::Global, t.id, update(TicketStatus::Open));
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[test]
    fn analytics_break_down_by_category() {
        let now = Utc::now();
        let service = SupportService::new(
            ResourceStore::seeded(vec![
                ticket(now, TicketCategory::Shipping, Some(5)),
                ticket(now, TicketCategory::Shipping, Some(4)),
                ticket(now, TicketCategory::Technical, None),
            ]),
            Arc::new(FixedClock::at(now)),
        );

        let analytics = service.analytics(&TenantScope::Global).unwrap();
        assert_eq!(analytics.by_category.get(&TicketCategory::Shipping), Some(&2));
        assert_eq!(analytics.by_priority.get(&TicketPriority::High), Some(&3));
        assert_eq!(analytics.avg_satisfaction, Some(4.5));
        assert_eq!(analytics.avg_first_response_hours, None);

        let filtered = service
            .list(&TenantScope::Global, &TicketQuery { category: Some(TicketCategory::Technical), ..Default::default() })
            .unwrap();
        assert_eq!(filtered.len(), 1);
    }
}
