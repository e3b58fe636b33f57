// src/services/policy_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        clock::Clock,
        editor::Editor,
        error::AppError,
        filter::Projection,
        stats::{count_where, percentage},
    },
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        policy::{ComplianceStatus, Policy, PolicyForm, PolicyQuery, PolicyStats, PolicyStatus, RiskLevel},
    },
};

#[derive(Clone)]
pub struct PolicyService {
    policies: ResourceStore<Policy>,
    clock: Arc<dyn Clock>,
}

impl PolicyService {
    pub fn new(policies: ResourceStore<Policy>, clock: Arc<dyn Clock>) -> Self {
        Self { policies, clock }
    }

    pub fn list(&self, scope: &TenantScope, query: &PolicyQuery) -> Result<Vec<Policy>, AppError> {
        let policies = self.policies.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.category, |p: &Policy| p.category)
            .filter_eq(query.status, |p: &Policy| p.status)
            .filter_eq(query.compliance, |p: &Policy| p.compliance)
            .filter_eq(query.risk_level, |p: &Policy| p.risk_level)
            .apply(&policies))
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<Policy, AppError> {
        self.policies.find(id, scope)
    }

    pub fn stats(&self, scope: &TenantScope) -> Result<PolicyStats, AppError> {
        let today = self.clock.now().date_naive();
        let policies = self.policies.snapshot(scope)?;
        // Arquivadas não contam para conformidade nem para revisão
        let live: Vec<&Policy> = policies.iter().filter(|p| p.status != PolicyStatus::Archived).collect();

        let employees: u64 = live.iter().map(|p| u64::from(p.employee_count)).sum();
        let acknowledged: u64 = live.iter().map(|p| u64::from(p.acknowledged_count)).sum();

        Ok(PolicyStats {
            total: policies.len(),
            active: count_where(&policies, |p| p.status == PolicyStatus::Active),
            compliance_rate: percentage(
                count_where(live.iter().copied(), |p| p.compliance == ComplianceStatus::Compliant),
                live.len(),
            ),
            acknowledgment_rate: percentage(acknowledged as usize, employees as usize),
            high_risk: count_where(live.iter().copied(), |p| p.risk_level >= RiskLevel::High),
            overdue_reviews: count_where(live.iter().copied(), |p| p.next_review < today),
        })
    }

    pub fn create(&self, actor: &Session, scope: &TenantScope, form: PolicyForm) -> Result<Policy, AppError> {
        let company_id = scope.company().or(actor.company_id);
        let now = self.clock.now();

        let commit = Editor::<Policy>::Closed
            .open_create(form)?
            .submit_with(now, |form| Policy::from_form(form, company_id, now))?;
        let policy = self.policies.apply(commit)?;

        tracing::info!("📜 Política '{}' criada por {}", policy.title, actor.email);
        Ok(policy)
    }

    pub fn update(&self, actor: &Session, scope: &TenantScope, id: Uuid, form: PolicyForm) -> Result<Policy, AppError> {
        let current = self.policies.find(id, scope)?;
        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(form)?;
        let policy = self.policies.apply(editor.submit(self.clock.now())?)?;

        tracing::info!("📜 Política '{}' atualizada por {}", policy.title, actor.email);
        Ok(policy)
    }

    pub fn archive(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<Policy, AppError> {
        let now = self.clock.now();
        let policy = self.policies.update_with(id, scope, |p| {
            if p.status == PolicyStatus::Archived {
                return Err(AppError::InvalidTransition(format!("La politique « {} » est déjà archivée.", p.title)));
            }
            p.status = PolicyStatus::Archived;
            p.updated_at = now;
            Ok(())
        })?;

        tracing::info!("📜 Política '{}' arquivada por {}", policy.title, actor.email);
        Ok(policy)
    }

    /// Registra a ciência de um funcionário. Nunca passa do quadro.
    pub fn acknowledge(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<Policy, AppError> {
        let now = self.clock.now();
        let policy = self.policies.update_with(id, scope, |p| {
            if p.status != PolicyStatus::Active {
                return Err(AppError::InvalidTransition(format!(
                    "La politique « {} » n'est pas en vigueur.",
                    p.title
                )));
            }
            if p.acknowledged_count >= p.employee_count {
                return Err(AppError::Conflict(format!(
                    "Tous les employés ont déjà pris connaissance de « {} ».",
                    p.title
                )));
            }
            p.acknowledged_count += 1;
            p.updated_at = now;
            Ok(())
        })?;

        tracing::debug!("📜 Ciência registrada em '{}' por {}", policy.title, actor.email);
        Ok(policy)
    }
}
