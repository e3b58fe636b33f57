// src/services/payment_service.rs

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, editor::Editor, error::AppError, filter::Projection, stats::count_where},
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        payment::{
            ConnectionTestResult, CredentialsForm, PaymentEnvironment, PaymentProvider,
            PaymentProviderView, PaymentStats,
        },
    },
};

const SCOPE: TenantScope = TenantScope::Global;

/// Teste de conexão com o agregador. Nenhum provedor real é chamado.
#[async_trait]
pub trait ConnectionCheck: Send + Sync {
    async fn check(&self, provider: &PaymentProvider) -> bool;
}

// Espera a latência configurada e "conecta" se as credenciais estiverem completas.
pub struct SimulatedCheck {
    latency: Duration,
}

impl SimulatedCheck {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ConnectionCheck for SimulatedCheck {
    async fn check(&self, provider: &PaymentProvider) -> bool {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        provider.has_credentials()
    }
}

#[derive(Clone)]
pub struct PaymentService {
    providers: ResourceStore<PaymentProvider>,
    checker: Arc<dyn ConnectionCheck>,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(
        providers: ResourceStore<PaymentProvider>,
        checker: Arc<dyn ConnectionCheck>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { providers, checker, clock }
    }

    pub fn list(&self, search: Option<&str>) -> Result<Vec<PaymentProviderView>, AppError> {
        let providers = self.providers.snapshot(&SCOPE)?;
        Ok(Projection::new(search)
            .apply(&providers)
            .iter()
            .map(PaymentProviderView::from)
            .collect())
    }

    pub fn get(&self, id: Uuid) -> Result<PaymentProviderView, AppError> {
        Ok(PaymentProviderView::from(&self.providers.find(id, &SCOPE)?))
    }

    pub fn update_credentials(
        &self,
        actor: &Session,
        id: Uuid,
        form: CredentialsForm,
    ) -> Result<PaymentProviderView, AppError> {
        let current = self.providers.find(id, &SCOPE)?;
        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(form)?;
        let provider = self.providers.apply(editor.submit(self.clock.now())?)?;

        tracing::info!(
            "💳 Credenciais de {} atualizadas por {} (conectado={})",
            provider.name,
            actor.email,
            provider.is_connected
        );
        Ok(PaymentProviderView::from(&provider))
    }

    pub async fn test_connection(&self, actor: &Session, id: Uuid) -> Result<ConnectionTestResult, AppError> {
        let provider = self.providers.find(id, &SCOPE)?;

        let started = std::time::Instant::now();
        let connected = self.checker.check(&provider).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let tested_at = self.clock.now();
        self.providers.update_with(id, &SCOPE, |p| {
            p.is_connected = connected;
            p.last_tested_at = Some(tested_at);
            // Provedor que perdeu a conexão não pode continuar ativo
            if !connected {
                p.is_active = false;
            }
            Ok(())
        })?;

        if connected {
            tracing::info!("💳 Conexão com {} OK ({} ms), teste por {}", provider.name, latency_ms, actor.email);
        } else {
            tracing::warn!("💳 Conexão com {} falhou, teste por {}", provider.name, actor.email);
        }

        Ok(ConnectionTestResult { provider_id: id, connected, latency_ms, tested_at })
    }

    pub fn toggle_active(&self, actor: &Session, id: Uuid) -> Result<PaymentProviderView, AppError> {
        let now = self.clock.now();
        let provider = self.providers.update_with(id, &SCOPE, |p| {
            if !p.is_active && !p.is_connected {
                return Err(AppError::Conflict(format!(
                    "{} doit être connecté avant d'être activé.",
                    p.name
                )));
            }
            p.is_active = !p.is_active;
            p.updated_at = now;
            Ok(())
        })?;

        tracing::info!("💳 {} ativo={} por {}", provider.name, provider.is_active, actor.email);
        Ok(PaymentProviderView::from(&provider))
    }

    pub fn stats(&self) -> Result<PaymentStats, AppError> {
        let providers = self.providers.snapshot(&SCOPE)?;
        Ok(PaymentStats {
            total: providers.len(),
            connected: count_where(&providers, |p| p.is_connected),
            active: count_where(&providers, |p| p.is_active),
            production: count_where(&providers, |p| p.environment == PaymentEnvironment::Production),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::SystemClock, models::user::Role};
    use chrono::Utc;

    fn provider(name: &str, api_key: &str, secret: &str, merchant: &str) -> PaymentProvider {
        PaymentProvider {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: "mobile_money".into(),
            api_key: api_key.into(),
            secret_key: secret.into(),
            merchant_id: merchant.into(),
            webhook_url: "https://example.com/webhooks/pay".into(),
            environment: PaymentEnvironment::Sandbox,
            is_connected: false,
            is_active: false,
            last_tested_at: None,
            updated_at: Utc::now(),
        }
    }

    fn root() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "root@example.com".into(),
            name: "Root".into(),
            role: Role::SuperAdmin,
            company_id: None,
        }
    }

    fn setup(providers: Vec<PaymentProvider>) -> PaymentService {
        PaymentService::new(
            ResourceStore::seeded(providers),
            Arc::new(SimulatedCheck::new(Duration::ZERO)),
            Arc::new(SystemClock),
        )
    }

    #[tokio::test]
    async fn only_connected_providers_can_be_activated() {
        let complete = provider("CinetPay", "pk_123456789", "sk_abcdefgh", "M-01");
        let empty = provider("Paystack", "", "", "");
        let service = setup(vec![complete.clone(), empty.clone()]);

        assert!(matches!(service.toggle_active(&root(), complete.id), Err(AppError::Conflict(_))));

        let result = service.test_connection(&root(), complete.id).await.unwrap();
        assert!(result.connected);
        assert!(service.toggle_active(&root(), complete.id).unwrap().is_active);

        let result = service.test_connection(&root(), empty.id).await.unwrap();
        assert!(!result.connected);
        assert!(service.get(empty.id).unwrap().last_tested_at.is_some());
    }

    #[test]
    fn secrets_are_masked_and_blank_secret_is_kept() {
        let p = provider("Flutterwave", "FLWPUBK-1234", "FLWSECK-9876", "FW-9");
        let service = setup(vec![p.clone()]);

        let view = service
            .update_credentials(
                &root(),
                p.id,
                CredentialsForm {
                    api_key: "FLWPUBK-1234".into(),
                    secret_key: "   ".into(),
                    merchant_id: "FW-9".into(),
                    webhook_url: "https://example.com/hooks".into(),
                    environment: None,
                },
            )
            .unwrap();

        assert_eq!(view.secret_key, "••••••••9876");
        assert_eq!(view.webhook_url, "https://example.com/hooks");
    }

    #[tokio::test]
    async fn changing_credentials_drops_the_connection() {
        let p = provider("CinetPay", "pk_123456789", "sk_abcdefgh", "M-01");
        let service = setup(vec![p.clone()]);
        service.test_connection(&root(), p.id).await.unwrap();
        service.toggle_active(&root(), p.id).unwrap();

        let form = CredentialsForm {
            api_key: "pk_rotated_0001".into(),
            secret_key: String::new(),
            merchant_id: "M-01".into(),
            webhook_url: "https://example.com/webhooks/pay".into(),
            environment: Some(PaymentEnvironment::Sandbox),
        };
        let view = service.update_credentials(&root(), p.id, form).unwrap();
        assert!(!view.is_connected);
        assert!(!view.is_active);

        let stats = service.stats().unwrap();
        assert_eq!((stats.total, stats.connected, stats.active), (1, 0, 0));
    }
}
