// src/services/api_key_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock::Clock, error::AppError, filter::Projection},
    db::{ResourceStore, TenantScope},
    models::{
        api_key::{
            ApiKey, ApiKeyQuery, ApiTestResponse, CreateApiKeyPayload, CreatedApiKey, KEY_PREFIX,
            VISIBLE_PREFIX_LEN,
        },
        auth::Session,
    },
};

#[derive(Clone)]
pub struct ApiKeyService {
    keys: ResourceStore<ApiKey>,
    bcrypt_cost: u32,
    clock: Arc<dyn Clock>,
}

fn visible_prefix(key: &str) -> String {
    key.chars().take(VISIBLE_PREFIX_LEN).collect()
}

impl ApiKeyService {
    pub fn new(keys: ResourceStore<ApiKey>, bcrypt_cost: u32, clock: Arc<dyn Clock>) -> Self {
        Self { keys, bcrypt_cost, clock }
    }

    pub fn list(&self, scope: &TenantScope, query: &ApiKeyQuery) -> Result<Vec<ApiKey>, AppError> {
        let keys = self.keys.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.active, |k: &ApiKey| k.is_active)
            .apply(&keys))
    }

    /// Gera a chave, guarda só o hash e devolve o texto puro uma única vez.
    pub async fn create(
        &self,
        actor: &Session,
        scope: &TenantScope,
        payload: CreateApiKeyPayload,
    ) -> Result<CreatedApiKey, AppError> {
        payload.validate()?;

        let plaintext = format!("{}{}", KEY_PREFIX, Uuid::new_v4().simple());
        let cost = self.bcrypt_cost;
        let to_hash = plaintext.clone();
        let key_hash = tokio::task::spawn_blocking(move || bcrypt::hash(&to_hash, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let key = ApiKey {
            id: Uuid::new_v4(),
            company_id: scope.company().or(payload.company_id),
            name: payload.name.trim().to_string(),
            prefix: visible_prefix(&plaintext),
            key_hash,
            scopes: payload.scopes,
            is_active: true,
            created_by: actor.user_id,
            created_at: self.clock.now(),
            last_used_at: None,
        };
        let key = self.keys.insert(key)?;

        tracing::info!("🔐 Chave de API '{}' ({}…) criada por {}", key.name, key.prefix, actor.email);
        Ok(CreatedApiKey { key, plaintext })
    }

    pub fn revoke(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<ApiKey, AppError> {
        let key = self.keys.update_with(id, scope, |k| {
            if !k.is_active {
                return Err(AppError::InvalidTransition("Cette clé est déjà révoquée.".into()));
            }
            k.is_active = false;
            Ok(())
        })?;

        tracing::info!("🔐 Chave de API '{}' revogada por {}", key.name, actor.email);
        Ok(key)
    }

    pub fn delete(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<ApiKey, AppError> {
        // Sem modal de edição: a chave só é criada, revogada ou excluída
        let target = self.keys.find(id, scope)?;
        let removed = self.keys.remove(target.id)?;

        tracing::info!("🗑️ Chave de API '{}' excluída por {}", removed.name, actor.email);
        Ok(removed)
    }

    /// Autentica um `X-Api-Key`. Chave desconhecida ou revogada -> 401.
    pub async fn authenticate(&self, presented: &str) -> Result<ApiTestResponse, AppError> {
        let presented = presented.trim().to_string();
        let prefix = visible_prefix(&presented);

        // Vários registros podem dividir o prefixo visível: testa cada um
        let candidates: Vec<ApiKey> = self
            .keys
            .all()?
            .into_iter()
            .filter(|k| k.is_active && k.prefix == prefix)
            .collect();

        let matched = tokio::task::spawn_blocking(move || {
            candidates
                .into_iter()
                .find(|k| bcrypt::verify(&presented, &k.key_hash).unwrap_or(false))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação da chave: {}", e))?
        .ok_or(AppError::InvalidToken)?;

        let now = self.clock.now();
        let key = self.keys.update_with(matched.id, &TenantScope::Global, |k| {
            k.last_used_at = Some(now);
            Ok(())
        })?;

        tracing::debug!("🔐 Chave '{}' usada", key.name);
        Ok(ApiTestResponse { status: "ok", key_name: key.name, scopes: key.scopes, checked_at: now })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::FixedClock, models::user::Role};
    use chrono::Utc;

    fn root() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "root@example.com".into(),
            name: "Root".into(),
            role: Role::SuperAdmin,
            company_id: None,
        }
    }

    fn service() -> ApiKeyService {
        ApiKeyService::new(ResourceStore::default(), 4, Arc::new(FixedClock::at(Utc::now())))
    }

    fn payload(name: &str) -> CreateApiKeyPayload {
        CreateApiKeyPayload { name: name.into(), scopes: vec!["tracking:read".into()], company_id: None }
    }

    #[tokio::test]
    async fn created_key_authenticates_and_records_usage() {
        let service = service();
        let created = service.create(&root(), &TenantScope::Global, payload("Site")).await.unwrap();

        assert!(created.plaintext.starts_with(KEY_PREFIX));
        assert_ne!(created.key.key_hash, created.plaintext);
        assert_eq!(created.key.prefix.len(), VISIBLE_PREFIX_LEN);

        let response = service.authenticate(&created.plaintext).await.unwrap();
        assert_eq!(response.status, "ok");
        assert_eq!(response.key_name, "Site");

        let stored = service.list(&TenantScope::Global, &ApiKeyQuery::default()).unwrap();
        assert!(stored[0].last_used_at.is_some());
    }

    #[tokio::test]
    async fn revoked_and_unknown_keys_are_rejected() {
        let service = service();
        let created = service.create(&root(), &TenantScope::Global, payload("Mobile")).await.unwrap();
        service.revoke(&root(), &TenantScope::Global, created.key.id).unwrap();

        assert!(matches!(service.authenticate(&created.plaintext).await, Err(AppError::InvalidToken)));
        assert!(matches!(service.authenticate("ck_live_nope").await, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn delete_respects_the_company_scope() {
        let service = service();
        let dakar = Uuid::new_v4();
        let created = service.create(&root(), &TenantScope::Company(dakar), payload("Dakar")).await.unwrap();

        let other = TenantScope::Company(Uuid::new_v4());
        assert!(matches!(
            service.delete(&root(), &other, created.key.id),
            Err(AppError::NotFound { .. })
        ));

        let removed = service.delete(&root(), &TenantScope::Company(dakar), created.key.id).unwrap();
        assert_eq!(removed.id, created.key.id);
        assert!(service.list(&TenantScope::Global, &ApiKeyQuery::default()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn plaintext_is_not_serialized_with_the_key() {
        let service = service();
        let created = service.create(&root(), &TenantScope::Global, payload("ERP")).await.unwrap();
        let json = serde_json::to_value(&created.key).unwrap();
        assert!(json.get("keyHash").is_none());
        assert!(json.get("plaintext").is_none());
    }
}
