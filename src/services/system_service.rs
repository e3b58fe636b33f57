// src/services/system_service.rs

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        db_utils::{poisoned_read, poisoned_write},
        error::AppError,
    },
    db::Stores,
    models::{
        auth::Session,
        system::{DatabaseOverview, DatabaseSettings, StoreCount, SystemSettings},
    },
};

const ENGINE: &str = "in-memory";

#[derive(Clone)]
pub struct SystemService {
    settings: Arc<RwLock<SystemSettings>>,
    stores: Stores,
    backup_latency: Duration,
    clock: Arc<dyn Clock>,
}

impl SystemService {
    pub fn new(settings: SystemSettings, stores: Stores, backup_latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { settings: Arc::new(RwLock::new(settings)), stores, backup_latency, clock }
    }

    pub fn get(&self) -> Result<SystemSettings, AppError> {
        Ok(self.settings.read().map_err(poisoned_read)?.clone())
    }

    /// A data do último backup é mantida pelo sistema, não pelo formulário.
    pub fn update(&self, actor: &Session, mut settings: SystemSettings) -> Result<SystemSettings, AppError> {
        settings.validate()?;

        let mut current = self.settings.write().map_err(poisoned_write)?;
        settings.database.last_backup_at = current.database.last_backup_at;
        *current = settings.clone();

        tracing::info!(
            "⚙️ Configurações do sistema atualizadas por {} (manutenção={})",
            actor.email,
            settings.maintenance_mode
        );
        Ok(settings)
    }

    pub async fn run_backup(&self, actor: &Session) -> Result<DatabaseSettings, AppError> {
        tracing::info!("💾 Backup iniciado por {}", actor.email);
        if !self.backup_latency.is_zero() {
            tokio::time::sleep(self.backup_latency).await;
        }

        let now = self.clock.now();
        let mut current = self.settings.write().map_err(poisoned_write)?;
        current.database.last_backup_at = Some(now);

        tracing::info!("💾 Backup concluído");
        Ok(current.database.clone())
    }

    pub fn database_overview(&self) -> Result<DatabaseOverview, AppError> {
        let stores: Vec<StoreCount> = self
            .stores
            .counts()?
            .into_iter()
            .map(|(store, records)| StoreCount { store, records })
            .collect();

        Ok(DatabaseOverview {
            engine: ENGINE,
            total_records: stores.iter().map(|s| s.records).sum(),
            stores,
            last_backup_at: self.get()?.database.last_backup_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::FixedClock, db::seed, models::user::Role};
    use chrono::{Duration as ChronoDuration, Utc};
    use uuid::Uuid;

    fn root() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "root@example.com".into(),
            name: "Root".into(),
            role: Role::SuperAdmin,
            company_id: None,
        }
    }

    fn service(clock: FixedClock) -> SystemService {
        SystemService::new(seed::system_settings(clock.now()), Stores::default(), Duration::ZERO, Arc::new(clock))
    }

    #[tokio::test]
    async fn backup_stamps_time_and_update_keeps_it() {
        let clock = FixedClock::at(Utc::now());
        let service = service(clock.clone());

        clock.advance(ChronoDuration::hours(1));
        let db = service.run_backup(&root()).await.unwrap();
        assert_eq!(db.last_backup_at, Some(clock.now()));

        let mut settings = service.get().unwrap();
        settings.maintenance_mode = true;
        settings.database.last_backup_at = None;
        let saved = service.update(&root(), settings).unwrap();

        assert!(saved.maintenance_mode);
        assert_eq!(saved.database.last_backup_at, Some(clock.now()));
    }

    #[test]
    fn invalid_currency_is_rejected() {
        let service = service(FixedClock::at(Utc::now()));
        let mut settings = service.get().unwrap();
        settings.default_currency = "EURO".into();
        assert!(matches!(service.update(&root(), settings), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn overview_counts_every_store() {
        let overview = service(FixedClock::at(Utc::now())).database_overview().unwrap();
        assert_eq!(overview.stores.len(), 14);
        assert_eq!(overview.total_records, 0);
        assert_eq!(overview.engine, "in-memory");
    }
}
