// src/services/footer_service.rs

use std::sync::{Arc, RwLock};

use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        db_utils::{poisoned_read, poisoned_write},
        error::AppError,
    },
    models::{auth::Session, footer::FooterConfig},
};

// Documento único: o rodapé é sempre substituído por inteiro.
#[derive(Clone)]
pub struct FooterService {
    config: Arc<RwLock<FooterConfig>>,
    clock: Arc<dyn Clock>,
}

impl FooterService {
    pub fn new(config: FooterConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config: Arc::new(RwLock::new(config)), clock }
    }

    pub fn get(&self) -> Result<FooterConfig, AppError> {
        Ok(self.config.read().map_err(poisoned_read)?.clone())
    }

    pub fn replace(&self, actor: &Session, mut config: FooterConfig) -> Result<FooterConfig, AppError> {
        config.validate()?;
        config.updated_at = Some(self.clock.now());

        *self.config.write().map_err(poisoned_write)? = config.clone();
        tracing::info!("🦶 Rodapé atualizado por {}", actor.email);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::FixedClock, db::seed, models::user::Role};
    use chrono::{Duration, Utc};
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

    #[test]
    fn replace_stamps_update_time() {
        let clock = FixedClock::at(Utc::now());
        let service = FooterService::new(seed::footer_config(clock.now()), Arc::new(clock.clone()));

        clock.advance(Duration::minutes(5));
        let mut config = service.get().unwrap();
        config.tagline = "Fret express Chine - Afrique".into();
        service.replace(&root(), config).unwrap();

        let stored = service.get().unwrap();
        assert_eq!(stored.tagline, "Fret express Chine - Afrique");
        assert_eq!(stored.updated_at, Some(clock.now()));
    }

    #[test]
    fn invalid_social_url_keeps_previous_config() {
        let now = Utc::now();
        let service = FooterService::new(seed::footer_config(now), Arc::new(FixedClock::at(now)));
        let before = service.get().unwrap();

        let mut config = before.clone();
        config.social_links[0].url = "not a url".into();
        assert!(matches!(service.replace(&root(), config), Err(AppError::ValidationError(_))));
        assert_eq!(service.get().unwrap(), before);
    }
}
