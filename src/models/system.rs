// src/models/system.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSettings {
    pub backup_enabled: bool,
    pub backup_frequency: BackupFrequency,
    #[validate(range(min = 1, max = 3650, message = "La rétention doit être comprise entre 1 et 3650 jours."))]
    pub retention_days: u32,
    #[serde(default)]
    pub last_backup_at: Option<DateTime<Utc>>,
}

// Configurações globais da plataforma
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[validate(length(min = 1, message = "Le nom de la plateforme est obligatoire."))]
    pub platform_name: String,
    #[validate(email(message = "L'adresse e-mail du support est invalide."))]
    pub support_email: String,
    #[validate(length(equal = 3, message = "La devise doit être un code ISO à 3 lettres."))]
    pub default_currency: String,
    #[validate(length(min = 2, max = 5, message = "Langue invalide."))]
    pub default_language: String,
    pub maintenance_mode: bool,
    pub registration_open: bool,
    #[validate(range(min = 1, max = 500, message = "La taille maximale doit être comprise entre 1 et 500 Mo."))]
    pub max_upload_mb: u32,
    #[validate(nested)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreCount {
    pub store: &'static str,
    pub records: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseOverview {
    pub engine: &'static str,
    pub total_records: usize,
    pub stores: Vec<StoreCount>,
    pub last_backup_at: Option<DateTime<Utc>>,
}
