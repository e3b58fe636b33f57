// src/models/footer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    #[validate(length(min = 1, message = "Le libellé est obligatoire."))]
    pub label: String,
    #[validate(length(min = 1, message = "Le lien est obligatoire."))]
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterSection {
    #[validate(length(min = 1, message = "Le titre de la section est obligatoire."))]
    pub title: String,
    #[validate(nested)]
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[validate(length(min = 1, message = "La plateforme est obligatoire."))]
    pub platform: String,
    #[validate(url(message = "L'URL du réseau social est invalide."))]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterContact {
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: String,
    pub phone: String,
    pub address: String,
}

// Configuração completa do rodapé do site público
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    #[validate(length(min = 1, message = "Le nom de l'entreprise est obligatoire."))]
    pub company_name: String,
    #[serde(default)]
    pub tagline: String,
    #[validate(nested)]
    #[serde(default)]
    pub sections: Vec<FooterSection>,
    #[validate(nested)]
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[validate(nested)]
    pub contact: FooterContact,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
