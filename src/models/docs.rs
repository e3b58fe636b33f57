// src/models/docs.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

// Artigo da central de documentação
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocArticle {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub section: String,
    pub content: String,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl Record for DocArticle {
    const RESOURCE: &'static str = "article";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Searchable for DocArticle {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.section.as_str(), self.content.as_str()]
    }
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let ok = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !ok {
        let mut err = ValidationError::new("slug");
        err.message = Some("Le slug ne peut contenir que des minuscules, des chiffres et des tirets.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocArticleForm {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub title: String,
    #[validate(length(min = 1, message = "La section est obligatoire."))]
    pub section: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

impl DocArticle {
    pub fn from_form(form: DocArticleForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(DocArticle {
            id: Uuid::new_v4(),
            slug: form.slug,
            title: form.title,
            section: form.section,
            content: form.content,
            published: form.published,
            updated_at: now,
        })
    }
}

impl Editable for DocArticle {
    type Form = DocArticleForm;

    fn to_form(&self) -> DocArticleForm {
        DocArticleForm {
            slug: self.slug.clone(),
            title: self.title.clone(),
            section: self.section.clone(),
            content: self.content.clone(),
            published: self.published,
        }
    }

    fn apply_form(&self, form: DocArticleForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(DocArticle {
            slug: form.slug,
            title: form.title,
            section: form.section,
            content: form.content,
            published: form.published,
            updated_at: now,
            ..self.clone()
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct DocQuery {
    pub search: Option<String>,
    pub section: Option<String>,
}
