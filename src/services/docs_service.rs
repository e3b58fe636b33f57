// src/services/docs_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{clock::Clock, editor::Editor, error::AppError, filter::Projection},
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        docs::{DocArticle, DocArticleForm, DocQuery},
        user::Role,
    },
};

const SCOPE: TenantScope = TenantScope::Global;

// Rascunhos (não publicados) só aparecem para o SUPER_ADMIN.
fn sees_drafts(viewer: Option<&Session>) -> bool {
    viewer.is_some_and(|s| s.role == Role::SuperAdmin)
}

#[derive(Clone)]
pub struct DocsService {
    articles: ResourceStore<DocArticle>,
    clock: Arc<dyn Clock>,
}

impl DocsService {
    pub fn new(articles: ResourceStore<DocArticle>, clock: Arc<dyn Clock>) -> Self {
        Self { articles, clock }
    }

    pub fn list(&self, viewer: Option<&Session>, query: &DocQuery) -> Result<Vec<DocArticle>, AppError> {
        let drafts = sees_drafts(viewer);
        let articles = self.articles.snapshot(&SCOPE)?;
        let section = query.section.as_ref().map(|s| s.trim().to_lowercase());

        Ok(Projection::new(query.search.as_deref())
            .filter(move |a: &DocArticle| drafts || a.published)
            .filter(move |a: &DocArticle| section.as_ref().is_none_or(|s| a.section.to_lowercase() == *s))
            .apply(&articles))
    }

    fn by_slug(&self, slug: &str) -> Result<DocArticle, AppError> {
        self.articles
            .find_by(|a| a.slug == slug)?
            .ok_or_else(|| AppError::NotFound { resource: "article", id: slug.to_string() })
    }

    pub fn get(&self, viewer: Option<&Session>, slug: &str) -> Result<DocArticle, AppError> {
        let article = self.by_slug(slug)?;
        if !article.published && !sees_drafts(viewer) {
            return Err(AppError::NotFound { resource: "article", id: slug.to_string() });
        }
        Ok(article)
    }

    fn ensure_slug_free(&self, slug: &str, except: Option<Uuid>) -> Result<(), AppError> {
        if self.articles.exists(|a| a.slug == slug && Some(a.id) != except)? {
            return Err(AppError::Conflict(format!("Un article avec le slug « {} » existe déjà.", slug)));
        }
        Ok(())
    }

    pub fn create(&self, actor: &Session, form: DocArticleForm) -> Result<DocArticle, AppError> {
        self.ensure_slug_free(&form.slug, None)?;
        let now = self.clock.now();

        let commit = Editor::<DocArticle>::Closed
            .open_create(form)?
            .submit_with(now, |form| DocArticle::from_form(form, now))?;
        let article = self.articles.apply(commit)?;

        tracing::info!("📚 Artigo '{}' criado por {}", article.slug, actor.email);
        Ok(article)
    }

    pub fn update(&self, actor: &Session, slug: &str, form: DocArticleForm) -> Result<DocArticle, AppError> {
        let current = self.by_slug(slug)?;
        self.ensure_slug_free(&form.slug, Some(current.id))?;

        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(form)?;
        let article = self.articles.apply(editor.submit(self.clock.now())?)?;

        tracing::info!("📚 Artigo '{}' atualizado por {}", article.slug, actor.email);
        Ok(article)
    }

    pub fn delete(&self, actor: &Session, slug: &str) -> Result<DocArticle, AppError> {
        let target = self.by_slug(slug)?;
        let commit = Editor::Closed.confirm_delete(target)?.submit(self.clock.now())?;
        let removed = self.articles.apply(commit)?;

        tracing::info!("🗑️ Artigo '{}' excluído por {}", removed.slug, actor.email);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::SystemClock;

    fn session(role: Role) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            name: "Someone".into(),
            role,
            company_id: None,
        }
    }

    fn form(slug: &str, section: &str, published: bool) -> DocArticleForm {
        DocArticleForm {
            slug: slug.into(),
            title: format!("Guide {}", slug),
            section: section.into(),
            content: "Déclarez la valeur de vos marchandises.".into(),
            published,
        }
    }

    fn service() -> DocsService {
        let service = DocsService::new(ResourceStore::default(), Arc::new(SystemClock));
        let root = session(Role::SuperAdmin);
        service.create(&root, form("premiers-pas", "Démarrage", true)).unwrap();
        service.create(&root, form("api-v2", "API", false)).unwrap();
        service
    }

    #[test]
    fn drafts_are_hidden_from_everyone_but_super_admin() {
        let service = service();
        let root = session(Role::SuperAdmin);
        let client = session(Role::Client);

        assert_eq!(service.list(Some(&root), &DocQuery::default()).unwrap().len(), 2);
        assert_eq!(service.list(Some(&client), &DocQuery::default()).unwrap().len(), 1);
        assert_eq!(service.list(None, &DocQuery::default()).unwrap().len(), 1);

        assert!(service.get(Some(&root), "api-v2").is_ok());
        assert!(matches!(service.get(None, "api-v2"), Err(AppError::NotFound { .. })));
    }

    #[test]
    fn section_filter_and_search_combine() {
        let service = service();
        let root = session(Role::SuperAdmin);
        let query = DocQuery { search: Some("marchandises".into()), section: Some("api".into()) };
        let found = service.list(Some(&root), &query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "api-v2");
    }

    #[test]
    fn slugs_are_unique_and_validated() {
        let service = service();
        let root = session(Role::SuperAdmin);
        assert!(matches!(
            service.create(&root, form("premiers-pas", "Autre", true)),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            service.create(&root, form("Avec Espaces", "Autre", true)),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn update_can_rename_and_delete_removes() {
        let service = service();
        let root = session(Role::SuperAdmin);
        let renamed = service.update(&root, "api-v2", form("api-v3", "API", true)).unwrap();
        assert_eq!(renamed.slug, "api-v3");
        assert!(service.get(None, "api-v3").is_ok());

        service.delete(&root, "api-v3").unwrap();
        assert!(matches!(service.get(Some(&root), "api-v3"), Err(AppError::NotFound { .. })));
    }
}
