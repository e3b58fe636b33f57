// src/services/user_service.rs

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        clock::Clock,
        db_utils::{poisoned_read, poisoned_write},
        editor::Editor,
        error::AppError,
        filter::Projection,
        stats::count_where,
    },
    db::{ResourceStore, TenantScope},
    middleware::rbac::DenialReason,
    models::{
        auth::Session,
        user::{CreateUserPayload, Role, RoleCount, User, UserForm, UserPreferences, UserQuery, UserStats},
    },
};

#[derive(Clone)]
pub struct UserService {
    users: ResourceStore<User>,
    preferences: Arc<RwLock<HashMap<Uuid, UserPreferences>>>,
    bcrypt_cost: u32,
    clock: Arc<dyn Clock>,
}

fn same_email(existing: &User, candidate: &User) -> bool {
    existing.email == candidate.email
}

// ADMIN gerencia a própria empresa, mas não cria nem toca em SUPER_ADMIN.
fn guard_role(actor: &Session, role: Role) -> Result<(), AppError> {
    if role == Role::SuperAdmin && actor.role != Role::SuperAdmin {
        return Err(AppError::AccessDenied(DenialReason::RoleNotAllowed {
            role: actor.role,
            screen: "users",
        }));
    }
    Ok(())
}

impl UserService {
    pub fn new(users: ResourceStore<User>, bcrypt_cost: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            preferences: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
            clock,
        }
    }

    pub fn list(&self, scope: &TenantScope, query: &UserQuery) -> Result<Vec<User>, AppError> {
        let users = self.users.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.role, |u: &User| u.role)
            .filter_eq(query.active, |u: &User| u.is_active)
            .apply(&users))
    }

    pub fn stats(&self, scope: &TenantScope) -> Result<UserStats, AppError> {
        let users = self.users.snapshot(scope)?;
        let active = count_where(&users, |u| u.is_active);
        Ok(UserStats {
            total: users.len(),
            active,
            inactive: users.len() - active,
            by_role: Role::ALL
                .iter()
                .map(|role| RoleCount { role: *role, count: count_where(&users, |u| u.role == *role) })
                .collect(),
        })
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<User, AppError> {
        self.users.find(id, scope)
    }

    pub fn me(&self, session: &Session) -> Result<User, AppError> {
        self.users.find(session.user_id, &TenantScope::Global)
    }

    fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> Result<(), AppError> {
        if self.users.exists(|u| u.email == email && Some(u.id) != except)? {
            return Err(AppError::EmailAlreadyExists);
        }
        Ok(())
    }

    pub async fn create(
        &self,
        actor: &Session,
        scope: &TenantScope,
        payload: CreateUserPayload,
    ) -> Result<User, AppError> {
        payload.validate()?;
        guard_role(actor, payload.role)?;

        let email = payload.email.trim().to_lowercase();
        // Falha cedo, antes do bcrypt; a garantia real vem no insert
        self.ensure_email_free(&email, None)?;

        // Fora do SUPER_ADMIN, o usuário nasce na empresa de quem cria.
        // Só o SUPER_ADMIN existe sem empresa.
        let company_id = match (scope, payload.role) {
            (_, Role::SuperAdmin) => None,
            (TenantScope::Company(id), _) => Some(*id),
            (TenantScope::Global, _) => Some(payload.company_id.ok_or(AppError::RequiredField("companyId"))?),
        };

        let cost = self.bcrypt_cost;
        let password = payload.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let now = self.clock.now();
        let form = UserForm { email, name: payload.name, role: payload.role, is_active: true };
        let commit = Editor::<User>::Closed.open_create(form)?.submit_with(now, |form| {
            form.validate()?;
            Ok(User {
                id: Uuid::new_v4(),
                email: form.email,
                name: form.name.trim().to_string(),
                role: form.role,
                is_active: form.is_active,
                company_id,
                password_hash,
                created_at: now,
                updated_at: now,
            })
        })?;

        let user = self.users.apply_unique(commit, same_email, |_| AppError::EmailAlreadyExists)?;
        tracing::info!("👤 Usuário {} criado por {}", user.id, actor.email);
        Ok(user)
    }

    pub fn update(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        form: UserForm,
    ) -> Result<User, AppError> {
        let current = self.users.find(id, scope)?;
        guard_role(actor, current.role)?;
        guard_role(actor, form.role)?;
        self.ensure_email_free(&form.email.trim().to_lowercase(), Some(id))?;

        if actor.user_id == id && (!form.is_active || form.role != current.role) {
            return Err(AppError::Conflict(
                "Vous ne pouvez pas modifier votre propre rôle ni désactiver votre compte.".into(),
            ));
        }
        // Promover ou rebaixar SUPER_ADMIN mudaria a empresa da conta
        if (current.role == Role::SuperAdmin) != (form.role == Role::SuperAdmin) {
            return Err(AppError::Conflict(
                "Le rôle SUPER_ADMIN ne peut être ni attribué ni retiré par modification.".into(),
            ));
        }

        let mut editor = Editor::Closed.open_edit(current)?;
        editor.set_draft(form)?;
        let commit = editor.submit(self.clock.now())?;
        let user = self.users.apply_unique(commit, same_email, |_| AppError::EmailAlreadyExists)?;

        tracing::info!("👤 Usuário {} atualizado por {}", user.id, actor.email);
        Ok(user)
    }

    pub fn toggle_active(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<User, AppError> {
        if actor.user_id == id {
            return Err(AppError::Conflict("Vous ne pouvez pas désactiver votre propre compte.".into()));
        }
        let now = self.clock.now();
        let user = self.users.update_with(id, scope, |user| {
            guard_role(actor, user.role)?;
            user.is_active = !user.is_active;
            user.updated_at = now;
            Ok(())
        })?;

        tracing::info!("👤 Usuário {} ativo={} por {}", user.id, user.is_active, actor.email);
        Ok(user)
    }

    /// Exclusão real do store. Nada em cascata (colis, tickets... ficam como estão).
    pub fn delete(&self, actor: &Session, scope: &TenantScope, id: Uuid) -> Result<User, AppError> {
        if actor.user_id == id {
            return Err(AppError::Conflict("Vous ne pouvez pas supprimer votre propre compte.".into()));
        }
        let target = self.users.find(id, scope)?;
        guard_role(actor, target.role)?;

        let commit = Editor::Closed.confirm_delete(target)?.submit(self.clock.now())?;
        let removed = self.users.apply(commit)?;
        self.preferences.write().map_err(poisoned_write)?.remove(&id);

        tracing::info!("🗑️ Usuário {} excluído por {}", removed.id, actor.email);
        Ok(removed)
    }

    pub fn preferences(&self, user_id: Uuid) -> Result<UserPreferences, AppError> {
        Ok(self
            .preferences
            .read()
            .map_err(poisoned_read)?
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    pub fn set_preferences(&self, user_id: Uuid, preferences: UserPreferences) -> Result<UserPreferences, AppError> {
        self.preferences
            .write()
            .map_err(poisoned_write)?
            .insert(user_id, preferences.clone());
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{clock::SystemClock, editor::Editable};
    use chrono::Utc;

    fn user(role: Role, company: Option<Uuid>, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.into(),
            name: email.split('@').next().unwrap_or_default().into(),
            role,
            is_active: true,
            company_id: company,
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn session_for(user: &User) -> Session {
        Session {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            company_id: user.company_id,
        }
    }

    fn setup() -> (UserService, Vec<User>, Uuid) {
        let company = Uuid::new_v4();
        let users = vec![
            user(Role::SuperAdmin, None, "root@example.com"),
            user(Role::Admin, Some(company), "admin@example.com"),
            user(Role::Agent, Some(company), "agent@example.com"),
            user(Role::Client, Some(Uuid::new_v4()), "other@example.com"),
        ];
        let service = UserService::new(ResourceStore::seeded(users.clone()), 4, Arc::new(SystemClock));
        (service, users, company)
    }

    #[test]
    fn filters_combine_search_role_and_active() {
        let (service, _, company) = setup();
        let scope = TenantScope::Company(company);

        let query = UserQuery { search: Some("EXAMPLE".into()), role: Some(Role::Agent), active: Some(true) };
        let found = service.list(&scope, &query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email, "agent@example.com");

        // O escopo da empresa esconde os outros tenants
        assert_eq!(service.list(&scope, &UserQuery::default()).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn admin_cannot_create_super_admin() {
        let (service, users, company) = setup();
        let admin = session_for(&users[1]);
        let payload = CreateUserPayload {
            email: "new@example.com".into(),
            name: "New".into(),
            password: "secret123".into(),
            role: Role::SuperAdmin,
            company_id: None,
        };
        let err = service.create(&admin, &TenantScope::Company(company), payload).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn created_user_lands_in_the_admin_company() {
        let (service, users, company) = setup();
        let admin = session_for(&users[1]);
        let payload = CreateUserPayload {
            email: "New.Agent@Example.com".into(),
            name: "New Agent".into(),
            password: "secret123".into(),
            role: Role::Agent,
            company_id: Some(Uuid::new_v4()),
        };
        let created = service.create(&admin, &TenantScope::Company(company), payload).await.unwrap();
        assert_eq!(created.company_id, Some(company));
        assert_eq!(created.email, "new.agent@example.com");
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let (service, users, _) = setup();
        let root = session_for(&users[0]);
        let mut form = users[2].to_form();
        form.email = "admin@example.com".into();
        let err = service.update(&root, &TenantScope::Global, users[2].id, form).unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[test]
    fn delete_removes_only_that_user() {
        let (service, users, _) = setup();
        let root = session_for(&users[0]);
        service.delete(&root, &TenantScope::Global, users[3].id).unwrap();

        let left = service.list(&TenantScope::Global, &UserQuery::default()).unwrap();
        assert_eq!(left.len(), 3);
        assert!(left.iter().all(|u| u.id != users[3].id));
    }

    #[tokio::test]
    async fn platform_users_need_a_company_unless_super_admin() {
        let (service, users, company) = setup();
        let root = session_for(&users[0]);
        let payload = |company_id| CreateUserPayload {
            email: "loose.agent@example.com".into(),
            name: "Loose".into(),
            password: "secret123".into(),
            role: Role::Agent,
            company_id,
        };

        let err = service.create(&root, &TenantScope::Global, payload(None)).await.unwrap_err();
        assert!(matches!(err, AppError::RequiredField("companyId")));

        let created = service.create(&root, &TenantScope::Global, payload(Some(company))).await.unwrap();
        assert_eq!(created.company_id, Some(company));
    }

    #[test]
    fn company_admin_cannot_reach_the_super_admin() {
        let (service, users, company) = setup();
        let admin = session_for(&users[1]);
        let scope = TenantScope::Company(company);

        assert!(matches!(service.get(&scope, users[0].id), Err(AppError::NotFound { .. })));
        assert!(matches!(service.toggle_active(&admin, &scope, users[0].id), Err(AppError::NotFound { .. })));
        assert!(matches!(service.delete(&admin, &scope, users[0].id), Err(AppError::NotFound { .. })));
        assert_eq!(service.stats(&scope).unwrap().total, 2);
    }

    #[test]
    fn super_admin_role_cannot_be_granted_by_edit() {
        let (service, users, _) = setup();
        let root = session_for(&users[0]);
        let mut form = users[2].to_form();
        form.role = Role::SuperAdmin;
        let err = service.update(&root, &TenantScope::Global, users[2].id, form).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_creates_with_the_same_email_keep_one_user() {
        let (service, users, company) = setup();
        let admin = session_for(&users[1]);
        let scope = TenantScope::Company(company);
        let payload = || CreateUserPayload {
            email: "twin@example.com".into(),
            name: "Twin".into(),
            password: "secret123".into(),
            role: Role::Client,
            company_id: None,
        };

        let (first, second) = tokio::join!(
            service.create(&admin, &scope, payload()),
            service.create(&admin, &scope, payload()),
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let err = first.err().or(second.err()).unwrap();
        assert!(matches!(err, AppError::EmailAlreadyExists));
        let twins = service
            .list(&TenantScope::Global, &UserQuery { search: Some("twin@".into()), ..Default::default() })
            .unwrap();
        assert_eq!(twins.len(), 1);
    }

    #[test]
    fn preferences_default_then_persist() {
        let (service, users, _) = setup();
        assert!(!service.preferences(users[1].id).unwrap().finance_mode);
        service.set_preferences(users[1].id, UserPreferences { finance_mode: true }).unwrap();
        assert!(service.preferences(users[1].id).unwrap().finance_mode);
    }

}
