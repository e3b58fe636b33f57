// src/db/store.rs

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::common::{
    db_utils::{poisoned_read, poisoned_write},
    editor::Commit,
    error::AppError,
};

/// Um registro guardado em memória.
pub trait Record: Clone + Send + Sync + 'static {
    /// Nome usado nas mensagens de "não encontrado".
    const RESOURCE: &'static str;

    fn id(&self) -> Uuid;

    /// Empresa dona do registro. `None` = registro da plataforma.
    fn company_id(&self) -> Option<Uuid> {
        None
    }

    /// Se um registro sem empresa aparece para os escopos de empresa.
    /// Contas sem empresa (o SUPER_ADMIN) ficam só no escopo global.
    const UNOWNED_IS_SHARED: bool = true;
}

// O equivalente em memória do RLS: quem lê enxerga só a própria empresa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    Global,
    Company(Uuid),
}

impl TenantScope {
    pub fn admits<T: Record>(&self, record: &T) -> bool {
        match (self, record.company_id()) {
            (TenantScope::Global, _) => true,
            (TenantScope::Company(_), None) => T::UNOWNED_IS_SHARED,
            (TenantScope::Company(mine), Some(theirs)) => *mine == theirs,
        }
    }

    pub fn company(&self) -> Option<Uuid> {
        match self {
            TenantScope::Global => None,
            TenantScope::Company(id) => Some(*id),
        }
    }
}

/// A "base de dados" local de uma tela: um Vec compartilhado, semeado com dados fictícios.
#[derive(Clone)]
pub struct ResourceStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

impl<T: Record> ResourceStore<T> {
    pub fn seeded(records: Vec<T>) -> Self {
        Self { records: Arc::new(RwLock::new(records)) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, AppError> {
        self.records.read().map_err(poisoned_read)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, AppError> {
        self.records.write().map_err(poisoned_write)
    }

    /// Tudo, sem escopo. Uso interno (estatísticas globais, autenticação).
    pub fn all(&self) -> Result<Vec<T>, AppError> {
        Ok(self.read()?.clone())
    }

    pub fn snapshot(&self, scope: &TenantScope) -> Result<Vec<T>, AppError> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| scope.admits(*r))
            .cloned()
            .collect())
    }

    // Registro fora do escopo é tratado como inexistente.
    pub fn find(&self, id: Uuid, scope: &TenantScope) -> Result<T, AppError> {
        self.read()?
            .iter()
            .find(|r| r.id() == id && scope.admits(*r))
            .cloned()
            .ok_or_else(|| AppError::not_found(T::RESOURCE, id))
    }

    pub fn find_by<P>(&self, predicate: P) -> Result<Option<T>, AppError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.read()?.iter().find(|r| predicate(r)).cloned())
    }

    pub fn exists<P>(&self, predicate: P) -> Result<bool, AppError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.read()?.iter().any(|r| predicate(r)))
    }

    pub fn insert(&self, record: T) -> Result<T, AppError> {
        self.write()?.push(record.clone());
        Ok(record)
    }

    /// Insere só se nenhum outro registro colidir. Checagem e escrita sob o mesmo lock.
    pub fn insert_unique<C, E>(&self, record: T, collides: C, conflict: E) -> Result<T, AppError>
    where
        C: Fn(&T, &T) -> bool,
        E: FnOnce(&T) -> AppError,
    {
        self.apply_unique(Commit::Insert(record), collides, conflict)
    }

    /// `apply` com restrição de unicidade (e-mail, código...). O próprio registro
    /// não conta como colisão numa substituição.
    pub fn apply_unique<C, E>(&self, commit: Commit<T>, collides: C, conflict: E) -> Result<T, AppError>
    where
        C: Fn(&T, &T) -> bool,
        E: FnOnce(&T) -> AppError,
    {
        let mut records = self.write()?;
        match commit {
            Commit::Insert(record) => {
                if records.iter().any(|r| collides(r, &record)) {
                    return Err(conflict(&record));
                }
                records.push(record.clone());
                Ok(record)
            }
            Commit::Replace(record) => {
                if records.iter().any(|r| r.id() != record.id() && collides(r, &record)) {
                    return Err(conflict(&record));
                }
                let slot = records
                    .iter_mut()
                    .find(|r| r.id() == record.id())
                    .ok_or_else(|| AppError::not_found(T::RESOURCE, record.id()))?;
                *slot = record.clone();
                Ok(record)
            }
            Commit::Remove(id) => {
                drop(records);
                self.remove(id)
            }
        }
    }

    /// Substitui o registro de mesmo id; os demais ficam intactos.
    pub fn replace(&self, record: T) -> Result<T, AppError> {
        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| AppError::not_found(T::RESOURCE, record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    pub fn remove(&self, id: Uuid) -> Result<T, AppError> {
        let mut records = self.write()?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(T::RESOURCE, id))?;
        Ok(records.remove(index))
    }

    /// Aplica o resultado de um modal confirmado. Devolve o registro afetado.
    pub fn apply(&self, commit: Commit<T>) -> Result<T, AppError> {
        match commit {
            Commit::Insert(record) => self.insert(record),
            Commit::Replace(record) => self.replace(record),
            Commit::Remove(id) => self.remove(id),
        }
    }

    /// Mutação atômica de um registro: a closure trabalha numa cópia, que só
    /// é gravada se ela retornar Ok.
    pub fn update_with<F>(&self, id: Uuid, scope: &TenantScope, mutate: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut T) -> Result<(), AppError>,
    {
        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id && scope.admits(&**r))
            .ok_or_else(|| AppError::not_found(T::RESOURCE, id))?;
        let mut draft = slot.clone();
        mutate(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.read()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Parcel {
        id: Uuid,
        company: Option<Uuid>,
        weight: u32,
    }

    impl Record for Parcel {
        const RESOURCE: &'static str = "parcel";
        fn id(&self) -> Uuid {
            self.id
        }
        fn company_id(&self) -> Option<Uuid> {
            self.company
        }
    }

    #[test]
    fn company_scope_hides_other_tenants() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let store = ResourceStore::seeded(vec![
            Parcel { id: Uuid::new_v4(), company: Some(a), weight: 1 },
            Parcel { id: Uuid::new_v4(), company: Some(b), weight: 2 },
            Parcel { id: Uuid::new_v4(), company: None, weight: 3 },
        ]);

        let seen = store.snapshot(&TenantScope::Company(a)).unwrap();
        assert_eq!(seen.iter().map(|p| p.weight).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(store.snapshot(&TenantScope::Global).unwrap().len(), 3);

        let foreign = store.all().unwrap()[1].id;
        assert!(matches!(
            store.find(foreign, &TenantScope::Company(a)),
            Err(AppError::NotFound { .. })
        ));
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        id: Uuid,
        company: Option<Uuid>,
        email: String,
    }

    impl Record for Account {
        const RESOURCE: &'static str = "account";
        const UNOWNED_IS_SHARED: bool = false;
        fn id(&self) -> Uuid {
            self.id
        }
        fn company_id(&self) -> Option<Uuid> {
            self.company
        }
    }

    fn account(company: Option<Uuid>, email: &str) -> Account {
        Account { id: Uuid::new_v4(), company, email: email.into() }
    }

    #[test]
    fn unowned_accounts_stay_out_of_company_scopes() {
        let a = Uuid::new_v4();
        let root = account(None, "root@example.com");
        let store = ResourceStore::seeded(vec![root.clone(), account(Some(a), "admin@example.com")]);

        let seen = store.snapshot(&TenantScope::Company(a)).unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].email, "admin@example.com");
        assert!(matches!(store.find(root.id, &TenantScope::Company(a)), Err(AppError::NotFound { .. })));
        assert!(store.update_with(root.id, &TenantScope::Company(a), |_| Ok(())).is_err());
        assert_eq!(store.snapshot(&TenantScope::Global).unwrap().len(), 2);
    }

    #[test]
    fn insert_unique_rejects_collisions_and_replace_ignores_itself() {
        let same_email = |a: &Account, b: &Account| a.email == b.email;
        let taken = |a: &Account| AppError::Conflict(a.email.clone());
        let store = ResourceStore::seeded(vec![account(None, "a@example.com")]);

        let err = store.insert_unique(account(None, "a@example.com"), same_email, taken).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref email) if email == "a@example.com"));
        assert_eq!(store.len().unwrap(), 1);

        let b = store.insert_unique(account(None, "b@example.com"), same_email, taken).unwrap();
        // Regravar o mesmo e-mail no próprio registro não é colisão
        store.apply_unique(Commit::Replace(b.clone()), same_email, taken).unwrap();

        let stolen = Account { email: "a@example.com".into(), ..b };
        assert!(matches!(
            store.apply_unique(Commit::Replace(stolen), same_email, taken),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(store.all().unwrap()[1].email, "b@example.com");
    }

    #[test]
    fn concurrent_unique_inserts_keep_a_single_winner() {
        let store: ResourceStore<Account> = ResourceStore::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .insert_unique(
                            account(None, "dup@example.com"),
                            |a, b| a.email == b.email,
                            |_| AppError::EmailAlreadyExists,
                        )
                        .is_ok()
                })
            })
            .collect();

        let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|&won| won).count();
        assert_eq!(winners, 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn failed_update_leaves_record_unchanged() {
        let id = Uuid::new_v4();
        let store = ResourceStore::seeded(vec![Parcel { id, company: None, weight: 10 }]);

        let result = store.update_with(id, &TenantScope::Global, |p| {
            p.weight = 99;
            Err(AppError::Conflict("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.all().unwrap()[0].weight, 10);
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let store: ResourceStore<Parcel> = ResourceStore::default();
        let err = store.replace(Parcel { id: Uuid::new_v4(), company: None, weight: 1 }).unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "parcel", .. }));
    }
}
