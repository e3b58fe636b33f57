// src/services/package_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        clock::Clock,
        editor::{Editable, Editor},
        error::AppError,
        filter::Projection,
        stats::{count_where, percentage, sum_decimal},
    },
    db::{ResourceStore, TenantScope},
    models::{
        auth::Session,
        package::{
            CreatePackagePayload, Package, PackageForm, PackageQuery, PackageStats, PackageStatus,
            PaymentStatus, StatusCount, TrackingInfo,
        },
    },
};

const PIN_PREFIX: &str = "CA-";
const PIN_LEN: usize = 8;

#[derive(Clone)]
pub struct PackageService {
    packages: ResourceStore<Package>,
    clock: Arc<dyn Clock>,
}

impl PackageService {
    pub fn new(packages: ResourceStore<Package>, clock: Arc<dyn Clock>) -> Self {
        Self { packages, clock }
    }

    pub fn list(&self, scope: &TenantScope, query: &PackageQuery) -> Result<Vec<Package>, AppError> {
        let packages = self.packages.snapshot(scope)?;
        Ok(Projection::new(query.search.as_deref())
            .filter_eq(query.status, |p: &Package| p.status)
            .filter_eq(query.transport_mode, |p: &Package| p.transport_mode)
            .filter_eq(query.payment_status, |p: &Package| p.payment_status)
            .apply(&packages))
    }

    pub fn stats(&self, scope: &TenantScope) -> Result<PackageStats, AppError> {
        let packages = self.packages.snapshot(scope)?;
        Ok(PackageStats {
            total: packages.len(),
            by_status: PackageStatus::ALL
                .iter()
                .map(|status| StatusCount {
                    status: *status,
                    count: count_where(&packages, |p| p.status == *status),
                })
                .collect(),
            total_revenue: sum_decimal(&packages, |p| p.price),
            paid_percentage: percentage(
                count_where(&packages, |p| p.payment_status == PaymentStatus::Paid),
                packages.len(),
            ),
            total_weight_kg: sum_decimal(&packages, |p| p.weight_kg),
        })
    }

    pub fn get(&self, scope: &TenantScope, id: Uuid) -> Result<Package, AppError> {
        self.packages.find(id, scope)
    }

    // PIN curto, legível e único: "CA-" + 8 caracteres alfanuméricos
    fn generate_pin(&self) -> Result<String, AppError> {
        loop {
            let raw = Uuid::new_v4().simple().to_string().to_uppercase();
            let pin = format!("{}{}", PIN_PREFIX, &raw[..PIN_LEN]);
            if !self.packages.exists(|p| p.tracking_pin == pin)? {
                return Ok(pin);
            }
        }
    }

    pub fn create(
        &self,
        actor: &Session,
        scope: &TenantScope,
        payload: CreatePackagePayload,
    ) -> Result<Package, AppError> {
        let company_id = scope.company().or(payload.company_id);
        let tracking_pin = self.generate_pin()?;
        let now = self.clock.now();

        let commit = Editor::<Package>::Closed
            .open_create(payload.form)?
            .submit_with(now, |form| {
                let blank = Package {
                    id: Uuid::new_v4(),
                    company_id,
                    tracking_pin,
                    description: String::new(),
                    weight_kg: form.weight_kg,
                    dimensions: form.dimensions.clone(),
                    transport_mode: form.transport_mode,
                    status: form.status,
                    price: form.price,
                    payment_status: form.payment_status,
                    client_name: String::new(),
                    created_at: now,
                    updated_at: now,
                };
                // Reaproveita a validação do formulário de edição
                blank.apply_form(form, now)
            })?;

        let package = self.packages.apply(commit)?;
        tracing::info!("📦 Colis {} ({}) criado por {}", package.id, package.tracking_pin, actor.email);
        Ok(package)
    }

    pub fn update(
        &self,
        actor: &Session,
        scope: &TenantScope,
        id: Uuid,
        form: PackageForm,
    ) -> Result<Package, AppError> {
        // A tela abre o colis em detalhes e só então passa para a edição
        let current = self.packages.find(id, scope)?;
        let mut editor = Editor::Closed.open_view(current)?.edit_viewed()?;
        editor.set_draft(form)?;
        let package = self.packages.apply(editor.submit(self.clock.now())?)?;

        tracing::info!("📦 Colis {} atualizado por {}", package.id, actor.email);
        Ok(package)
    }

    /// Rastreio público pelo PIN (sem diferenciar maiúsculas).
    pub fn track(&self, pin: &str) -> Result<TrackingInfo, AppError> {
        let wanted = pin.trim().to_uppercase();
        self.packages
            .find_by(|p| p.tracking_pin == wanted)?
            .map(|p| TrackingInfo::from(&p))
            .ok_or_else(|| AppError::NotFound { resource: "package", id: wanted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        models::{
            package::{Dimensions, TransportMode},
            user::Role,
        },
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn form(description: &str, client: &str) -> PackageForm {
        PackageForm {
            description: description.into(),
            weight_kg: Decimal::new(125, 1),
            dimensions: Dimensions { length_cm: 50.0, width_cm: 40.0, height_cm: 30.0 },
            transport_mode: TransportMode::Aerial,
            status: PackageStatus::Planned,
            price: Decimal::new(15000, 2),
            payment_status: PaymentStatus::Pending,
            client_name: client.into(),
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

    fn service() -> PackageService {
        PackageService::new(ResourceStore::default(), Arc::new(FixedClock::at(Utc::now())))
    }

    #[test]
    fn created_package_gets_unique_pin_and_is_trackable() {
        let service = service();
        let created = service
            .create(&root(), &TenantScope::Global, CreatePackagePayload { form: form("Tissus", "Awa"), company_id: None })
            .unwrap();

        assert!(created.tracking_pin.starts_with("CA-"));
        assert_eq!(created.tracking_pin.len(), 11);

        let tracked = service.track(&created.tracking_pin.to_lowercase()).unwrap();
        assert_eq!(tracked.description, "Tissus");
    }

    #[test]
    fn invalid_form_is_not_inserted() {
        let service = service();
        let result = service.create(
            &root(),
            &TenantScope::Global,
            CreatePackagePayload { form: form("", "Awa"), company_id: None },
        );
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(service.list(&TenantScope::Global, &PackageQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn search_matches_pin_description_client_and_id() {
        let service = service();
        let a = service
            .create(&root(), &TenantScope::Global, CreatePackagePayload { form: form("Téléphones", "Moussa"), company_id: None })
            .unwrap();
        service
            .create(&root(), &TenantScope::Global, CreatePackagePayload { form: form("Pagnes", "Fatou"), company_id: None })
            .unwrap();

        let by_client = PackageQuery { search: Some("mouss".into()), ..Default::default() };
        assert_eq!(service.list(&TenantScope::Global, &by_client).unwrap(), vec![a.clone()]);

        let by_id = PackageQuery { search: Some(a.id.to_string()), ..Default::default() };
        assert_eq!(service.list(&TenantScope::Global, &by_id).unwrap(), vec![a]);
    }

    #[test]
    fn stats_count_statuses_and_paid_share() {
        let service = service();
        let created = service
            .create(&root(), &TenantScope::Global, CreatePackagePayload { form: form("A", "X"), company_id: None })
            .unwrap();
        service
            .create(&root(), &TenantScope::Global, CreatePackagePayload { form: form("B", "Y"), company_id: None })
            .unwrap();

        let mut paid = form("A", "X");
        paid.payment_status = PaymentStatus::Paid;
        paid.status = PackageStatus::InTransit;
        service.update(&root(), &TenantScope::Global, created.id, paid).unwrap();

        let stats = service.stats(&TenantScope::Global).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.paid_percentage, 50.0);
        assert_eq!(stats.total_revenue, Decimal::new(30000, 2));
        let in_transit = stats.by_status.iter().find(|c| c.status == PackageStatus::InTransit).unwrap();
        assert_eq!(in_transit.count, 1);
    }
}
