// src/handlers/packages.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PackagesScreen, RequireRole},
        tenancy::TenantContext,
    },
    models::package::{CreatePackagePayload, Package, PackageForm, PackageQuery, PackageStats},
};

// ---
// Handler: list_packages
// ---
#[utoipa::path(
    get,
    path = "/api/packages",
    tag = "Packages",
    responses(
        (status = 200, description = "Colis filtrados", body = Vec<Package>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        PackageQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_packages(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
    Query(query): Query<PackageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let packages = app_state
        .package_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(packages)))
}

// ---
// Handler: package_stats (a faixa de resumo da tela)
// ---
#[utoipa::path(
    get,
    path = "/api/packages/stats",
    tag = "Packages",
    responses(
        (status = 200, description = "Faixa de indicadores", body = PackageStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn package_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .package_service
        .stats(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    tag = "Packages",
    responses(
        (status = 200, description = "Colis", body = Package),
        (status = 404, description = "Fora do escopo ou inexistente"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_package(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let package = app_state
        .package_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(package))
}

// ---
// Handler: create_package
// ---
#[utoipa::path(
    post,
    path = "/api/packages",
    tag = "Packages",
    request_body = CreatePackagePayload,
    responses(
        (status = 201, description = "Colis criado com PIN gerado", body = ActionResponse<Package>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_package(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
    Json(payload): Json<CreatePackagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let package = app_state
        .package_service
        .create(&guard.session, &tenant.0, payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(package, notice))))
}

// ---
// Handler: update_package (submit do modal de edição)
// ---
#[utoipa::path(
    put,
    path = "/api/packages/{id}",
    tag = "Packages",
    request_body = PackageForm,
    responses(
        (status = 200, description = "Colis atualizado", body = ActionResponse<Package>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_package(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(form): Json<PackageForm>,
) -> Result<impl IntoResponse, ApiError> {
    let package = app_state
        .package_service
        .update(&guard.session, &tenant.0, id, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(package, notice)))
}
