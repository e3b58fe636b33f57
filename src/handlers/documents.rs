// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PackagesScreen, RequireRole},
        tenancy::TenantContext,
    },
};

#[utoipa::path(
    get,
    path = "/api/packages/{id}/label",
    tag = "Packages",
    responses(
        (status = 200, description = "Etiqueta de envio em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn shipping_label_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PackagesScreen>,
    tenant: TenantContext,
    Path(package_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let package = app_state
        .package_service
        .get(&tenant.0, package_id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;
    let pin = package.tracking_pin.clone();

    let pdf_bytes = app_state
        .document_service
        .shipping_label(package)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"etiquette_{}.pdf\"", pin)),
    ];

    Ok((headers, pdf_bytes).into_response())
}
