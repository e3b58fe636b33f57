// src/handlers/support.rs

use axum::{
    extract::{Path, Query, State},
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
        rbac::{RequireRole, SupportScreen},
        tenancy::TenantContext,
    },
    models::support::{SupportAnalytics, Ticket, TicketQuery, UpdateTicketPayload},
};

#[utoipa::path(
    get,
    path = "/api/support/tickets",
    tag = "Support",
    responses(
        (status = 200, description = "Tickets", body = Vec<Ticket>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        TicketQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tickets(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SupportScreen>,
    tenant: TenantContext,
    Query(query): Query<TicketQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tickets = app_state
        .support_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(tickets))
}

#[utoipa::path(
    get,
    path = "/api/support/tickets/{id}",
    tag = "Support",
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ticket(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SupportScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = app_state
        .support_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(ticket))
}

#[utoipa::path(
    patch,
    path = "/api/support/tickets/{id}",
    tag = "Support",
    request_body = UpdateTicketPayload,
    responses(
        (status = 200, description = "Ticket atualizado", body = ActionResponse<Ticket>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ticket(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SupportScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = app_state
        .support_service
        .update(&guard.session, &tenant.0, id, payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(ticket, notice)))
}

#[utoipa::path(
    get,
    path = "/api/support/analytics",
    tag = "Support",
    responses(
        (status = 200, description = "Tempos de resposta e satisfação", body = SupportAnalytics),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn support_analytics(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SupportScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let analytics = app_state
        .support_service
        .analytics(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(analytics))
}
