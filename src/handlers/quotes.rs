// src/handlers/quotes.rs

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
        rbac::{QuotesScreen, RequireRole},
        tenancy::TenantContext,
    },
    models::quote::{DecideQuotePayload, QuoteQuery, QuoteRequest, QuoteStats, RespondQuotePayload},
};

#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    responses(
        (status = 200, description = "Pedidos de cotação", body = Vec<QuoteRequest>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        QuoteQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<QuotesScreen>,
    tenant: TenantContext,
    Query(query): Query<QuoteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .quote_service
        .list(&tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(quotes))
}

#[utoipa::path(
    get,
    path = "/api/quotes/stats",
    tag = "Quotes",
    responses(
        (status = 200, description = "Faixa de indicadores", body = QuoteStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn quote_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<QuotesScreen>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .quote_service
        .stats(&tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    responses(
        (status = 200, description = "Pedido de cotação", body = QuoteRequest),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<QuotesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .get(&tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(quote))
}

// PENDING -> QUOTED
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/respond",
    tag = "Quotes",
    request_body = RespondQuotePayload,
    responses(
        (status = 200, description = "Preço enviado", body = ActionResponse<QuoteRequest>),
        (status = 409, description = "Cotação já respondida"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<QuotesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .respond(&guard.session, &tenant.0, id, payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(quote, notice)))
}

// QUOTED -> ACCEPTED | REJECTED
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/decision",
    tag = "Quotes",
    request_body = DecideQuotePayload,
    responses(
        (status = 200, description = "Decisão registrada", body = ActionResponse<QuoteRequest>),
        (status = 409, description = "Transição inválida"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn decide_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<QuotesScreen>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<DecideQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .decide(&guard.session, &tenant.0, id, payload.decision)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(quote, notice)))
}
