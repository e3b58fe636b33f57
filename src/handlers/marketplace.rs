// src/handlers/marketplace.rs

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
        rbac::{AnyRole, MarketplaceBidders, MarketplaceManagers, RequireRole},
        tenancy::TenantContext,
    },
    models::marketplace::{
        Bid, CreateServiceRequestPayload, MarketplaceStats, PlaceBidPayload, ServiceRequest,
        ServiceRequestQuery,
    },
};

// ====================================================================
//  LEITURA (o serviço decide o que cada papel enxerga)
// ====================================================================

#[utoipa::path(
    get,
    path = "/api/marketplace/requests",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Pedidos visíveis para o papel", body = Vec<ServiceRequest>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)"),
        ServiceRequestQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyRole>,
    tenant: TenantContext,
    Query(query): Query<ServiceRequestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let requests = app_state
        .marketplace_service
        .list(&guard.session, &tenant.0, &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/stats",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Faixa de indicadores", body = MarketplaceStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn marketplace_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyRole>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .marketplace_service
        .stats(&guard.session, &tenant.0)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/marketplace/requests/{id}",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Pedido com os lances", body = ServiceRequest),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_request(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyRole>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let request = app_state
        .marketplace_service
        .get(&guard.session, &tenant.0, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(request))
}

// ====================================================================
//  GESTÃO DOS PEDIDOS (clientes e administração)
// ====================================================================

#[utoipa::path(
    post,
    path = "/api/marketplace/requests",
    tag = "Marketplace",
    request_body = CreateServiceRequestPayload,
    responses(
        (status = 201, description = "Pedido publicado", body = ActionResponse<ServiceRequest>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<MarketplaceManagers>,
    tenant: TenantContext,
    Json(payload): Json<CreateServiceRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let request = app_state
        .marketplace_service
        .create_request(&guard.session, &tenant.0, payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(request, notice))))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/requests/{id}/bids/{bid_id}/award",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Lance vencedor definido", body = ActionResponse<ServiceRequest>),
        (status = 409, description = "Pedido não está aberto"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("bid_id" = Uuid, Path, description = "ID do lance"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn award_bid(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<MarketplaceManagers>,
    tenant: TenantContext,
    Path((request_id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let request = app_state
        .marketplace_service
        .award(&guard.session, &tenant.0, request_id, bid_id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.bid_awarded");
    Ok(Json(ActionResponse::new(request, notice)))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/requests/{id}/close",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Pedido encerrado", body = ActionResponse<ServiceRequest>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("x-company-id" = Option<Uuid>, Header, description = "Empresa a inspecionar (só SUPER_ADMIN)")
    ),
    security(("api_jwt" = []))
)]
pub async fn close_request(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<MarketplaceManagers>,
    tenant: TenantContext,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let request = app_state
        .marketplace_service
        .close(&guard.session, &tenant.0, request_id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(request, notice)))
}

// ====================================================================
//  LANCES (agentes e afiliados)
// ====================================================================

#[utoipa::path(
    post,
    path = "/api/marketplace/requests/{id}/bids",
    tag = "Marketplace",
    request_body = PlaceBidPayload,
    responses(
        (status = 201, description = "Lance enviado", body = ActionResponse<Bid>),
        (status = 409, description = "Pedido fechado ou lance duplicado"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn place_bid(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<MarketplaceBidders>,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<PlaceBidPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let bid = app_state
        .marketplace_service
        .place_bid(&guard.session, request_id, payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.bid_placed");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(bid, notice))))
}

#[utoipa::path(
    post,
    path = "/api/marketplace/requests/{id}/bids/{bid_id}/withdraw",
    tag = "Marketplace",
    responses(
        (status = 200, description = "Lance retirado", body = ActionResponse<Bid>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("bid_id" = Uuid, Path, description = "ID do lance")
    ),
    security(("api_jwt" = []))
)]
pub async fn withdraw_bid(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<MarketplaceBidders>,
    Path((request_id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let bid = app_state
        .marketplace_service
        .withdraw_bid(&guard.session, request_id, bid_id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(bid, notice)))
}
