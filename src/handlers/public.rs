// src/handlers/public.rs
// Rotas sem login: site vitrine, simulador de preço, pedido de cotação e rastreio.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{
        footer::FooterConfig,
        package::TrackingInfo,
        pricing::{Addon, Estimate, EstimateRequest, Plan, PricingSettings},
        quote::{CreateQuotePayload, QuoteRequest},
    },
};

#[utoipa::path(
    get,
    path = "/api/public/plans",
    tag = "Public",
    responses(
        (status = 200, description = "Planos SaaS", body = Vec<Plan>)
    )
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let plans = app_state
        .pricing_service
        .plans()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(plans))
}

#[utoipa::path(
    get,
    path = "/api/public/addons",
    tag = "Public",
    responses(
        (status = 200, description = "Módulos adicionais", body = Vec<Addon>)
    )
)]
pub async fn list_addons(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let addons = app_state
        .pricing_service
        .addons()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(addons))
}

#[utoipa::path(
    get,
    path = "/api/public/pricing/settings",
    tag = "Public",
    responses(
        (status = 200, description = "Tabela de tarifas por modo", body = PricingSettings)
    )
)]
pub async fn pricing_settings(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.pricing_service.settings())
}

// ---
// Handler: estimate (simulador de frete)
// ---
#[utoipa::path(
    post,
    path = "/api/public/pricing/estimate",
    tag = "Public",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Estimativa de frete", body = Estimate),
        (status = 400, description = "Peso ou volume inválido")
    )
)]
pub async fn estimate(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(request): Json<EstimateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let estimate = app_state
        .pricing_service
        .estimate(&request)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(estimate))
}

#[utoipa::path(
    post,
    path = "/api/public/quotes",
    tag = "Public",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Pedido de cotação registrado", body = ActionResponse<QuoteRequest>),
        (status = 400, description = "Formulário inválido")
    )
)]
pub async fn request_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .quote_service
        .create(payload)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(quote, notice))))
}

#[utoipa::path(
    get,
    path = "/api/public/track/{pin}",
    tag = "Public",
    responses(
        (status = 200, description = "Situação do colis", body = TrackingInfo),
        (status = 404, description = "PIN desconhecido")
    ),
    params(
        ("pin" = String, Path, description = "PIN de rastreio (sem diferenciar maiúsculas)")
    )
)]
pub async fn track_package(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(pin): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tracking = app_state
        .package_service
        .track(&pin)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(tracking))
}

#[utoipa::path(
    get,
    path = "/api/public/footer-config",
    tag = "Public",
    responses(
        (status = 200, description = "Rodapé do site", body = FooterConfig)
    )
)]
pub async fn footer_config(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let config = app_state
        .footer_service
        .get()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(config))
}
