// src/handlers/coupons.rs

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
        rbac::{AnyRole, CouponsScreen, RequireRole},
    },
    models::coupon::{Coupon, CouponForm, CouponQuery, CouponStats, CouponView, Discount, OrderContext},
};

// ---
// Handler: list_coupons (o status exibido é calculado na hora, pelo relógio)
// ---
#[utoipa::path(
    get,
    path = "/api/coupons",
    tag = "Coupons",
    responses(
        (status = 200, description = "Cupons com o status calculado", body = Vec<CouponView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        CouponQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_coupons(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CouponsScreen>,
    Query(query): Query<CouponQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let coupons = app_state
        .coupon_service
        .list(&query, &locale)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(coupons)))
}

#[utoipa::path(
    get,
    path = "/api/coupons/stats",
    tag = "Coupons",
    responses(
        (status = 200, description = "Faixa de indicadores", body = CouponStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn coupon_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CouponsScreen>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .coupon_service
        .stats()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/coupons/{id}",
    tag = "Coupons",
    responses(
        (status = 200, description = "Cupom", body = CouponView),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CouponsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let coupon = app_state
        .coupon_service
        .get(id, &locale)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(coupon))
}

#[utoipa::path(
    post,
    path = "/api/coupons",
    tag = "Coupons",
    request_body = CouponForm,
    responses(
        (status = 201, description = "Cupom criado", body = ActionResponse<CouponView>),
        (status = 409, description = "Código já existe"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<CouponsScreen>,
    Json(form): Json<CouponForm>,
) -> Result<impl IntoResponse, ApiError> {
    let coupon = app_state
        .coupon_service
        .create(&guard.session, form, &locale)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(coupon, notice))))
}

#[utoipa::path(
    put,
    path = "/api/coupons/{id}",
    tag = "Coupons",
    request_body = CouponForm,
    responses(
        (status = 200, description = "Cupom atualizado", body = ActionResponse<CouponView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<CouponsScreen>,
    Path(id): Path<Uuid>,
    Json(form): Json<CouponForm>,
) -> Result<impl IntoResponse, ApiError> {
    let coupon = app_state
        .coupon_service
        .update(&guard.session, id, form, &locale)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(coupon, notice)))
}

#[utoipa::path(
    post,
    path = "/api/coupons/{id}/toggle",
    tag = "Coupons",
    responses(
        (status = 200, description = "Cupom ativado ou desativado", body = ActionResponse<CouponView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<CouponsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let coupon = app_state
        .coupon_service
        .toggle(&guard.session, id, &locale)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let key = if coupon.coupon.is_active { "notice.activated" } else { "notice.deactivated" };
    let notice = Notice::success(&locale, app_state.i18n_store, key);
    Ok(Json(ActionResponse::new(coupon, notice)))
}

#[utoipa::path(
    delete,
    path = "/api/coupons/{id}",
    tag = "Coupons",
    responses(
        (status = 200, description = "Cupom excluído", body = ActionResponse<Coupon>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<CouponsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .coupon_service
        .delete(&guard.session, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deleted");
    Ok(Json(ActionResponse::new(removed, notice)))
}

// ---
// Motor de promoções (qualquer papel autenticado)
// ---
#[utoipa::path(
    post,
    path = "/api/coupons/validate",
    tag = "Coupons",
    request_body = OrderContext,
    responses(
        (status = 200, description = "Desconto calculado, nada é gravado", body = Discount),
        (status = 422, description = "Cupom recusado"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn validate_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyRole>,
    Json(order): Json<OrderContext>,
) -> Result<impl IntoResponse, ApiError> {
    let discount = app_state
        .coupon_service
        .validate(&guard.session, &order)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(discount))
}

#[utoipa::path(
    post,
    path = "/api/coupons/redeem",
    tag = "Coupons",
    request_body = OrderContext,
    responses(
        (status = 200, description = "Desconto aplicado e uso consumido", body = Discount),
        (status = 422, description = "Cupom recusado"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn redeem_coupon(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<AnyRole>,
    Json(order): Json<OrderContext>,
) -> Result<impl IntoResponse, ApiError> {
    let discount = app_state
        .coupon_service
        .redeem(&guard.session, &order)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(discount))
}
