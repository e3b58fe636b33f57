// src/handlers/payments.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PaymentsScreen, RequireRole},
    },
    models::payment::{ConnectionTestResult, CredentialsForm, PaymentProviderView, PaymentStats},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProviderQuery {
    pub search: Option<String>,
}

// As chaves saem sempre mascaradas (PaymentProviderView)
#[utoipa::path(
    get,
    path = "/api/payments/providers",
    tag = "Payments",
    responses(
        (status = 200, description = "Provedores com chaves mascaradas", body = Vec<PaymentProviderView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ProviderQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_providers(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PaymentsScreen>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let providers = app_state
        .payment_service
        .list(query.search.as_deref())
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(providers))
}

#[utoipa::path(
    get,
    path = "/api/payments/stats",
    tag = "Payments",
    responses(
        (status = 200, description = "Faixa de indicadores", body = PaymentStats),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn payment_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PaymentsScreen>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .payment_service
        .stats()
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/payments/providers/{id}",
    tag = "Payments",
    responses(
        (status = 200, description = "Provedor", body = PaymentProviderView),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_provider(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<PaymentsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = app_state
        .payment_service
        .get(id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(provider))
}

#[utoipa::path(
    put,
    path = "/api/payments/providers/{id}",
    tag = "Payments",
    request_body = CredentialsForm,
    responses(
        (status = 200, description = "Credenciais salvas", body = ActionResponse<PaymentProviderView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_credentials(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PaymentsScreen>,
    Path(id): Path<Uuid>,
    Json(form): Json<CredentialsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = app_state
        .payment_service
        .update_credentials(&guard.session, id, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(provider, notice)))
}

// ---
// Handler: test_connection
// Falha de conexão não é erro HTTP: vira um Notice de falha.
// ---
#[utoipa::path(
    post,
    path = "/api/payments/providers/{id}/test",
    tag = "Payments",
    responses(
        (status = 200, description = "Resultado do teste (a notificação diz se falhou)", body = ActionResponse<ConnectionTestResult>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn test_connection(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PaymentsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let result = app_state
        .payment_service
        .test_connection(&guard.session, id)
        .await
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = if result.connected {
        Notice::success(&locale, app_state.i18n_store, "notice.connection_ok")
    } else {
        Notice::failure(&locale, app_state.i18n_store, "connection", "notice.connection_failed")
    };
    Ok(Json(ActionResponse::new(result, notice)))
}

#[utoipa::path(
    post,
    path = "/api/payments/providers/{id}/toggle",
    tag = "Payments",
    responses(
        (status = 200, description = "Provedor ativado ou desativado", body = ActionResponse<PaymentProviderView>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do registro")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_provider(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<PaymentsScreen>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = app_state
        .payment_service
        .toggle_active(&guard.session, id)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let key = if provider.is_active { "notice.activated" } else { "notice.deactivated" };
    let notice = Notice::success(&locale, app_state.i18n_store, key);
    Ok(Json(ActionResponse::new(provider, notice)))
}
