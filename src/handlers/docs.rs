// src/handlers/docs.rs

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::ApiError,
        notice::{ActionResponse, Notice},
    },
    config::AppState,
    middleware::{
        auth::bearer_token,
        i18n::Locale,
        rbac::{DocsAdminScreen, RequireRole},
    },
    models::{
        auth::Session,
        docs::{DocArticle, DocArticleForm, DocQuery},
    },
};

// Leitura é pública; o token, se vier e for válido, só serve para mostrar rascunhos.
fn optional_session(app_state: &AppState, headers: &HeaderMap) -> Option<Session> {
    bearer_token(headers).and_then(|token| app_state.auth_service.validate_token(&token).ok())
}

#[utoipa::path(
    get,
    path = "/api/public/docs",
    tag = "Docs",
    responses(
        (status = 200, description = "Artigos publicados (rascunhos só para quem pode editar)", body = Vec<DocArticle>)
    ),
    params(
        DocQuery
    )
)]
pub async fn list_articles(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    Query(query): Query<DocQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = optional_session(&app_state, &headers);
    let articles = app_state
        .docs_service
        .list(viewer.as_ref(), &query)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/public/docs/{slug}",
    tag = "Docs",
    responses(
        (status = 200, description = "Artigo", body = DocArticle),
        (status = 404, description = "Artigo inexistente ou não publicado")
    ),
    params(
        ("slug" = String, Path, description = "Slug do artigo")
    )
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = optional_session(&app_state, &headers);
    let article = app_state
        .docs_service
        .get(viewer.as_ref(), &slug)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/api/admin/docs",
    tag = "Docs",
    request_body = DocArticleForm,
    responses(
        (status = 201, description = "Artigo criado", body = ActionResponse<DocArticle>),
        (status = 409, description = "Slug já usado"),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_article(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<DocsAdminScreen>,
    Json(form): Json<DocArticleForm>,
) -> Result<impl IntoResponse, ApiError> {
    let article = app_state
        .docs_service
        .create(&guard.session, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.created");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(article, notice))))
}

#[utoipa::path(
    put,
    path = "/api/admin/docs/{slug}",
    tag = "Docs",
    request_body = DocArticleForm,
    responses(
        (status = 200, description = "Artigo atualizado", body = ActionResponse<DocArticle>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("slug" = String, Path, description = "Slug do artigo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<DocsAdminScreen>,
    Path(slug): Path<String>,
    Json(form): Json<DocArticleForm>,
) -> Result<impl IntoResponse, ApiError> {
    let article = app_state
        .docs_service
        .update(&guard.session, &slug, form)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.updated");
    Ok(Json(ActionResponse::new(article, notice)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/docs/{slug}",
    tag = "Docs",
    responses(
        (status = 200, description = "Artigo excluído", body = ActionResponse<DocArticle>),
        (status = 401, description = "Sessão ausente ou expirada"),
        (status = 403, description = "Papel sem acesso à tela")
    ),
    params(
        ("slug" = String, Path, description = "Slug do artigo")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<DocsAdminScreen>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = app_state
        .docs_service
        .delete(&guard.session, &slug)
        .map_err(|e| e.to_api_error(&locale, app_state.i18n_store))?;

    let notice = Notice::success(&locale, app_state.i18n_store, "notice.deleted");
    Ok(Json(ActionResponse::new(removed, notice)))
}
