//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
};
use serde_json::json;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Shortens a URL for the authenticated user.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 0,
///   "long_url": "https://example.com/some/long/path",
///   "code": "5pKs",
///   "short_url": "http://localhost:8080/5pKs",
///   "created_at": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is not an absolute http(s) URL, or if
/// no `BASE_URL` is configured and the request carries no usable authority.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri)?;

    let link = state
        .link_service
        .create_link(user.id, &payload.long_url)
        .await?;

    let short_url = state.link_service.short_url(&base, &link.code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}

/// Lists a user's links with click counts, newest first.
///
/// # Endpoint
///
/// `GET /links/{user_id}`
///
/// # Errors
///
/// Returns 400 Bad Request if `user_id` is not an integer.
/// Returns 403 Forbidden if `user_id` is not the authenticated user.
pub async fn user_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(user_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let user_id: i64 = user_id.parse().map_err(|_| {
        AppError::bad_request("Invalid user id", json!({ "user_id": user_id }))
    })?;

    if user_id != user.id {
        return Err(AppError::forbidden(
            "Cannot list links of another user",
            json!({ "user_id": user_id }),
        ));
    }

    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri)?;
    let links = state.link_service.list_user_links(user.id).await?;

    let items = links
        .into_iter()
        .map(|row| {
            let short_url = state.link_service.short_url(&base, &row.link.code);
            LinkResponse::with_clicks(row, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns one of the user's links with its click count.
///
/// # Endpoint
///
/// `GET /link/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code cannot be decoded.
/// Returns 404 Not Found if the link does not exist or belongs to someone else.
pub async fn link_info_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(code): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<LinkResponse>, AppError> {
    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri)?;
    let row = state.link_service.get_link_info(user.id, &code).await?;
    let short_url = state.link_service.short_url(&base, &row.link.code);

    Ok(Json(LinkResponse::with_clicks(row, short_url)))
}

/// Deletes one of the user's links together with its clicks.
///
/// # Endpoint
///
/// `DELETE /link/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code cannot be decoded.
/// Returns 404 Not Found if the link does not exist or belongs to someone else.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(code): Path<String>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(user.id, &code).await?;

    Ok(Json(DeleteLinkResponse { result: "deleted" }))
}
