//! Handler for link statistics.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};

use crate::api::dto::link::LinkResponse;
use crate::api::dto::stats::TopLinksResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Returns the most clicked links across all users.
///
/// # Endpoint
///
/// `GET /stats/top`
///
/// Links are ordered by click count, descending; ties are broken by id.
/// At most [`TOP_LINKS_LIMIT`](crate::application::services::stats_service::TOP_LINKS_LIMIT)
/// items are returned.
pub async fn top_links_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<TopLinksResponse>, AppError> {
    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri)?;
    let rows = state.stats_service.top_links().await?;

    let items = rows
        .into_iter()
        .map(|row| {
            let short_url = state.link_service.short_url(&base, &row.link.code);
            LinkResponse::with_clicks(row, short_url)
        })
        .collect();

    Ok(Json(TopLinksResponse { items }))
}
