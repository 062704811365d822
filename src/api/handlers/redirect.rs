//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Decode the code into a link id
/// 2. Load the link by primary key
/// 3. Queue a click event for the background worker
/// 4. Return 308 Permanent Redirect
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel without waiting. If the queue
/// is full the click is dropped and counted in `shorty_clicks_dropped_total`;
/// the redirect is never delayed.
///
/// # Errors
///
/// Returns 400 Bad Request if the code cannot be decoded.
/// Returns 404 Not Found if no link has the decoded id.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    let click_event = ClickEvent::new(
        link.id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    match state.click_sender.try_send(click_event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("shorty_clicks_dropped_total").increment(1);
            tracing::warn!(link_id = event.link_id, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("shorty_clicks_dropped_total").increment(1);
            tracing::error!(link_id = event.link_id, "Click queue closed, dropping click");
        }
    }

    Ok(Redirect::permanent(&link.long_url))
}
