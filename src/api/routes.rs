//! API route configuration.

use crate::api::handlers::{
    create_link_handler, create_user_handler, delete_link_handler, link_info_handler, me_handler,
    top_links_handler, user_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes that require HTTP Basic authentication.
///
/// Protected via [`crate::api::middleware::auth`], which must be applied by
/// the caller.
///
/// # Endpoints
///
/// - `GET    /me`               - The authenticated account
/// - `POST   /links`            - Shorten a URL
/// - `GET    /links/{user_id}`  - List the caller's links with click counts
/// - `GET    /link/{code}`      - One link with its click count
/// - `DELETE /link/{code}`      - Delete a link
/// - `GET    /stats/top`        - Most clicked links
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/links", post(create_link_handler))
        .route("/links/{user_id}", get(user_links_handler))
        .route(
            "/link/{code}",
            get(link_info_handler).delete(delete_link_handler),
        )
        .route("/stats/top", get(top_links_handler))
}

/// Routes open to anonymous clients, apart from the redirect.
///
/// # Endpoints
///
/// - `POST /users` - Register an account
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user_handler))
}
