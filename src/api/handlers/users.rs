//! Handlers for account endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{CreateUserRequest, UserResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the email is malformed or the password is not
/// 6 to 100 characters long.
/// Returns 409 Conflict if the email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Returns the authenticated account.
///
/// `GET /me`
pub async fn me_handler(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}
