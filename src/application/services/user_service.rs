//! User registration and lookup.

use std::sync::Arc;

use crate::application::services::auth_service::PasswordHasher;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for managing user accounts.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new account.
    ///
    /// Input format (email syntax, password length) is validated by the
    /// request DTO; this method only enforces uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(&self, email: String, password: &str) -> Result<User, AppError> {
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                format!("user with email '{email}' already exists"),
                json!({ "email": email }),
            ));
        }

        let password_hash = self.hasher.hash(&email, password);

        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }
}
