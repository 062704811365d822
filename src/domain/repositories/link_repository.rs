//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkWithClicks, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Reserves the next link identifier from the sequence.
    ///
    /// The caller encodes it into a short code and passes both to [`Self::create`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn next_id(&self) -> Result<i64, AppError>;

    /// Inserts a link with a pre-reserved identifier and its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the identifier or code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link owned by `user_id`, together with its click count.
    async fn find_with_clicks(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<LinkWithClicks>, AppError>;

    /// Lists all links owned by a user with click counts, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Deletes a link owned by `user_id`. Recorded clicks are removed with it.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if no such link
    /// belongs to the user.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;
}
