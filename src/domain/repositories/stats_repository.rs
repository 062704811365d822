//! Repository trait for click recording and statistics.

use crate::domain::entities::{Click, LinkWithClicks, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click tracking and statistics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Records a new click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Returns the most clicked links, most clicks first.
    ///
    /// Ties are broken by ascending link id.
    async fn top_links(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Counts links and clicks across the whole system.
    async fn totals(&self) -> Result<(i64, i64), AppError>;
}
