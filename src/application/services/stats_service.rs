//! Click statistics service.

use std::sync::Arc;

use crate::domain::entities::LinkWithClicks;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Number of links returned by [`StatsService::top_links`].
pub const TOP_LINKS_LIMIT: i64 = 20;

/// Totals across the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub links: i64,
    pub clicks: i64,
}

/// Service for aggregated click statistics.
pub struct StatsService<R: StatsRepository> {
    repository: Arc<R>,
}

impl<R: StatsRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the most redirected links, most clicks first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn top_links(&self) -> Result<Vec<LinkWithClicks>, AppError> {
        self.repository.top_links(TOP_LINKS_LIMIT).await
    }

    /// Counts all links and clicks.
    ///
    /// Also serves as the database probe for the health endpoint.
    pub async fn totals(&self) -> Result<Totals, AppError> {
        let (links, clicks) = self.repository.totals().await?;
        Ok(Totals { links, clicks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockStatsRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_top_links_uses_limit() {
        let mut mock_repo = MockStatsRepository::new();

        let top = vec![
            LinkWithClicks {
                link: Link::new(
                    2,
                    1,
                    "5pKu".to_string(),
                    "https://a.example".to_string(),
                    Utc::now(),
                ),
                clicks: 10,
            },
            LinkWithClicks {
                link: Link::new(
                    1,
                    1,
                    "5pKt".to_string(),
                    "https://b.example".to_string(),
                    Utc::now(),
                ),
                clicks: 5,
            },
        ];

        mock_repo
            .expect_top_links()
            .withf(|limit| *limit == TOP_LINKS_LIMIT)
            .times(1)
            .returning(move |_| Ok(top.clone()));

        let service = StatsService::new(Arc::new(mock_repo));

        let result = service.top_links().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].clicks, 10);
        assert_eq!(result[1].link.code, "5pKt");
    }

    #[tokio::test]
    async fn test_totals() {
        let mut mock_repo = MockStatsRepository::new();

        mock_repo
            .expect_totals()
            .times(1)
            .returning(|| Ok((3, 42)));

        let service = StatsService::new(Arc::new(mock_repo));

        assert_eq!(
            service.totals().await.unwrap(),
            Totals {
                links: 3,
                clicks: 42
            }
        );
    }
}
