//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored long URL and the short code derived from its identifier.
///
/// `code` is always `codec::encode(id)`; it is stored so that lookups by
/// code and listings do not have to re-encode.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        user_id: i64,
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The identifier is reserved from the sequence before insertion so that the
/// row is written together with its code.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: i64,
    pub user_id: i64,
    pub code: String,
    pub long_url: String,
}

/// A link together with the number of recorded redirects.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LinkWithClicks {
    #[sqlx(flatten)]
    pub link: Link,
    pub clicks: i64,
}
