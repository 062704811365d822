//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AuthService, LinkService, PasswordHasher, StatsService, UserService,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::codec::ShortCodec;
use crate::infrastructure::persistence::{PgLinkRepository, PgStatsRepository, PgUserRepository};

/// Services and channels shared across request handlers.
///
/// Cloning is cheap: every field is an `Arc` or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub stats_service: Arc<StatsService<PgStatsRepository>>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public origin for short URLs; `None` means "use the request's Host".
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the application services.
    pub fn new(
        pool: Arc<PgPool>,
        click_sender: mpsc::Sender<ClickEvent>,
        password_secret: String,
        base_url: Option<String>,
    ) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let stats_repository = Arc::new(PgStatsRepository::new(pool));

        let hasher = PasswordHasher::new(password_secret);

        Self {
            user_service: Arc::new(UserService::new(user_repository.clone(), hasher.clone())),
            auth_service: Arc::new(AuthService::new(user_repository, hasher)),
            link_service: Arc::new(LinkService::new(link_repository, ShortCodec::default())),
            stats_service: Arc::new(StatsService::new(stats_repository)),
            click_sender,
            base_url,
        }
    }
}
