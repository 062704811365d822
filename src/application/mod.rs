//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide the operations HTTP
//! handlers and the admin CLI call.
//!
//! - [`services::user_service::UserService`] - Account registration and lookup
//! - [`services::auth_service::AuthService`] - Basic-auth credential checks
//! - [`services::link_service::LinkService`] - Short link creation and resolution
//! - [`services::stats_service::StatsService`] - Click statistics

pub mod services;
