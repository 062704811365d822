//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`UserRepository`] - Account storage
//! - [`LinkRepository`] - Short link CRUD
//! - [`StatsRepository`] - Click tracking and statistics

pub mod link_repository;
pub mod stats_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
