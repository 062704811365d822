//! Domain layer: entities, repository contracts, the short-code codec and
//! click processing.
//!
//! - [`codec`] - Reversible identifier <-> short code mapping
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler decodes the short code into a link id
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] persists it with retry
//! 4. Click data is stored via [`repositories::StatsRepository`]

pub mod click_event;
pub mod click_worker;
pub mod codec;
pub mod entities;
pub mod repositories;
