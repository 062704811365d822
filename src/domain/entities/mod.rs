//! Core domain entities.
//!
//! - [`User`] - An account owning links
//! - [`Link`] - A shortened URL mapping
//! - [`Click`] - A redirect event on a link
//!
//! Creation inputs live next to their entity (`NewUser`, `NewLink`, `NewClick`).

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick};
pub use link::{Link, LinkWithClicks, NewLink};
pub use user::{NewUser, User};
