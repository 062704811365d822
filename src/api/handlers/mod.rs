//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod users;

pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, link_info_handler, user_links_handler,
};
pub use redirect::redirect_handler;
pub use stats::top_links_handler;
pub use users::{create_user_handler, me_handler};
