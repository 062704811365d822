//! Request helpers shared by handlers.

pub mod base_url;
