//! DTOs for statistics endpoints.

use serde::Serialize;

use super::link::LinkResponse;

/// Most clicked links across all users.
#[derive(Debug, Serialize)]
pub struct TopLinksResponse {
    pub items: Vec<LinkResponse>,
}
