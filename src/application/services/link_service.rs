//! Link creation, resolution and management.

use std::sync::Arc;

use crate::domain::codec::ShortCodec;
use crate::domain::entities::{Link, LinkWithClicks, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Service for creating and resolving shortened links.
///
/// Short codes are never generated randomly: each one is the codec's encoding
/// of the link's database identifier, so resolving a code is a decode plus a
/// primary-key lookup.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    codec: ShortCodec,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, codec: ShortCodec) -> Self {
        Self {
            link_repository,
            codec,
        }
    }

    /// Creates a short link owned by `user_id`.
    ///
    /// Reserves the next identifier, encodes it, and inserts the row with its
    /// code in a single statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// `http`/`https` URL with a host.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(&self, user_id: i64, long_url: &str) -> Result<Link, AppError> {
        let long_url = validate_long_url(long_url)?;

        let id = self.link_repository.next_id().await?;
        let code = self.codec.encode(id);

        let link = self
            .link_repository
            .create(NewLink {
                id,
                user_id,
                code,
                long_url,
            })
            .await?;

        tracing::info!(link_id = link.id, code = %link.code, "Link created");
        Ok(link)
    }

    /// Resolves a short code to its link for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code cannot be decoded.
    /// Returns [`AppError::NotFound`] if no link has the decoded identifier.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let id = self.codec.decode(code)?;

        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Retrieves one of the user's links with its click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code cannot be decoded.
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs
    /// to another user.
    pub async fn get_link_info(&self, user_id: i64, code: &str) -> Result<LinkWithClicks, AppError> {
        let id = self.codec.decode(code)?;

        self.link_repository
            .find_with_clicks(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Lists all links owned by a user, newest first.
    pub async fn list_user_links(&self, user_id: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        self.link_repository.list_by_user(user_id).await
    }

    /// Deletes one of the user's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code cannot be decoded.
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs
    /// to another user.
    pub async fn delete_link(&self, user_id: i64, code: &str) -> Result<(), AppError> {
        let id = self.codec.decode(code)?;

        if !self.link_repository.delete(id, user_id).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        tracing::info!(link_id = id, user_id, "Link deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }
}

/// Checks that a URL is absolute, uses `http` or `https`, and has a host.
///
/// Returns the trimmed input; the URL is stored as given, not re-serialized.
fn validate_long_url(raw: &str) -> Result<String, AppError> {
    let invalid = |reason: &str| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "url": raw, "reason": reason }),
        )
    };

    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    Ok(trimmed.to_string())
}
