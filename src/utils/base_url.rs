//! Public origin resolution for building short URLs.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header, uri::Authority};

/// Returns the origin that short codes are appended to.
///
/// A configured `BASE_URL` always wins. Otherwise the origin is
/// `http://<Host>` taken from the request, port included. HTTP/2 requests
/// carry the authority in the request URI instead of a `Host` header, so the
/// URI authority is used when the header is absent.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base is configured and:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value is not valid UTF-8
/// - The value is not a valid `host[:port]` authority
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:8080".parse().unwrap());
/// let uri = Uri::from_static("/links");
///
/// assert_eq!(resolve_base_url(None, &headers, &uri).unwrap(), "http://localhost:8080");
/// assert_eq!(resolve_base_url(Some("https://sho.rt"), &headers, &uri).unwrap(), "https://sho.rt");
/// ```
pub fn resolve_base_url(
    configured: Option<&str>,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let authority = match headers.get(header::HOST) {
        Some(value) => {
            let host = value.to_str().map_err(|_| {
                AppError::bad_request("Invalid Host header", serde_json::json!({}))
            })?;
            host.parse::<Authority>().map_err(|_| {
                AppError::bad_request("Invalid Host header", serde_json::json!({ "host": host }))
            })?
        }
        None => uri.authority().cloned().ok_or_else(|| {
            AppError::bad_request("Missing Host header", serde_json::json!({}))
        })?,
    };

    // userinfo (`user@host`) is legal in an authority but never in Host.
    if authority.as_str().contains('@') {
        return Err(AppError::bad_request(
            "Invalid Host header",
            serde_json::json!({ "host": authority.as_str() }),
        ));
    }

    Ok(format!("http://{}", authority))
}
