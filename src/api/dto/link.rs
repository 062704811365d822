//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Link, LinkWithClicks};

/// Payload for `POST /links`.
///
/// URL syntax is checked by the link service, which also restricts the scheme.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub long_url: String,
}

/// A link as returned to its owner.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub long_url: String,
    pub code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i64>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            code: link.code,
            short_url,
            created_at: link.created_at,
            clicks: None,
        }
    }

    pub fn with_clicks(row: LinkWithClicks, short_url: String) -> Self {
        Self {
            clicks: Some(row.clicks),
            ..Self::new(row.link, short_url)
        }
    }
}

/// Response for `DELETE /link/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub result: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Link {
        Link::new(
            1,
            2,
            "5pKt".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_clicks_omitted_when_unknown() {
        let json = serde_json::to_value(LinkResponse::new(link(), "http://s/5pKt".into())).unwrap();

        assert_eq!(json["code"], "5pKt");
        assert_eq!(json["short_url"], "http://s/5pKt");
        assert!(json.get("clicks").is_none());
    }

    #[test]
    fn test_with_clicks() {
        let row = LinkWithClicks {
            link: link(),
            clicks: 7,
        };
        let json = serde_json::to_value(LinkResponse::with_clicks(row, "http://s/5pKt".into()))
            .unwrap();

        assert_eq!(json["clicks"], 7);
    }
}
