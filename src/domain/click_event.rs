//! Click event model for asynchronous click tracking.

use crate::domain::entities::NewClick;

/// A redirect observed by the HTTP layer, waiting to be persisted.
///
/// Sent from the redirect handler to [`crate::domain::click_worker::run_click_worker`]
/// through a bounded channel so that redirects never wait on the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Arguments
    ///
    /// - `link_id` - Identifier decoded from the short code
    /// - `ip` - Optional client IP address
    /// - `user_agent` - Optional User-Agent header
    /// - `referer` - Optional Referer header
    pub fn new(
        link_id: i64,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            link_id: event.link_id,
            user_agent: event.user_agent,
            referer: event.referer,
            ip: event.ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            12,
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0"),
            Some("https://google.com"),
        );

        assert_eq!(event.link_id, 12);
        assert_eq!(event.ip, Some("192.168.1.1".to_string()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.referer, Some("https://google.com".to_string()));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new(3, None, None, None);

        assert_eq!(event.link_id, 3);
        assert!(event.ip.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.referer.is_none());
    }

    #[test]
    fn test_into_new_click() {
        let event = ClickEvent::new(5, Some("10.0.0.1".to_string()), Some("curl/8"), None);
        let click: NewClick = event.into();

        assert_eq!(click.link_id, 5);
        assert_eq!(click.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(click.user_agent.as_deref(), Some("curl/8"));
        assert!(click.referer.is_none());
    }
}
