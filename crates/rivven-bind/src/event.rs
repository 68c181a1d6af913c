//! Event view consumed by parameters

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An in-flight event: an optional body plus string headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event payload, `None` when the event carries no body
    pub body: Option<Bytes>,

    /// Event headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Event {
    /// Create an event with the given body
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            headers: HashMap::new(),
        }
    }

    /// Create an event without a body
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the body (builder-style)
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Remove the body (builder-style)
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Add a header (builder-style)
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Body bytes, if any
    #[inline]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Header value by exact key
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = Event::new("payload")
            .with_header("host", "web-1")
            .with_header("count", "3");

        assert_eq!(event.body(), Some(&b"payload"[..]));
        assert_eq!(event.header("host"), Some("web-1"));
        assert_eq!(event.header("count"), Some("3"));
        assert_eq!(event.header("missing"), None);
    }

    #[test]
    fn test_event_without_body() {
        let event = Event::new("payload").without_body();
        assert_eq!(event.body(), None);
        assert_eq!(Event::empty().body(), None);
    }

    #[test]
    fn test_event_deserialize_without_headers() {
        let event: Event = serde_json::from_str(r#"{"body":null}"#).unwrap();
        assert!(event.body.is_none());
        assert!(event.headers.is_empty());
    }
}
