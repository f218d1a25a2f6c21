use std::fmt::Debug;

/// The endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";

/// Builder for [`HttpConfig`].
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HttpConfigBuilder {
    endpoint: Option<String>,
    bearer_token: Option<String>,
}

impl HttpConfigBuilder {
    /// Creates a builder with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL messages are posted to.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sends `Authorization: Bearer <token>` with every request, for
    /// relays hosted behind a gateway.
    #[inline]
    pub fn with_bearer_token<S: Into<String>>(mut self, token: S) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpConfig {
        HttpConfig {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            bearer_token: self.bearer_token,
        }
    }
}

impl Debug for HttpConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfigBuilder")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<deducted>"))
            .finish()
    }
}

/// Configuration for the relay provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpConfig {
    pub(crate) endpoint: String,
    pub(crate) bearer_token: Option<String>,
}

impl HttpConfig {
    /// Returns the URL messages are posted to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfig")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<deducted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_redaction() {
        let config = HttpConfigBuilder::new().with_bearer_token("secret").build();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<deducted>"));
    }
}
