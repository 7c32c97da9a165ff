//! The opaque URL-like parameter bag read by the activator and the adaptive
//! dispatcher. This crate never constructs its own production URL type —
//! callers implement [`UrlLike`] for whatever carries call-site
//! configuration in their system.

/// Minimal surface the loader needs from a caller's URL-like type.
pub trait UrlLike: Send + Sync {
    /// Looks up a parameter by key.
    fn parameter(&self, key: &str) -> Option<String>;

    /// Looks up a parameter by key, falling back to `default` when absent
    /// or empty.
    fn parameter_or(&self, key: &str, default: &str) -> String {
        match self.parameter(key) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// Looks up a per-method parameter (`key.methodName`), falling back to
    /// the plain parameter, then to `default`.
    fn method_parameter_or(&self, method: &str, key: &str, default: &str) -> String {
        let scoped = format!("{key}.{method}");
        match self.parameter(&scoped) {
            Some(value) if !value.is_empty() => value,
            _ => self.parameter_or(key, default),
        }
    }

    /// The URL's protocol/scheme, if any.
    fn protocol(&self) -> Option<String>;

    /// All parameters as key/value pairs, for activation matching.
    fn parameters(&self) -> Vec<(String, String)>;
}

/// A small in-memory [`UrlLike`] used by tests and by callers without a
/// richer URL type of their own.
#[derive(Debug, Clone, Default)]
pub struct SimpleUrl {
    protocol: Option<String>,
    params: Vec<(String, String)>,
}

impl SimpleUrl {
    /// Creates a URL with no protocol and no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the protocol, builder-style.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Adds a parameter, builder-style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

impl UrlLike for SimpleUrl {
    fn parameter(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn protocol(&self) -> Option<String> {
        self.protocol.clone()
    }

    fn parameters(&self) -> Vec<(String, String)> {
        self.params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_or_falls_back_on_empty_and_missing() {
        let url = SimpleUrl::new().with_param("client", "").with_param("transporter", "mina");
        assert_eq!(url.parameter_or("client", "netty"), "netty");
        assert_eq!(url.parameter_or("transporter", "netty"), "mina");
        assert_eq!(url.parameter_or("missing", "netty"), "netty");
    }

    #[test]
    fn method_parameter_prefers_the_scoped_key() {
        let url = SimpleUrl::new()
            .with_param("timeout", "1000")
            .with_param("timeout.connect", "500");
        assert_eq!(url.method_parameter_or("connect", "timeout", "0"), "500");
        assert_eq!(url.method_parameter_or("other", "timeout", "0"), "1000");
    }

    #[test]
    fn protocol_defaults_to_none() {
        let url = SimpleUrl::new();
        assert_eq!(url.protocol(), None);
        assert_eq!(url.with_protocol("netty").protocol(), Some("netty".to_string()));
    }
}
