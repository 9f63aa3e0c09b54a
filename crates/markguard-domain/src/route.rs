//! Route module - reasoning-service destinations

use std::fmt;

/// Which of the two configured reasoning-service routes handles a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RouteId {
    /// Default route for records outside the target class
    A,

    /// Route for records whose class mentions the target class
    B,
}

impl RouteId {
    /// Short name used in logs and persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteId::A => "A",
            RouteId::B => "B",
        }
    }

    /// Parse a route from its short name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(RouteId::A),
            "B" => Some(RouteId::B),
            _ => None,
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection details for one chat-completions deployment
///
/// The `Debug` output redacts the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointRoute {
    /// Route identifier
    pub id: RouteId,

    /// Service base address (e.g. `https://example.openai.azure.com`)
    pub base_url: String,

    /// Deployment (model) identifier
    pub deployment: String,

    /// Value of the `api-key` header
    pub api_key: String,

    /// Protocol version sent as the `api-version` query parameter
    pub api_version: String,
}

impl EndpointRoute {
    /// Full chat-completions URL for this deployment
    ///
    /// # Examples
    ///
    /// ```
    /// use markguard_domain::{EndpointRoute, RouteId};
    ///
    /// let route = EndpointRoute {
    ///     id: RouteId::A,
    ///     base_url: "https://svc.example.com/".to_string(),
    ///     deployment: "gpt-4o".to_string(),
    ///     api_key: "secret".to_string(),
    ///     api_version: "2024-02-01".to_string(),
    /// };
    /// assert_eq!(
    ///     route.completions_url(),
    ///     "https://svc.example.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01"
    /// );
    /// ```
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.base_url.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

impl fmt::Debug for EndpointRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointRoute")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("deployment", &self.deployment)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
