//! Reasoning-service configuration from the process environment
//!
//! Each route needs a credential, a base address, a deployment and a protocol
//! version. Route A is the general-purpose deployment; route B serves records
//! whose class matches the target's.

use crate::LlmError;
use markguard_domain::{EndpointRoute, RouteId};

/// Environment variable names for one route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteVars {
    /// Credential sent as `api-key`
    pub api_key: &'static str,
    /// Service base address
    pub endpoint: &'static str,
    /// Deployment identifier
    pub model: &'static str,
    /// `api-version` query parameter
    pub api_version: &'static str,
}

/// Variables for route A
pub const ROUTE_A_VARS: RouteVars = RouteVars {
    api_key: "API_KEY1",
    endpoint: "ENDPOINT1",
    model: "MODEL1",
    api_version: "API_VERSION1",
};

/// Variables for route B
pub const ROUTE_B_VARS: RouteVars = RouteVars {
    api_key: "API_KEY2",
    endpoint: "AZURE_ENDPOINT2",
    model: "MODEL2",
    api_version: "API_VERSION2",
};

/// Both endpoint routes, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// General-purpose route
    pub route_a: EndpointRoute,

    /// Route for records in the target's class
    pub route_b: EndpointRoute,
}

impl ServiceConfig {
    /// Read both routes from the process environment
    ///
    /// Loading a `.env` file, if wanted, is the binary's job and must happen
    /// before this call.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both routes through an arbitrary variable lookup
    ///
    /// Missing and empty variables are both configuration errors naming the
    /// variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use markguard_llm::ServiceConfig;
    /// use std::collections::HashMap;
    ///
    /// let vars: HashMap<&str, &str> = HashMap::from([
    ///     ("API_KEY1", "k1"), ("ENDPOINT1", "https://a.example.com"),
    ///     ("MODEL1", "gpt-a"), ("API_VERSION1", "2024-02-01"),
    ///     ("API_KEY2", "k2"), ("AZURE_ENDPOINT2", "https://b.example.com"),
    ///     ("MODEL2", "gpt-b"), ("API_VERSION2", "2024-02-01"),
    /// ]);
    /// let config = ServiceConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.route_b.deployment, "gpt-b");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            route_a: read_route(RouteId::A, &ROUTE_A_VARS, &lookup)?,
            route_b: read_route(RouteId::B, &ROUTE_B_VARS, &lookup)?,
        })
    }

    /// The route with the given identifier
    pub fn route(&self, id: RouteId) -> &EndpointRoute {
        match id {
            RouteId::A => &self.route_a,
            RouteId::B => &self.route_b,
        }
    }
}

fn read_route<F>(id: RouteId, vars: &RouteVars, lookup: &F) -> Result<EndpointRoute, LlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |name: &str| {
        lookup(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LlmError::Config(format!("missing environment variable {}", name)))
    };

    Ok(EndpointRoute {
        id,
        base_url: require(vars.endpoint)?,
        deployment: require(vars.model)?,
        api_key: require(vars.api_key)?,
        api_version: require(vars.api_version)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        [
            ("API_KEY1", "key-a"),
            ("ENDPOINT1", "https://a.example.com"),
            ("MODEL1", "model-a"),
            ("API_VERSION1", "2024-02-01"),
            ("API_KEY2", "key-b"),
            ("AZURE_ENDPOINT2", "https://b.example.com/"),
            ("MODEL2", "model-b"),
            ("API_VERSION2", "2024-06-01"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    #[test]
    fn test_reads_both_routes() {
        let env = full_env();
        let config = ServiceConfig::from_lookup(|n| env.get(n).cloned()).unwrap();

        assert_eq!(config.route_a.id, RouteId::A);
        assert_eq!(config.route_a.api_key, "key-a");
        assert_eq!(config.route(RouteId::B).base_url, "https://b.example.com/");
        assert_eq!(
            config.route_b.completions_url(),
            "https://b.example.com/openai/deployments/model-b/chat/completions?api-version=2024-06-01"
        );
    }

    #[test]
    fn test_missing_variable_is_named() {
        let mut env = full_env();
        env.remove("AZURE_ENDPOINT2");

        let err = ServiceConfig::from_lookup(|n| env.get(n).cloned()).unwrap_err();
        assert_eq!(
            err,
            LlmError::Config("missing environment variable AZURE_ENDPOINT2".to_string())
        );
    }

    #[test]
    fn test_blank_variable_is_missing() {
        let mut env = full_env();
        env.insert("API_KEY1", "  ".to_string());

        let err = ServiceConfig::from_lookup(|n| env.get(n).cloned()).unwrap_err();
        assert!(err.to_string().contains("API_KEY1"));
    }
}
