use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};

/// Endpoints and HTTP settings for the bundled providers.
///
/// All fields have working defaults; override only what you need:
///
/// ```
/// use std::time::Duration;
/// use dialcode_providers::ProviderConfig;
///
/// let config = ProviderConfig {
///     timeout: Duration::from_secs(3),
///     ..ProviderConfig::default()
/// };
/// assert_eq!(config.catalog_url, "https://restcountries.com/v3.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// REST Countries base URL (the `/all` path is appended).
    pub catalog_url: String,
    /// Caller geolocation endpoint returning JSON for the requesting IP.
    pub location_url: String,
    /// Per-request timeout. Without one, a hung provider stalls startup.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://restcountries.com/v3.1".to_string(),
            location_url: "https://ipapi.co/json/".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("dialcode/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProviderConfig {
    /// Build a `reqwest` client carrying the timeout and user agent.
    pub fn http_client(&self) -> ProviderResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::Network {
                provider: "http",
                detail: format!("failed to build client: {e}"),
            })
    }
}
