//! ipapi.co caller geolocation client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::http_client::HttpUtils;
use crate::traits::CallerLocationProvider;
use crate::types::CallerLocation;

const PROVIDER: &str = "ipapi";

/// ipapi.co reports quota and reserved-range failures as HTTP 200 with an
/// `error` flag, so the body is decoded loosely first.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    ip: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    url: String,
}

impl IpApiClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self::with_client(
            config.http_client()?,
            config.location_url.clone(),
        ))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn try_fetch_location(&self) -> ProviderResult<CallerLocation> {
        let body = HttpUtils::get_text(&self.client, PROVIDER, &self.url).await?;
        let location = decode_location(&body)?;
        log::info!(
            "[{PROVIDER}] caller located in {} ({})",
            location.country_code,
            location.city.as_deref().unwrap_or("unknown city")
        );
        Ok(location)
    }
}

#[async_trait]
impl CallerLocationProvider for IpApiClient {
    async fn fetch_location(&self) -> Option<CallerLocation> {
        match self.try_fetch_location().await {
            Ok(location) => Some(location),
            Err(e) => {
                log::error!("Error fetching location data: {e}");
                None
            }
        }
    }
}

/// Decode an ipapi.co JSON body.
pub fn decode_location(body: &str) -> ProviderResult<CallerLocation> {
    let response: IpApiResponse = HttpUtils::parse_json(body, PROVIDER)?;
    if response.error {
        return Err(ProviderError::Rejected {
            provider: PROVIDER,
            reason: response.reason.unwrap_or_else(|| "unspecified".to_string()),
        });
    }
    let country_code = response
        .country_code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ProviderError::Decode {
            provider: PROVIDER,
            detail: "missing country_code".to_string(),
        })?;
    Ok(CallerLocation {
        country_code,
        country_name: response.country_name,
        city: response.city,
        ip: response.ip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_body() {
        let location = decode_location(
            r#"{"ip":"203.0.113.7","city":"Toronto","country_code":"CA","country_name":"Canada"}"#,
        )
        .unwrap();
        assert_eq!(location.country_code, "CA");
        assert_eq!(location.country_name.as_deref(), Some("Canada"));
    }

    #[test]
    fn error_flag_is_rejected() {
        let err = decode_location(
            r#"{"ip":"127.0.0.1","error":true,"reason":"Reserved IP Address","reserved":true}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Rejected {
                provider: PROVIDER,
                reason: "Reserved IP Address".to_string(),
            }
        );
    }

    #[test]
    fn missing_country_code_is_a_decode_error() {
        let err = decode_location(r#"{"ip":"203.0.113.7","country_code":""}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_yields_none() {
        let client = IpApiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1/json/");
        assert_eq!(client.fetch_location().await, None);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn fetches_live_location() {
        let client = IpApiClient::new(&ProviderConfig::default()).unwrap();
        let location = client.try_fetch_location().await.unwrap();
        assert_eq!(location.country_code.len(), 2);
    }
}
