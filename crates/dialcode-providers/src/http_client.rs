//! Shared GET-and-decode flow for the HTTP providers.

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, ProviderResult};

const LOG_BODY_LIMIT: usize = 512;

pub(crate) struct HttpUtils;

impl HttpUtils {
    /// GET `url` and return the body of a successful response.
    pub(crate) async fn get_text(
        client: &reqwest::Client,
        provider: &'static str,
        url: &str,
    ) -> ProviderResult<String> {
        log::debug!("[{provider}] GET {url}");

        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout { provider }
            } else {
                ProviderError::Network {
                    provider,
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{provider}] Response Status: {}", status.as_u16());
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| ProviderError::Network {
            provider,
            detail: format!("failed to read response body: {e}"),
        })?;
        log::debug!("[{provider}] Response Body: {}", truncate_for_log(&body));
        Ok(body)
    }

    pub(crate) fn parse_json<T: DeserializeOwned>(
        body: &str,
        provider: &'static str,
    ) -> ProviderResult<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider}] JSON parse failed: {e}");
            ProviderError::Decode {
                provider,
                detail: e.to_string(),
            }
        })
    }
}

fn truncate_for_log(body: &str) -> &str {
    if body.len() <= LOG_BODY_LIMIT {
        return body;
    }
    let mut end = LOG_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_maps_decode_errors() {
        let err = HttpUtils::parse_json::<Vec<u32>>("{not json", "test").unwrap_err();
        assert!(matches!(err, ProviderError::Decode { provider: "test", .. }));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(LOG_BODY_LIMIT);
        let cut = truncate_for_log(&body);
        assert!(cut.len() <= LOG_BODY_LIMIT);
        assert!(body.starts_with(cut));

        assert_eq!(truncate_for_log("short"), "short");
    }
}
