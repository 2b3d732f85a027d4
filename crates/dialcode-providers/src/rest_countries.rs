//! REST Countries v3.1 catalog client.

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::ProviderResult;
use crate::http_client::HttpUtils;
use crate::traits::CountryCatalogProvider;
use crate::types::CountryRecord;

const PROVIDER: &str = "restcountries";
const FIELDS: &str = "cca2,cca3,name,flags,flag,idd";

/// Fetches every country from `{base}/all`, restricted to the fields the
/// picker renders.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self::with_client(
            config.http_client()?,
            config.catalog_url.clone(),
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn all_url(&self) -> String {
        format!("{}/all?fields={FIELDS}", self.base_url.trim_end_matches('/'))
    }

    /// Like [`fetch_all`](CountryCatalogProvider::fetch_all) but surfaces the error.
    pub async fn try_fetch_all(&self) -> ProviderResult<Vec<CountryRecord>> {
        let body = HttpUtils::get_text(&self.client, PROVIDER, &self.all_url()).await?;
        let countries = decode_catalog(&body)?;
        log::info!("[{PROVIDER}] fetched {} countries", countries.len());
        Ok(countries)
    }
}

#[async_trait]
impl CountryCatalogProvider for RestCountriesClient {
    async fn fetch_all(&self) -> Vec<CountryRecord> {
        match self.try_fetch_all().await {
            Ok(countries) => countries,
            Err(e) => {
                log::error!("Error fetching countries: {e}");
                Vec::new()
            }
        }
    }
}

/// Decode an `/all` response body.
pub fn decode_catalog(body: &str) -> ProviderResult<Vec<CountryRecord>> {
    HttpUtils::parse_json(body, PROVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    #[test]
    fn all_url_requests_only_rendered_fields() {
        let client = RestCountriesClient::with_client(
            reqwest::Client::new(),
            "https://restcountries.com/v3.1/",
        );
        assert_eq!(
            client.all_url(),
            "https://restcountries.com/v3.1/all?fields=cca2,cca3,name,flags,flag,idd"
        );
    }

    #[test]
    fn decodes_bundled_fixture() {
        let countries = decode_catalog(include_str!("fixtures/countries.json")).unwrap();
        assert!(countries.len() > 10);
        let fr = countries.iter().find(|c| c.cca2 == "FR").unwrap();
        assert_eq!(fr.idd.root, "+3");
        assert_eq!(fr.idd.suffixes, vec!["3"]);
    }

    #[test]
    fn rejects_non_array_body() {
        let err = decode_catalog(r#"{"status": 404, "message": "Not Found"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode { provider: PROVIDER, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_yields_empty_catalog() {
        let client = RestCountriesClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1");
        assert!(client.fetch_all().await.is_empty());
        assert!(matches!(
            client.try_fetch_all().await,
            Err(ProviderError::Network { .. } | ProviderError::Timeout { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn fetches_live_catalog() {
        let client = RestCountriesClient::new(&ProviderConfig::default()).unwrap();
        let countries = client.try_fetch_all().await.unwrap();
        assert!(countries.iter().any(|c| c.cca2 == "US"));
    }
}
