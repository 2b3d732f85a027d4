use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::rest_countries::decode_catalog;
use crate::traits::{CallerLocationProvider, CountryCatalogProvider};
use crate::types::{CallerLocation, CountryRecord};

/// In-memory catalog for offline runs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    countries: Vec<CountryRecord>,
}

impl StaticCatalog {
    pub fn new(countries: Vec<CountryRecord>) -> Self {
        Self { countries }
    }

    /// Parse a REST Countries style JSON array.
    pub fn from_json(body: &str) -> ProviderResult<Self> {
        decode_catalog(body).map(Self::new)
    }

    /// A small bundled catalog covering a handful of countries, including
    /// multi-suffix codes (`US`) and a territory without one (`AQ`).
    pub fn sample() -> Self {
        // The fixture is checked by `bundled_sample_decodes`.
        Self::from_json(include_str!("fixtures/countries.json")).unwrap_or_default()
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }
}

#[async_trait]
impl CountryCatalogProvider for StaticCatalog {
    async fn fetch_all(&self) -> Vec<CountryRecord> {
        self.countries.clone()
    }
}

/// Fixed caller location; `None` simulates a failed lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocation(pub Option<CallerLocation>);

impl StaticLocation {
    pub fn country(code: impl Into<String>) -> Self {
        Self(Some(CallerLocation::new(code)))
    }

    pub fn unknown() -> Self {
        Self(None)
    }
}

#[async_trait]
impl CallerLocationProvider for StaticLocation {
    async fn fetch_location(&self) -> Option<CallerLocation> {
        self.0.clone()
    }
}
