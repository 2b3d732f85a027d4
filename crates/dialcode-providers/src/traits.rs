use async_trait::async_trait;

use crate::types::{CallerLocation, CountryRecord};

/// Source of the full country list.
///
/// Implementations never fail outward: a provider that cannot reach its
/// backend logs the error and returns an empty list, and the picker renders
/// nothing in that case.
#[async_trait]
pub trait CountryCatalogProvider: Send + Sync {
    async fn fetch_all(&self) -> Vec<CountryRecord>;
}

/// Source of the visitor's country, used to preselect an entry.
///
/// `None` means "unknown"; the picker then starts with no selection.
#[async_trait]
pub trait CallerLocationProvider: Send + Sync {
    async fn fetch_location(&self) -> Option<CallerLocation>;
}

#[async_trait]
impl<T: CountryCatalogProvider + ?Sized> CountryCatalogProvider for std::sync::Arc<T> {
    async fn fetch_all(&self) -> Vec<CountryRecord> {
        (**self).fetch_all().await
    }
}

#[async_trait]
impl<T: CallerLocationProvider + ?Sized> CallerLocationProvider for std::sync::Arc<T> {
    async fn fetch_location(&self) -> Option<CallerLocation> {
        (**self).fetch_location().await
    }
}
