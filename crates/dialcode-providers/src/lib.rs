//! Data sources for the **dialcode** country picker.
//!
//! Two collaborators feed the widget: a [`CountryCatalogProvider`] that
//! returns every country with its calling code and flag, and a
//! [`CallerLocationProvider`] that guesses the visitor's country so the
//! matching entry can be preselected.
//!
//! The HTTP implementations ([`RestCountriesClient`], [`IpApiClient`]) log
//! failures and degrade to "no data" through the trait methods; use their
//! `try_*` methods when the error itself matters. [`StaticCatalog`] and
//! [`StaticLocation`] serve fixed data for offline runs and tests.

mod config;
mod error;
mod fixed;
mod http_client;
mod ipapi;
mod rest_countries;
mod traits;
mod types;

pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use fixed::{StaticCatalog, StaticLocation};
pub use ipapi::{IpApiClient, decode_location};
pub use rest_countries::{RestCountriesClient, decode_catalog};
pub use traits::{CallerLocationProvider, CountryCatalogProvider};
pub use types::{CallerLocation, CallingCode, CountryName, CountryRecord, Flags};
