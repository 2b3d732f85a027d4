use serde::{Deserialize, Serialize};

/// One country from the catalog.
///
/// Field names follow the REST Countries v3.1 payload. Only the fields the
/// picker reads are kept; everything else in the response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 code.
    pub cca2: String,
    /// ISO 3166-1 alpha-3 code.
    #[serde(default)]
    pub cca3: String,
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub flags: Flags,
    /// Flag emoji.
    #[serde(default)]
    pub flag: Option<String>,
    /// International direct dialing prefix. Territories without one carry an
    /// empty object upstream.
    #[serde(default)]
    pub idd: CallingCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
}

/// Flag image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A calling code split the way the catalog reports it, e.g. `+3` / `["3"]`
/// for France.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallingCode {
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl CallingCode {
    pub fn new(
        root: impl Into<String>,
        suffixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            root: root.into(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.suffixes.iter().all(String::is_empty)
    }
}

/// The visitor's geolocated country.
///
/// Only `country_code` is used for matching; the rest is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerLocation {
    /// ISO 3166-1 alpha-2 code.
    pub country_code: String,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

impl CallerLocation {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: None,
            city: None,
            ip: None,
        }
    }
}
