//! Data models for the planet residents service
//!
//! This module defines the upstream catalog payloads (pages, planets, residents),
//! the joined output returned to clients, and the query parameters of the endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One page of the upstream planet catalog
///
/// # Example
/// ```json
/// {
///   "count": 60,
///   "next": "https://swapi.dev/api/planets/?page=2",
///   "previous": null,
///   "results": [ ... ]
/// }
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct CatalogPage {
    /// Total number of planets in the catalog (informational only)
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,

    /// URI of the next page, absent or null on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// URI of the previous page, never followed
    #[serde(default)]
    pub previous: Option<String>,

    /// Planets contained in this page, in upstream order
    ///
    /// The key itself is required; an explicit `null` reads as an empty page.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<PlanetRecord>,
}

impl CatalogPage {
    /// Returns the next page reference, treating an empty string like `null`
    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// A planet as published by the upstream catalog
///
/// Physical attributes are kept as the opaque strings the catalog sends
/// ("unknown", "1,000,000", ...). Only `name`, `residents` and `films`
/// matter to the aggregation. Every field reads `null` or a missing key as
/// its empty value, and an unparsable timestamp as `None`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PlanetRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rotation_period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub orbital_period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub diameter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub climate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gravity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub terrain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_water: String,
    #[serde(deserialize_with = "null_as_default")]
    pub population: String,

    /// Resident resource URIs, resolved one request each
    #[serde(deserialize_with = "null_as_default")]
    pub residents: Vec<String>,

    /// Film resource URIs, only their count is used
    #[serde(deserialize_with = "null_as_default")]
    pub films: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub starships: Vec<serde_json::Value>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub edited: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// A person resource linked from a planet's `residents` list
///
/// The `name` key is mandatory: a resident payload without it is treated as
/// an unexpected shape and fails decoding. Biographical fields are never
/// read, so they tolerate `null` the same way planet fields do.
#[derive(Deserialize, Debug, Clone)]
pub struct ResidentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mass: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hair_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skin_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eye_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub birth_year: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homeworld: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub films: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub species: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicles: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starships: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub edited: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Reads an explicit JSON `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON value; only an RFC 3339 string becomes a timestamp
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}

/// A planet joined with the names of the people living there
///
/// # Example
/// ```json
/// {
///   "name": "Tatooine",
///   "residents": ["Luke Skywalker", "C-3PO"]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanetResidency {
    /// Planet name as published upstream
    pub name: String,

    /// Resident names in the planet's reference order, duplicates kept
    pub residents: Vec<String>,
}

/// Query parameters of the residency endpoint
///
/// # Example
/// Query string: `?filmsCount=2`
///
/// The value is kept raw so the handler can reject missing and
/// non-integer input with the same response.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResidentsParams {
    pub films_count: Option<String>,
}

impl ResidentsParams {
    /// Picks parameters out of decoded query pairs
    ///
    /// A repeated key keeps its first occurrence, so
    /// `?filmsCount=2&filmsCount=3` reads as `2`.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let films_count = pairs
            .iter()
            .find(|(key, _)| key == "filmsCount")
            .map(|(_, value)| value.clone());

        Self { films_count }
    }
}
