//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one group of backend endpoints.
//!
//! | Module | Backend | Description |
//! |--------|---------|-------------|
//! | `professionals` | PostgREST `professionals`, RPC `professionals_in_radius` | Radius lookup and hydration |
//! | `categories` | PostgREST `categories` | Category listing |
//! | `geocoding` | Nominatim `search`, `reverse` | Address and coordinate lookup |

pub mod categories;
pub mod geocoding;
pub mod professionals;

pub use categories::CategoriesApi;
pub use geocoding::GeocodingApi;
pub use professionals::ProfessionalsApi;

use serde::{Deserialize, Deserializer};

/// Row key stored either as text (uuid) or as an integer
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
