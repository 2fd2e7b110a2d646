//! Professionals API endpoints
//!
//! Maps to PostgREST on the Supabase project:
//! - `POST rest/v1/rpc/professionals_in_radius`: spatial lookup
//! - `GET rest/v1/professionals`: profile-joined records by id or category

use super::{id_string, opt_id_string};
use crate::client::{ProfinderClient, Service};
use crate::error::ApiResult;
use profinder_geo::{Coordinate, Location};
use profinder_search::{CategoryId, Profile, ProfessionalId, ProfessionalRecord, RadiusCandidate};
use serde::{Deserialize, Serialize};

const RADIUS_RPC: &str = "rest/v1/rpc/professionals_in_radius";
const PROFESSIONALS_TABLE: &str = "rest/v1/professionals";
const WITH_PROFILE: &str = "*,profiles(*)";

/// Professionals API interface
#[derive(Clone)]
pub struct ProfessionalsApi {
    client: ProfinderClient,
}

impl ProfessionalsApi {
    /// Create a new professionals API interface
    pub(crate) fn new(client: ProfinderClient) -> Self {
        Self { client }
    }

    /// Professionals within `radius_in_km` of a point
    ///
    /// POST /rest/v1/rpc/professionals_in_radius
    pub async fn in_radius(&self, center: Coordinate, radius_in_km: f64) -> ApiResult<Vec<RadiusRow>> {
        let body = RadiusParams {
            latitude: center.latitude,
            longitude: center.longitude,
            radius_in_km,
        };
        self.client.post(Service::Store, RADIUS_RPC, &body).await
    }

    /// Profile-joined records for the given identifiers
    ///
    /// GET /rest/v1/professionals?select=*,profiles(*)&id=in.(...)
    pub async fn by_ids(&self, ids: &[ProfessionalId]) -> ApiResult<Vec<ProfessionalRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = in_filter(ids);
        self.client
            .get(Service::Store, PROFESSIONALS_TABLE, &[("select", WITH_PROFILE), ("id", &filter)])
            .await
    }

    /// Profile-joined records in one category
    ///
    /// GET /rest/v1/professionals?select=*,profiles(*)&category_id=eq.<id>
    pub async fn by_category(&self, category: &CategoryId) -> ApiResult<Vec<ProfessionalRow>> {
        let filter = format!("eq.{category}");
        self.client
            .get(
                Service::Store,
                PROFESSIONALS_TABLE,
                &[("select", WITH_PROFILE), ("category_id", &filter)],
            )
            .await
    }

    /// The `limit` most recently created professionals
    ///
    /// GET /rest/v1/professionals?select=*,profiles(*)&order=created_at.desc&limit=<n>
    pub async fn recent(&self, limit: usize) -> ApiResult<Vec<ProfessionalRow>> {
        let limit = limit.to_string();
        self.client
            .get(
                Service::Store,
                PROFESSIONALS_TABLE,
                &[("select", WITH_PROFILE), ("order", "created_at.desc"), ("limit", &limit)],
            )
            .await
    }
}

/// PostgREST `in` filter value
fn in_filter(ids: &[ProfessionalId]) -> String {
    let joined: Vec<&str> = ids.iter().map(ProfessionalId::as_str).collect();
    format!("in.({})", joined.join(","))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Arguments of the `professionals_in_radius` function
#[derive(Debug, Clone, Serialize)]
pub struct RadiusParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_in_km: f64,
}

/// One row returned by `professionals_in_radius`
#[derive(Debug, Clone, Deserialize)]
pub struct RadiusRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Present when the function reports it
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl From<RadiusRow> for RadiusCandidate {
    fn from(row: RadiusRow) -> Self {
        Self {
            id: ProfessionalId::new(row.id),
            distance_km: row.distance_km,
        }
    }
}

/// A `professionals` row with its embedded profile
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionalRow {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Embedded by `profiles(*)`
    #[serde(default)]
    pub profiles: Option<ProfileRow>,
}

/// Embedded `profiles` row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            first_name: row.first_name,
            last_name: row.last_name,
            avatar_url: row.avatar_url,
        }
    }
}

impl From<ProfessionalRow> for ProfessionalRecord {
    fn from(row: ProfessionalRow) -> Self {
        Self {
            id: ProfessionalId::new(row.id),
            category_id: row.category_id.map(CategoryId::new),
            // Zero is a valid coordinate; only absent columns mean "no location"
            location: Location::from_parts(row.location_lat, row.location_lng),
            hourly_rate: row.hourly_rate,
            profile_id: row.profile_id,
            profile: row.profiles.map(Profile::from),
            headline: row.headline,
            bio: row.bio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_filter() {
        let ids = vec![ProfessionalId::new("a1"), ProfessionalId::new("b2")];
        assert_eq!(in_filter(&ids), "in.(a1,b2)");
    }

    #[test]
    fn test_row_with_profile_maps_to_record() {
        let json = r#"{
            "id": "5b1c",
            "category_id": 3,
            "location_lat": 52.52,
            "location_lng": 13.405,
            "hourly_rate": 45,
            "profile_id": "u-1",
            "headline": "Master plumber",
            "created_at": "2024-01-01T00:00:00Z",
            "profiles": {"first_name": "Ada", "last_name": "Lovelace", "avatar_url": null}
        }"#;

        let row: ProfessionalRow = serde_json::from_str(json).unwrap();
        let record = ProfessionalRecord::from(row);

        assert_eq!(record.id.as_str(), "5b1c");
        assert_eq!(record.category_id.as_ref().map(CategoryId::as_str), Some("3"));
        assert_eq!(record.location, Location::At(Coordinate::new(52.52, 13.405)));
        assert_eq!(record.display_name(), "Ada Lovelace");
        assert_eq!(record.rate_label(), "$45/hr");
    }

    #[test]
    fn test_row_without_location() {
        let row: ProfessionalRow =
            serde_json::from_str(r#"{"id": "x", "location_lat": null, "location_lng": 13.4}"#).unwrap();
        let record = ProfessionalRecord::from(row);

        assert_eq!(record.location, Location::NoLocation);
        assert!(record.profile.is_none());
    }

    #[test]
    fn test_zero_coordinates_are_a_location() {
        let row: ProfessionalRow =
            serde_json::from_str(r#"{"id": "x", "location_lat": 0.0, "location_lng": 0.0}"#).unwrap();
        assert_eq!(
            ProfessionalRecord::from(row).location,
            Location::At(Coordinate::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_radius_row() {
        let rows: Vec<RadiusRow> =
            serde_json::from_str(r#"[{"id": 7, "headline": "ignored"}, {"id": "a", "distance_km": 1.5}]"#).unwrap();
        let candidates: Vec<RadiusCandidate> = rows.into_iter().map(RadiusCandidate::from).collect();

        assert_eq!(candidates[0].id.as_str(), "7");
        assert_eq!(candidates[0].distance_km, None);
        assert_eq!(candidates[1].distance_km, Some(1.5));
    }

    #[test]
    fn test_radius_params_body() {
        let body = RadiusParams {
            latitude: 52.5,
            longitude: 13.4,
            radius_in_km: 10.0,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"latitude": 52.5, "longitude": 13.4, "radius_in_km": 10.0})
        );
    }
}
