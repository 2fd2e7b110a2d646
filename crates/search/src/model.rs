//! Domain types read from the data store and produced by a search.

use crate::error::Result;
use profinder_geo::{Coordinate, Distance, GeoError, Located, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when a professional has no name on their profile.
pub const UNNAMED_PROFESSIONAL: &str = "Unnamed Professional";

/// Shown when a professional has no headline.
pub const DEFAULT_HEADLINE: &str = "Professional Service Provider";

/// Shown when a professional has not written a bio.
pub const DEFAULT_BIO: &str = "No bio available";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a professional record.
    ProfessionalId
);

string_id!(
    /// Identifier of a service category.
    CategoryId
);

/// A service category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Public profile joined onto a professional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// First and last name joined, or `None` when both are blank.
    pub fn full_name(&self) -> Option<String> {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// A professional as held by the data store. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub id: ProfessionalId,
    pub category_id: Option<CategoryId>,
    pub location: Location,
    pub hourly_rate: Option<f64>,
    /// Reference to the owning profile
    pub profile_id: Option<String>,
    pub profile: Option<Profile>,
    pub headline: Option<String>,
    pub bio: Option<String>,
}

impl ProfessionalRecord {
    /// A record with only the fields a search needs; everything else empty.
    pub fn new(id: impl Into<ProfessionalId>, location: Location) -> Self {
        Self {
            id: id.into(),
            category_id: None,
            location,
            hourly_rate: None,
            profile_id: None,
            profile: None,
            headline: None,
            bio: None,
        }
    }

    /// Builder-style method to set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category.into());
        self
    }

    /// Builder-style method to set the hourly rate
    #[must_use]
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    /// Builder-style method to attach a profile
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Name to display, falling back to [`UNNAMED_PROFESSIONAL`].
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(Profile::full_name)
            .unwrap_or_else(|| UNNAMED_PROFESSIONAL.to_string())
    }

    /// Headline to display, falling back to [`DEFAULT_HEADLINE`].
    pub fn headline_or_default(&self) -> &str {
        self.headline
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(DEFAULT_HEADLINE)
    }

    /// Bio to display, falling back to [`DEFAULT_BIO`].
    pub fn bio_or_default(&self) -> &str {
        self.bio.as_deref().filter(|b| !b.trim().is_empty()).unwrap_or(DEFAULT_BIO)
    }

    /// Hourly rate as `"$45/hr"`; a missing rate shows as zero.
    pub fn rate_label(&self) -> String {
        format!("${}/hr", self.hourly_rate.unwrap_or(0.0))
    }

    /// True when the record belongs to `category`.
    pub fn in_category(&self, category: &CategoryId) -> bool {
        self.category_id.as_ref() == Some(category)
    }
}

impl Located for ProfessionalRecord {
    fn location(&self) -> Location {
        self.location
    }
}

/// A professional annotated with its distance from the search center.
///
/// The distance is derived per search and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalWithDistance {
    #[serde(flatten)]
    pub professional: ProfessionalRecord,
    pub distance: Distance,
}

impl ProfessionalWithDistance {
    /// Kilometers from the search center, if the record has a location.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.km()
    }

    /// `"2.4 km"`, `"350 m"` or `"Unknown"`.
    pub fn distance_label(&self) -> String {
        self.distance.label()
    }
}

/// A phase-one hit from the spatial index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusCandidate {
    pub id: ProfessionalId,
    /// Server-side distance, when the store reports one
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl RadiusCandidate {
    /// A candidate without a server-side distance.
    pub fn new(id: impl Into<ProfessionalId>) -> Self {
        Self {
            id: id.into(),
            distance_km: None,
        }
    }
}

/// One radius search request. Built fresh per interaction and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub center: Coordinate,
    pub radius_km: f64,
    pub category: Option<CategoryId>,
}

impl SearchQuery {
    /// Validate the center and radius.
    ///
    /// ```
    /// use profinder_geo::Coordinate;
    /// use profinder_search::SearchQuery;
    ///
    /// let center = Coordinate::new(52.52, 13.405);
    /// assert!(SearchQuery::new(center, 10.0).is_ok());
    /// assert!(SearchQuery::new(center, 0.0).is_err());
    /// ```
    pub fn new(center: Coordinate, radius_km: f64) -> Result<Self> {
        if !center.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!("search center {center} out of range")).into());
        }
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(GeoError::InvalidRadius(format!("{radius_km} km is not a positive distance")).into());
        }

        Ok(Self {
            center,
            radius_km,
            category: None,
        })
    }

    /// Builder-style method to restrict results to one category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Option<CategoryId>>) -> Self {
        self.category = category.into();
        self
    }
}

/// Policy knobs for result post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Re-check distances client-side and drop anything beyond the radius.
    /// Off by default: the store's spatial filter is trusted.
    pub verify_radius: bool,
    /// Keep professionals without a location, labelled with an unknown distance.
    pub include_unknown_distance: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            verify_radius: false,
            include_unknown_distance: true,
        }
    }
}

/// A resolved place: coordinate plus a human label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinate: Coordinate,
    pub label: String,
}
