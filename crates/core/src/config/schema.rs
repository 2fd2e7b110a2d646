//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.location.validate()
    }
}

/// Radius search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Radius used when none is given
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Smallest radius a caller may ask for
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,

    /// Largest radius a caller may ask for
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Re-check server results against the radius and drop anything outside it
    #[serde(default)]
    pub verify_radius: bool,

    /// Keep professionals without a recorded location in results
    #[serde(default = "default_true")]
    pub include_unknown_distance: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
            verify_radius: false,
            include_unknown_distance: true,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if !(self.min_radius_km > 0.0) {
            return Err(Error::config_validation("search.min_radius_km must be positive"));
        }
        if self.min_radius_km > self.max_radius_km {
            return Err(Error::config_validation(
                "search.min_radius_km cannot exceed search.max_radius_km",
            ));
        }
        if !(self.min_radius_km..=self.max_radius_km).contains(&self.default_radius_km) {
            return Err(Error::config_validation(format!(
                "search.default_radius_km must lie within {}..={} km",
                self.min_radius_km, self.max_radius_km
            )));
        }
        Ok(())
    }

    /// Clamp a requested radius into the configured bounds.
    pub fn clamp_radius(&self, radius_km: f64) -> f64 {
        radius_km.clamp(self.min_radius_km, self.max_radius_km)
    }
}

fn default_radius_km() -> f64 {
    10.0
}

fn default_min_radius_km() -> f64 {
    1.0
}

fn default_max_radius_km() -> f64 {
    50.0
}

fn default_true() -> bool {
    true
}

/// Current-location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// How long to wait for a position fix
    #[serde(default = "default_location_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed device latitude, for hosts without a positioning sensor
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Fixed device longitude
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_location_timeout_secs(),
            latitude: None,
            longitude: None,
        }
    }
}

impl LocationConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config_validation("location.timeout_secs cannot be zero"));
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(Error::config_validation(
                "location.latitude and location.longitude must be set together",
            ));
        }
        Ok(())
    }
}

fn default_location_timeout_secs() -> u64 {
    10
}

/// Data store overrides; environment variables fill anything left unset
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Supabase project URL
    #[serde(default)]
    pub url: Option<String>,

    /// Geocoding service URL
    #[serde(default)]
    pub geocoder_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
