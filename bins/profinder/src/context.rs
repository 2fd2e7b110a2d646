//! Shared command context: loaded configuration and adapter construction.

use anyhow::Result;
use profinder_api_client::{ClientConfig, NominatimGeocoder, ProfinderClient, SupabaseStore};
use profinder_cli::OutputFormat;
use profinder_core::config::Config;
use profinder_geo::Coordinate;
use profinder_search::{FixedLocationProvider, LocationProvider, SearchOptions, UnavailableLocationProvider};
use profinder_telemetry::TelemetryConfig;
use std::time::Duration;

pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn load(path: Option<&str>, format: OutputFormat) -> Result<Self> {
        let config = Config::load(path)?;
        Ok(Self { config, format })
    }

    pub fn init_logging(&self, verbose: bool) -> Result<()> {
        let logging = &self.config.schema.logging;
        let level = if verbose {
            "profinder=debug,profinder_search=debug,profinder_api_client=debug".to_string()
        } else {
            logging.level.clone()
        };

        profinder_telemetry::init_with_config(
            TelemetryConfig::default()
                .with_log_level(level)
                .with_json(logging.json),
        )
    }

    fn client(&self) -> Result<ProfinderClient> {
        let store = &self.config.schema.store;
        let mut config = ClientConfig::from_env_or(store.url.as_deref())?;
        if let Some(url) = &store.geocoder_url {
            if std::env::var_os("PROFINDER_GEOCODER_URL").is_none() {
                config = config.with_geocoder_url(url.clone());
            }
        }
        Ok(ProfinderClient::with_config(config)?)
    }

    pub fn store(&self) -> Result<SupabaseStore> {
        Ok(SupabaseStore::new(self.client()?))
    }

    pub fn geocoder(&self) -> Result<NominatimGeocoder> {
        Ok(NominatimGeocoder::new(self.client()?))
    }

    /// Configured fixed position, or a provider that reports no sensor.
    pub fn location_provider(&self) -> Box<dyn LocationProvider> {
        let location = &self.config.schema.location;
        match (location.latitude, location.longitude) {
            (Some(lat), Some(lng)) => Box::new(FixedLocationProvider(Coordinate::new(lat, lng))),
            _ => Box::new(UnavailableLocationProvider),
        }
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.config.schema.location.timeout_secs)
    }

    /// Configured options with command-line overrides applied.
    pub fn search_options(&self, verify_radius: bool, exclude_unknown: bool) -> SearchOptions {
        let search = &self.config.schema.search;
        SearchOptions {
            verify_radius: verify_radius || search.verify_radius,
            include_unknown_distance: !exclude_unknown && search.include_unknown_distance,
        }
    }
}
