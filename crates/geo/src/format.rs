//! Human-readable distances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a record has no position to measure from.
pub const UNKNOWN_DISTANCE_LABEL: &str = "Unknown";

/// Formats a distance in kilometers for display.
///
/// Below one kilometer the value is shown in whole meters, otherwise in
/// kilometers with one decimal place.
///
/// # Panics
///
/// Panics if `km` is negative or not finite.
///
/// ```
/// use profinder_geo::format_distance;
///
/// assert_eq!(format_distance(0.5), "500 m");
/// assert_eq!(format_distance(1.0), "1.0 km");
/// assert_eq!(format_distance(12.34), "12.3 km");
/// ```
pub fn format_distance(km: f64) -> String {
    assert!(
        km.is_finite() && km >= 0.0,
        "distance must be finite and non-negative, got {km}"
    );

    if km < 1.0 {
        format!("{} m", (km * 1000.0).round().abs())
    } else {
        format!("{km:.1} km")
    }
}

/// A display distance: measured, or unknown because the record has no location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "km", rename_all = "snake_case")]
pub enum Distance {
    /// Great-circle distance in kilometers
    Known(f64),
    /// No position recorded
    Unknown,
}

impl Distance {
    /// Kilometers, if known.
    #[inline]
    pub fn km(&self) -> Option<f64> {
        match self {
            Self::Known(km) => Some(*km),
            Self::Unknown => None,
        }
    }

    /// Returns true for [`Distance::Known`].
    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Display label: the formatted distance or `"Unknown"`.
    pub fn label(&self) -> String {
        match self {
            Self::Known(km) => format_distance(*km),
            Self::Unknown => UNKNOWN_DISTANCE_LABEL.to_string(),
        }
    }

    /// Total order for sorting: nearest first, unknown last.
    pub fn sort_key(&self) -> f64 {
        self.km().unwrap_or(f64::INFINITY)
    }
}

impl From<Option<f64>> for Distance {
    fn from(km: Option<f64>) -> Self {
        km.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_below_one_km() {
        assert_eq!(format_distance(0.5), "500 m");
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(0.0124), "12 m");
        assert_eq!(format_distance(0.9994), "999 m");
        assert_eq!(format_distance(-0.0), "0 m");
    }

    #[test]
    fn test_kilometers_from_one_km() {
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(12.34), "12.3 km");
        assert_eq!(format_distance(250.0), "250.0 km");
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_distance_panics() {
        let _ = format_distance(-1.0);
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn test_nan_distance_panics() {
        let _ = format_distance(f64::NAN);
    }

    #[test]
    fn test_distance_label() {
        assert_eq!(Distance::Known(0.25).label(), "250 m");
        assert_eq!(Distance::Unknown.label(), "Unknown");
        assert_eq!(Distance::from(None).to_string(), "Unknown");
    }

    #[test]
    fn test_distance_sort_key() {
        assert!(Distance::Known(3.0).sort_key() < Distance::Unknown.sort_key());
    }
}
