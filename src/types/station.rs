//! Defines the data structures representing the fixed stations weather history is
//! requested for.

use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees stored as `f64`.
///
/// # Examples
///
/// ```
/// use meteo_archive::LatLon;
///
/// let astana = LatLon(51.18128712, 71.46580696);
/// assert_eq!(astana.0, 51.18128712); // Latitude
/// assert_eq!(astana.1, 71.46580696); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// A single weather station: a short identifier and the point it sits on.
///
/// Stations are defined once at startup and never mutated. The identifier doubles
/// as the output file stem (`<id>.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier (e.g., "k12").
    pub id: String,
    /// Location of the station. Not validated; out-of-range coordinates are passed
    /// to the archive service as-is.
    pub location: LatLon,
}

impl Station {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            location: LatLon(latitude, longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.0
    }

    pub fn longitude(&self) -> f64 {
        self.location.1
    }

    /// File name the station's table is written to.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.id)
    }
}
