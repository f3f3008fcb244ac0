//! Clinic profile and search result models.

use serde::{Deserialize, Serialize};

use super::{ClinicMedicine, Coordinate};

/// A clinic's public profile, saved wholesale from the setup form.
///
/// Coordinates are optional: a clinic that has not completed location setup
/// has no searchable position and is skipped by the nearby search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicProfile {
    /// Clinic name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact phone number
    pub phone: String,
    /// Latitude in decimal degrees, None until location setup
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, None until location setup
    pub longitude: Option<f64>,
}

impl ClinicProfile {
    /// The clinic's position, if location setup is complete.
    ///
    /// Returns None when either component is missing. Stored values are
    /// range-checked at save time, so a present pair always converts.
    pub fn location(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok(),
            _ => None,
        }
    }
}

/// One clinic that stocks the searched medicine, with its distance from the
/// patient. Computed per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicMatch {
    /// The matched clinic's profile
    pub clinic: ClinicProfile,
    /// Matching in-stock medicines, in inventory order
    pub medicines: Vec<ClinicMedicine>,
    /// Great-circle distance in km, rounded to 2 decimal places
    pub distance_km: f64,
}
