//! Nearby-clinic search.
//!
//! Pipeline per clinic: profile check → inventory match → distance.
//! Results across clinics are ranked by ascending distance.
//!
//! Everything here is a pure function over caller-supplied snapshots: no
//! I/O, no hidden state, and no failure paths — "nothing found" outcomes are
//! values, never errors.

mod geo;
mod matcher;

pub use geo::*;
pub use matcher::*;

use crate::models::{ClinicMatch, ClinicMedicine, ClinicProfile, Coordinate};

/// Outcome of evaluating a single clinic against a medicine search.
///
/// Keeps "clinic has not finished setup" distinguishable from "clinic has
/// nothing matching in stock", so the UI can message them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum ClinicLookup {
    /// Clinic profile is absent or has no location; unreachable for search.
    NotConfigured,
    /// Clinic is searchable but stocks nothing matching the query.
    NoMatch,
    /// Clinic stocks the medicine; carries the match and distance.
    Found(ClinicMatch),
}

/// Evaluate one clinic against a medicine search from `patient` position.
pub fn evaluate_clinic(
    medicine_name: &str,
    patient: Coordinate,
    profile: Option<&ClinicProfile>,
    inventory: &[ClinicMedicine],
) -> ClinicLookup {
    let Some(profile) = profile else {
        return ClinicLookup::NotConfigured;
    };
    let Some(clinic_location) = profile.location() else {
        return ClinicLookup::NotConfigured;
    };

    let medicines = match_inventory(medicine_name, inventory);
    if medicines.is_empty() {
        return ClinicLookup::NoMatch;
    }

    // Distance only gets computed for clinics with something to offer
    let distance_km = round_km(haversine_km(patient, clinic_location));

    ClinicLookup::Found(ClinicMatch {
        clinic: profile.clone(),
        medicines,
        distance_km,
    })
}

/// Find all clinics stocking `medicine_name`, nearest first.
///
/// Clinics without a completed profile or without matching stock are
/// omitted. Ties keep candidate order (stable sort).
pub fn find_nearby(
    medicine_name: &str,
    patient: Coordinate,
    candidates: &[(ClinicProfile, Vec<ClinicMedicine>)],
) -> Vec<ClinicMatch> {
    let mut matches: Vec<ClinicMatch> = candidates
        .iter()
        .filter_map(|(profile, inventory)| {
            match evaluate_clinic(medicine_name, patient, Some(profile), inventory) {
                ClinicLookup::Found(m) => Some(m),
                ClinicLookup::NotConfigured | ClinicLookup::NoMatch => None,
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, stock: u32) -> ClinicMedicine {
        ClinicMedicine::new(name.into(), stock)
    }

    fn profile(name: &str, lat: f64, lon: f64) -> ClinicProfile {
        ClinicProfile {
            name: name.into(),
            address: "1 Main St".into(),
            phone: "555-0100".into(),
            latitude: Some(lat),
            longitude: Some(lon),
        }
    }

    fn patient() -> Coordinate {
        Coordinate::new(40.730, -73.935).unwrap()
    }

    #[test]
    fn test_absent_profile_not_configured() {
        let inventory = vec![med("Amoxicillin", 12)];
        let result = evaluate_clinic("amox", patient(), None, &inventory);
        assert_eq!(result, ClinicLookup::NotConfigured);
    }

    #[test]
    fn test_profile_without_location_not_configured() {
        let mut p = profile("City Clinic", 0.0, 0.0);
        p.latitude = None;
        p.longitude = None;

        let inventory = vec![med("Amoxicillin", 12)];
        let result = evaluate_clinic("amox", patient(), Some(&p), &inventory);
        assert_eq!(result, ClinicLookup::NotConfigured);
    }

    #[test]
    fn test_no_matching_stock() {
        let p = profile("City Clinic", 40.7128, -74.0060);
        let inventory = vec![med("Ibuprofen", 0)];

        let result = evaluate_clinic("ibuprofen", patient(), Some(&p), &inventory);
        assert_eq!(result, ClinicLookup::NoMatch);
    }

    #[test]
    fn test_found_with_distance() {
        let p = profile("City Clinic", 40.7128, -74.0060);
        let inventory = vec![med("Amoxicillin", 12), med("Ibuprofen", 0)];

        let ClinicLookup::Found(m) = evaluate_clinic("amox", patient(), Some(&p), &inventory)
        else {
            panic!("expected a match");
        };

        assert_eq!(m.medicines.len(), 1);
        assert_eq!(m.medicines[0].name, "Amoxicillin");
        // Queens to lower Manhattan, about 6.3 km great-circle
        assert!((5.8..=6.8).contains(&m.distance_km), "got {}", m.distance_km);
    }

    #[test]
    fn test_find_nearby_sorted_ascending() {
        let near = (profile("Near Clinic", 40.7306, -73.9352), vec![med("Aspirin", 3)]);
        let far = (profile("Far Clinic", 34.0522, -118.2437), vec![med("Aspirin", 9)]);
        let empty = (profile("Empty Clinic", 40.7128, -74.0060), vec![med("Aspirin", 0)]);

        let results = find_nearby("aspirin", patient(), &[far, empty, near]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].clinic.name, "Near Clinic");
        assert_eq!(results[1].clinic.name, "Far Clinic");
        assert!(results[0].distance_km < results[1].distance_km);
    }

    #[test]
    fn test_find_nearby_no_candidates() {
        assert!(find_nearby("aspirin", patient(), &[]).is_empty());
    }
}
