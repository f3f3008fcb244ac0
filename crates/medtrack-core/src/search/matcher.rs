//! Inventory matcher.
//!
//! Filters a clinic's inventory down to the records that can satisfy a
//! medicine search: case-insensitive substring match on the name, and at
//! least one unit in stock.

use crate::models::ClinicMedicine;

/// Filter `inventory` to records matching `medicine_name`.
///
/// A record matches when its lowercased name contains the lowercased query
/// and its stock is strictly positive. The filter is stable: output preserves
/// inventory order. An empty query matches every in-stock record, so callers
/// wanting "no query" semantics must guard upstream.
pub fn match_inventory(medicine_name: &str, inventory: &[ClinicMedicine]) -> Vec<ClinicMedicine> {
    let query = medicine_name.to_lowercase();
    inventory
        .iter()
        .filter(|med| med.stock > 0 && med.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
