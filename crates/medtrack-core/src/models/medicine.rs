//! Medicine record models.

use serde::{Deserialize, Serialize};

/// Default minimum-stock threshold for patient medicines.
pub const DEFAULT_MIN_STOCK: u32 = 5;

/// A medicine tracked by a patient for personal use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientMedicine {
    /// Local UUID, generated at creation
    pub id: String,
    /// Medicine name
    pub name: String,
    /// Dosage description (e.g., "500mg")
    pub dosage: Option<String>,
    /// Intake frequency (e.g., "twice daily")
    pub frequency: Option<String>,
    /// Units currently on hand
    pub current_stock: u32,
    /// Threshold at or below which stock counts as low
    pub min_stock: u32,
    /// Scanned package barcode
    pub barcode: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl PatientMedicine {
    /// Create a new patient medicine with required fields.
    pub fn new(name: String, current_stock: u32) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            dosage: None,
            frequency: None,
            current_stock,
            min_stock: DEFAULT_MIN_STOCK,
            barcode: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the remaining stock is at or below the refill threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

/// A medicine held in a clinic's sale/distribution inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicMedicine {
    /// Local UUID, generated at creation
    pub id: String,
    /// Medicine name
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Units in stock; unsigned so it can never go negative
    pub stock: u32,
    /// Unit price
    pub price: f64,
    /// Scanned package barcode
    pub barcode: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl ClinicMedicine {
    /// Create a new clinic medicine with required fields.
    pub fn new(name: String, stock: u32) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: None,
            stock,
            price: 0.0,
            barcode: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether this record can satisfy a request right now.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_medicine() {
        let med = PatientMedicine::new("Ibuprofen".into(), 20);
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.current_stock, 20);
        assert_eq!(med.min_stock, DEFAULT_MIN_STOCK);
        assert_eq!(med.id.len(), 36); // UUID format
    }

    #[test]
    fn test_low_stock_threshold_inclusive() {
        let mut med = PatientMedicine::new("Ibuprofen".into(), 5);
        assert!(med.is_low_stock()); // at threshold counts as low

        med.current_stock = 6;
        assert!(!med.is_low_stock());

        med.current_stock = 0;
        assert!(med.is_low_stock());
    }

    #[test]
    fn test_new_clinic_medicine() {
        let med = ClinicMedicine::new("Amoxicillin".into(), 12);
        assert_eq!(med.stock, 12);
        assert_eq!(med.price, 0.0);
        assert!(med.in_stock());
    }

    #[test]
    fn test_out_of_stock() {
        let med = ClinicMedicine::new("Amoxicillin".into(), 0);
        assert!(!med.in_stock());
    }
}
