//! MedTrack Core Library
//!
//! Local-first medicine tracking for patient and clinic accounts, with
//! nearby-clinic search by stocked medicine.
//!
//! # Architecture
//!
//! ```text
//!   Patient UI                          Clinic UI
//!   (forms, barcode scan, GPS fix)      (forms, barcode scan, location setup)
//!        │                                   │
//!        ▼                                   ▼
//!   ┌─────────────────────────────────────────────────┐
//!   │                  MedTrackCore (FFI)             │
//!   │                                                 │
//!   │   db: owner-scoped SQLite partitions            │
//!   │     patient_medicines / clinic_medicines        │
//!   │     clinic_info                                 │
//!   │                                                 │
//!   │   search: pure functions over snapshots         │
//!   │     inventory matcher → haversine → rank        │
//!   └─────────────────────────────────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Search never fails.** "No clinic configured" and "nothing in stock" are
//! values, not errors; only storage and bad input produce errors.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer, owner-scoped
//! - [`models`]: Domain types (PatientMedicine, ClinicMedicine, ClinicProfile, etc.)
//! - [`search`]: Inventory matcher and geo ranker

pub mod db;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    ClinicMatch, ClinicMedicine, ClinicProfile, Coordinate, CoordinateError, PatientMedicine,
};
pub use search::{evaluate_clinic, find_nearby, haversine_km, match_inventory, ClinicLookup};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedTrackError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for MedTrackError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(msg) => MedTrackError::NotFound(msg),
            db::DbError::Constraint(msg) => MedTrackError::InvalidInput(msg),
            other => MedTrackError::DatabaseError(other.to_string()),
        }
    }
}

impl From<CoordinateError> for MedTrackError {
    fn from(e: CoordinateError) -> Self {
        MedTrackError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for MedTrackError {
    fn from(e: serde_json::Error) -> Self {
        MedTrackError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedTrackError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedTrackError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<MedTrackCore>, MedTrackError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(MedTrackCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<MedTrackCore>, MedTrackError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(MedTrackCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedTrackCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl MedTrackCore {
    // =========================================================================
    // Patient Medicine Operations
    // =========================================================================

    /// Add a medicine to a patient's personal tracker.
    #[allow(clippy::too_many_arguments)]
    pub fn add_patient_medicine(
        &self,
        owner_id: String,
        name: String,
        dosage: Option<String>,
        frequency: Option<String>,
        current_stock: u32,
        min_stock: Option<u32>,
        barcode: Option<String>,
    ) -> Result<FfiPatientMedicine, MedTrackError> {
        if name.trim().is_empty() {
            return Err(MedTrackError::InvalidInput(
                "Medicine name must not be empty".into(),
            ));
        }

        let db = self.db.lock()?;
        let mut medicine = PatientMedicine::new(name, current_stock);
        medicine.dosage = dosage;
        medicine.frequency = frequency;
        medicine.barcode = barcode;
        if let Some(min_stock) = min_stock {
            medicine.min_stock = min_stock;
        }
        db.insert_patient_medicine(&owner_id, &medicine)?;
        Ok(medicine.into())
    }

    /// Get one of a patient's medicines by ID.
    pub fn get_patient_medicine(
        &self,
        owner_id: String,
        id: String,
    ) -> Result<Option<FfiPatientMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicine = db.get_patient_medicine(&owner_id, &id)?;
        Ok(medicine.map(|m| m.into()))
    }

    /// List all of a patient's medicines.
    pub fn list_patient_medicines(
        &self,
        owner_id: String,
    ) -> Result<Vec<FfiPatientMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicines = db.list_patient_medicines(&owner_id)?;
        Ok(medicines.into_iter().map(|m| m.into()).collect())
    }

    /// List a patient's medicines at or below their refill threshold.
    pub fn list_low_stock_patient_medicines(
        &self,
        owner_id: String,
    ) -> Result<Vec<FfiPatientMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicines = db.list_low_stock_patient_medicines(&owner_id)?;
        Ok(medicines.into_iter().map(|m| m.into()).collect())
    }

    /// Look up a patient medicine by scanned barcode.
    pub fn find_patient_medicine_by_barcode(
        &self,
        owner_id: String,
        barcode: String,
    ) -> Result<Option<FfiPatientMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicine = db.get_patient_medicine_by_barcode(&owner_id, &barcode)?;
        Ok(medicine.map(|m| m.into()))
    }

    /// Update a patient medicine's editable fields.
    pub fn update_patient_medicine(
        &self,
        owner_id: String,
        medicine: FfiPatientMedicine,
    ) -> Result<(), MedTrackError> {
        if medicine.name.trim().is_empty() {
            return Err(MedTrackError::InvalidInput(
                "Medicine name must not be empty".into(),
            ));
        }

        let db = self.db.lock()?;
        let id = medicine.id.clone();
        let updated = db.update_patient_medicine(&owner_id, &medicine.into())?;
        if !updated {
            return Err(MedTrackError::NotFound(id));
        }
        Ok(())
    }

    /// Adjust a patient medicine's stock by a signed delta, clamped at zero.
    /// Returns the new stock level.
    pub fn adjust_patient_stock(
        &self,
        owner_id: String,
        id: String,
        delta: i64,
    ) -> Result<u32, MedTrackError> {
        let db = self.db.lock()?;
        db.adjust_patient_stock(&owner_id, &id, delta)?
            .ok_or(MedTrackError::NotFound(id))
    }

    /// Delete a patient medicine.
    pub fn delete_patient_medicine(
        &self,
        owner_id: String,
        id: String,
    ) -> Result<(), MedTrackError> {
        let db = self.db.lock()?;
        if !db.delete_patient_medicine(&owner_id, &id)? {
            return Err(MedTrackError::NotFound(id));
        }
        Ok(())
    }

    // =========================================================================
    // Clinic Medicine Operations
    // =========================================================================

    /// Add a medicine to a clinic's inventory.
    pub fn add_clinic_medicine(
        &self,
        owner_id: String,
        name: String,
        description: Option<String>,
        stock: u32,
        price: f64,
        barcode: Option<String>,
    ) -> Result<FfiClinicMedicine, MedTrackError> {
        if name.trim().is_empty() {
            return Err(MedTrackError::InvalidInput(
                "Medicine name must not be empty".into(),
            ));
        }
        if price < 0.0 || !price.is_finite() {
            return Err(MedTrackError::InvalidInput(format!(
                "Price must be non-negative: {}",
                price
            )));
        }

        let db = self.db.lock()?;
        let mut medicine = ClinicMedicine::new(name, stock);
        medicine.description = description;
        medicine.price = price;
        medicine.barcode = barcode;
        db.insert_clinic_medicine(&owner_id, &medicine)?;
        Ok(medicine.into())
    }

    /// Get one of a clinic's medicines by ID.
    pub fn get_clinic_medicine(
        &self,
        owner_id: String,
        id: String,
    ) -> Result<Option<FfiClinicMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicine = db.get_clinic_medicine(&owner_id, &id)?;
        Ok(medicine.map(|m| m.into()))
    }

    /// List a clinic's full inventory.
    pub fn list_clinic_medicines(
        &self,
        owner_id: String,
    ) -> Result<Vec<FfiClinicMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicines = db.list_clinic_medicines(&owner_id)?;
        Ok(medicines.into_iter().map(|m| m.into()).collect())
    }

    /// Look up a clinic medicine by scanned barcode.
    pub fn find_clinic_medicine_by_barcode(
        &self,
        owner_id: String,
        barcode: String,
    ) -> Result<Option<FfiClinicMedicine>, MedTrackError> {
        let db = self.db.lock()?;
        let medicine = db.get_clinic_medicine_by_barcode(&owner_id, &barcode)?;
        Ok(medicine.map(|m| m.into()))
    }

    /// Update a clinic medicine's editable fields.
    pub fn update_clinic_medicine(
        &self,
        owner_id: String,
        medicine: FfiClinicMedicine,
    ) -> Result<(), MedTrackError> {
        if medicine.name.trim().is_empty() {
            return Err(MedTrackError::InvalidInput(
                "Medicine name must not be empty".into(),
            ));
        }
        if medicine.price < 0.0 || !medicine.price.is_finite() {
            return Err(MedTrackError::InvalidInput(format!(
                "Price must be non-negative: {}",
                medicine.price
            )));
        }

        let db = self.db.lock()?;
        let id = medicine.id.clone();
        let updated = db.update_clinic_medicine(&owner_id, &medicine.into())?;
        if !updated {
            return Err(MedTrackError::NotFound(id));
        }
        Ok(())
    }

    /// Adjust a clinic medicine's stock by a signed delta, clamped at zero.
    /// Returns the new stock level.
    pub fn adjust_clinic_stock(
        &self,
        owner_id: String,
        id: String,
        delta: i64,
    ) -> Result<u32, MedTrackError> {
        let db = self.db.lock()?;
        db.adjust_clinic_stock(&owner_id, &id, delta)?
            .ok_or(MedTrackError::NotFound(id))
    }

    /// Delete a clinic medicine.
    pub fn delete_clinic_medicine(
        &self,
        owner_id: String,
        id: String,
    ) -> Result<(), MedTrackError> {
        let db = self.db.lock()?;
        if !db.delete_clinic_medicine(&owner_id, &id)? {
            return Err(MedTrackError::NotFound(id));
        }
        Ok(())
    }

    // =========================================================================
    // Clinic Profile Operations
    // =========================================================================

    /// Save a clinic's profile, replacing any previous one wholesale.
    pub fn save_clinic_info(
        &self,
        owner_id: String,
        profile: FfiClinicProfile,
    ) -> Result<(), MedTrackError> {
        let db = self.db.lock()?;
        db.save_clinic_info(&owner_id, &profile.into())?;
        Ok(())
    }

    /// Get a clinic's profile, if saved.
    pub fn get_clinic_info(
        &self,
        owner_id: String,
    ) -> Result<Option<FfiClinicProfile>, MedTrackError> {
        let db = self.db.lock()?;
        let profile = db.get_clinic_info(&owner_id)?;
        Ok(profile.map(|p| p.into()))
    }

    // =========================================================================
    // Nearby Search Operations
    // =========================================================================

    /// Find all clinics stocking a medicine, nearest to the patient first.
    ///
    /// Scans every saved clinic profile; clinics without a location or
    /// without matching in-stock inventory are omitted. An empty result
    /// means "nothing found", never an error.
    pub fn find_nearby_clinics(
        &self,
        medicine_name: String,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<FfiClinicMatch>, MedTrackError> {
        let patient = Coordinate::new(latitude, longitude)?;

        let db = self.db.lock()?;
        let mut candidates = Vec::new();
        for (owner_id, profile) in db.list_clinic_profiles()? {
            let inventory = db.list_clinic_medicines(&owner_id)?;
            candidates.push((profile, inventory));
        }

        let matches = find_nearby(&medicine_name, patient, &candidates);
        Ok(matches.into_iter().map(|m| m.into()).collect())
    }

    /// Evaluate a single clinic against a medicine search, keeping "clinic
    /// not set up" distinguishable from "nothing matching in stock".
    pub fn lookup_clinic(
        &self,
        clinic_owner_id: String,
        medicine_name: String,
        latitude: f64,
        longitude: f64,
    ) -> Result<FfiClinicLookup, MedTrackError> {
        let patient = Coordinate::new(latitude, longitude)?;

        let db = self.db.lock()?;
        let profile = db.get_clinic_info(&clinic_owner_id)?;
        let inventory = db.list_clinic_medicines(&clinic_owner_id)?;

        let outcome = evaluate_clinic(&medicine_name, patient, profile.as_ref(), &inventory);
        Ok(outcome.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a patient's medicine list as JSON.
    pub fn export_patient_medicines_json(&self, owner_id: String) -> Result<String, MedTrackError> {
        let db = self.db.lock()?;
        let medicines = db.list_patient_medicines(&owner_id)?;
        Ok(serde_json::to_string_pretty(&medicines)?)
    }

    /// Export a clinic's inventory as JSON.
    pub fn export_clinic_inventory_json(&self, owner_id: String) -> Result<String, MedTrackError> {
        let db = self.db.lock()?;
        let medicines = db.list_clinic_medicines(&owner_id)?;
        Ok(serde_json::to_string_pretty(&medicines)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientMedicine {
    pub id: String,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub current_stock: u32,
    pub min_stock: u32,
    pub barcode: Option<String>,
    pub low_stock: bool,
}

impl From<PatientMedicine> for FfiPatientMedicine {
    fn from(medicine: PatientMedicine) -> Self {
        let low_stock = medicine.is_low_stock();
        Self {
            id: medicine.id,
            name: medicine.name,
            dosage: medicine.dosage,
            frequency: medicine.frequency,
            current_stock: medicine.current_stock,
            min_stock: medicine.min_stock,
            barcode: medicine.barcode,
            low_stock,
        }
    }
}

impl From<FfiPatientMedicine> for PatientMedicine {
    fn from(medicine: FfiPatientMedicine) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        PatientMedicine {
            id: medicine.id,
            name: medicine.name,
            dosage: medicine.dosage,
            frequency: medicine.frequency,
            current_stock: medicine.current_stock,
            min_stock: medicine.min_stock,
            barcode: medicine.barcode,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// FFI-safe clinic medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicMedicine {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub stock: u32,
    pub price: f64,
    pub barcode: Option<String>,
}

impl From<ClinicMedicine> for FfiClinicMedicine {
    fn from(medicine: ClinicMedicine) -> Self {
        Self {
            id: medicine.id,
            name: medicine.name,
            description: medicine.description,
            stock: medicine.stock,
            price: medicine.price,
            barcode: medicine.barcode,
        }
    }
}

impl From<FfiClinicMedicine> for ClinicMedicine {
    fn from(medicine: FfiClinicMedicine) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        ClinicMedicine {
            id: medicine.id,
            name: medicine.name,
            description: medicine.description,
            stock: medicine.stock,
            price: medicine.price,
            barcode: medicine.barcode,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// FFI-safe clinic profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<ClinicProfile> for FfiClinicProfile {
    fn from(profile: ClinicProfile) -> Self {
        Self {
            name: profile.name,
            address: profile.address,
            phone: profile.phone,
            latitude: profile.latitude,
            longitude: profile.longitude,
        }
    }
}

impl From<FfiClinicProfile> for ClinicProfile {
    fn from(profile: FfiClinicProfile) -> Self {
        ClinicProfile {
            name: profile.name,
            address: profile.address,
            phone: profile.phone,
            latitude: profile.latitude,
            longitude: profile.longitude,
        }
    }
}

/// FFI-safe clinic match result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicMatch {
    pub clinic: FfiClinicProfile,
    pub medicines: Vec<FfiClinicMedicine>,
    pub distance_km: f64,
}

impl From<ClinicMatch> for FfiClinicMatch {
    fn from(m: ClinicMatch) -> Self {
        Self {
            clinic: m.clinic.into(),
            medicines: m.medicines.into_iter().map(|med| med.into()).collect(),
            distance_km: m.distance_km,
        }
    }
}

/// FFI-safe single-clinic lookup outcome.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiClinicLookup {
    /// Clinic has no profile or no location yet.
    NotConfigured,
    /// Clinic is searchable but has nothing matching in stock.
    NoMatch,
    /// Clinic stocks the medicine.
    Found { result: FfiClinicMatch },
}

impl From<ClinicLookup> for FfiClinicLookup {
    fn from(lookup: ClinicLookup) -> Self {
        match lookup {
            ClinicLookup::NotConfigured => FfiClinicLookup::NotConfigured,
            ClinicLookup::NoMatch => FfiClinicLookup::NoMatch,
            ClinicLookup::Found(m) => FfiClinicLookup::Found { result: m.into() },
        }
    }
}
