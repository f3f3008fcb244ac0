//! Clinic profile database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{ClinicProfile, Coordinate};

fn map_row(row: &Row<'_>) -> rusqlite::Result<ClinicProfile> {
    Ok(ClinicProfile {
        name: row.get(0)?,
        address: row.get(1)?,
        phone: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
    })
}

impl Database {
    /// Save a clinic's profile, replacing any previous one wholesale.
    ///
    /// Rejects blank name/address/phone, a half-set coordinate pair, and
    /// out-of-range coordinates. Coordinates may be omitted entirely; the
    /// clinic is then excluded from nearby search until location setup.
    pub fn save_clinic_info(&self, owner_id: &str, profile: &ClinicProfile) -> DbResult<()> {
        validate_profile(profile)?;

        self.conn.execute(
            r#"
            INSERT INTO clinic_info (owner_id, name, address, phone, latitude, longitude, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            ON CONFLICT(owner_id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                phone = excluded.phone,
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                updated_at = datetime('now')
            "#,
            params![
                owner_id,
                profile.name,
                profile.address,
                profile.phone,
                profile.latitude,
                profile.longitude,
            ],
        )?;
        Ok(())
    }

    /// Get a clinic's profile, if it has completed setup.
    pub fn get_clinic_info(&self, owner_id: &str) -> DbResult<Option<ClinicProfile>> {
        self.conn
            .query_row(
                "SELECT name, address, phone, latitude, longitude FROM clinic_info WHERE owner_id = ?",
                [owner_id],
                map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List every saved clinic profile with its owner, for fan-out search.
    pub fn list_clinic_profiles(&self) -> DbResult<Vec<(String, ClinicProfile)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT owner_id, name, address, phone, latitude, longitude
            FROM clinic_info
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                ClinicProfile {
                    name: row.get(1)?,
                    address: row.get(2)?,
                    phone: row.get(3)?,
                    latitude: row.get(4)?,
                    longitude: row.get(5)?,
                },
            ))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn validate_profile(profile: &ClinicProfile) -> DbResult<()> {
    if profile.name.trim().is_empty() {
        return Err(DbError::Constraint("Clinic name must not be empty".into()));
    }
    if profile.address.trim().is_empty() {
        return Err(DbError::Constraint("Clinic address must not be empty".into()));
    }
    if profile.phone.trim().is_empty() {
        return Err(DbError::Constraint("Clinic phone must not be empty".into()));
    }

    match (profile.latitude, profile.longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map(|_| ())
            .map_err(|e| DbError::Constraint(e.to_string())),
        _ => Err(DbError::Constraint(
            "Latitude and longitude must be set together".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn profile() -> ClinicProfile {
        ClinicProfile {
            name: "City Clinic".into(),
            address: "1 Main St".into(),
            phone: "555-0100".into(),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
        }
    }

    #[test]
    fn test_save_and_get() {
        let db = setup_db();

        db.save_clinic_info("clinic-1", &profile()).unwrap();

        let retrieved = db.get_clinic_info("clinic-1").unwrap().unwrap();
        assert_eq!(retrieved.name, "City Clinic");
        assert_eq!(retrieved.latitude, Some(40.7128));
    }

    #[test]
    fn test_absent_profile() {
        let db = setup_db();
        assert!(db.get_clinic_info("clinic-1").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let db = setup_db();

        db.save_clinic_info("clinic-1", &profile()).unwrap();

        let mut updated = profile();
        updated.name = "City Clinic North".into();
        updated.latitude = None;
        updated.longitude = None;
        db.save_clinic_info("clinic-1", &updated).unwrap();

        let retrieved = db.get_clinic_info("clinic-1").unwrap().unwrap();
        assert_eq!(retrieved.name, "City Clinic North");
        // No partial update: the old coordinates do not survive
        assert_eq!(retrieved.latitude, None);
        assert_eq!(retrieved.longitude, None);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let db = setup_db();

        let mut p = profile();
        p.name = "  ".into();
        assert!(matches!(
            db.save_clinic_info("clinic-1", &p),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let db = setup_db();

        let mut p = profile();
        p.latitude = Some(91.0);
        assert!(matches!(
            db.save_clinic_info("clinic-1", &p),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_half_set_coordinates_rejected() {
        let db = setup_db();

        let mut p = profile();
        p.longitude = None;
        assert!(matches!(
            db.save_clinic_info("clinic-1", &p),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_list_profiles() {
        let db = setup_db();

        db.save_clinic_info("clinic-1", &profile()).unwrap();

        let mut other = profile();
        other.name = "Annex Clinic".into();
        db.save_clinic_info("clinic-2", &other).unwrap();

        let profiles = db.list_clinic_profiles().unwrap();
        assert_eq!(profiles.len(), 2);
        // Ordered by name
        assert_eq!(profiles[0].1.name, "Annex Clinic");
        assert_eq!(profiles[0].0, "clinic-2");
    }
}
