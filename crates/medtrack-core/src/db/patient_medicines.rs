//! Patient medicine database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::PatientMedicine;

const COLUMNS: &str = "id, name, dosage, frequency, current_stock, min_stock, barcode, created_at, updated_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<PatientMedicine> {
    Ok(PatientMedicine {
        id: row.get(0)?,
        name: row.get(1)?,
        dosage: row.get(2)?,
        frequency: row.get(3)?,
        current_stock: row.get(4)?,
        min_stock: row.get(5)?,
        barcode: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl Database {
    /// Insert a new patient medicine into the owner's partition.
    pub fn insert_patient_medicine(
        &self,
        owner_id: &str,
        medicine: &PatientMedicine,
    ) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patient_medicines (
                id, owner_id, name, dosage, frequency,
                current_stock, min_stock, barcode, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                medicine.id,
                owner_id,
                medicine.name,
                medicine.dosage,
                medicine.frequency,
                medicine.current_stock,
                medicine.min_stock,
                medicine.barcode,
                medicine.created_at,
                medicine.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a patient medicine by ID.
    pub fn get_patient_medicine(
        &self,
        owner_id: &str,
        id: &str,
    ) -> DbResult<Option<PatientMedicine>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM patient_medicines WHERE owner_id = ? AND id = ?"
                ),
                [owner_id, id],
                map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all of an owner's patient medicines, oldest first.
    pub fn list_patient_medicines(&self, owner_id: &str) -> DbResult<Vec<PatientMedicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM patient_medicines WHERE owner_id = ? ORDER BY created_at, id"
        ))?;

        let rows = stmt.query_map([owner_id], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List medicines at or below their refill threshold.
    pub fn list_low_stock_patient_medicines(
        &self,
        owner_id: &str,
    ) -> DbResult<Vec<PatientMedicine>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {COLUMNS} FROM patient_medicines
            WHERE owner_id = ? AND current_stock <= min_stock
            ORDER BY created_at, id
            "#
        ))?;

        let rows = stmt.query_map([owner_id], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Look up a medicine by its scanned barcode.
    pub fn get_patient_medicine_by_barcode(
        &self,
        owner_id: &str,
        barcode: &str,
    ) -> DbResult<Option<PatientMedicine>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM patient_medicines WHERE owner_id = ? AND barcode = ?"
                ),
                [owner_id, barcode],
                map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update an existing patient medicine's editable fields.
    pub fn update_patient_medicine(
        &self,
        owner_id: &str,
        medicine: &PatientMedicine,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient_medicines SET
                name = ?3,
                dosage = ?4,
                frequency = ?5,
                current_stock = ?6,
                min_stock = ?7,
                barcode = ?8,
                updated_at = datetime('now')
            WHERE owner_id = ?1 AND id = ?2
            "#,
            params![
                owner_id,
                medicine.id,
                medicine.name,
                medicine.dosage,
                medicine.frequency,
                medicine.current_stock,
                medicine.min_stock,
                medicine.barcode,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Adjust stock by a signed delta, clamped at zero. Returns the new
    /// stock level, or None if the medicine does not exist.
    pub fn adjust_patient_stock(
        &self,
        owner_id: &str,
        id: &str,
        delta: i64,
    ) -> DbResult<Option<u32>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient_medicines SET
                current_stock = MAX(0, current_stock + ?3),
                updated_at = datetime('now')
            WHERE owner_id = ?1 AND id = ?2
            "#,
            params![owner_id, id, delta],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let stock = self.conn.query_row(
            "SELECT current_stock FROM patient_medicines WHERE owner_id = ? AND id = ?",
            [owner_id, id],
            |row| row.get(0),
        )?;
        Ok(Some(stock))
    }

    /// Delete a patient medicine.
    pub fn delete_patient_medicine(&self, owner_id: &str, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM patient_medicines WHERE owner_id = ? AND id = ?",
            [owner_id, id],
        )?;
        Ok(rows_affected > 0)
    }
}
