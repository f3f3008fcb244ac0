//! Clinic medicine database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::ClinicMedicine;

const COLUMNS: &str = "id, name, description, stock, price, barcode, created_at, updated_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<ClinicMedicine> {
    Ok(ClinicMedicine {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        stock: row.get(3)?,
        price: row.get(4)?,
        barcode: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    /// Insert a new clinic medicine into the owner's inventory.
    pub fn insert_clinic_medicine(
        &self,
        owner_id: &str,
        medicine: &ClinicMedicine,
    ) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO clinic_medicines (
                id, owner_id, name, description, stock, price, barcode, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                medicine.id,
                owner_id,
                medicine.name,
                medicine.description,
                medicine.stock,
                medicine.price,
                medicine.barcode,
                medicine.created_at,
                medicine.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a clinic medicine by ID.
    pub fn get_clinic_medicine(
        &self,
        owner_id: &str,
        id: &str,
    ) -> DbResult<Option<ClinicMedicine>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM clinic_medicines WHERE owner_id = ? AND id = ?"),
                [owner_id, id],
                map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a clinic's full inventory, oldest first.
    pub fn list_clinic_medicines(&self, owner_id: &str) -> DbResult<Vec<ClinicMedicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM clinic_medicines WHERE owner_id = ? ORDER BY created_at, id"
        ))?;

        let rows = stmt.query_map([owner_id], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Look up a medicine by its scanned barcode.
    pub fn get_clinic_medicine_by_barcode(
        &self,
        owner_id: &str,
        barcode: &str,
    ) -> DbResult<Option<ClinicMedicine>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM clinic_medicines WHERE owner_id = ? AND barcode = ?"
                ),
                [owner_id, barcode],
                map_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update an existing clinic medicine's editable fields.
    pub fn update_clinic_medicine(
        &self,
        owner_id: &str,
        medicine: &ClinicMedicine,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE clinic_medicines SET
                name = ?3,
                description = ?4,
                stock = ?5,
                price = ?6,
                barcode = ?7,
                updated_at = datetime('now')
            WHERE owner_id = ?1 AND id = ?2
            "#,
            params![
                owner_id,
                medicine.id,
                medicine.name,
                medicine.description,
                medicine.stock,
                medicine.price,
                medicine.barcode,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Adjust stock by a signed delta, clamped at zero. Returns the new
    /// stock level, or None if the medicine does not exist.
    pub fn adjust_clinic_stock(&self, owner_id: &str, id: &str, delta: i64) -> DbResult<Option<u32>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE clinic_medicines SET
                stock = MAX(0, stock + ?3),
                updated_at = datetime('now')
            WHERE owner_id = ?1 AND id = ?2
            "#,
            params![owner_id, id, delta],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let stock = self.conn.query_row(
            "SELECT stock FROM clinic_medicines WHERE owner_id = ? AND id = ?",
            [owner_id, id],
            |row| row.get(0),
        )?;
        Ok(Some(stock))
    }

    /// Delete a clinic medicine.
    pub fn delete_clinic_medicine(&self, owner_id: &str, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM clinic_medicines WHERE owner_id = ? AND id = ?",
            [owner_id, id],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut med = ClinicMedicine::new("Amoxicillin".into(), 12);
        med.price = 8.50;
        med.description = Some("Broad-spectrum antibiotic".into());

        db.insert_clinic_medicine("clinic-1", &med).unwrap();

        let retrieved = db.get_clinic_medicine("clinic-1", &med.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Amoxicillin");
        assert_eq!(retrieved.stock, 12);
        assert_eq!(retrieved.price, 8.50);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = setup_db();

        let first = ClinicMedicine::new("Amoxicillin".into(), 12);
        let second = ClinicMedicine::new("Ibuprofen".into(), 5);
        let third = ClinicMedicine::new("Aspirin".into(), 7);

        db.insert_clinic_medicine("clinic-1", &first).unwrap();
        db.insert_clinic_medicine("clinic-1", &second).unwrap();
        db.insert_clinic_medicine("clinic-1", &third).unwrap();

        let listed = db.list_clinic_medicines("clinic-1").unwrap();
        let ids: Vec<&str> = listed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![&first.id, &second.id, &third.id]);
    }

    #[test]
    fn test_adjust_stock_clamps_at_zero() {
        let db = setup_db();

        let med = ClinicMedicine::new("Amoxicillin".into(), 1);
        db.insert_clinic_medicine("clinic-1", &med).unwrap();

        // Bulk decrement past zero floors at zero
        let stock = db.adjust_clinic_stock("clinic-1", &med.id, -10).unwrap();
        assert_eq!(stock, Some(0));

        // Bulk restock, as the +10 button does
        let stock = db.adjust_clinic_stock("clinic-1", &med.id, 10).unwrap();
        assert_eq!(stock, Some(10));
    }

    #[test]
    fn test_barcode_lookup() {
        let db = setup_db();

        let mut med = ClinicMedicine::new("Amoxicillin".into(), 12);
        med.barcode = Some("5901234123457".into());
        db.insert_clinic_medicine("clinic-1", &med).unwrap();

        let found = db
            .get_clinic_medicine_by_barcode("clinic-1", "5901234123457")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, med.id);
    }

    #[test]
    fn test_update_and_delete() {
        let db = setup_db();

        let mut med = ClinicMedicine::new("Amoxicillin".into(), 12);
        db.insert_clinic_medicine("clinic-1", &med).unwrap();

        med.price = 9.99;
        assert!(db.update_clinic_medicine("clinic-1", &med).unwrap());

        let retrieved = db.get_clinic_medicine("clinic-1", &med.id).unwrap().unwrap();
        assert_eq!(retrieved.price, 9.99);

        assert!(db.delete_clinic_medicine("clinic-1", &med.id).unwrap());
        assert!(db.get_clinic_medicine("clinic-1", &med.id).unwrap().is_none());
    }

    #[test]
    fn test_owner_partitions_isolated() {
        let db = setup_db();

        let med = ClinicMedicine::new("Amoxicillin".into(), 12);
        db.insert_clinic_medicine("clinic-1", &med).unwrap();

        assert!(db.get_clinic_medicine("clinic-2", &med.id).unwrap().is_none());
        assert!(db.list_clinic_medicines("clinic-2").unwrap().is_empty());
    }
}
