//! SQLite schema definition.

/// Complete database schema for medtrack.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patient Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS patient_medicines (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,                       -- account whose partition this row belongs to
    name TEXT NOT NULL,
    dosage TEXT,
    frequency TEXT,
    current_stock INTEGER NOT NULL DEFAULT 0 CHECK (current_stock >= 0),
    min_stock INTEGER NOT NULL DEFAULT 5 CHECK (min_stock >= 0),
    barcode TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patient_medicines_owner ON patient_medicines(owner_id);
CREATE INDEX IF NOT EXISTS idx_patient_medicines_barcode ON patient_medicines(barcode);

-- ============================================================================
-- Clinic Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS clinic_medicines (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
    price REAL NOT NULL DEFAULT 0 CHECK (price >= 0),
    barcode TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_clinic_medicines_owner ON clinic_medicines(owner_id);
CREATE INDEX IF NOT EXISTS idx_clinic_medicines_name ON clinic_medicines(name);
CREATE INDEX IF NOT EXISTS idx_clinic_medicines_barcode ON clinic_medicines(barcode);

-- ============================================================================
-- Clinic Info (one profile per clinic account, replaced wholesale)
-- ============================================================================

CREATE TABLE IF NOT EXISTS clinic_info (
    owner_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    phone TEXT NOT NULL,
    latitude REAL,                                -- NULL until location setup
    longitude REAL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
