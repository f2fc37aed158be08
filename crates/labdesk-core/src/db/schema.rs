//! SQLite schema definition.

/// Complete database schema for labdesk.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Lab Document (single row, overwritten on every committed mutation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS lab_document (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    payload TEXT NOT NULL,                       -- JSON {patients, tests, reports, invoices}
    checksum TEXT NOT NULL,                      -- SHA-256 of payload, hex
    saved_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Store Metadata
-- ============================================================================

CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

INSERT OR IGNORE INTO store_meta (key, value) VALUES ('last_saved_at', '');
INSERT OR IGNORE INTO store_meta (key, value) VALUES ('last_export_at', '');
INSERT OR IGNORE INTO store_meta (key, value) VALUES ('last_import_at', '');
"#;
