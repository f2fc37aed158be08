//! Lab document persistence.

use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use super::{Database, DbError, DbResult};
use crate::models::LabDocument;

/// Metadata keys kept in `store_meta`.
pub const META_LAST_SAVED: &str = "last_saved_at";
pub const META_LAST_EXPORT: &str = "last_export_at";
pub const META_LAST_IMPORT: &str = "last_import_at";

/// SHA-256 of a payload, hex encoded.
pub fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

impl Database {
    /// Overwrite the stored document with `document`.
    ///
    /// The payload and `last_saved_at` are written in one transaction, so a
    /// failure leaves the previous document on disk.
    pub fn save_document(&mut self, document: &LabDocument) -> DbResult<()> {
        let payload = serde_json::to_string(document)?;
        let digest = checksum(payload.as_bytes());

        let tx = self.transaction()?;
        tx.execute(
            r#"
            INSERT INTO lab_document (id, payload, checksum, saved_at)
            VALUES (1, ?1, ?2, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                checksum = excluded.checksum,
                saved_at = excluded.saved_at
            "#,
            params![payload, digest],
        )?;
        upsert_meta(&tx, META_LAST_SAVED, &chrono::Utc::now().to_rfc3339())?;
        tx.commit()?;
        Ok(())
    }

    /// Load the stored document, verifying its checksum. `None` on first run.
    pub fn load_document(&self) -> DbResult<Option<LabDocument>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT payload, checksum FROM lab_document WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((payload, expected)) = row else {
            return Ok(None);
        };

        let actual = checksum(payload.as_bytes());
        if actual != expected {
            return Err(DbError::ChecksumMismatch { expected, actual });
        }

        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Checksum of the stored document, if any.
    pub fn document_checksum(&self) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT checksum FROM lab_document WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    pub fn set_meta(&self, key: &str, value: &str) -> DbResult<()> {
        upsert_meta(&self.conn, key, value)
    }

    /// Metadata value; empty values read as `None`.
    pub fn get_meta(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

fn upsert_meta(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO store_meta (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_document() -> LabDocument {
        LabDocument {
            patients: vec![Patient {
                id: "p1".into(),
                full_name: "Jane Doe".into(),
                slip_no: "SN0001".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_load_empty() {
        let db = setup_db();
        assert!(db.load_document().unwrap().is_none());
        assert!(db.document_checksum().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let mut db = setup_db();
        let doc = sample_document();

        db.save_document(&doc).unwrap();
        assert_eq!(db.load_document().unwrap(), Some(doc));
        assert!(db.get_meta(META_LAST_SAVED).unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites() {
        let mut db = setup_db();
        db.save_document(&sample_document()).unwrap();
        db.save_document(&LabDocument::default()).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM lab_document", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(db.load_document().unwrap(), Some(LabDocument::default()));
    }

    #[test]
    fn test_tampered_payload_detected() {
        let mut db = setup_db();
        db.save_document(&sample_document()).unwrap();

        db.conn()
            .execute(
                "UPDATE lab_document SET payload = replace(payload, 'Jane', 'John')",
                [],
            )
            .unwrap();

        assert!(matches!(
            db.load_document(),
            Err(DbError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_meta_roundtrip() {
        let db = setup_db();
        assert!(db.get_meta(META_LAST_EXPORT).unwrap().is_none());

        db.set_meta(META_LAST_EXPORT, "2024-05-01T10:00:00Z").unwrap();
        assert_eq!(
            db.get_meta(META_LAST_EXPORT).unwrap(),
            Some("2024-05-01T10:00:00Z".to_string())
        );
    }

    #[test]
    fn test_failed_meta_write_keeps_previous_document() {
        let mut db = setup_db();
        db.save_document(&LabDocument::default()).unwrap();
        db.conn().execute_batch("DROP TABLE store_meta").unwrap();

        assert!(db.save_document(&sample_document()).is_err());
        assert_eq!(db.load_document().unwrap(), Some(LabDocument::default()));
    }
}
