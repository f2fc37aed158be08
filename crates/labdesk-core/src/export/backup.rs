//! Whole-store JSON backup and restore.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::db::{META_LAST_EXPORT, META_LAST_IMPORT};
use crate::models::{self, LabDocument, COLLECTION_KEYS};
use crate::store::{LabStore, StoreError, StoreResult};

/// A ready-to-save export: suggested file name plus pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub file_name: String,
    pub contents: String,
}

/// Record counts of an accepted import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub patients: usize,
    pub tests: usize,
    pub reports: usize,
    pub invoices: usize,
}

impl From<&LabDocument> for ImportSummary {
    fn from(doc: &LabDocument) -> Self {
        let (patients, tests, reports, invoices) = doc.counts();
        Self {
            patients,
            tests,
            reports,
            invoices,
        }
    }
}

/// `{app}_export_{date}.json`
pub fn export_file_name(app_name: &str, date: &str) -> String {
    format!("{}_export_{}.json", app_name, date)
}

/// Pretty-printed JSON of the full document.
pub fn export_json(document: &LabDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Parse an import payload.
///
/// The top level must be an object carrying all four collections (empty
/// arrays are fine). Records missing fields take their defaults; a record of
/// the wrong shape rejects the whole payload.
pub fn parse_import(text: &str) -> StoreResult<LabDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::MalformedImport(format!("not valid JSON: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(StoreError::MalformedImport(
            "top level must be an object".into(),
        ));
    };

    let missing: Vec<&str> = COLLECTION_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::MalformedImport(format!(
            "missing collection(s): {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(value).map_err(|e| StoreError::MalformedImport(e.to_string()))
}

impl LabStore {
    /// Serialize the whole store for backup and record the export time.
    pub fn export_data(&self) -> StoreResult<ExportBundle> {
        let contents = export_json(self.document()).map_err(crate::db::DbError::from)?;
        let bundle = ExportBundle {
            file_name: export_file_name(self.app_name(), &models::today()),
            contents,
        };

        if let Err(e) = self
            .database()
            .set_meta(META_LAST_EXPORT, &chrono::Utc::now().to_rfc3339())
        {
            warn!(error = %e, "Failed to record export time");
        }

        info!(file_name = %bundle.file_name, bytes = bundle.contents.len(), "Exported lab data");
        Ok(bundle)
    }

    /// Replace the whole store with an exported document.
    ///
    /// Nothing changes unless the payload parses and the new document is
    /// persisted.
    pub fn import_data(&mut self, text: &str) -> StoreResult<ImportSummary> {
        let document = parse_import(text).inspect_err(|e| {
            warn!(error = %e, "Import rejected");
        })?;
        let summary = ImportSummary::from(&document);

        self.replace_document(document)?;

        if let Err(e) = self
            .database()
            .set_meta(META_LAST_IMPORT, &chrono::Utc::now().to_rfc3339())
        {
            warn!(error = %e, "Failed to record import time");
        }

        info!(
            patients = summary.patients,
            tests = summary.tests,
            reports = summary.reports,
            invoices = summary.invoices,
            "Imported lab data"
        );
        Ok(summary)
    }

    /// RFC 3339 time of the last successful export, if any.
    pub fn last_export_at(&self) -> StoreResult<Option<String>> {
        Ok(self.database().get_meta(META_LAST_EXPORT)?)
    }

    /// RFC 3339 time of the last successful import, if any.
    pub fn last_import_at(&self) -> StoreResult<Option<String>> {
        Ok(self.database().get_meta(META_LAST_IMPORT)?)
    }
}
