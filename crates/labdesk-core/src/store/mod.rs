//! The lab data store: the only path for state change.
//!
//! Every mutation runs against a working copy of the document, the copy is
//! persisted, and only then does it replace the live document. A rejected or
//! unpersistable mutation leaves the store exactly as it was.

mod catalog;
mod ids;
mod invoices;
mod lookup;
mod patients;
mod reports;
mod summary;

pub use ids::*;
pub use invoices::*;
pub use summary::*;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::db::{Database, DbError};
use crate::derived::{AmountOverflow, PaymentRejection};
use crate::models::LabDocument;
use crate::seed;

/// Record kinds protected by referential-integrity guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Test,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// Store errors. Each variant maps to a distinct user notification.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot delete {entity} {id}: referenced by {reports} report(s) and {invoices} invoice(s)")]
    ReferentialIntegrity {
        entity: EntityKind,
        id: String,
        reports: usize,
        invoices: usize,
    },

    #[error("Rejected: {0}")]
    Validation(String),

    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] DbError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<PaymentRejection> for StoreError {
    fn from(e: PaymentRejection) -> Self {
        StoreError::Validation(e.to_string())
    }
}

impl From<AmountOverflow> for StoreError {
    fn from(e: AmountOverflow) -> Self {
        StoreError::Validation(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Patients, test catalog, reports and invoices, kept durable on every change.
pub struct LabStore {
    db: Database,
    document: LabDocument,
    ids: IdGenerator,
    app_name: String,
}

impl LabStore {
    /// Open the store described by `config`, loading or seeding its document.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let db = match config.database_path() {
            Some(path) => Database::open(path)?,
            None => Database::open_in_memory()?,
        };
        Self::with_database(db, config)
    }

    /// Empty in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Build a store on an already-open database.
    pub fn with_database(mut db: Database, config: &StoreConfig) -> StoreResult<Self> {
        let document = match db.load_document() {
            Ok(Some(document)) => {
                let (patients, tests, reports, invoices) = document.counts();
                info!(patients, tests, reports, invoices, "Loaded lab document");
                document
            }
            Ok(None) => {
                let document = if config.seed_demo_data() {
                    info!("No stored document; seeding demonstration data");
                    seed::demo_document()?
                } else {
                    LabDocument::default()
                };
                db.save_document(&document).inspect_err(|e| {
                    error!(error = %e, "Failed to persist initial lab document");
                })?;
                document
            }
            Err(e) => {
                error!(error = %e, "Failed to load lab document");
                return Err(e.into());
            }
        };

        let mut ids = IdGenerator::new();
        ids.observe(document.all_ids());

        Ok(Self {
            db,
            document,
            ids,
            app_name: config.app_name().to_string(),
        })
    }

    /// Current snapshot of every table.
    pub fn document(&self) -> &LabDocument {
        &self.document
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    /// Apply `mutate` to a working copy, persist it, then make it live.
    fn commit<T>(
        &mut self,
        action: &'static str,
        mutate: impl FnOnce(&mut LabDocument, &mut IdGenerator) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut next = self.document.clone();

        let outcome = match mutate(&mut next, &mut self.ids) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(action, error = %e, "Mutation rejected");
                return Err(e);
            }
        };

        if let Err(e) = self.db.save_document(&next) {
            error!(action, error = %e, "Failed to persist lab document; change discarded");
            return Err(e.into());
        }

        self.document = next;
        debug!(action, "Committed lab document");
        Ok(outcome)
    }

    /// Swap in a whole new document (import), keeping ids ahead of it.
    pub(crate) fn replace_document(&mut self, document: LabDocument) -> StoreResult<()> {
        self.commit("replace_document", |doc, ids| {
            ids.observe(document.all_ids());
            *doc = document;
            Ok(())
        })
    }
}
