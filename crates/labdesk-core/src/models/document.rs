//! The aggregate document holding every table.

use serde::{Deserialize, Serialize};

use super::{Invoice, LabTest, Patient, Report};

/// The four entity tables, in insertion order.
///
/// This is also the persisted and import/export document shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabDocument {
    pub patients: Vec<Patient>,
    pub tests: Vec<LabTest>,
    pub reports: Vec<Report>,
    pub invoices: Vec<Invoice>,
}

/// Top-level keys an imported document must carry.
pub const COLLECTION_KEYS: [&str; 4] = ["patients", "tests", "reports", "invoices"];

impl LabDocument {
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn test(&self, id: &str) -> Option<&LabTest> {
        self.tests.iter().find(|t| t.id == id)
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    pub fn reports_referencing_patient(&self, patient_id: &str) -> usize {
        self.reports
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .count()
    }

    pub fn invoices_referencing_patient(&self, patient_id: &str) -> usize {
        self.invoices
            .iter()
            .filter(|i| i.patient_id == patient_id)
            .count()
    }

    pub fn reports_referencing_test(&self, test_id: &str) -> usize {
        self.reports.iter().filter(|r| r.test_id == test_id).count()
    }

    pub fn invoices_referencing_test(&self, test_id: &str) -> usize {
        self.invoices.iter().filter(|i| i.bills_test(test_id)).count()
    }

    /// Record count per table: (patients, tests, reports, invoices).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.patients.len(),
            self.tests.len(),
            self.reports.len(),
            self.invoices.len(),
        )
    }

    /// Every record id in the document, across all tables.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.patients
            .iter()
            .map(|p| p.id.as_str())
            .chain(self.tests.iter().map(|t| t.id.as_str()))
            .chain(self.reports.iter().map(|r| r.id.as_str()))
            .chain(self.invoices.iter().map(|i| i.id.as_str()))
    }
}
