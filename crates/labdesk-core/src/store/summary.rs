//! Dashboard figures.

use super::LabStore;
use crate::models::{InvoiceStatus, Money, ReportStatus};

/// Headline counts and money totals across the whole store.
#[derive(Debug, Clone, PartialEq)]
pub struct LabSummary {
    pub patient_count: usize,
    pub test_count: usize,
    pub pending_reports: usize,
    pub completed_reports: usize,
    pub pending_invoices: usize,
    pub paid_invoices: usize,
    /// Σ net amount
    pub total_billed: Money,
    /// Σ amount paid
    pub total_collected: Money,
    /// Σ balance
    pub outstanding: Money,
}

impl LabStore {
    pub fn summary(&self) -> LabSummary {
        let doc = &self.document;
        let count_reports =
            |status: ReportStatus| doc.reports.iter().filter(|r| r.status == status).count();
        let count_invoices =
            |status: InvoiceStatus| doc.invoices.iter().filter(|i| i.status == status).count();

        LabSummary {
            patient_count: doc.patients.len(),
            test_count: doc.tests.len(),
            pending_reports: count_reports(ReportStatus::Pending),
            completed_reports: count_reports(ReportStatus::Completed),
            pending_invoices: count_invoices(InvoiceStatus::Pending),
            paid_invoices: count_invoices(InvoiceStatus::Paid),
            total_billed: doc.invoices.iter().map(|i| i.net_amount).sum(),
            total_collected: doc.invoices.iter().map(|i| i.amount_paid).sum(),
            outstanding: doc.invoices.iter().map(|i| i.balance_amount).sum(),
        }
    }
}
