//! Invoice ledger as CSV for the accounts desk.

use crate::models::{Invoice, LabDocument};
use crate::store::LabStore;

const LEDGER_HEADER: &str = "invoice_id,date,patient_id,slip_no,patient_name,tests,total_amount,discount_percentage,discount_amount,net_amount,amount_paid,balance_amount,status,payment_mode\n";

fn ledger_row(doc: &LabDocument, invoice: &Invoice) -> String {
    let patient = doc.patient(&invoice.patient_id);
    let slip_no = patient.map(|p| p.slip_no.as_str()).unwrap_or("");
    let name = patient.map(|p| p.display_name()).unwrap_or_default();

    // Test codes where the catalog still has them, raw ids otherwise.
    let tests = invoice
        .tests
        .iter()
        .map(|line| {
            doc.test(&line.test_id)
                .map(|t| t.code.clone())
                .unwrap_or_else(|| line.test_id.clone())
        })
        .collect::<Vec<_>>()
        .join(";");

    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
        escape_csv(&invoice.id),
        escape_csv(&invoice.date),
        escape_csv(&invoice.patient_id),
        escape_csv(slip_no),
        escape_csv(&name),
        escape_csv(&tests),
        invoice.total_amount,
        invoice.discount_percentage,
        invoice.discount_amount,
        invoice.net_amount,
        invoice.amount_paid,
        invoice.balance_amount,
        invoice.status.as_str(),
        invoice.payment_mode.as_str(),
    )
}

/// Render every invoice in `doc` as one CSV row, in table order.
pub fn ledger_csv(doc: &LabDocument) -> String {
    let mut csv = String::from(LEDGER_HEADER);
    for invoice in &doc.invoices {
        csv.push_str(&ledger_row(doc, invoice));
    }
    csv
}

impl LabStore {
    pub fn invoice_ledger_csv(&self) -> String {
        ledger_csv(self.document())
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
