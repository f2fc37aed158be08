//! Labdesk Core Library
//!
//! Local-first data store for a small clinical laboratory: patient registry,
//! test catalog, test reports and invoices, persisted as one document.
//!
//! # Architecture
//!
//! ```text
//!   Front desk (Swift / Kotlin via UniFFI)
//!                   │
//!             LabDeskCore  (Arc<Mutex<LabStore>>)
//!                   │
//!   ┌───────────────▼────────────────┐
//!   │            LabStore            │
//!   │  clone → mutate → persist →    │
//!   │  swap (all-or-nothing)         │
//!   └───────┬───────────────┬────────┘
//!           │               │
//!       derived/         db/ (SQLite)
//!   invoice totals,   lab_document row
//!   payments, ranges  + SHA-256 checksum
//!           │
//!       export/
//!   JSON backup / restore, ledger CSV
//! ```
//!
//! # Core Principle
//!
//! **Every change goes through the store.** A mutation that is rejected, or
//! that cannot be persisted, leaves both memory and disk untouched.
//!
//! # Modules
//!
//! - [`config`]: Store configuration (database path, app name, demo seed)
//! - [`db`]: SQLite persistence of the lab document
//! - [`models`]: Domain types (Patient, LabTest, Report, Invoice, Money)
//! - [`derived`]: Invoice arithmetic, payments and reference ranges
//! - [`store`]: The mutation and query API
//! - [`export`]: JSON backup/restore and the invoice ledger

pub mod config;
pub mod db;
pub mod derived;
pub mod export;
pub mod models;
pub mod store;

mod seed;

// Re-export commonly used types
pub use config::StoreConfig;
pub use db::Database;
pub use export::{ExportBundle, ImportSummary};
pub use models::{
    Invoice, InvoiceLine, InvoiceStatus, LabDocument, LabTest, Money, NewInvoice, NewLabTest,
    NewPatient, NewReport, Patient, PaymentMode, Report, ReportStatus, ResultEntry, Sex, Title,
};
pub use store::{LabStore, LabSummary, Order, OrderRequest, StoreError, StoreResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LabDeskError {
    #[error("Referential integrity: {0}")]
    ReferentialIntegrity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed import: {0}")]
    MalformedImport(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<StoreError> for LabDeskError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::ReferentialIntegrity { .. } => LabDeskError::ReferentialIntegrity(message),
            StoreError::Validation(_) => LabDeskError::Validation(message),
            StoreError::MalformedImport(_) => LabDeskError::MalformedImport(message),
            StoreError::Persistence(_) => LabDeskError::Persistence(message),
            StoreError::NotFound(_) => LabDeskError::NotFound(message),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for LabDeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        LabDeskError::Persistence(format!("Lock poisoned: {}", e))
    }
}

fn money(value: f64, field: &str) -> Result<Money, LabDeskError> {
    Money::from_f64(value)
        .ok_or_else(|| LabDeskError::InvalidInput(format!("{} is not a number: {}", field, value)))
}

fn percentage(value: f64) -> Result<Decimal, LabDeskError> {
    models::number::decimal_from_f64(value)
        .ok_or_else(|| LabDeskError::InvalidInput(format!("discount is not a number: {}", value)))
}

fn parse_enum<T>(value: &str, field: &str, parse: fn(&str) -> Option<T>) -> Result<T, LabDeskError> {
    parse(value).ok_or_else(|| LabDeskError::InvalidInput(format!("unknown {}: {}", field, value)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a file-backed store. A new database starts with demo data.
#[uniffi::export]
pub fn open_lab_store(path: String, app_name: String) -> Result<Arc<LabDeskCore>, LabDeskError> {
    let config = StoreConfig::new(path, app_name)?;
    let store = LabStore::open(&config)?;
    Ok(Arc::new(LabDeskCore {
        store: Arc::new(Mutex::new(store)),
    }))
}

/// Create an empty in-memory store (for testing).
#[uniffi::export]
pub fn open_lab_store_in_memory() -> Result<Arc<LabDeskCore>, LabDeskError> {
    let store = LabStore::open_in_memory()?;
    Ok(Arc::new(LabDeskCore {
        store: Arc::new(Mutex::new(store)),
    }))
}

/// Whether a result value falls outside its reference range text.
#[uniffi::export]
pub fn is_result_abnormal(reference_range: String, value: String) -> bool {
    derived::is_abnormal(&reference_range, &value)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store handle for FFI.
#[derive(uniffi::Object)]
pub struct LabDeskCore {
    store: Arc<Mutex<LabStore>>,
}

#[uniffi::export]
impl LabDeskCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient; id and slip number are assigned by the store.
    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, LabDeskError> {
        let mut store = self.store.lock()?;
        let patient = store.add_patient(patient.try_into()?)?;
        Ok(patient.into())
    }

    pub fn update_patient(&self, patient: FfiPatient) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.update_patient(patient.try_into()?)?)
    }

    /// Delete a patient with no reports or invoices.
    pub fn delete_patient(&self, id: String) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_patient(&id)?)
    }

    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.document().patient(&id).cloned().map(Into::into))
    }

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.patients().iter().cloned().map(Into::into).collect())
    }

    /// Search patients by name, mobile or slip number.
    pub fn search_patients(&self, query: String, limit: u32) -> Result<Vec<FfiPatient>, LabDeskError> {
        let store = self.store.lock()?;
        let patients = store.search_patients(&query, limit as usize);
        Ok(patients.into_iter().cloned().map(Into::into).collect())
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    pub fn add_test(&self, test: FfiNewLabTest) -> Result<FfiLabTest, LabDeskError> {
        let mut store = self.store.lock()?;
        let test = store.add_test(test.try_into()?)?;
        Ok(test.into())
    }

    /// Update a catalog entry. Existing invoices keep the price they were billed at.
    pub fn update_test(&self, test: FfiLabTest) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.update_test(test.try_into()?)?)
    }

    /// Delete a test no report or invoice refers to.
    pub fn delete_test(&self, id: String) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_test(&id)?)
    }

    pub fn list_tests(&self) -> Result<Vec<FfiLabTest>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.tests().iter().cloned().map(Into::into).collect())
    }

    pub fn search_tests(&self, query: String, limit: u32) -> Result<Vec<FfiLabTest>, LabDeskError> {
        let store = self.store.lock()?;
        let tests = store.search_tests(&query, limit as usize);
        Ok(tests.into_iter().cloned().map(Into::into).collect())
    }

    pub fn list_categories(&self) -> Result<Vec<String>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.categories())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Add a pending report dated today.
    pub fn add_report(&self, patient_id: String, test_id: String) -> Result<FfiReport, LabDeskError> {
        let mut store = self.store.lock()?;
        let report = store.add_report(NewReport::pending(patient_id, test_id))?;
        Ok(report.into())
    }

    pub fn update_report(&self, report: FfiReport) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.update_report(report.try_into()?)?)
    }

    pub fn delete_report(&self, id: String) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_report(&id)?)
    }

    /// Record results and mark the report completed.
    pub fn enter_results(
        &self,
        report_id: String,
        results: Vec<FfiResultEntry>,
    ) -> Result<FfiReport, LabDeskError> {
        let mut store = self.store.lock()?;
        let results = results.into_iter().map(Into::into).collect();
        let report = store.enter_results(&report_id, results)?;
        Ok(report.into())
    }

    pub fn list_reports(&self) -> Result<Vec<FfiReport>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.reports().iter().cloned().map(Into::into).collect())
    }

    pub fn reports_for_patient(&self, patient_id: String) -> Result<Vec<FfiReport>, LabDeskError> {
        let store = self.store.lock()?;
        let reports = store.reports_for_patient(&patient_id);
        Ok(reports.into_iter().cloned().map(Into::into).collect())
    }

    pub fn pending_reports(&self) -> Result<Vec<FfiReport>, LabDeskError> {
        let store = self.store.lock()?;
        let reports = store.pending_reports();
        Ok(reports.into_iter().cloned().map(Into::into).collect())
    }

    // =========================================================================
    // Invoice Operations
    // =========================================================================

    /// Store an invoice as given. The `id` field is ignored; a new one is assigned.
    pub fn add_invoice(&self, invoice: FfiInvoice) -> Result<FfiInvoice, LabDeskError> {
        let mut store = self.store.lock()?;
        let invoice: Invoice = invoice.try_into()?;
        let invoice = store.add_invoice(NewInvoice::from(invoice))?;
        Ok(invoice.into())
    }

    pub fn update_invoice(&self, invoice: FfiInvoice) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.update_invoice(invoice.try_into()?)?)
    }

    pub fn delete_invoice(&self, id: String) -> Result<bool, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_invoice(&id)?)
    }

    /// Order tests for a patient: one pending report per test plus one invoice.
    pub fn order_tests(&self, request: FfiOrderRequest) -> Result<FfiOrder, LabDeskError> {
        let mut store = self.store.lock()?;
        let order = store.order_tests(request.try_into()?)?;
        Ok(order.into())
    }

    /// Add `amount` to what has been paid on an invoice.
    pub fn record_payment(&self, invoice_id: String, amount: f64) -> Result<FfiInvoice, LabDeskError> {
        let mut store = self.store.lock()?;
        let invoice = store.record_payment(&invoice_id, money(amount, "amount")?)?;
        Ok(invoice.into())
    }

    pub fn list_invoices(&self) -> Result<Vec<FfiInvoice>, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.invoices().iter().cloned().map(Into::into).collect())
    }

    pub fn invoices_for_patient(&self, patient_id: String) -> Result<Vec<FfiInvoice>, LabDeskError> {
        let store = self.store.lock()?;
        let invoices = store.invoices_for_patient(&patient_id);
        Ok(invoices.into_iter().cloned().map(Into::into).collect())
    }

    // =========================================================================
    // Summary and Export Operations
    // =========================================================================

    pub fn summary(&self) -> Result<FfiSummary, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.summary().into())
    }

    /// Export the whole store as pretty-printed JSON with a suggested file name.
    pub fn export_data(&self) -> Result<FfiExport, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.export_data()?.into())
    }

    /// Replace the whole store with an export. Nothing changes on rejection.
    pub fn import_data(&self, json: String) -> Result<FfiImportSummary, LabDeskError> {
        let mut store = self.store.lock()?;
        Ok(store.import_data(&json)?.into())
    }

    /// Export the invoice ledger as CSV.
    pub fn export_ledger_csv(&self) -> Result<String, LabDeskError> {
        let store = self.store.lock()?;
        Ok(store.invoice_ledger_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub title: String,
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub age: u32,
    pub sex: String,
    pub address: String,
    pub reg_date: String,
    pub slip_no: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            title: patient.title.as_str().to_string(),
            full_name: patient.full_name,
            mobile: patient.mobile,
            email: patient.email,
            age: patient.age,
            sex: patient.sex.as_str().to_string(),
            address: patient.address,
            reg_date: patient.reg_date,
            slip_no: patient.slip_no,
        }
    }
}

impl TryFrom<FfiPatient> for Patient {
    type Error = LabDeskError;

    fn try_from(patient: FfiPatient) -> Result<Self, Self::Error> {
        Ok(Patient {
            id: patient.id,
            title: Title::parse_lenient(&patient.title),
            full_name: patient.full_name,
            mobile: patient.mobile,
            email: patient.email,
            age: patient.age,
            sex: Sex::parse_lenient(&patient.sex),
            address: patient.address,
            reg_date: patient.reg_date,
            slip_no: patient.slip_no,
        })
    }
}

/// FFI-safe registration form. A missing `reg_date` means today.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub title: String,
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub age: u32,
    pub sex: String,
    pub address: String,
    pub reg_date: Option<String>,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = LabDeskError;

    fn try_from(patient: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            title: parse_enum(&patient.title, "title", Title::from_str)?,
            full_name: patient.full_name,
            mobile: patient.mobile,
            email: patient.email.filter(|e| !e.trim().is_empty()),
            age: patient.age,
            sex: parse_enum(&patient.sex, "sex", Sex::from_str)?,
            address: patient.address,
            reg_date: patient.reg_date.unwrap_or_else(models::today),
        })
    }
}

/// FFI-safe catalog test.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabTest {
    pub id: String,
    pub name: String,
    pub category: String,
    pub parameters: u32,
    pub price: f64,
    pub code: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
}

impl From<LabTest> for FfiLabTest {
    fn from(test: LabTest) -> Self {
        Self {
            id: test.id,
            name: test.name,
            category: test.category,
            parameters: test.parameters,
            price: test.price.to_f64(),
            code: test.code,
            description: test.description,
            instructions: test.instructions,
        }
    }
}

impl TryFrom<FfiLabTest> for LabTest {
    type Error = LabDeskError;

    fn try_from(test: FfiLabTest) -> Result<Self, Self::Error> {
        Ok(LabTest {
            id: test.id,
            name: test.name,
            category: test.category,
            parameters: test.parameters,
            price: money(test.price, "price")?,
            code: test.code,
            description: test.description,
            instructions: test.instructions,
        })
    }
}

/// FFI-safe new catalog entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewLabTest {
    pub name: String,
    pub category: String,
    pub parameters: u32,
    pub price: f64,
    pub code: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
}

impl TryFrom<FfiNewLabTest> for NewLabTest {
    type Error = LabDeskError;

    fn try_from(test: FfiNewLabTest) -> Result<Self, Self::Error> {
        Ok(NewLabTest {
            name: test.name,
            category: test.category,
            parameters: test.parameters,
            price: money(test.price, "price")?,
            code: test.code,
            description: test.description,
            instructions: test.instructions,
        })
    }
}

/// FFI-safe result line. `abnormal` is computed and ignored on input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiResultEntry {
    pub parameter: String,
    pub value: String,
    pub reference_range: String,
    pub unit: String,
    pub abnormal: bool,
}

impl From<ResultEntry> for FfiResultEntry {
    fn from(entry: ResultEntry) -> Self {
        let abnormal = entry.is_abnormal();
        Self {
            parameter: entry.parameter,
            value: entry.value,
            reference_range: entry.reference_range,
            unit: entry.unit,
            abnormal,
        }
    }
}

impl From<FfiResultEntry> for ResultEntry {
    fn from(entry: FfiResultEntry) -> Self {
        ResultEntry {
            parameter: entry.parameter,
            value: entry.value,
            reference_range: entry.reference_range,
            unit: entry.unit,
        }
    }
}

/// FFI-safe report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub id: String,
    pub test_id: String,
    pub patient_id: String,
    pub date: String,
    pub status: String,
    pub results: Option<Vec<FfiResultEntry>>,
}

impl From<Report> for FfiReport {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            test_id: report.test_id,
            patient_id: report.patient_id,
            date: report.date,
            status: report.status.as_str().to_string(),
            results: report
                .results
                .map(|results| results.into_iter().map(Into::into).collect()),
        }
    }
}

impl TryFrom<FfiReport> for Report {
    type Error = LabDeskError;

    fn try_from(report: FfiReport) -> Result<Self, Self::Error> {
        Ok(Report {
            id: report.id,
            test_id: report.test_id,
            patient_id: report.patient_id,
            date: report.date,
            status: ReportStatus::parse_lenient(&report.status),
            results: report
                .results
                .map(|results| results.into_iter().map(Into::into).collect()),
        })
    }
}

/// FFI-safe invoice line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInvoiceLine {
    pub test_id: String,
    pub price: f64,
}

/// FFI-safe invoice.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInvoice {
    pub id: String,
    pub patient_id: String,
    pub tests: Vec<FfiInvoiceLine>,
    pub total_amount: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub net_amount: f64,
    pub payment_mode: String,
    pub amount_paid: f64,
    pub balance_amount: f64,
    pub date: String,
    pub status: String,
    pub remarks: Option<String>,
}

impl From<Invoice> for FfiInvoice {
    fn from(invoice: Invoice) -> Self {
        use rust_decimal::prelude::ToPrimitive;

        Self {
            id: invoice.id,
            patient_id: invoice.patient_id,
            tests: invoice
                .tests
                .into_iter()
                .map(|line| FfiInvoiceLine {
                    test_id: line.test_id,
                    price: line.price.to_f64(),
                })
                .collect(),
            total_amount: invoice.total_amount.to_f64(),
            discount_percentage: invoice.discount_percentage.to_f64().unwrap_or_default(),
            discount_amount: invoice.discount_amount.to_f64(),
            net_amount: invoice.net_amount.to_f64(),
            payment_mode: invoice.payment_mode.as_str().to_string(),
            amount_paid: invoice.amount_paid.to_f64(),
            balance_amount: invoice.balance_amount.to_f64(),
            date: invoice.date,
            status: invoice.status.as_str().to_string(),
            remarks: invoice.remarks,
        }
    }
}

impl TryFrom<FfiInvoice> for Invoice {
    type Error = LabDeskError;

    fn try_from(invoice: FfiInvoice) -> Result<Self, Self::Error> {
        let tests = invoice
            .tests
            .into_iter()
            .map(|line| {
                Ok(InvoiceLine {
                    price: money(line.price, "price")?,
                    test_id: line.test_id,
                })
            })
            .collect::<Result<Vec<_>, LabDeskError>>()?;

        Ok(Invoice {
            id: invoice.id,
            patient_id: invoice.patient_id,
            tests,
            total_amount: money(invoice.total_amount, "total_amount")?,
            discount_percentage: percentage(invoice.discount_percentage)?,
            discount_amount: money(invoice.discount_amount, "discount_amount")?,
            net_amount: money(invoice.net_amount, "net_amount")?,
            payment_mode: PaymentMode::parse_lenient(&invoice.payment_mode),
            amount_paid: money(invoice.amount_paid, "amount_paid")?,
            balance_amount: money(invoice.balance_amount, "balance_amount")?,
            date: invoice.date,
            status: InvoiceStatus::parse_lenient(&invoice.status),
            remarks: invoice.remarks,
        })
    }
}

/// FFI-safe test order. A missing `date` means today.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOrderRequest {
    pub patient_id: String,
    pub test_ids: Vec<String>,
    pub discount_percentage: f64,
    pub payment_mode: String,
    pub amount_paid: f64,
    pub remarks: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<FfiOrderRequest> for OrderRequest {
    type Error = LabDeskError;

    fn try_from(request: FfiOrderRequest) -> Result<Self, Self::Error> {
        let mut order = OrderRequest::new(request.patient_id, request.test_ids);
        order.discount_percentage = percentage(request.discount_percentage)?;
        order.payment_mode = parse_enum(&request.payment_mode, "payment mode", PaymentMode::from_str)?;
        order.amount_paid = money(request.amount_paid, "amount_paid")?;
        order.remarks = request.remarks;
        if let Some(date) = request.date {
            order.date = date;
        }
        Ok(order)
    }
}

/// FFI-safe order result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOrder {
    pub invoice: FfiInvoice,
    pub reports: Vec<FfiReport>,
}

impl From<Order> for FfiOrder {
    fn from(order: Order) -> Self {
        Self {
            invoice: order.invoice.into(),
            reports: order.reports.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe dashboard figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSummary {
    pub patient_count: u32,
    pub test_count: u32,
    pub pending_reports: u32,
    pub completed_reports: u32,
    pub pending_invoices: u32,
    pub paid_invoices: u32,
    pub total_billed: f64,
    pub total_collected: f64,
    pub outstanding: f64,
}

impl From<LabSummary> for FfiSummary {
    fn from(summary: LabSummary) -> Self {
        Self {
            patient_count: summary.patient_count as u32,
            test_count: summary.test_count as u32,
            pending_reports: summary.pending_reports as u32,
            completed_reports: summary.completed_reports as u32,
            pending_invoices: summary.pending_invoices as u32,
            paid_invoices: summary.paid_invoices as u32,
            total_billed: summary.total_billed.to_f64(),
            total_collected: summary.total_collected.to_f64(),
            outstanding: summary.outstanding.to_f64(),
        }
    }
}

/// FFI-safe export.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExport {
    pub file_name: String,
    pub contents: String,
}

impl From<ExportBundle> for FfiExport {
    fn from(bundle: ExportBundle) -> Self {
        Self {
            file_name: bundle.file_name,
            contents: bundle.contents,
        }
    }
}

/// FFI-safe import counts.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiImportSummary {
    pub patients: u32,
    pub tests: u32,
    pub reports: u32,
    pub invoices: u32,
}

impl From<ImportSummary> for FfiImportSummary {
    fn from(summary: ImportSummary) -> Self {
        Self {
            patients: summary.patients as u32,
            tests: summary.tests as u32,
            reports: summary.reports as u32,
            invoices: summary.invoices as u32,
        }
    }
}
