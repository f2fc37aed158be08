//! Invoice mutations, test ordering and payments.

use rust_decimal::Decimal;
use tracing::info;

use super::{IdPrefix, LabStore, StoreError, StoreResult};
use crate::derived::{apply_payment, InvoiceTotals, Settlement};
use crate::models::{
    Invoice, InvoiceLine, Money, NewInvoice, NewReport, PaymentMode, Report, ReportStatus,
};

/// Tests ordered for a patient, billed on one invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub patient_id: String,
    pub test_ids: Vec<String>,
    pub discount_percentage: Decimal,
    pub payment_mode: PaymentMode,
    /// Paid at the counter when ordering
    pub amount_paid: Money,
    pub remarks: Option<String>,
    pub date: String,
}

impl OrderRequest {
    /// Undiscounted, unpaid cash order dated today.
    pub fn new(patient_id: impl Into<String>, test_ids: Vec<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            test_ids,
            discount_percentage: Decimal::ZERO,
            payment_mode: PaymentMode::Cash,
            amount_paid: Money::ZERO,
            remarks: None,
            date: crate::models::today(),
        }
    }
}

/// What an order created: one invoice and one pending report per test.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub invoice: Invoice,
    pub reports: Vec<Report>,
}

impl LabStore {
    /// Append an invoice exactly as given; totals are the caller's responsibility.
    pub fn add_invoice(&mut self, new: NewInvoice) -> StoreResult<Invoice> {
        let invoice = self.commit("add_invoice", |doc, ids| {
            let invoice = new.into_invoice(ids.next(IdPrefix::Invoice));
            doc.invoices.push(invoice.clone());
            Ok(invoice)
        })?;

        info!(invoice_id = %invoice.id, net = %invoice.net_amount, "Invoice added");
        Ok(invoice)
    }

    /// Replace the invoice with the same id, without recomputing anything.
    /// Returns `false` when no such invoice exists.
    pub fn update_invoice(&mut self, invoice: Invoice) -> StoreResult<bool> {
        if self.document.invoice(&invoice.id).is_none() {
            return Ok(false);
        }

        let id = invoice.id.clone();
        self.commit("update_invoice", |doc, _| {
            if let Some(slot) = doc.invoices.iter_mut().find(|i| i.id == invoice.id) {
                *slot = invoice;
            }
            Ok(())
        })?;

        info!(invoice_id = %id, "Invoice updated");
        Ok(true)
    }

    /// Remove an invoice. Not guarded.
    pub fn delete_invoice(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.commit("delete_invoice", |doc, _| {
            let before = doc.invoices.len();
            doc.invoices.retain(|i| i.id != id);
            Ok(doc.invoices.len() < before)
        })?;

        if removed {
            info!(invoice_id = id, "Invoice deleted");
        }
        Ok(removed)
    }

    /// Add a partial payment to an invoice.
    ///
    /// Rejected (nothing changes) when the increment is not positive or would
    /// take the amount paid past the net amount.
    pub fn record_payment(&mut self, invoice_id: &str, increment: Money) -> StoreResult<Invoice> {
        let invoice = self.commit("record_payment", |doc, _| {
            let invoice = doc
                .invoices
                .iter_mut()
                .find(|i| i.id == invoice_id)
                .ok_or_else(|| StoreError::NotFound(format!("invoice {}", invoice_id)))?;

            apply_payment(invoice, increment)?.apply_to(invoice);
            Ok(invoice.clone())
        })?;

        info!(
            invoice_id = %invoice.id,
            increment = %increment,
            balance = %invoice.balance_amount,
            status = invoice.status.as_str(),
            "Payment recorded"
        );
        Ok(invoice)
    }

    /// Order tests for a patient: snapshot catalog prices onto a new invoice,
    /// derive its totals, and open a pending report per test.
    pub fn order_tests(&mut self, request: OrderRequest) -> StoreResult<Order> {
        let order = self.commit("order_tests", |doc, ids| {
            validate_discount(request.discount_percentage)?;
            if request.test_ids.is_empty() {
                return Err(StoreError::Validation("An order needs at least one test".into()));
            }
            if doc.patient(&request.patient_id).is_none() {
                return Err(StoreError::NotFound(format!("patient {}", request.patient_id)));
            }

            let lines = request
                .test_ids
                .iter()
                .map(|test_id| {
                    doc.test(test_id)
                        .map(|test| InvoiceLine {
                            test_id: test.id.clone(),
                            price: test.price,
                        })
                        .ok_or_else(|| StoreError::NotFound(format!("test {}", test_id)))
                })
                .collect::<StoreResult<Vec<_>>>()?;

            let totals = InvoiceTotals::compute(&lines, request.discount_percentage)?;
            if request.amount_paid < Money::ZERO || request.amount_paid > totals.net_amount {
                return Err(StoreError::Validation(format!(
                    "Amount paid {} must be between 0.00 and the net amount {}",
                    request.amount_paid, totals.net_amount
                )));
            }
            let settlement = Settlement::compute(totals.net_amount, request.amount_paid);

            let reports: Vec<Report> = lines
                .iter()
                .map(|line| {
                    NewReport {
                        test_id: line.test_id.clone(),
                        patient_id: request.patient_id.clone(),
                        date: request.date.clone(),
                        status: ReportStatus::Pending,
                        results: None,
                    }
                    .into_report(ids.next(IdPrefix::Report))
                })
                .collect();

            let invoice = NewInvoice {
                patient_id: request.patient_id,
                tests: lines,
                total_amount: totals.total_amount,
                discount_percentage: totals.discount_percentage,
                discount_amount: totals.discount_amount,
                net_amount: totals.net_amount,
                payment_mode: request.payment_mode,
                amount_paid: settlement.amount_paid,
                balance_amount: settlement.balance_amount,
                date: request.date,
                status: settlement.status,
                remarks: request.remarks,
            }
            .into_invoice(ids.next(IdPrefix::Invoice));

            doc.reports.extend(reports.iter().cloned());
            doc.invoices.push(invoice.clone());
            Ok(Order { invoice, reports })
        })?;

        info!(
            invoice_id = %order.invoice.id,
            patient_id = %order.invoice.patient_id,
            tests = order.reports.len(),
            net = %order.invoice.net_amount,
            "Tests ordered"
        );
        Ok(order)
    }
}

fn validate_discount(percentage: Decimal) -> StoreResult<()> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(StoreError::Validation(format!(
            "Discount must be between 0 and 100 percent (got {})",
            percentage
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, NewLabTest, NewPatient, Sex, Title};

    struct Fixture {
        store: LabStore,
        patient_id: String,
        cbc_id: String,
        lipid_id: String,
    }

    fn fixture() -> Fixture {
        let mut store = LabStore::open_in_memory().unwrap();
        let patient = store
            .add_patient(NewPatient::new(Title::Mrs, "Jane Doe", 34, Sex::Female))
            .unwrap();
        let cbc = store
            .add_test(NewLabTest::new("Complete Blood Count", "Haematology", "CBC", Money::from_minor(35000)))
            .unwrap();
        let lipid = store
            .add_test(NewLabTest::new("Lipid Profile", "Biochemistry", "LIP", Money::from_minor(80000)))
            .unwrap();
        Fixture {
            store,
            patient_id: patient.id,
            cbc_id: cbc.id,
            lipid_id: lipid.id,
        }
    }

    #[test]
    fn test_order_creates_invoice_and_reports() {
        let mut f = fixture();
        let mut request = OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone(), f.lipid_id.clone()]);
        request.discount_percentage = Decimal::new(10, 0);

        let order = f.store.order_tests(request).unwrap();

        assert_eq!(order.reports.len(), 2);
        assert!(order.reports.iter().all(|r| r.status == ReportStatus::Pending));
        assert_eq!(order.invoice.total_amount, Money::from_minor(115000));
        assert_eq!(order.invoice.discount_amount, Money::from_minor(11500));
        assert_eq!(order.invoice.net_amount, Money::from_minor(103500));
        assert_eq!(order.invoice.balance_amount, Money::from_minor(103500));
        assert_eq!(order.invoice.status, InvoiceStatus::Pending);

        let doc = f.store.document();
        assert_eq!(doc.reports.len(), 2);
        assert_eq!(doc.invoices.len(), 1);
    }

    #[test]
    fn test_order_paid_in_full_at_counter() {
        let mut f = fixture();
        let mut request = OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone()]);
        request.amount_paid = Money::from_minor(35000);
        request.payment_mode = PaymentMode::Upi;

        let order = f.store.order_tests(request).unwrap();
        assert!(order.invoice.is_paid());
        assert!(order.invoice.balance_amount.is_zero());
    }

    #[test]
    fn test_order_rejections_leave_state_unchanged() {
        let mut f = fixture();
        let before = f.store.document().clone();

        let empty = OrderRequest::new(&f.patient_id, Vec::new());
        assert!(matches!(f.store.order_tests(empty), Err(StoreError::Validation(_))));

        let unknown_test = OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone(), "t0".into()]);
        assert!(matches!(f.store.order_tests(unknown_test), Err(StoreError::NotFound(_))));

        let unknown_patient = OrderRequest::new("p0", vec![f.cbc_id.clone()]);
        assert!(matches!(f.store.order_tests(unknown_patient), Err(StoreError::NotFound(_))));

        let mut overpaid = OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone()]);
        overpaid.amount_paid = Money::from_minor(35001);
        assert!(matches!(f.store.order_tests(overpaid), Err(StoreError::Validation(_))));

        let mut bad_discount = OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone()]);
        bad_discount.discount_percentage = Decimal::new(101, 0);
        assert!(matches!(f.store.order_tests(bad_discount), Err(StoreError::Validation(_))));

        assert_eq!(f.store.document(), &before);
    }

    #[test]
    fn test_order_too_large_to_total_is_rejected() {
        let mut f = fixture();
        let huge = Money::from_f64(5e28).unwrap();
        let first = f
            .store
            .add_test(NewLabTest::new("Whole Genome", "Genetics", "WGS", huge))
            .unwrap();
        let second = f
            .store
            .add_test(NewLabTest::new("Whole Exome", "Genetics", "WES", huge))
            .unwrap();
        let before = f.store.document().clone();

        let request = OrderRequest::new(&f.patient_id, vec![first.id.clone(), second.id]);
        assert!(matches!(f.store.order_tests(request), Err(StoreError::Validation(_))));
        assert_eq!(f.store.document(), &before);

        // A single oversized line still bills.
        let order = f
            .store
            .order_tests(OrderRequest::new(&f.patient_id, vec![first.id]))
            .unwrap();
        assert_eq!(order.invoice.net_amount, huge);
    }

    #[test]
    fn test_partial_payments() {
        let mut f = fixture();
        let order = f
            .store
            .order_tests(OrderRequest::new(&f.patient_id, vec![f.lipid_id.clone()]))
            .unwrap();
        let id = order.invoice.id;

        let invoice = f.store.record_payment(&id, Money::from_minor(30000)).unwrap();
        assert_eq!(invoice.amount_paid, Money::from_minor(30000));
        assert_eq!(invoice.balance_amount, Money::from_minor(50000));
        assert_eq!(invoice.status, InvoiceStatus::Pending);

        let invoice = f.store.record_payment(&id, Money::from_minor(50000)).unwrap();
        assert!(invoice.balance_amount.is_zero());
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_payment_rejections() {
        let mut f = fixture();
        let order = f
            .store
            .order_tests(OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone()]))
            .unwrap();
        let id = order.invoice.id.clone();

        assert!(matches!(
            f.store.record_payment(&id, Money::ZERO),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            f.store.record_payment(&id, Money::from_minor(35001)),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            f.store.record_payment("i0", Money::from_minor(100)),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(f.store.document().invoice(&id), Some(&order.invoice));
    }

    #[test]
    fn test_raw_update_is_not_recomputed() {
        let mut f = fixture();
        let order = f
            .store
            .order_tests(OrderRequest::new(&f.patient_id, vec![f.cbc_id.clone()]))
            .unwrap();

        let mut edited = order.invoice.clone();
        edited.remarks = Some("Collected at home".into());
        edited.total_amount = Money::from_minor(1);
        assert!(f.store.update_invoice(edited.clone()).unwrap());
        assert_eq!(f.store.document().invoice(&edited.id), Some(&edited));

        assert!(f.store.delete_invoice(&edited.id).unwrap());
        assert!(!f.store.update_invoice(edited).unwrap());
    }
}
