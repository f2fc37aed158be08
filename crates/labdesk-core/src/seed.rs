//! Demonstration dataset for a first run with no stored document.

use rust_decimal::Decimal;

use crate::derived::{AmountOverflow, InvoiceTotals, Settlement};
use crate::models::{
    Invoice, InvoiceLine, LabDocument, LabTest, Money, Patient, PaymentMode, Report, ReportStatus,
    ResultEntry, Sex, Title,
};

const DEMO_DATE: &str = "2024-01-15";

fn patient(id: &str, slip: usize, title: Title, name: &str, age: u32, sex: Sex, mobile: &str) -> Patient {
    Patient {
        id: id.to_string(),
        title,
        full_name: name.to_string(),
        mobile: mobile.to_string(),
        email: None,
        age,
        sex,
        address: "Main Road, Bengaluru".to_string(),
        reg_date: DEMO_DATE.to_string(),
        slip_no: crate::store::slip_number(slip),
    }
}

fn test(id: &str, name: &str, category: &str, code: &str, parameters: u32, price_minor: i64) -> LabTest {
    LabTest {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        parameters,
        price: Money::from_minor(price_minor),
        code: code.to_string(),
        description: None,
        instructions: None,
    }
}

fn invoice(
    id: &str,
    patient_id: &str,
    tests: &[&LabTest],
    discount_percentage: Decimal,
    paid: Money,
    payment_mode: PaymentMode,
) -> Result<Invoice, AmountOverflow> {
    let lines: Vec<InvoiceLine> = tests
        .iter()
        .map(|t| InvoiceLine {
            test_id: t.id.clone(),
            price: t.price,
        })
        .collect();
    let totals = InvoiceTotals::compute(&lines, discount_percentage)?;
    let settlement = Settlement::compute(totals.net_amount, paid);

    Ok(Invoice {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        tests: lines,
        total_amount: totals.total_amount,
        discount_percentage,
        discount_amount: totals.discount_amount,
        net_amount: totals.net_amount,
        payment_mode,
        amount_paid: settlement.amount_paid,
        balance_amount: settlement.balance_amount,
        date: DEMO_DATE.to_string(),
        status: settlement.status,
        remarks: None,
    })
}

/// Four patients, five catalog tests, and a few orders in various states.
pub fn demo_document() -> Result<LabDocument, AmountOverflow> {
    let patients = vec![
        patient("p1705276800001", 1, Title::Mr, "Arjun Mehta", 42, Sex::Male, "9845012345"),
        patient("p1705276800002", 2, Title::Mrs, "Priya Sharma", 36, Sex::Female, "9886023456"),
        patient("p1705276800003", 3, Title::Master, "Rohan Iyer", 9, Sex::Male, "9900134567"),
        patient("p1705276800004", 4, Title::Ms, "Fatima Khan", 28, Sex::Female, "9740245678"),
    ];

    let cbc = test("t1705276800011", "Complete Blood Count", "Haematology", "CBC", 18, 35000);
    let mut lipid = test("t1705276800012", "Lipid Profile", "Biochemistry", "LIP", 8, 80000);
    lipid.instructions = Some("12 hours fasting".to_string());
    let fbs = test("t1705276800013", "Blood Sugar Fasting", "Biochemistry", "FBS", 1, 12000);
    let thyroid = test("t1705276800014", "Thyroid Profile", "Endocrinology", "TFT", 3, 60000);
    let mut widal = test("t1705276800015", "Widal Test", "Serology", "WIDAL", 0, 25000);
    widal.description = Some("Slide agglutination for enteric fever".to_string());

    let reports = vec![
        Report {
            id: "r1705276800021".to_string(),
            test_id: cbc.id.clone(),
            patient_id: patients[0].id.clone(),
            date: DEMO_DATE.to_string(),
            status: ReportStatus::Completed,
            results: Some(vec![
                ResultEntry::new("Hemoglobin", "14.2", "13.5-17.5", "g/dL"),
                ResultEntry::new("Total WBC Count", "11800", "4000-11000", "/cumm"),
                ResultEntry::new("Platelet Count", "2.6", "1.5-4.5", "lakh/cumm"),
            ]),
        },
        Report {
            id: "r1705276800022".to_string(),
            test_id: lipid.id.clone(),
            patient_id: patients[0].id.clone(),
            date: DEMO_DATE.to_string(),
            status: ReportStatus::Pending,
            results: None,
        },
        Report {
            id: "r1705276800023".to_string(),
            test_id: fbs.id.clone(),
            patient_id: patients[1].id.clone(),
            date: DEMO_DATE.to_string(),
            status: ReportStatus::Completed,
            results: Some(vec![ResultEntry::new("Glucose, Fasting", "96", "70-110", "mg/dL")]),
        },
    ];

    let invoices = vec![
        invoice(
            "i1705276800031",
            &patients[0].id,
            &[&cbc, &lipid],
            Decimal::new(10, 0),
            Money::from_minor(103500),
            PaymentMode::Upi,
        )?,
        invoice(
            "i1705276800032",
            &patients[1].id,
            &[&fbs],
            Decimal::ZERO,
            Money::ZERO,
            PaymentMode::Cash,
        )?,
    ];

    Ok(LabDocument {
        patients,
        tests: vec![cbc, lipid, fbs, thyroid, widal],
        reports,
        invoices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceStatus;

    #[test]
    fn test_demo_counts() {
        let doc = demo_document().unwrap();
        assert_eq!(doc.patients.len(), 4);
        assert_eq!(doc.tests.len(), 5);
        assert_eq!(doc.reports.len(), 3);
        assert_eq!(doc.invoices.len(), 2);
    }

    #[test]
    fn test_demo_references_resolve() {
        let doc = demo_document().unwrap();
        for report in &doc.reports {
            assert!(doc.patient(&report.patient_id).is_some());
            assert!(doc.test(&report.test_id).is_some());
        }
        for invoice in &doc.invoices {
            assert!(doc.patient(&invoice.patient_id).is_some());
            assert!(invoice.tests.iter().all(|l| doc.test(&l.test_id).is_some()));
        }
    }

    #[test]
    fn test_demo_invoices_consistent() {
        let doc = demo_document().unwrap();
        let paid = &doc.invoices[0];
        assert_eq!(paid.total_amount, Money::from_minor(115000));
        assert_eq!(paid.net_amount, Money::from_minor(103500));
        assert_eq!(paid.status, InvoiceStatus::Paid);

        let pending = &doc.invoices[1];
        assert_eq!(pending.balance_amount, Money::from_minor(12000));
        assert_eq!(pending.status, InvoiceStatus::Pending);
    }
}
