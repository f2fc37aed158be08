//! Invoice models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::decimal_number;
use super::Money;

/// How an invoice was paid. Modes this build does not know are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    Cheque,
    Online,
    #[serde(untagged)]
    Unrecognized(String),
}

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Upi => "UPI",
            Self::Cheque => "Cheque",
            Self::Online => "Online",
            Self::Unrecognized(mode) => mode,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Card" => Some(Self::Card),
            "UPI" => Some(Self::Upi),
            "Cheque" => Some(Self::Cheque),
            "Online" => Some(Self::Online),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

/// Derived from the balance: `Paid` iff balance <= 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    #[serde(untagged)]
    Unrecognized(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Unrecognized(status) => status,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

/// A billed test with its price as of order time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceLine {
    pub test_id: String,
    pub price: Money,
}

/// One bill for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    /// `i` + creation millis
    pub id: String,
    pub patient_id: String,
    pub tests: Vec<InvoiceLine>,
    pub total_amount: Money,
    #[serde(with = "decimal_number")]
    pub discount_percentage: Decimal,
    pub discount_amount: Money,
    pub net_amount: Money,
    pub payment_mode: PaymentMode,
    /// Cumulative across payments; never decreases
    pub amount_paid: Money,
    pub balance_amount: Money,
    pub date: String,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Invoice data without the store-assigned id. Stored as given.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub patient_id: String,
    pub tests: Vec<InvoiceLine>,
    pub total_amount: Money,
    pub discount_percentage: Decimal,
    pub discount_amount: Money,
    pub net_amount: Money,
    pub payment_mode: PaymentMode,
    pub amount_paid: Money,
    pub balance_amount: Money,
    pub date: String,
    pub status: InvoiceStatus,
    pub remarks: Option<String>,
}

impl NewInvoice {
    pub(crate) fn into_invoice(self, id: String) -> Invoice {
        Invoice {
            id,
            patient_id: self.patient_id,
            tests: self.tests,
            total_amount: self.total_amount,
            discount_percentage: self.discount_percentage,
            discount_amount: self.discount_amount,
            net_amount: self.net_amount,
            payment_mode: self.payment_mode,
            amount_paid: self.amount_paid,
            balance_amount: self.balance_amount,
            date: self.date,
            status: self.status,
            remarks: self.remarks,
        }
    }
}

impl From<Invoice> for NewInvoice {
    /// Drops the id so the store can assign a fresh one.
    fn from(invoice: Invoice) -> Self {
        NewInvoice {
            patient_id: invoice.patient_id,
            tests: invoice.tests,
            total_amount: invoice.total_amount,
            discount_percentage: invoice.discount_percentage,
            discount_amount: invoice.discount_amount,
            net_amount: invoice.net_amount,
            payment_mode: invoice.payment_mode,
            amount_paid: invoice.amount_paid,
            balance_amount: invoice.balance_amount,
            date: invoice.date,
            status: invoice.status,
            remarks: invoice.remarks,
        }
    }
}

impl Invoice {
    pub fn bills_test(&self, test_id: &str) -> bool {
        self.tests.iter().any(|line| line.test_id == test_id)
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}
