//! Invoice arithmetic.
//!
//! ```text
//! total    = Σ line prices
//! discount = round2(total × pct / 100)
//! net      = round2(total − discount)
//! balance  = net − paid          status = Paid iff balance ≤ 0
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::money::round2;
use crate::models::{Invoice, InvoiceLine, InvoiceStatus, Money};

/// Why a payment was refused. The invoice is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentRejection {
    #[error("Payment amount must be greater than zero (got {0})")]
    NonPositive(Money),

    #[error("Payment of {increment} exceeds outstanding balance of {outstanding}")]
    ExceedsBalance { increment: Money, outstanding: Money },
}

/// Line prices or a discount too large to total.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invoice amounts out of range: {0}")]
pub struct AmountOverflow(pub &'static str);

/// Totals derived from line items and a discount percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub total_amount: Money,
    pub discount_percentage: Decimal,
    pub discount_amount: Money,
    pub net_amount: Money,
}

impl InvoiceTotals {
    pub fn compute(lines: &[InvoiceLine], discount_percentage: Decimal) -> Result<Self, AmountOverflow> {
        let total_amount = Money::checked_sum(lines.iter().map(|line| &line.price))
            .ok_or(AmountOverflow("total of test prices"))?;
        let discount_amount = discount_amount(total_amount, discount_percentage)?;
        Ok(Self {
            total_amount,
            discount_percentage,
            discount_amount,
            net_amount: net_amount(total_amount, discount_amount)?,
        })
    }
}

/// Paid-to-date state of an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub amount_paid: Money,
    pub balance_amount: Money,
    pub status: InvoiceStatus,
}

impl Settlement {
    pub fn compute(net_amount: Money, amount_paid: Money) -> Self {
        let balance_amount = net_amount - amount_paid;
        let status = if balance_amount.is_positive() {
            InvoiceStatus::Pending
        } else {
            InvoiceStatus::Paid
        };
        Self {
            amount_paid,
            balance_amount,
            status,
        }
    }

    /// Write these fields onto an invoice.
    pub fn apply_to(&self, invoice: &mut Invoice) {
        invoice.amount_paid = self.amount_paid;
        invoice.balance_amount = self.balance_amount;
        invoice.status = self.status.clone();
    }
}

pub fn discount_amount(total: Money, percentage: Decimal) -> Result<Money, AmountOverflow> {
    total
        .amount()
        .checked_mul(percentage)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|discount| Money::new(round2(discount)))
        .ok_or(AmountOverflow("discount"))
}

pub fn net_amount(total: Money, discount: Money) -> Result<Money, AmountOverflow> {
    total
        .checked_sub(discount)
        .map(|net| Money::new(net.amount()))
        .ok_or(AmountOverflow("net amount"))
}

/// Apply a partial payment on top of what has already been paid.
///
/// Rejected when the increment is not positive or would take the paid
/// amount past the net amount.
pub fn apply_payment(invoice: &Invoice, increment: Money) -> Result<Settlement, PaymentRejection> {
    if !increment.is_positive() {
        return Err(PaymentRejection::NonPositive(increment));
    }

    let outstanding = || invoice.net_amount - invoice.amount_paid;
    let new_paid = match invoice.amount_paid.checked_add(increment) {
        Some(paid) if paid <= invoice.net_amount => paid,
        _ => {
            return Err(PaymentRejection::ExceedsBalance {
                increment,
                outstanding: outstanding(),
            })
        }
    };

    Ok(Settlement::compute(invoice.net_amount, new_paid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(minor: i64) -> InvoiceLine {
        InvoiceLine {
            test_id: "t1".into(),
            price: Money::from_minor(minor),
        }
    }

    fn invoice_with(net_minor: i64, paid_minor: i64) -> Invoice {
        let mut invoice = Invoice {
            net_amount: Money::from_minor(net_minor),
            ..Default::default()
        };
        Settlement::compute(invoice.net_amount, Money::from_minor(paid_minor)).apply_to(&mut invoice);
        invoice
    }

    #[test]
    fn test_ten_percent_discount() {
        let totals = InvoiceTotals::compute(&[line(10000)], Decimal::new(10, 0)).unwrap();
        assert_eq!(totals.total_amount, Money::from_minor(10000));
        assert_eq!(totals.discount_amount, Money::from_minor(1000));
        assert_eq!(totals.net_amount, Money::from_minor(9000));
    }

    #[test]
    fn test_fractional_discount_rounds() {
        // 333.33 × 12.5% = 41.66625 → 41.67
        let totals = InvoiceTotals::compute(&[line(33333)], Decimal::new(125, 1)).unwrap();
        assert_eq!(totals.discount_amount, Money::from_minor(4167));
        assert_eq!(totals.net_amount, Money::from_minor(29166));
    }

    #[test]
    fn test_multi_line_total() {
        let totals = InvoiceTotals::compute(&[line(35000), line(80000), line(15050)], Decimal::ZERO).unwrap();
        assert_eq!(totals.total_amount, Money::from_minor(130050));
        assert_eq!(totals.net_amount, totals.total_amount);
    }

    #[test]
    fn test_settlement_status() {
        let pending = Settlement::compute(Money::from_minor(50000), Money::from_minor(20000));
        assert_eq!(pending.balance_amount, Money::from_minor(30000));
        assert_eq!(pending.status, InvoiceStatus::Pending);

        let paid = Settlement::compute(Money::from_minor(50000), Money::from_minor(50000));
        assert!(paid.balance_amount.is_zero());
        assert_eq!(paid.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_payment_rejections() {
        let invoice = invoice_with(50000, 20000);

        assert_eq!(
            apply_payment(&invoice, Money::ZERO),
            Err(PaymentRejection::NonPositive(Money::ZERO))
        );
        assert!(matches!(
            apply_payment(&invoice, Money::from_minor(-100)),
            Err(PaymentRejection::NonPositive(_))
        ));
        assert_eq!(
            apply_payment(&invoice, Money::from_minor(30001)),
            Err(PaymentRejection::ExceedsBalance {
                increment: Money::from_minor(30001),
                outstanding: Money::from_minor(30000),
            })
        );
    }

    #[test]
    fn test_oversized_amounts_are_refused() {
        let huge = InvoiceLine {
            test_id: "t1".into(),
            price: Money::from_f64(5e28).unwrap(),
        };
        assert!(InvoiceTotals::compute(&[huge.clone(), huge.clone()], Decimal::ZERO).is_err());
        assert!(InvoiceTotals::compute(&[huge], Decimal::new(50, 0)).is_err());

        let mut invoice = invoice_with(50000, 20000);
        invoice.amount_paid = Money::new(Decimal::MAX);
        assert!(matches!(
            apply_payment(&invoice, Money::new(Decimal::MAX)),
            Err(PaymentRejection::ExceedsBalance { .. })
        ));
    }

    #[test]
    fn test_payment_settles_exactly() {
        let invoice = invoice_with(50000, 20000);
        let settlement = apply_payment(&invoice, Money::from_minor(30000)).unwrap();
        assert_eq!(settlement.amount_paid, Money::from_minor(50000));
        assert!(settlement.balance_amount.is_zero());
        assert_eq!(settlement.status, InvoiceStatus::Paid);
    }

    proptest! {
        #[test]
        fn prop_balance_is_net_minus_paid(
            net in 1i64..10_000_000,
            payments in proptest::collection::vec(-5_000i64..2_000_000, 0..12),
        ) {
            let mut invoice = invoice_with(net, 0);
            for minor in payments {
                let before = invoice.clone();
                match apply_payment(&invoice, Money::from_minor(minor)) {
                    Ok(settlement) => settlement.apply_to(&mut invoice),
                    Err(_) => prop_assert_eq!(&invoice, &before),
                }
                prop_assert!(invoice.amount_paid >= before.amount_paid);
                prop_assert!(invoice.amount_paid <= invoice.net_amount);
                prop_assert_eq!(invoice.balance_amount, invoice.net_amount - invoice.amount_paid);
                prop_assert_eq!(
                    invoice.status == InvoiceStatus::Paid,
                    !invoice.balance_amount.is_positive()
                );
            }
        }

        #[test]
        fn prop_discount_never_exceeds_total(total in 0i64..10_000_000, pct in 0u32..=100) {
            let totals = InvoiceTotals::compute(&[line(total)], Decimal::from(pct)).unwrap();
            prop_assert!(totals.discount_amount <= totals.total_amount);
            prop_assert_eq!(totals.discount_amount + totals.net_amount, totals.total_amount);
        }
    }
}
