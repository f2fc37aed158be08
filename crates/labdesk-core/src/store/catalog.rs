//! Test catalog mutations.

use tracing::info;

use super::{EntityKind, IdPrefix, LabStore, StoreError, StoreResult};
use crate::models::{LabTest, Money, NewLabTest};

impl LabStore {
    /// Add a catalog test.
    pub fn add_test(&mut self, new: NewLabTest) -> StoreResult<LabTest> {
        let test = self.commit("add_test", |doc, ids| {
            validate_price(&new.price)?;
            let test = new.into_test(ids.next(IdPrefix::Test));
            doc.tests.push(test.clone());
            Ok(test)
        })?;

        info!(test_id = %test.id, code = %test.code, price = %test.price, "Catalog test added");
        Ok(test)
    }

    /// Replace the catalog test with the same id. Existing invoices keep the
    /// price they were billed at. Returns `false` when no such test exists.
    pub fn update_test(&mut self, test: LabTest) -> StoreResult<bool> {
        if self.document.test(&test.id).is_none() {
            return Ok(false);
        }

        let id = test.id.clone();
        self.commit("update_test", |doc, _| {
            validate_price(&test.price)?;
            if let Some(slot) = doc.tests.iter_mut().find(|t| t.id == test.id) {
                *slot = test;
            }
            Ok(())
        })?;

        info!(test_id = %id, "Catalog test updated");
        Ok(true)
    }

    /// Delete a test no report or invoice line refers to.
    pub fn delete_test(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.commit("delete_test", |doc, _| {
            let reports = doc.reports_referencing_test(id);
            let invoices = doc.invoices_referencing_test(id);
            if reports > 0 || invoices > 0 {
                return Err(StoreError::ReferentialIntegrity {
                    entity: EntityKind::Test,
                    id: id.to_string(),
                    reports,
                    invoices,
                });
            }

            let before = doc.tests.len();
            doc.tests.retain(|t| t.id != id);
            Ok(doc.tests.len() < before)
        })?;

        if removed {
            info!(test_id = id, "Catalog test deleted");
        }
        Ok(removed)
    }
}

fn validate_price(price: &Money) -> StoreResult<()> {
    if price.is_negative() {
        return Err(StoreError::Validation(format!(
            "Test price cannot be negative (got {})",
            price
        )));
    }
    Ok(())
}
