//! Test catalog models.

use serde::{Deserialize, Serialize};

use super::number::whole_number;
use super::Money;

/// An orderable, billable lab test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabTest {
    /// `t` + creation millis
    pub id: String,
    pub name: String,
    /// Free-form category; the set of categories is whatever the catalog holds
    pub category: String,
    /// Number of result fields expected, 0 for qualitative (positive/negative) tests
    #[serde(deserialize_with = "whole_number")]
    pub parameters: u32,
    /// Current catalog price. Invoices snapshot this at order time.
    pub price: Money,
    /// Short display code (e.g. "CBC")
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Patient preparation instructions (e.g. "12 hours fasting")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Catalog data without the store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLabTest {
    pub name: String,
    pub category: String,
    pub parameters: u32,
    pub price: Money,
    pub code: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
}

impl NewLabTest {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        code: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            parameters: 0,
            price,
            code: code.into(),
            description: None,
            instructions: None,
        }
    }

    pub(crate) fn into_test(self, id: String) -> LabTest {
        LabTest {
            id,
            name: self.name,
            category: self.category,
            parameters: self.parameters,
            price: self.price,
            code: self.code,
            description: self.description,
            instructions: self.instructions,
        }
    }
}

impl LabTest {
    /// Qualitative tests report a single positive/negative outcome.
    pub fn is_qualitative(&self) -> bool {
        self.parameters == 0
    }
}
