//! Domain models for the lab data store.

mod catalog;
mod document;
mod invoice;
pub mod money;
pub mod number;
mod patient;
mod report;

pub use catalog::*;
pub use document::*;
pub use invoice::*;
pub use money::Money;
pub use patient::*;
pub use report::*;

/// Today's date as `YYYY-MM-DD` (UTC).
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
