//! Backup, restore and ledger export.

mod backup;
mod ledger;

pub use backup::*;
pub use ledger::*;
