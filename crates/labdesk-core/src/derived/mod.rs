//! Pure computations over store data: invoice arithmetic and result flags.

mod billing;
mod ranges;

pub use billing::*;
pub use ranges::*;
