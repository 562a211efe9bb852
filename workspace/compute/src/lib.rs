//! Credit card billing cycles and debt reconciliation for a household.
//!
//! The entry points are [`get_summary`] and [`get_card_movements`]; the other
//! modules hold the pieces they are built from.

pub mod balance;
pub mod billing_cycle;
pub mod error;
pub mod ledger;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use billing_cycle::{BillingCycle, LedgerWindow, calendar_month_window, compute_cycle};
pub use error::{ComputeError, Result};
pub use summary::{SummaryFilter, get_card_movements, get_summary};
