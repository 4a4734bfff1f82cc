//! Pipeline modules
//!
//! - batch: drives resolve -> extract -> write over the configured contracts
//! - export: machine-readable batch report

pub mod batch;
pub mod export;
