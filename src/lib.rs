pub mod commands;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::engine::{ZeroTransferPolicy, settle, settle_with};
pub use crate::core::errors::LedgerError;
pub use crate::core::models::{Balance, Transfer, UserId};
pub use crate::core::services::SettlementService;
pub use crate::infrastructure::ledger::in_memory::InMemoryLedger;

#[cfg(test)]
mod tests;
