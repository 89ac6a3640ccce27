//! What each CLI subcommand prints. File access and argument parsing stay in
//! the binary.

use crate::core::aggregation;
use crate::core::engine::{self, ZeroTransferPolicy};
use crate::core::errors::LedgerError;
use crate::core::models::{Balance, GroupTransfer, Transfer, UserId};
use crate::core::services::SettlementService;
use crate::infrastructure::ledger::LedgerStorage;
use log::info;
use serde::Serialize;

/// `--skip-zero` wins over the configured policy.
pub fn zero_transfer_policy(skip_zero: bool, configured: ZeroTransferPolicy) -> ZeroTransferPolicy {
    if skip_zero { ZeroTransferPolicy::Skip } else { configured }
}

/// Settles a JSON list of balances. With `strict`, the list must hold one
/// entry per user and sum to zero.
pub fn settle_balances(raw: &str, strict: bool, policy: ZeroTransferPolicy) -> Result<String, LedgerError> {
    let balances: Vec<Balance> = serde_json::from_str(raw)
        .map_err(|e| LedgerError::SerializationError(format!("Failed to parse balances: {}", e)))?;
    if strict {
        aggregation::validate_scope(&balances)?;
    }
    let transfers = engine::settle_with(&balances, policy);
    info!("Settled {} balances with {} transfers", balances.len(), transfers.len());
    transfers_json(&transfers)
}

pub async fn settle_expense<S: LedgerStorage>(
    service: &SettlementService<S>,
    expense_id: &str,
) -> Result<String, LedgerError> {
    transfers_json(&service.settle_expense(expense_id).await?)
}

pub async fn settle_group<S: LedgerStorage>(
    service: &SettlementService<S>,
    group_id: &str,
) -> Result<String, LedgerError> {
    to_json(&service.settle_group(group_id).await?)
}

pub async fn user_balances<S: LedgerStorage>(
    service: &SettlementService<S>,
    user_id: &UserId,
) -> Result<String, LedgerError> {
    to_json(&service.user_balances(user_id).await?)
}

fn transfers_json(transfers: &[Transfer]) -> Result<String, LedgerError> {
    to_json(&transfers.iter().map(GroupTransfer::from).collect::<Vec<_>>())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, LedgerError> {
    serde_json::to_string_pretty(value).map_err(|e| LedgerError::SerializationError(e.to_string()))
}
