//! Greedy two-pointer debt settlement.
//!
//! Balances are sorted from the largest debtor to the largest creditor and
//! the two ends are matched until the cursors meet, so `n` non-zero balances
//! produce at most `n - 1` transfers. The engine trusts its input: balances
//! that do not sum to zero still terminate, with the final transfer absorbing
//! the difference. Use [`crate::core::aggregation::validate_scope`] when the
//! input is not known to be well formed.

use crate::core::models::{Balance, Transfer, UserId};
use log::debug;
use rust_decimal::Decimal;

/// What to do with the zero-amount transfer produced when a debtor and a
/// creditor are exhausted by the same step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroTransferPolicy {
    /// Keep it, so output matches the plain two-pointer sweep.
    #[default]
    Emit,
    /// Drop it from the output. Cursor movement is unchanged.
    Skip,
}

/// Computes transfers settling every balance, keeping zero-amount transfers.
pub fn settle(balances: &[Balance]) -> Vec<Transfer> {
    settle_with(balances, ZeroTransferPolicy::Emit)
}

pub fn settle_with(balances: &[Balance], policy: ZeroTransferPolicy) -> Vec<Transfer> {
    let mut dues: Vec<(&UserId, Decimal)> = balances
        .iter()
        .filter(|b| !b.net.is_zero())
        .map(|b| (&b.user_id, b.net))
        .collect();

    // `sort_by` is stable, equal nets keep their input order.
    dues.sort_by(|a, b| a.1.cmp(&b.1));
    debug!("Settling {} non-zero balances", dues.len());

    let mut transfers = Vec::new();
    if dues.len() < 2 {
        return transfers;
    }

    let mut start = 0;
    let mut end = dues.len() - 1;
    while start < end {
        let amount = dues[start].1.abs().min(dues[end].1.abs());

        if !(amount.is_zero() && policy == ZeroTransferPolicy::Skip) {
            transfers.push(Transfer {
                from_user: dues[start].0.clone(),
                to_user: dues[end].0.clone(),
                amount,
            });
        }

        dues[start].1 += amount;
        dues[end].1 -= amount;

        // Debtor first: when both reach zero only `start` moves.
        if dues[start].1.is_zero() {
            start += 1;
        } else {
            end -= 1;
        }
    }

    debug!("Settlement produced {} transfers", transfers.len());
    transfers
}
