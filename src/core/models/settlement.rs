use super::balance::{Transfer, UserId};
use crate::core::money;
use serde::{Deserialize, Serialize};

/// A transfer as returned by the group settlement view, amount rendered with
/// two decimals.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupTransfer {
    pub from_user: UserId,
    pub to_user: UserId,
    pub amount: String,
}

impl From<&Transfer> for GroupTransfer {
    fn from(transfer: &Transfer) -> Self {
        GroupTransfer {
            from_user: transfer.from_user.clone(),
            to_user: transfer.to_user.clone(),
            amount: money::format_fixed(transfer.amount),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupSettlement {
    pub group_id: String,
    pub transfers: Vec<GroupTransfer>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// What one counterparty owes the viewing user (positive) or is owed by them
/// (negative), in whole units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterpartyBalance {
    pub user: UserId,
    pub amount: i64,
}
