use super::balance::UserId;
use super::group::Group;
use crate::core::errors::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ledger row: what a single user owes and lent on one expense.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseShare {
    pub user_id: UserId,
    pub amount_owed: Decimal,
    pub amount_lent: Decimal,
}

impl ExpenseShare {
    pub fn new(user_id: impl Into<UserId>, amount_owed: Decimal, amount_lent: Decimal) -> Self {
        ExpenseShare {
            user_id: user_id.into(),
            amount_owed,
            amount_lent,
        }
    }

    /// `amount_lent - amount_owed`.
    pub fn net(&self) -> Result<Decimal, LedgerError> {
        self.amount_lent
            .checked_sub(self.amount_owed)
            .ok_or(LedgerError::AmountOutOfRange(self.amount_owed))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    pub description: String,
    pub total_amount: Decimal,
    pub shares: Vec<ExpenseShare>,
}

impl Expense {
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.shares.iter().any(|s| &s.user_id == user_id)
    }
}

/// Serialized form of a whole ledger, as read by the CLI.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}
