use crate::core::aggregation::{self, CounterpartyMap};
use crate::core::engine::{self, ZeroTransferPolicy};
use crate::core::errors::LedgerError;
use crate::core::money;
use crate::core::models::{
    CounterpartyBalance, Expense, ExpenseShare, Group, GroupSettlement, GroupTransfer, Transfer, UserId,
};
use crate::infrastructure::ledger::LedgerStorage;
use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Runs the settlement engine over the three ledger scopes: a single expense,
/// a group, and one user's view across every expense they take part in.
pub struct SettlementService<S: LedgerStorage> {
    storage: S,
    zero_transfers: ZeroTransferPolicy,
}

impl<S: LedgerStorage> SettlementService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, ZeroTransferPolicy::default())
    }

    pub fn with_policy(storage: S, zero_transfers: ZeroTransferPolicy) -> Self {
        info!("Initializing SettlementService ({:?} zero transfers)", zero_transfers);
        SettlementService {
            storage,
            zero_transfers,
        }
    }

    pub fn zero_transfer_policy(&self) -> ZeroTransferPolicy {
        self.zero_transfers
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::invalid_input(
                field,
                &format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(LedgerError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_shares(&self, shares: &[ExpenseShare]) -> Result<(), LedgerError> {
        if shares.is_empty() {
            return Err(LedgerError::invalid_input(
                "shares",
                "Invalid shares",
                "An expense needs at least one share",
            ));
        }

        let mut seen = HashSet::new();
        for share in shares {
            if share.amount_owed.is_sign_negative() || share.amount_lent.is_sign_negative() {
                warn!("Negative amount in share of user {}", share.user_id);
                return Err(LedgerError::invalid_input(
                    "shares",
                    "Invalid Amount",
                    format!("Amounts for user {} cannot be negative", share.user_id),
                ));
            }
            if !seen.insert(&share.user_id) {
                warn!("User {} has more than one share", share.user_id);
                return Err(LedgerError::DuplicateUser(share.user_id.to_string()));
            }
        }

        aggregation::validate_scope(&aggregation::net_balances(shares)?)
    }

    pub async fn add_group(&self, name: String) -> Result<Group, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
        };
        self.storage.save_group(group.clone()).await?;
        info!("Created group {} ({})", group.id, group.name);
        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        self.storage.get_group(group_id).await
    }

    /// Records an expense after checking that what was lent matches what is
    /// owed, so every stored expense is a closed scope.
    pub async fn record_expense(
        &self,
        group_id: Option<&str>,
        description: String,
        shares: Vec<ExpenseShare>,
    ) -> Result<Expense, LedgerError> {
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        if let Some(gid) = group_id {
            self.storage
                .get_group(gid)
                .await?
                .ok_or_else(|| LedgerError::GroupNotFound(gid.to_string()))?;
        }
        self.validate_shares(&shares)?;

        let total_amount = shares
            .iter()
            .try_fold(Decimal::ZERO, |total, s| money::checked_add(total, s.amount_owed))?;
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.map(String::from),
            description,
            total_amount,
            shares,
        };
        self.storage.save_expense(expense.clone()).await?;
        info!(
            "Recorded expense {} for {} across {} users",
            expense.id,
            expense.total_amount,
            expense.shares.len()
        );
        Ok(expense)
    }

    pub async fn settle_expense(&self, expense_id: &str) -> Result<Vec<Transfer>, LedgerError> {
        info!("Settling expense {}", expense_id);
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))?;

        let balances = aggregation::net_balances(&expense.shares)?;
        Ok(engine::settle_with(&balances, self.zero_transfers))
    }

    pub async fn settle_group(&self, group_id: &str) -> Result<GroupSettlement, LedgerError> {
        info!("Settling group {}", group_id);
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;

        let expenses = self.storage.group_expenses(group_id).await?;
        let balances = aggregation::net_balances(expenses.iter().flat_map(|e| e.shares.iter()))?;
        let transfers = engine::settle_with(&balances, self.zero_transfers);
        debug!(
            "Group {} settled with {} transfers over {} expenses",
            group_id,
            transfers.len(),
            expenses.len()
        );

        Ok(GroupSettlement {
            group_id: group_id.to_string(),
            transfers: transfers.iter().map(GroupTransfer::from).collect(),
            generated_at: Utc::now(),
        })
    }

    /// Settles every expense the user takes part in separately and nets the
    /// resulting transfers per counterparty.
    pub async fn user_balances(&self, user_id: &UserId) -> Result<Vec<CounterpartyBalance>, LedgerError> {
        info!("Computing balances for user {}", user_id);
        let expenses = self.storage.user_expenses(user_id).await?;

        let running = expenses.iter().try_fold(CounterpartyMap::new(), |running, expense| {
            let balances = aggregation::net_balances(&expense.shares)?;
            let transfers = engine::settle_with(&balances, self.zero_transfers);
            aggregation::fold_counterparty(running, user_id, &transfers)
        })?;
        debug!("Running counterparty totals for {}: {:?}", user_id, running);

        aggregation::counterparty_balances(&running)
    }
}
