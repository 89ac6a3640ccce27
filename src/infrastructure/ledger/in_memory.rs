use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, LedgerSnapshot, UserId};
use crate::infrastructure::ledger::LedgerStorage;
use async_trait::async_trait;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryLedger {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        InMemoryLedger {
            groups: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Builds a ledger from a snapshot, rejecting duplicate ids and expenses
    /// tagged with a group the snapshot does not define.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let mut groups = HashMap::new();
        for group in snapshot.groups {
            if groups.contains_key(&group.id) {
                return Err(LedgerError::DuplicateId(group.id));
            }
            groups.insert(group.id.clone(), group);
        }

        let mut expense_ids = HashSet::new();
        for expense in &snapshot.expenses {
            if !expense_ids.insert(expense.id.as_str()) {
                return Err(LedgerError::DuplicateId(expense.id.clone()));
            }
            if let Some(group_id) = &expense.group_id {
                if !groups.contains_key(group_id) {
                    return Err(LedgerError::GroupNotFound(group_id.clone()));
                }
            }
        }

        debug!(
            "Loaded snapshot with {} groups and {} expenses",
            groups.len(),
            snapshot.expenses.len()
        );
        Ok(InMemoryLedger {
            groups: Arc::new(RwLock::new(groups)),
            expenses: Arc::new(RwLock::new(snapshot.expenses)),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let snapshot: LedgerSnapshot = serde_json::from_str(json)
            .map_err(|e| LedgerError::SnapshotError(format!("Failed to parse ledger snapshot: {}", e)))?;
        Self::from_snapshot(snapshot)
    }
}

#[async_trait]
impl LedgerStorage for InMemoryLedger {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut expenses = self.expenses.write().await;
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => expenses.push(expense),
        }
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|e| e.id == expense_id).cloned())
    }

    async fn group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .iter()
            .filter(|e| e.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect())
    }

    async fn user_expenses(&self, user_id: &UserId) -> Result<Vec<Expense>, LedgerError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().filter(|e| e.involves(user_id)).cloned().collect())
    }
}
