use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, UserId};
use async_trait::async_trait;

/// Where groups and expenses live. Implementations return expenses in the
/// order they were recorded.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, LedgerError>;
    async fn group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError>;
    async fn user_expenses(&self, user_id: &UserId) -> Result<Vec<Expense>, LedgerError>;
}

pub mod in_memory;
