use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum LedgerError {
    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// A group or expense with this ID already exists
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// The same user appears twice in one balance scope
    #[error("User {0} appears more than once in the scope")]
    DuplicateUser(String),

    /// Net balances in a closed scope do not sum to zero
    #[error("Scope does not balance: nets sum to {0}")]
    ImbalancedScope(Decimal),

    /// Amount cannot be represented in the requested output format
    #[error("Amount {0} is out of range")]
    AmountOutOfRange(Decimal),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LedgerError {
    pub(crate) fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}
