pub mod balance;
pub mod expense;
pub mod group;
pub mod settlement;

pub use balance::{Balance, Transfer, UserId};
pub use expense::{Expense, ExpenseShare, LedgerSnapshot};
pub use group::Group;
pub use settlement::{CounterpartyBalance, GroupSettlement, GroupTransfer};
