use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque user identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId(id)
    }
}

/// A user's net position within one scope. Positive means the user is owed
/// money, negative means the user owes money.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub user_id: UserId,
    pub net: Decimal,
}

impl Balance {
    pub fn new(user_id: impl Into<UserId>, net: Decimal) -> Self {
        Balance {
            user_id: user_id.into(),
            net,
        }
    }
}

/// `from_user` pays `to_user` the given amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from_user: UserId,
    pub to_user: UserId,
    pub amount: Decimal,
}

impl Transfer {
    pub fn new(from_user: impl Into<UserId>, to_user: impl Into<UserId>, amount: Decimal) -> Self {
        Transfer {
            from_user: from_user.into(),
            to_user: to_user.into(),
            amount,
        }
    }
}
