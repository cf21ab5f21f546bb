//! Account state.

use common::AggregateId;
use serde::{Deserialize, Serialize};

use super::Money;

/// The state of an account, rebuilt by replaying its events.
///
/// State transitions:
/// ```text
/// Uninitialized ──► Open ──► Open ──► ...
/// ```
///
/// An account starts `Uninitialized` and becomes `Open` on creation.
/// Deposits and withdrawals keep it `Open` with an updated balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Account {
    /// No creation event has been applied yet.
    #[default]
    Uninitialized,

    /// The account exists and can take deposits and withdrawals.
    Open {
        /// The account's stream identifier.
        account_id: AggregateId,

        /// Current balance, never negative.
        balance: Money,
    },
}

impl Account {
    /// Returns true if the account has been created.
    pub fn is_open(&self) -> bool {
        matches!(self, Account::Open { .. })
    }

    /// Returns the account ID, if the account is open.
    pub fn account_id(&self) -> Option<AggregateId> {
        match self {
            Account::Uninitialized => None,
            Account::Open { account_id, .. } => Some(*account_id),
        }
    }

    /// Returns the balance, if the account is open.
    pub fn balance(&self) -> Option<Money> {
        match self {
            Account::Uninitialized => None,
            Account::Open { balance, .. } => Some(*balance),
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Account::Uninitialized => write!(f, "Uninitialized"),
            Account::Open {
                account_id,
                balance,
            } => write!(f, "Open(account_id: {account_id}, balance: {balance})"),
        }
    }
}
