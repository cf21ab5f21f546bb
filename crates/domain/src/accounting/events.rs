//! Account domain events.

use common::AggregateId;
use serde::{Deserialize, Serialize};

use super::Money;

/// Events that can occur on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AccountEvent {
    /// Account was created with a zero balance.
    AccountCreated(AccountCreatedData),

    /// Money was deposited into the account.
    DepositMade(TransactionData),

    /// Money was withdrawn from the account.
    MoneyWithdrawn(TransactionData),
}

/// Data for AccountCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreatedData {
    /// The new account's ID.
    pub account_id: AggregateId,
}

/// Data for deposit and withdrawal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    /// The account the money moved through.
    pub account_id: AggregateId,

    /// The amount moved, always positive.
    pub amount: Money,
}

// Convenience constructors for events
impl AccountEvent {
    /// Creates an AccountCreated event.
    pub fn created(account_id: AggregateId) -> Self {
        AccountEvent::AccountCreated(AccountCreatedData { account_id })
    }

    /// Creates a DepositMade event.
    pub fn deposit_made(account_id: AggregateId, amount: Money) -> Self {
        AccountEvent::DepositMade(TransactionData { account_id, amount })
    }

    /// Creates a MoneyWithdrawn event.
    pub fn money_withdrawn(account_id: AggregateId, amount: Money) -> Self {
        AccountEvent::MoneyWithdrawn(TransactionData { account_id, amount })
    }
}
