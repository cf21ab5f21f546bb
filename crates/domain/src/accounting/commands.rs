//! Account commands.

use common::AggregateId;

use super::Money;

/// Commands accepted by the account aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    /// Create a new account with a zero balance.
    Create {
        /// The ID the new account will live under.
        account_id: AggregateId,
    },

    /// Deposit money into an open account.
    Deposit {
        /// The amount to add, must be positive.
        amount: Money,
    },

    /// Withdraw money from an open account.
    Withdraw {
        /// The amount to take out, must be positive and covered.
        amount: Money,
    },
}

impl AccountCommand {
    /// Creates a Create command.
    pub fn create(account_id: AggregateId) -> Self {
        AccountCommand::Create { account_id }
    }

    /// Creates a Deposit command.
    pub fn deposit(amount: Money) -> Self {
        AccountCommand::Deposit { amount }
    }

    /// Creates a Withdraw command.
    pub fn withdraw(amount: Money) -> Self {
        AccountCommand::Withdraw { amount }
    }
}

impl std::fmt::Display for AccountCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountCommand::Create { account_id } => {
                write!(f, "Create(account_id: {account_id})")
            }
            AccountCommand::Deposit { amount } => write!(f, "Deposit(amount: {amount})"),
            AccountCommand::Withdraw { amount } => write!(f, "Withdraw(amount: {amount})"),
        }
    }
}
