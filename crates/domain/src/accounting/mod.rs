//! Accounting aggregate and related types.

mod commands;
mod decider;
mod events;
mod money;
mod service;
mod state;

pub use commands::AccountCommand;
pub use decider::AccountDecider;
pub use events::{AccountCreatedData, AccountEvent, TransactionData};
pub use money::Money;
pub use service::{AccountResult, AccountService};
pub use state::Account;

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Deposit amount was zero or negative.
    #[error("deposit amount must be positive")]
    DepositNotPositive,

    /// Withdrawal amount was zero or negative.
    #[error("withdrawal amount must be positive")]
    WithdrawalNotPositive,

    /// The withdrawal would take the balance below zero.
    #[error("overdraft not allowed")]
    OverdraftNotAllowed,

    /// The command does not apply to the current state.
    #[error("invalid operation {command} on current state {state}")]
    InvalidOperation {
        /// Rendering of the offending command.
        command: String,
        /// Rendering of the state it hit.
        state: String,
    },
}
