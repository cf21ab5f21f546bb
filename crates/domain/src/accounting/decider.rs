//! Account decision logic.

use crate::decider::{Decider, Decision, accept, reject};

use super::{Account, AccountCommand, AccountError, AccountEvent, Money};

/// Pure decision logic for the account aggregate.
///
/// `decide` validates a command against the current state and emits the
/// events that record it; `apply` folds one event into the state. Neither
/// touches the store, so every rule here is checkable without IO. The
/// balance folds saturate, so replay stays total on any stored history.
pub struct AccountDecider;

impl Decider for AccountDecider {
    type State = Account;
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = AccountError;

    fn initial(&self) -> Account {
        Account::Uninitialized
    }

    fn apply(&self, state: Account, event: AccountEvent) -> Account {
        match (state, event) {
            (Account::Uninitialized, AccountEvent::AccountCreated(data)) => Account::Open {
                account_id: data.account_id,
                balance: Money::zero(),
            },
            (
                Account::Open {
                    account_id,
                    balance,
                },
                AccountEvent::DepositMade(data),
            ) => Account::Open {
                account_id,
                balance: balance.saturating_add(data.amount),
            },
            (
                Account::Open {
                    account_id,
                    balance,
                },
                AccountEvent::MoneyWithdrawn(data),
            ) => Account::Open {
                account_id,
                balance: balance.saturating_sub(data.amount),
            },
            // Any other combination leaves the state as it was.
            (state, _) => state,
        }
    }

    fn decide(
        &self,
        command: AccountCommand,
        state: &Account,
    ) -> Decision<AccountEvent, AccountError> {
        match (state, command) {
            (Account::Uninitialized, AccountCommand::Create { account_id }) => {
                accept(AccountEvent::created(account_id))
            }
            (Account::Open { account_id, .. }, AccountCommand::Deposit { amount }) => {
                if !amount.is_positive() {
                    reject(AccountError::DepositNotPositive)
                } else {
                    accept(AccountEvent::deposit_made(*account_id, amount))
                }
            }
            (
                Account::Open {
                    account_id,
                    balance,
                },
                AccountCommand::Withdraw { amount },
            ) => {
                if !amount.is_positive() {
                    reject(AccountError::WithdrawalNotPositive)
                } else if balance.saturating_sub(amount).is_negative() {
                    reject(AccountError::OverdraftNotAllowed)
                } else {
                    accept(AccountEvent::money_withdrawn(*account_id, amount))
                }
            }
            (state, command) => reject(AccountError::InvalidOperation {
                command: command.to_string(),
                state: state.to_string(),
            }),
        }
    }
}
