//! Account service providing a simplified API for account operations.

use common::AggregateId;
use event_store::{EventStore, Version};

use crate::error::HandlerError;
use crate::handler::CommandHandler;

use super::{Account, AccountCommand, AccountDecider, AccountError, AccountEvent, Money};

/// Result type for account operations.
pub type AccountResult<T> = Result<T, HandlerError<AccountError>>;

/// Service for managing accounts.
///
/// Provides a high-level API for account operations, wrapping the command
/// handler with one method per command.
pub struct AccountService<S>
where
    S: EventStore<Event = AccountEvent>,
{
    handler: CommandHandler<S, AccountDecider>,
}

impl<S> AccountService<S>
where
    S: EventStore<Event = AccountEvent>,
{
    /// Creates a new account service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store, AccountDecider),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, AccountDecider> {
        &self.handler
    }

    /// Creates a new account under the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, account_id: AggregateId) -> AccountResult<()> {
        self.handler
            .handle(account_id, AccountCommand::create(account_id))
            .await
    }

    /// Deposits money into an account.
    #[tracing::instrument(skip(self))]
    pub async fn deposit(&self, account_id: AggregateId, amount: Money) -> AccountResult<()> {
        self.handler
            .handle(account_id, AccountCommand::deposit(amount))
            .await
    }

    /// Withdraws money from an account.
    #[tracing::instrument(skip(self))]
    pub async fn withdraw(&self, account_id: AggregateId, amount: Money) -> AccountResult<()> {
        self.handler
            .handle(account_id, AccountCommand::withdraw(amount))
            .await
    }

    /// Runs an already-built command through the handler.
    pub async fn execute(
        &self,
        account_id: AggregateId,
        command: AccountCommand,
    ) -> AccountResult<()> {
        self.handler.handle(account_id, command).await
    }

    /// Returns the current state and version of an account.
    ///
    /// An account with no events comes back `Uninitialized` at
    /// `Version::none()`.
    #[tracing::instrument(skip(self))]
    pub async fn current_state(
        &self,
        account_id: AggregateId,
    ) -> AccountResult<(Account, Version)> {
        self.handler.current_state(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use event_store::InMemoryEventStore;

    use super::*;
    use crate::accounting::AccountError;

    fn create_service() -> AccountService<InMemoryEventStore<AccountEvent>> {
        AccountService::new(InMemoryEventStore::new())
    }

    #[tokio::test]
    async fn test_create_account() {
        let service = create_service();
        let account_id = AggregateId::new();

        service.create(account_id).await.unwrap();

        let (account, version) = service.current_state(account_id).await.unwrap();
        assert_eq!(account.account_id(), Some(account_id));
        assert_eq!(account.balance(), Some(Money::zero()));
        assert_eq!(version, Version::first());
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw_update_the_balance() {
        let service = create_service();
        let account_id = AggregateId::new();

        service.create(account_id).await.unwrap();
        service
            .deposit(account_id, Money::from_dollars(10))
            .await
            .unwrap();
        service
            .withdraw(account_id, Money::from_dollars(3))
            .await
            .unwrap();

        let (account, version) = service.current_state(account_id).await.unwrap();
        assert_eq!(account.balance(), Some(Money::from_dollars(7)));
        assert_eq!(version, Version::new(2));
    }

    #[tokio::test]
    async fn test_rejection_carries_the_domain_error() {
        let service = create_service();
        let account_id = AggregateId::new();

        service.create(account_id).await.unwrap();
        let result = service.withdraw(account_id, Money::from_cents(1)).await;

        let error = result.unwrap_err();
        assert_eq!(
            error.rejection_reasons().map(|reasons| &reasons.head),
            Some(&AccountError::OverdraftNotAllowed)
        );
    }

    #[tokio::test]
    async fn test_missing_account_is_uninitialized() {
        let service = create_service();

        let (account, version) = service.current_state(AggregateId::new()).await.unwrap();

        assert_eq!(account, Account::Uninitialized);
        assert_eq!(version, Version::none());
    }
}
