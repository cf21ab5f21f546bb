//! Demo entry point: runs a short teller session against one account.

use common::AggregateId;
use domain::{AccountCommand, AccountService, Money};
use event_store::InMemoryEventStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Create the event store and the account service
    let store = InMemoryEventStore::new();
    let service = AccountService::new(store);

    // 3. Run the session
    let account_id = AggregateId::new();
    let session = [
        // Rejected: the account does not exist yet.
        AccountCommand::deposit(Money::from_dollars(42)),
        AccountCommand::create(account_id),
        AccountCommand::deposit(Money::from_dollars(1000)),
        AccountCommand::withdraw(Money::from_dollars(500)),
        // Rejected: one dollar more than the balance.
        AccountCommand::withdraw(Money::from_dollars(501)),
    ];

    for command in session {
        match service.execute(account_id, command).await {
            Ok(()) => println!("{command} => [SUCCESS]"),
            Err(error) => println!("{command} => [ERROR] {error}"),
        }

        match service.current_state(account_id).await {
            Ok((account, version)) => {
                println!("Current State: {account} (version {version})");
            }
            Err(error) => println!("Failed to load state: {error}"),
        }
        println!();
    }

    tracing::info!(
        events = service.handler().store().event_count().await,
        "session complete"
    );
}
