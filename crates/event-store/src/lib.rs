pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::AggregateId;
pub use error::{EventStoreError, Result};
pub use event::{RecordedEvent, Version};
pub use memory::InMemoryEventStore;
pub use store::{EventStore, NonEmpty};
