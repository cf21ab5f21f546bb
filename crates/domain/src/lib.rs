//! Domain layer for the event-sourcing runtime.
//!
//! This crate provides the core domain abstractions including:
//! - Decider trait packaging an aggregate's pure decision logic
//! - CommandHandler running the read-decide-append cycle
//! - Account aggregate implementation with balance invariants

pub mod accounting;
pub mod decider;
pub mod error;
pub mod handler;

pub use accounting::{
    Account, AccountCommand, AccountDecider, AccountError, AccountEvent, AccountResult,
    AccountService, Money,
};
pub use decider::{Decider, Decision, accept, reject};
pub use error::HandlerError;
pub use handler::CommandHandler;
