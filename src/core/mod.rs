//! Core module - the in-memory queue store.
//!
//! - Message and wait-budget value types
//! - Zero-capacity rendezvous hand-off
//! - Named queue registry

pub mod message;
pub mod queue;
pub mod rendezvous;

pub use message::{Message, WaitBudget};
pub use queue::QueueStore;
pub use rendezvous::Rendezvous;
