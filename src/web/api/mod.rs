//! API endpoints module.

pub mod queue;

pub use queue::{dispatch, QueueParams};
