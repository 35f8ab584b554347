//! TinyQueue library root.
//!
//! An ephemeral in-memory message queue. Producers `PUT /<name>?v=<message>`,
//! consumers `GET /<name>?timeout=<seconds>`. Every queue is a zero-capacity
//! rendezvous: a message moves only when a producer and a consumer meet.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod web;

pub use cli::Commands;
pub use config::ServerConfig;
pub use core::{Message, QueueStore, Rendezvous, WaitBudget};
pub use web::{create_app_router, run_server};
pub use error::{Error, Result};
