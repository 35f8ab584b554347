//! HTTP front end (Axum).

pub mod api;
pub mod router;
pub mod server;

pub use router::create_app_router;
pub use server::{run_server, serve};
