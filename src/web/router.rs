//! Route definitions for web server.

use std::sync::Arc;

use axum::Router;

use crate::core::QueueStore;

use super::api;

/// Create the full app router.
///
/// Every path is a queue name, so there are no fixed routes; the fallback
/// sees every request.
pub fn create_app_router(store: Arc<QueueStore>) -> Router {
    Router::new().fallback(api::dispatch).with_state(store)
}
