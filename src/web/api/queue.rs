//! Queue endpoints: `PUT /<name>?v=...` inserts, `GET /<name>?timeout=N` retrieves.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::core::{Message, QueueStore, WaitBudget};
use crate::error::{Error, Result};

/// Query parameters. Unknown keys are ignored; a repeated key keeps its
/// first value.
#[derive(Debug, Default)]
pub struct QueueParams {
    /// Message body for insert.
    pub v: Option<String>,
    /// Wait budget in seconds for retrieve.
    pub timeout: Option<String>,
}

impl<'de> Deserialize<'de> for QueueParams {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = QueueParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("query parameters")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<QueueParams, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut params = QueueParams::default();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    let slot = match key.as_str() {
                        "v" => &mut params.v,
                        "timeout" => &mut params.timeout,
                        _ => continue,
                    };
                    slot.get_or_insert(value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

/// Route a request to insert or retrieve based on its method.
///
/// The request path, leading slash included, is the queue name.
pub async fn dispatch(
    State(store): State<Arc<QueueStore>>,
    method: Method,
    uri: Uri,
    Query(params): Query<QueueParams>,
) -> Response {
    let name = uri.path();

    let result = match method {
        Method::PUT => insert(&store, name, &params).await,
        Method::GET => retrieve(&store, name, &params).await,
        other => Err(Error::Validation(format!("unsupported method {}", other))),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

/// Accept `v` for delivery. Succeeds before any consumer has it.
async fn insert(store: &QueueStore, name: &str, params: &QueueParams) -> Result<Response> {
    let value = params.v.clone().unwrap_or_default();
    let message = Message::new(value)?;

    store.enqueue(name, message).await;
    Ok(StatusCode::OK.into_response())
}

async fn retrieve(store: &QueueStore, name: &str, params: &QueueParams) -> Result<Response> {
    let budget = WaitBudget::parse_param(params.timeout.as_deref())?;

    let message = store.dequeue(name, budget).await.ok_or(Error::NotAvailable)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(message.into_inner()))
        .map_err(|e| {
            tracing::warn!(queue = %name, "Claimed message dropped: {}", e);
            Error::TransportWrite(e.to_string())
        })
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotAvailable => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }
        status.into_response()
    }
}
