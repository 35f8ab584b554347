//! Web server using Axum.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::core::QueueStore;
use crate::error::Result;

use super::router::create_app_router;

/// Bind the configured address and serve until Ctrl+C.
pub async fn run_server(config: ServerConfig, store: Arc<QueueStore>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Starting queue server on {}", listener.local_addr()?);

    serve(listener, store, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, store: Arc<QueueStore>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_app_router(store.clone()).layer(TraceLayer::new_for_http());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    // Suspended hand-offs die with the runtime; nothing is persisted.
    let queues = store.queue_count().await;
    tracing::info!(queues, "Queue server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn request(addr: std::net::SocketAddr, line: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let raw = format!("{} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", line);
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serve_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(QueueStore::new());
        let (stop, stopped) = oneshot::channel::<()>();

        let server = tokio::spawn(serve(listener, store.clone(), async move {
            let _ = stopped.await;
        }));

        assert!(request(addr, "PUT /tcp?v=over-the-wire").await.starts_with("HTTP/1.1 200"));
        let response = request(addr, "GET /tcp?timeout=5").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("over-the-wire"));
        assert!(request(addr, "GET /tcp").await.starts_with("HTTP/1.1 404"));
        assert!(request(addr, "POST /tcp").await.starts_with("HTTP/1.1 400"));

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert_eq!(store.queue_count().await, 1);
    }

    #[tokio::test]
    async fn test_server_futures_are_send() {
        fn assert_send<T: Send + 'static>(_: T) {}

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        assert_send(serve(listener, Arc::new(QueueStore::new()), async {}));
        assert_send(run_server(ServerConfig::default(), Arc::new(QueueStore::new())));
    }

    #[tokio::test]
    async fn test_run_server_rejects_bad_host() {
        let config = ServerConfig {
            host: "not-an-ip".to_string(),
            port: 0,
        };

        let result = run_server(config, Arc::new(QueueStore::new())).await;
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }
}
