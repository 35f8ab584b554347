//! Command line interface for TinyQueue using clap.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{ServerConfig, DEFAULT_HOST};
use crate::core::QueueStore;
use crate::logging::LogOptions;
use crate::web::run_server;

/// TinyQueue - ephemeral in-memory rendezvous message queue.
#[derive(Parser, Debug)]
#[command(name = "tinyqueue")]
#[command(version)]
#[command(about = "Ephemeral in-memory message queue over HTTP", long_about = None)]
pub struct Commands {
    /// Port to listen on
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "TINYQUEUE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory for rolling log files
    #[arg(long, env = "TINYQUEUE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log to stderr only
    #[arg(long)]
    pub no_log_file: bool,
}

impl Commands {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.host.clone(), self.port)
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            dir: self.log_dir.clone(),
            file: !self.no_log_file,
        }
    }

    /// Run the queue server until shutdown.
    pub async fn run(self) -> Result<()> {
        let config = self.server_config();
        let store = Arc::new(QueueStore::new());

        run_server(config.clone(), store)
            .await
            .with_context(|| format!("Queue server on {}:{} failed", config.host, config.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Commands::command().debug_assert();
    }

    #[test]
    fn test_port_is_required() {
        let err = Commands::try_parse_from(["tinyqueue"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_port_must_be_numeric() {
        assert!(Commands::try_parse_from(["tinyqueue", "http"]).is_err());
        assert!(Commands::try_parse_from(["tinyqueue", "70000"]).is_err());
    }

    #[test]
    fn test_port_only() {
        let args = Commands::try_parse_from(["tinyqueue", "8080"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.server_config().port, 8080);
        assert!(args.log_options().file);
    }

    #[test]
    fn test_optional_flags() {
        let args = Commands::try_parse_from([
            "tinyqueue",
            "9000",
            "--host",
            "127.0.0.1",
            "--log-dir",
            "/tmp/tq",
            "--no-log-file",
        ])
        .unwrap();

        assert_eq!(args.server_config(), ServerConfig::new("127.0.0.1", 9000));
        let log = args.log_options();
        assert_eq!(log.dir, Some(PathBuf::from("/tmp/tq")));
        assert!(!log.file);
    }
}
