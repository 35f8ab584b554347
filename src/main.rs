//! TinyQueue - ephemeral in-memory message queue over HTTP.

use clap::Parser;
use std::process::ExitCode;

use tinyqueue::{logging, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments; a missing port exits here
    let args = Commands::parse();

    // Initialize logging
    let _guard = match logging::init(&args.log_options()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Run the server
    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
