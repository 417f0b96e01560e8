//! devhub Command Line Interface
//!
//! A local-first developer hub: chat, code posts, and comments on your own
//! machine.

use devhub::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "devhub=warn".into()),
        )
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
