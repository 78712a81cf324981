//! CLI entry point for the factory diagnostics.

use rivet_factory::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Default to WARN so registry and scanner diagnostics show up; RUST_LOG
    // overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(err) = cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
