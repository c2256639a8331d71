mod config;
mod db;
mod error;
mod import;
mod models;
mod pricing;
mod quote;
mod run;
mod store;
mod validate;

use anyhow::Result;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<ExitCode> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = config::QuoteConfig::from_env()?;
    let db_path = config::db_path()?;
    tracing::debug!(path = %db_path.display(), ?config, "starting");
    let mut db = db::Database::open(&db_path)?;

    let status = run::as_cli(&args, &mut db, &config)?;
    Ok(ExitCode::from(status))
}

/// Logs go to stderr so command output stays clean.
fn init_tracing() {
    let log_format = std::env::var("INSULQUOTE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
