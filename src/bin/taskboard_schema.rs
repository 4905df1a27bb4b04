//! Applies the kanban schema to the configured database.
//!
//! Usage:
//!
//! ```text
//! TASKBOARD_DATABASE_URL=postgres://localhost/taskboard taskboard_schema
//! ```
//!
//! The script is idempotent, so running the binary against an existing
//! database leaves its data untouched. Log verbosity follows
//! `TASKBOARD_LOG` (an `EnvFilter` directive, `info` by default).

use taskboard::adapters::postgres::{apply_schema, connect};
use taskboard::config::{DEFAULT_LOG_FILTER, LOG_FILTER_VAR, StorageConfig};
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    init_tracing()?;
    let config = StorageConfig::from_env()?;
    let pool = connect(&config)?;
    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(apply_schema(&pool))?;
    Ok(())
}

fn init_tracing() -> Result<(), BoxError> {
    let directive =
        std::env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let filter = EnvFilter::try_new(directive)?;
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
