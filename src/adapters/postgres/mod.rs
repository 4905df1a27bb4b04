//! `PostgreSQL` storage backend using Diesel and r2d2.
//!
//! Constraint violations are classified through
//! [`crate::adapters::constraints`], so the constraint names in the schema
//! script are part of this adapter's contract.

mod board;
mod column;
mod comment;
mod executor;
pub mod models;
pub mod schema;
mod task;

pub use board::PostgresBoardRepository;
pub use column::PostgresColumnRepository;
pub use comment::PostgresCommentRepository;
pub use executor::{PgPool, PostgresTransaction, PostgresTransactionCoordinator};
pub use task::PostgresTaskRepository;

use crate::config::StorageConfig;
use crate::ports::{StorageBackend, StorageError, StoragePorts, StorageResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::num::TryFromIntError;

/// Idempotent script creating the kanban tables and their constraints.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-10-01-000000_create_kanban_tables/up.sql");

/// Storage family for the `PostgreSQL` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresBackend;

impl StorageBackend for PostgresBackend {
    type Transaction = PostgresTransaction;
    type Coordinator = PostgresTransactionCoordinator;
    type Boards = PostgresBoardRepository;
    type Columns = PostgresColumnRepository;
    type Tasks = PostgresTaskRepository;
    type Comments = PostgresCommentRepository;
}

impl PostgresBackend {
    /// Returns ports sharing `pool`.
    #[must_use]
    pub fn ports(pool: &PgPool) -> StoragePorts<Self> {
        StoragePorts::new(
            PostgresTransactionCoordinator::new(pool.clone()),
            PostgresBoardRepository::new(pool.clone()),
            PostgresColumnRepository::new(pool.clone()),
            PostgresTaskRepository::new(pool.clone()),
            PostgresCommentRepository::new(pool.clone()),
        )
    }
}

/// Builds a connection pool from `config`.
///
/// # Errors
///
/// Returns [`StorageError::Persistence`] when the pool cannot establish its
/// initial connections.
pub fn connect(config: &StorageConfig) -> StorageResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    let pool = Pool::builder()
        .max_size(config.pool_size().get())
        .connection_timeout(config.connect_timeout())
        .build(manager)
        .map_err(StorageError::persistence)?;
    tracing::info!(pool_size = config.pool_size().get(), "database pool ready");
    Ok(pool)
}

/// Applies [`SCHEMA_SQL`] to the database behind `pool`.
///
/// # Errors
///
/// Returns [`StorageError::Persistence`] when the script fails.
pub async fn apply_schema(pool: &PgPool) -> StorageResult<()> {
    let shared = pool.clone();
    executor::run_blocking(move || {
        let mut connection = shared.get().map_err(StorageError::persistence)?;
        connection
            .batch_execute(SCHEMA_SQL)
            .map_err(StorageError::persistence)
    })
    .await?;
    tracing::info!("kanban schema applied");
    Ok(())
}

/// Converts a demand value to a key column value.
///
/// Values beyond `i64::MAX` cannot match any row.
fn filter_key(value: Option<u64>) -> Result<Option<i64>, TryFromIntError> {
    value.map(i64::try_from).transpose()
}
