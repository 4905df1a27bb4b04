//! Connection handling and transactions for the `PostgreSQL` backend.
//!
//! Diesel is synchronous, so every statement runs on the blocking thread
//! pool through [`tokio::task::spawn_blocking`]. A repository either takes
//! a fresh connection from the pool per call or shares the single
//! connection pinned by a [`PostgresTransaction`].

use crate::adapters::constraints::classify_violation;
use crate::ports::{StorageError, StorageResult, Transaction, TransactionCoordinator};
use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::fmt;
use std::sync::{Arc, Mutex};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Runs a blocking database operation on the blocking thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(StorageError::persistence)?
}

/// Maps a Diesel error onto the storage vocabulary.
///
/// Integrity violations are classified by constraint name; a missing row
/// becomes [`StorageError::NotFound`].
pub(super) fn storage_error(err: DieselError) -> StorageError {
    match err {
        DieselError::NotFound => StorageError::NotFound,
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
            ref info,
        ) => classify_violation(info.constraint_name(), info.message()),
        other => StorageError::persistence(other),
    }
}

fn lock_poisoned(err: impl fmt::Display) -> StorageError {
    StorageError::persistence(std::io::Error::other(err.to_string()))
}

/// Where a repository runs its statements.
#[derive(Debug, Clone)]
pub(super) enum PgExecutor {
    Pool(PgPool),
    Transaction(PostgresTransaction),
}

impl PgExecutor {
    pub(super) async fn run<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match self {
            Self::Pool(shared) => {
                let pool = shared.clone();
                run_blocking(move || {
                    let mut connection = pool.get().map_err(StorageError::persistence)?;
                    f(&mut connection)
                })
                .await
            }
            Self::Transaction(transaction) => transaction.run(f).await,
        }
    }
}

/// Transaction pinned to one pooled connection.
///
/// The connection is released when the transaction is committed or rolled
/// back. A transaction dropped while still open hands its connection back
/// to the pool mid-transaction; r2d2 discards such connections, which
/// aborts the transaction server-side.
#[derive(Clone)]
pub struct PostgresTransaction {
    connection: Arc<Mutex<Option<PooledConn>>>,
}

impl fmt::Debug for PostgresTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finished = self
            .connection
            .lock()
            .map_or(true, |connection| connection.is_none());
        f.debug_struct("PostgresTransaction")
            .field("finished", &finished)
            .finish()
    }
}

impl PostgresTransaction {
    async fn run<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = Arc::clone(&self.connection);
        run_blocking(move || {
            let mut guard = shared.lock().map_err(lock_poisoned)?;
            let connection = guard.as_mut().ok_or(StorageError::TransactionFinished)?;
            f(connection)
        })
        .await
    }

    fn take(&self) -> StorageResult<Option<PooledConn>> {
        Ok(self.connection.lock().map_err(lock_poisoned)?.take())
    }
}

#[async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(&self) -> StorageResult<()> {
        let mut connection = self.take()?.ok_or(StorageError::TransactionFinished)?;
        run_blocking(move || {
            let raw: &mut PgConnection = &mut connection;
            AnsiTransactionManager::commit_transaction(raw).map_err(storage_error)
        })
        .await
    }

    async fn rollback(&self) -> StorageResult<()> {
        let Some(mut connection) = self.take()? else {
            return Ok(());
        };
        run_blocking(move || {
            let raw: &mut PgConnection = &mut connection;
            AnsiTransactionManager::rollback_transaction(raw).map_err(StorageError::persistence)
        })
        .await
    }
}

/// Opens transactions on pooled connections.
#[derive(Debug, Clone)]
pub struct PostgresTransactionCoordinator {
    pool: PgPool,
}

impl PostgresTransactionCoordinator {
    /// Creates a coordinator drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionCoordinator for PostgresTransactionCoordinator {
    type Transaction = PostgresTransaction;

    async fn begin(&self) -> StorageResult<PostgresTransaction> {
        let pool = self.pool.clone();
        let connection = run_blocking(move || {
            let mut connection = pool.get().map_err(StorageError::persistence)?;
            let raw: &mut PgConnection = &mut connection;
            AnsiTransactionManager::begin_transaction(raw).map_err(StorageError::persistence)?;
            Ok(connection)
        })
        .await?;
        Ok(PostgresTransaction {
            connection: Arc::new(Mutex::new(Some(connection))),
        })
    }
}
