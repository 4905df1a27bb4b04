//! Shared store, snapshot transactions and the handle repositories use.

use super::tables::KanbanTables;
use crate::ports::{StorageError, StorageResult, Transaction, TransactionCoordinator};
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

fn lock_poisoned(err: impl fmt::Display) -> StorageError {
    StorageError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory store and transaction coordinator.
///
/// Writers are serialised: a transaction holds the write gate from
/// `begin` until it is committed, rolled back or dropped, and standalone
/// writes wait for the gate too. Reads outside a transaction see the last
/// committed state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<KanbanTables>>,
    gate: Arc<AsyncMutex<()>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionCoordinator for InMemoryStore {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> StorageResult<InMemoryTransaction> {
        let gate = Arc::clone(&self.gate).lock_owned().await;
        let snapshot = self.tables.read().map_err(lock_poisoned)?.clone();
        Ok(InMemoryTransaction {
            target: Arc::clone(&self.tables),
            staged: Arc::new(Mutex::new(Some(Staged {
                tables: snapshot,
                _gate: gate,
            }))),
        })
    }
}

#[derive(Debug)]
struct Staged {
    tables: KanbanTables,
    _gate: OwnedMutexGuard<()>,
}

/// Snapshot transaction over an [`InMemoryStore`].
///
/// Writes land in a private copy of the tables; commit publishes the copy.
#[derive(Debug, Clone)]
pub struct InMemoryTransaction {
    target: Arc<RwLock<KanbanTables>>,
    staged: Arc<Mutex<Option<Staged>>>,
}

impl InMemoryTransaction {
    fn take_staged(&self) -> StorageResult<Option<Staged>> {
        Ok(self.staged.lock().map_err(lock_poisoned)?.take())
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(&self) -> StorageResult<()> {
        let staged = self
            .take_staged()?
            .ok_or(StorageError::TransactionFinished)?;
        let mut tables = self.target.write().map_err(lock_poisoned)?;
        *tables = staged.tables;
        Ok(())
    }

    async fn rollback(&self) -> StorageResult<()> {
        drop(self.take_staged()?);
        Ok(())
    }
}

/// Where a repository reads and writes.
#[derive(Debug, Clone)]
pub(super) enum MemoryHandle {
    Store(InMemoryStore),
    Transaction(InMemoryTransaction),
}

impl MemoryHandle {
    pub(super) fn read<T>(
        &self,
        query: impl FnOnce(&KanbanTables) -> StorageResult<T>,
    ) -> StorageResult<T> {
        match self {
            Self::Store(store) => query(&*store.tables.read().map_err(lock_poisoned)?),
            Self::Transaction(transaction) => {
                let staged = transaction.staged.lock().map_err(lock_poisoned)?;
                let current = staged.as_ref().ok_or(StorageError::TransactionFinished)?;
                query(&current.tables)
            }
        }
    }

    /// Applies `mutation` to a scratch copy and keeps it only on success,
    /// so a failed statement leaves no partial write behind.
    pub(super) async fn write<T>(
        &self,
        mutation: impl FnOnce(&mut KanbanTables) -> StorageResult<T>,
    ) -> StorageResult<T> {
        match self {
            Self::Store(store) => {
                let _gate = store.gate.lock().await;
                let mut tables = store.tables.write().map_err(lock_poisoned)?;
                apply(&mut tables, mutation)
            }
            Self::Transaction(transaction) => {
                let mut staged = transaction.staged.lock().map_err(lock_poisoned)?;
                let current = staged.as_mut().ok_or(StorageError::TransactionFinished)?;
                apply(&mut current.tables, mutation)
            }
        }
    }
}

fn apply<T>(
    tables: &mut KanbanTables,
    mutation: impl FnOnce(&mut KanbanTables) -> StorageResult<T>,
) -> StorageResult<T> {
    let mut scratch = tables.clone();
    let result = mutation(&mut scratch)?;
    *tables = scratch;
    Ok(result)
}
