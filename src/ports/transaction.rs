//! Unit-of-work ports.
//!
//! A coordinator opens a [`Transaction`]; repositories bind to it through
//! [`TransactionScoped::with_transaction`], which returns a new bound value
//! and leaves the original untouched. The same repository instance can
//! therefore serve standalone calls and any number of scoped ones.

use super::StorageResult;
use async_trait::async_trait;

/// Handle to an open unit of work.
///
/// Handles are cheap to clone; every clone refers to the same transaction.
#[async_trait]
pub trait Transaction: Clone + Send + Sync + 'static {
    /// Makes every write performed through this transaction durable.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::TransactionFinished`] when the
    /// transaction was already committed or rolled back, or the adapter's
    /// error when the commit itself fails.
    async fn commit(&self) -> StorageResult<()>;

    /// Discards every write performed through this transaction.
    ///
    /// Rolling back a finished transaction is a no-op, so callers may roll
    /// back unconditionally after an explicit commit.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when the rollback itself fails.
    async fn rollback(&self) -> StorageResult<()>;
}

/// Opens transactions.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    /// Transaction handle produced by this coordinator.
    type Transaction: Transaction;

    /// Begins a new transaction.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when no transaction can be opened.
    async fn begin(&self) -> StorageResult<Self::Transaction>;
}

/// A port that can be bound to a transaction.
pub trait TransactionScoped: Sized {
    /// Transaction type this port binds to.
    type Transaction: Transaction;

    /// Returns a copy of this port whose operations run inside
    /// `transaction`.
    #[must_use]
    fn with_transaction(&self, transaction: &Self::Transaction) -> Self;
}
