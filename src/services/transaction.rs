//! Scoped unit of work for multi-write service operations.

use super::ServiceResult;
use crate::ports::{Transaction, TransactionCoordinator};

/// Runs `work` inside a new transaction.
///
/// The transaction is committed only when `work` succeeds. Rollback runs
/// on every exit path afterwards; after a commit it is a no-op. Errors from
/// `work` or from the commit are returned unchanged, and a failed rollback
/// is only logged.
///
/// # Errors
///
/// Returns the error from `begin`, from `work`, or from the commit.
pub async fn in_transaction<C, T, F, Fut>(coordinator: &C, work: F) -> ServiceResult<T>
where
    C: TransactionCoordinator + ?Sized,
    F: FnOnce(C::Transaction) -> Fut,
    Fut: Future<Output = ServiceResult<T>>,
{
    let transaction = coordinator.begin().await?;
    let outcome = match work(transaction.clone()).await {
        Ok(value) => transaction.commit().await.map(|()| value).map_err(Into::into),
        Err(err) => Err(err),
    };
    if let Err(err) = transaction.rollback().await {
        tracing::warn!(error = %err, "transaction rollback failed");
    }
    outcome
}
