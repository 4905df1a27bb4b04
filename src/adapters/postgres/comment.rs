//! `PostgreSQL` comment repository.

use super::executor::{PgExecutor, PgPool, PostgresTransaction, storage_error};
use super::filter_key;
use super::models::{CommentRow, NewCommentRow};
use super::schema::comments;
use crate::domain::{
    Comment, CommentChanges, CommentDemand, CommentId, CommentInput, TASK_FILTER, next_updated_at,
};
use crate::ports::{CommentRepository, StorageError, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    executor: PgExecutor,
}

impl PostgresCommentRepository {
    /// Creates a repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            executor: PgExecutor::Pool(pool),
        }
    }
}

impl TransactionScoped for PostgresCommentRepository {
    type Transaction = PostgresTransaction;

    fn with_transaction(&self, transaction: &PostgresTransaction) -> Self {
        Self {
            executor: PgExecutor::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn save(&self, input: &CommentInput, now: DateTime<Utc>) -> StorageResult<Comment> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                diesel::insert_into(comments::table)
                    .values(&NewCommentRow {
                        text: &owned.text,
                        task: owned.task.value(),
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(CommentRow::as_returning())
                    .get_result::<CommentRow>(connection)
                    .map(Comment::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find_one_by_id(&self, id: CommentId) -> StorageResult<Comment> {
        self.executor
            .run(move |connection| {
                comments::table
                    .find(id.value())
                    .select(CommentRow::as_select())
                    .first::<CommentRow>(connection)
                    .map(Comment::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find(&self, demand: &CommentDemand) -> StorageResult<Vec<Comment>> {
        let Ok(task) = filter_key(demand.get(TASK_FILTER)) else {
            return Ok(Vec::new());
        };
        self.executor
            .run(move |connection| {
                let mut query = comments::table
                    .select(CommentRow::as_select())
                    .order((comments::created_at.desc(), comments::id.desc()))
                    .into_boxed();
                if let Some(task_id) = task {
                    query = query.filter(comments::task.eq(task_id));
                }
                let rows = query.load::<CommentRow>(connection).map_err(storage_error)?;
                Ok(rows.into_iter().map(Comment::from).collect())
            })
            .await
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Comment> {
        let owned = changes.clone();
        self.executor
            .run(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx_conn| {
                        let previous = comments::table
                            .find(id.value())
                            .select(comments::updated_at)
                            .for_update()
                            .first::<DateTime<Utc>>(tx_conn)?;
                        diesel::update(comments::table.find(id.value()))
                            .set((
                                comments::text.eq(&owned.text),
                                comments::updated_at.eq(next_updated_at(previous, now)),
                            ))
                            .returning(CommentRow::as_returning())
                            .get_result::<CommentRow>(tx_conn)
                    })
                    .map(Comment::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn delete(&self, id: CommentId) -> StorageResult<()> {
        self.executor
            .run(move |connection| {
                let deleted = diesel::delete(comments::table.find(id.value()))
                    .execute(connection)
                    .map_err(storage_error)?;
                if deleted == 0 {
                    return Err(StorageError::NotFound);
                }
                Ok(())
            })
            .await
    }
}
