//! `PostgreSQL` board repository.

use super::executor::{PgExecutor, PgPool, PostgresTransaction, storage_error};
use super::models::{BoardRow, NewBoardRow};
use super::schema::boards;
use crate::domain::{Board, BoardId, BoardInput, next_updated_at};
use crate::ports::{BoardRepository, StorageError, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    executor: PgExecutor,
}

impl PostgresBoardRepository {
    /// Creates a repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            executor: PgExecutor::Pool(pool),
        }
    }
}

impl TransactionScoped for PostgresBoardRepository {
    type Transaction = PostgresTransaction;

    fn with_transaction(&self, transaction: &PostgresTransaction) -> Self {
        Self {
            executor: PgExecutor::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn save(&self, input: &BoardInput, now: DateTime<Utc>) -> StorageResult<Board> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                diesel::insert_into(boards::table)
                    .values(&NewBoardRow {
                        name: &owned.name,
                        description: &owned.description,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(BoardRow::as_returning())
                    .get_result::<BoardRow>(connection)
                    .map(Board::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find_one_by_id(&self, id: BoardId) -> StorageResult<Board> {
        self.executor
            .run(move |connection| {
                boards::table
                    .find(id.value())
                    .select(BoardRow::as_select())
                    .first::<BoardRow>(connection)
                    .map(Board::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find(&self) -> StorageResult<Vec<Board>> {
        self.executor
            .run(move |connection| {
                let rows = boards::table
                    .order((boards::name.asc(), boards::id.asc()))
                    .select(BoardRow::as_select())
                    .load::<BoardRow>(connection)
                    .map_err(storage_error)?;
                Ok(rows.into_iter().map(Board::from).collect())
            })
            .await
    }

    async fn update(
        &self,
        id: BoardId,
        input: &BoardInput,
        now: DateTime<Utc>,
    ) -> StorageResult<Board> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx_conn| {
                        let previous = boards::table
                            .find(id.value())
                            .select(boards::updated_at)
                            .for_update()
                            .first::<DateTime<Utc>>(tx_conn)?;
                        diesel::update(boards::table.find(id.value()))
                            .set((
                                boards::name.eq(&owned.name),
                                boards::description.eq(&owned.description),
                                boards::updated_at.eq(next_updated_at(previous, now)),
                            ))
                            .returning(BoardRow::as_returning())
                            .get_result::<BoardRow>(tx_conn)
                    })
                    .map(Board::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn delete(&self, id: BoardId) -> StorageResult<()> {
        self.executor
            .run(move |connection| {
                let deleted = diesel::delete(boards::table.find(id.value()))
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
