//! `PostgreSQL` column repository.

use super::executor::{PgExecutor, PgPool, PostgresTransaction, storage_error};
use super::filter_key;
use super::models::{ColumnRow, NewColumnRow};
use super::schema::board_columns;
use crate::domain::{
    BOARD_FILTER, BoardId, Column, ColumnChanges, ColumnDemand, ColumnId, ColumnInput,
    next_updated_at,
};
use crate::ports::{ColumnRepository, StorageError, StorageResult, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;

/// `PostgreSQL`-backed column repository.
#[derive(Debug, Clone)]
pub struct PostgresColumnRepository {
    executor: PgExecutor,
}

impl PostgresColumnRepository {
    /// Creates a repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            executor: PgExecutor::Pool(pool),
        }
    }
}

impl TransactionScoped for PostgresColumnRepository {
    type Transaction = PostgresTransaction;

    fn with_transaction(&self, transaction: &PostgresTransaction) -> Self {
        Self {
            executor: PgExecutor::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl ColumnRepository for PostgresColumnRepository {
    async fn save(&self, input: &ColumnInput, now: DateTime<Utc>) -> StorageResult<Column> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                diesel::insert_into(board_columns::table)
                    .values(&NewColumnRow {
                        name: &owned.name,
                        board: owned.board.value(),
                        position: owned.position,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(ColumnRow::as_returning())
                    .get_result::<ColumnRow>(connection)
                    .map(Column::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find_one_by_id(&self, id: ColumnId) -> StorageResult<Column> {
        self.executor
            .run(move |connection| {
                board_columns::table
                    .find(id.value())
                    .select(ColumnRow::as_select())
                    .first::<ColumnRow>(connection)
                    .map(Column::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find(&self, demand: &ColumnDemand) -> StorageResult<Vec<Column>> {
        let Ok(board) = filter_key(demand.get(BOARD_FILTER)) else {
            return Ok(Vec::new());
        };
        self.executor
            .run(move |connection| {
                let mut query = board_columns::table
                    .select(ColumnRow::as_select())
                    .order((board_columns::position.asc(), board_columns::id.asc()))
                    .into_boxed();
                if let Some(board_id) = board {
                    query = query.filter(board_columns::board.eq(board_id));
                }
                let rows = query
                    .load::<ColumnRow>(connection)
                    .map_err(storage_error)?;
                Ok(rows.into_iter().map(Column::from).collect())
            })
            .await
    }

    async fn update(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Column> {
        let owned = changes.clone();
        self.executor
            .run(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx_conn| {
                        let previous = board_columns::table
                            .find(id.value())
                            .select(board_columns::updated_at)
                            .for_update()
                            .first::<DateTime<Utc>>(tx_conn)?;
                        diesel::update(board_columns::table.find(id.value()))
                            .set((
                                board_columns::name.eq(&owned.name),
                                board_columns::position.eq(owned.position),
                                board_columns::updated_at.eq(next_updated_at(previous, now)),
                            ))
                            .returning(ColumnRow::as_returning())
                            .get_result::<ColumnRow>(tx_conn)
                    })
                    .map(Column::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn delete(&self, id: ColumnId) -> StorageResult<()> {
        self.executor
            .run(move |connection| {
                let deleted = diesel::delete(board_columns::table.find(id.value()))
                    .execute(connection)
                    .map_err(storage_error)?;
                if deleted == 0 {
                    return Err(StorageError::NotFound);
                }
                Ok(())
            })
            .await
    }

    async fn count_by_board(&self, board: BoardId) -> StorageResult<u64> {
        self.executor
            .run(move |connection| {
                let count = board_columns::table
                    .filter(board_columns::board.eq(board.value()))
                    .count()
                    .get_result::<i64>(connection)
                    .map_err(storage_error)?;
                u64::try_from(count).map_err(StorageError::persistence)
            })
            .await
    }

    async fn find_left_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        let board = column.board().value();
        let position = column.position();
        self.executor
            .run(move |connection| {
                let row = board_columns::table
                    .filter(board_columns::board.eq(board))
                    .filter(board_columns::position.lt(position))
                    .order(board_columns::position.desc())
                    .select(ColumnRow::as_select())
                    .first::<ColumnRow>(connection)
                    .optional()
                    .map_err(storage_error)?;
                Ok(row.map(Column::from))
            })
            .await
    }

    async fn find_right_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        let board = column.board().value();
        let position = column.position();
        self.executor
            .run(move |connection| {
                let row = board_columns::table
                    .filter(board_columns::board.eq(board))
                    .filter(board_columns::position.gt(position))
                    .order(board_columns::position.asc())
                    .select(ColumnRow::as_select())
                    .first::<ColumnRow>(connection)
                    .optional()
                    .map_err(storage_error)?;
                Ok(row.map(Column::from))
            })
            .await
    }
}
