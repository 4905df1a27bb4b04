//! `PostgreSQL` task repository.

use super::executor::{PgExecutor, PgPool, PostgresTransaction, storage_error};
use super::filter_key;
use super::models::{NewTaskRow, TaskRow};
use super::schema::{board_columns, tasks};
use crate::domain::{
    BOARD_FILTER, COLUMN_FILTER, ColumnId, Task, TaskDemand, TaskId, TaskInput, next_updated_at,
};
use crate::ports::{StorageError, StorageResult, TaskRepository, TransactionScoped};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::{BigInt, Timestamptz};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    executor: PgExecutor,
}

impl PostgresTaskRepository {
    /// Creates a repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            executor: PgExecutor::Pool(pool),
        }
    }
}

impl TransactionScoped for PostgresTaskRepository {
    type Transaction = PostgresTransaction;

    fn with_transaction(&self, transaction: &PostgresTransaction) -> Self {
        Self {
            executor: PgExecutor::Transaction(transaction.clone()),
        }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, input: &TaskInput, now: DateTime<Utc>) -> StorageResult<Task> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&NewTaskRow {
                        name: &owned.name,
                        description: &owned.description,
                        column_id: owned.column.value(),
                        position: owned.position,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map(Task::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find_one_by_id(&self, id: TaskId) -> StorageResult<Task> {
        self.executor
            .run(move |connection| {
                tasks::table
                    .find(id.value())
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(connection)
                    .map(Task::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn find(&self, demand: &TaskDemand) -> StorageResult<Vec<Task>> {
        let (Ok(board), Ok(column)) = (
            filter_key(demand.get(BOARD_FILTER)),
            filter_key(demand.get(COLUMN_FILTER)),
        ) else {
            return Ok(Vec::new());
        };
        self.executor
            .run(move |connection| {
                let mut query = tasks::table
                    .inner_join(board_columns::table)
                    .select(TaskRow::as_select())
                    .order((tasks::position.asc(), tasks::id.asc()))
                    .into_boxed();
                if let Some(column_id) = column {
                    query = query.filter(tasks::column_id.eq(column_id));
                }
                if let Some(board_id) = board {
                    query = query.filter(board_columns::board.eq(board_id));
                }
                let rows = query.load::<TaskRow>(connection).map_err(storage_error)?;
                Ok(rows.into_iter().map(Task::from).collect())
            })
            .await
    }

    async fn update(
        &self,
        id: TaskId,
        input: &TaskInput,
        now: DateTime<Utc>,
    ) -> StorageResult<Task> {
        let owned = input.clone();
        self.executor
            .run(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx_conn| {
                        let previous = tasks::table
                            .find(id.value())
                            .select(tasks::updated_at)
                            .for_update()
                            .first::<DateTime<Utc>>(tx_conn)?;
                        diesel::update(tasks::table.find(id.value()))
                            .set((
                                tasks::name.eq(&owned.name),
                                tasks::description.eq(&owned.description),
                                tasks::column_id.eq(owned.column.value()),
                                tasks::position.eq(owned.position),
                                tasks::updated_at.eq(next_updated_at(previous, now)),
                            ))
                            .returning(TaskRow::as_returning())
                            .get_result::<TaskRow>(tx_conn)
                    })
                    .map(Task::from)
                    .map_err(storage_error)
            })
            .await
    }

    async fn delete(&self, id: TaskId) -> StorageResult<()> {
        self.executor
            .run(move |connection| {
                let deleted = diesel::delete(tasks::table.find(id.value()))
                    .execute(connection)
                    .map_err(storage_error)?;
                if deleted == 0 {
                    return Err(StorageError::NotFound);
                }
                Ok(())
            })
            .await
    }

    async fn move_to_column(
        &self,
        from: ColumnId,
        to: ColumnId,
        now: DateTime<Utc>,
    ) -> StorageResult<u64> {
        self.executor
            .run(move |connection| {
                let moved = diesel::sql_query(concat!(
                    "UPDATE tasks SET \"column\" = $1, ",
                    "updated_at = GREATEST($2, updated_at + INTERVAL '1 microsecond') ",
                    "WHERE \"column\" = $3",
                ))
                .bind::<BigInt, _>(to.value())
                .bind::<Timestamptz, _>(now)
                .bind::<BigInt, _>(from.value())
                .execute(connection)
                .map_err(storage_error)?;
                u64::try_from(moved).map_err(StorageError::persistence)
            })
            .await
    }
}
