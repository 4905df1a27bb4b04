//! Diesel row models for the kanban tables.

use super::schema::{board_columns, boards, comments, tasks};
use crate::domain::{
    Board, BoardId, Column, ColumnId, Comment, CommentId, PersistedBoardData, PersistedColumnData,
    PersistedCommentData, PersistedTaskData, Task, TaskId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for boards.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Surrogate identifier.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for boards.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow<'a> {
    /// Board name.
    pub name: &'a str,
    /// Board description.
    pub description: &'a str,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Self::from_persisted(PersistedBoardData {
            id: BoardId::new(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Query result row for columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Surrogate identifier.
    pub id: i64,
    /// Column name.
    pub name: String,
    /// Owning board.
    pub board: i64,
    /// Ordering key.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for columns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow<'a> {
    /// Column name.
    pub name: &'a str,
    /// Owning board.
    pub board: i64,
    /// Ordering key.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ColumnRow> for Column {
    fn from(row: ColumnRow) -> Self {
        Self::from_persisted(PersistedColumnData {
            id: ColumnId::new(row.id),
            name: row.name,
            board: BoardId::new(row.board),
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Surrogate identifier.
    pub id: i64,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Owning column.
    pub column_id: i64,
    /// Ordering key.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Task name.
    pub name: &'a str,
    /// Task description.
    pub description: &'a str,
    /// Owning column.
    pub column_id: i64,
    /// Ordering key.
    pub position: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            name: row.name,
            description: row.description,
            column: ColumnId::new(row.column_id),
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Query result row for comments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Surrogate identifier.
    pub id: i64,
    /// Comment body.
    pub text: String,
    /// Owning task.
    pub task: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for comments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow<'a> {
    /// Comment body.
    pub text: &'a str,
    /// Owning task.
    pub task: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self::from_persisted(PersistedCommentData {
            id: CommentId::new(row.id),
            text: row.text,
            task: TaskId::new(row.task),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
