//! Table state for the in-memory backend.
//!
//! Each write checks the same unique and foreign-key constraints as the
//! persisted layout and reports violations under the same constraint
//! names, so both backends classify errors through one table.

use crate::adapters::constraints::{
    COLUMNS_BOARD_FKEY, COLUMNS_NAME_BOARD_KEY, COLUMNS_POSITION_BOARD_KEY, COMMENTS_TASK_FKEY,
    TASKS_COLUMN_FKEY, TASKS_POSITION_COLUMN_KEY, classify_violation,
};
use crate::domain::{
    BOARD_FILTER, BoardId, BoardInput, COLUMN_FILTER, ColumnChanges, ColumnDemand, ColumnId,
    ColumnInput, CommentChanges, CommentDemand, CommentId, CommentInput, PersistedBoardData,
    PersistedColumnData, PersistedCommentData, PersistedTaskData, TASK_FILTER, TaskDemand, TaskId,
    TaskInput, next_updated_at,
};
use crate::ports::{StorageError, StorageResult};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct Sequences {
    boards: i64,
    columns: i64,
    tasks: i64,
    comments: i64,
}

fn next_value(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

/// All rows held by one in-memory store or transaction snapshot.
#[derive(Debug, Clone, Default)]
pub(super) struct KanbanTables {
    boards: BTreeMap<BoardId, PersistedBoardData>,
    columns: BTreeMap<ColumnId, PersistedColumnData>,
    tasks: BTreeMap<TaskId, PersistedTaskData>,
    comments: BTreeMap<CommentId, PersistedCommentData>,
    sequences: Sequences,
}

#[expect(
    clippy::float_cmp,
    reason = "unique indexes compare positions exactly"
)]
fn same_position(left: f64, right: f64) -> bool {
    left == right
}

fn violation(constraint: &str) -> StorageError {
    classify_violation(Some(constraint), "in-memory constraint check")
}

fn matches_filter(demand_value: Option<u64>, id: i64) -> bool {
    demand_value.is_none_or(|wanted| i64::try_from(wanted).is_ok_and(|value| value == id))
}

impl KanbanTables {
    pub(super) fn insert_board(
        &mut self,
        input: &BoardInput,
        now: DateTime<Utc>,
    ) -> PersistedBoardData {
        let id = BoardId::new(next_value(&mut self.sequences.boards));
        let row = PersistedBoardData {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.boards.insert(id, row.clone());
        row
    }

    pub(super) fn board(&self, id: BoardId) -> StorageResult<PersistedBoardData> {
        self.boards.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    pub(super) fn boards(&self) -> Vec<PersistedBoardData> {
        let mut rows: Vec<_> = self.boards.values().cloned().collect();
        rows.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        rows
    }

    pub(super) fn update_board(
        &mut self,
        id: BoardId,
        input: &BoardInput,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedBoardData> {
        let row = self.boards.get_mut(&id).ok_or(StorageError::NotFound)?;
        row.name.clone_from(&input.name);
        row.description.clone_from(&input.description);
        row.updated_at = next_updated_at(row.updated_at, now);
        Ok(row.clone())
    }

    pub(super) fn delete_board(&mut self, id: BoardId) -> StorageResult<()> {
        self.boards.remove(&id).ok_or(StorageError::NotFound)?;
        let orphaned: Vec<_> = self
            .columns
            .values()
            .filter(|column| column.board == id)
            .map(|column| column.id)
            .collect();
        for column in orphaned {
            self.remove_column_cascade(column);
        }
        Ok(())
    }

    fn check_column_constraints(
        &self,
        id: Option<ColumnId>,
        name: &str,
        board: BoardId,
        position: f64,
    ) -> StorageResult<()> {
        let siblings = || {
            self.columns
                .values()
                .filter(move |column| column.board == board && Some(column.id) != id)
        };
        if siblings().any(|column| column.name == name) {
            return Err(violation(COLUMNS_NAME_BOARD_KEY));
        }
        if siblings().any(|column| same_position(column.position, position)) {
            return Err(violation(COLUMNS_POSITION_BOARD_KEY));
        }
        if !self.boards.contains_key(&board) {
            return Err(violation(COLUMNS_BOARD_FKEY));
        }
        Ok(())
    }

    pub(super) fn insert_column(
        &mut self,
        input: &ColumnInput,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedColumnData> {
        self.check_column_constraints(None, &input.name, input.board, input.position)?;
        let id = ColumnId::new(next_value(&mut self.sequences.columns));
        let row = PersistedColumnData {
            id,
            name: input.name.clone(),
            board: input.board,
            position: input.position,
            created_at: now,
            updated_at: now,
        };
        self.columns.insert(id, row.clone());
        Ok(row)
    }

    pub(super) fn column(&self, id: ColumnId) -> StorageResult<PersistedColumnData> {
        self.columns.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    pub(super) fn columns(&self, demand: &ColumnDemand) -> Vec<PersistedColumnData> {
        let board = demand.get(BOARD_FILTER);
        let mut rows: Vec<_> = self
            .columns
            .values()
            .filter(|column| matches_filter(board, column.board.value()))
            .cloned()
            .collect();
        rows.sort_by(|left, right| {
            left.position
                .total_cmp(&right.position)
                .then(left.id.cmp(&right.id))
        });
        rows
    }

    pub(super) fn update_column(
        &mut self,
        id: ColumnId,
        changes: &ColumnChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedColumnData> {
        let board = self.column(id)?.board;
        self.check_column_constraints(Some(id), &changes.name, board, changes.position)?;
        let row = self.columns.get_mut(&id).ok_or(StorageError::NotFound)?;
        row.name.clone_from(&changes.name);
        row.position = changes.position;
        row.updated_at = next_updated_at(row.updated_at, now);
        Ok(row.clone())
    }

    pub(super) fn delete_column(&mut self, id: ColumnId) -> StorageResult<()> {
        if !self.columns.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        self.remove_column_cascade(id);
        Ok(())
    }

    fn remove_column_cascade(&mut self, id: ColumnId) {
        self.columns.remove(&id);
        let orphaned: Vec<_> = self
            .tasks
            .values()
            .filter(|task| task.column == id)
            .map(|task| task.id)
            .collect();
        for task in orphaned {
            self.remove_task_cascade(task);
        }
    }

    pub(super) fn count_columns(&self, board: BoardId) -> u64 {
        let count = self
            .columns
            .values()
            .filter(|column| column.board == board)
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    pub(super) fn left_neighbour(&self, board: BoardId, position: f64) -> Option<PersistedColumnData> {
        self.columns
            .values()
            .filter(|column| column.board == board && column.position < position)
            .max_by(|left, right| left.position.total_cmp(&right.position))
            .cloned()
    }

    pub(super) fn right_neighbour(
        &self,
        board: BoardId,
        position: f64,
    ) -> Option<PersistedColumnData> {
        self.columns
            .values()
            .filter(|column| column.board == board && column.position > position)
            .min_by(|left, right| left.position.total_cmp(&right.position))
            .cloned()
    }

    fn check_task_constraints(
        &self,
        id: Option<TaskId>,
        column: ColumnId,
        position: f64,
    ) -> StorageResult<()> {
        let taken = self.tasks.values().any(|task| {
            task.column == column && Some(task.id) != id && same_position(task.position, position)
        });
        if taken {
            return Err(violation(TASKS_POSITION_COLUMN_KEY));
        }
        if !self.columns.contains_key(&column) {
            return Err(violation(TASKS_COLUMN_FKEY));
        }
        Ok(())
    }

    pub(super) fn insert_task(
        &mut self,
        input: &TaskInput,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedTaskData> {
        self.check_task_constraints(None, input.column, input.position)?;
        let id = TaskId::new(next_value(&mut self.sequences.tasks));
        let row = PersistedTaskData {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            column: input.column,
            position: input.position,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(id, row.clone());
        Ok(row)
    }

    pub(super) fn task(&self, id: TaskId) -> StorageResult<PersistedTaskData> {
        self.tasks.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    pub(super) fn tasks(&self, demand: &TaskDemand) -> Vec<PersistedTaskData> {
        let board = demand.get(BOARD_FILTER);
        let column = demand.get(COLUMN_FILTER);
        let mut rows: Vec<_> = self
            .tasks
            .values()
            .filter(|task| matches_filter(column, task.column.value()))
            .filter(|task| {
                board.is_none()
                    || self
                        .columns
                        .get(&task.column)
                        .is_some_and(|owner| matches_filter(board, owner.board.value()))
            })
            .cloned()
            .collect();
        rows.sort_by(|left, right| {
            left.position
                .total_cmp(&right.position)
                .then(left.id.cmp(&right.id))
        });
        rows
    }

    pub(super) fn update_task(
        &mut self,
        id: TaskId,
        input: &TaskInput,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedTaskData> {
        if !self.tasks.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        self.check_task_constraints(Some(id), input.column, input.position)?;
        let row = self.tasks.get_mut(&id).ok_or(StorageError::NotFound)?;
        row.name.clone_from(&input.name);
        row.description.clone_from(&input.description);
        row.column = input.column;
        row.position = input.position;
        row.updated_at = next_updated_at(row.updated_at, now);
        Ok(row.clone())
    }

    pub(super) fn delete_task(&mut self, id: TaskId) -> StorageResult<()> {
        if !self.tasks.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        self.remove_task_cascade(id);
        Ok(())
    }

    fn remove_task_cascade(&mut self, id: TaskId) {
        self.tasks.remove(&id);
        self.comments.retain(|_, comment| comment.task != id);
    }

    pub(super) fn move_tasks(
        &mut self,
        from: ColumnId,
        to: ColumnId,
        now: DateTime<Utc>,
    ) -> StorageResult<u64> {
        let moving: Vec<_> = self
            .tasks
            .values()
            .filter(|task| task.column == from)
            .map(|task| (task.id, task.position))
            .collect();
        if moving.is_empty() {
            return Ok(0);
        }
        for (id, position) in &moving {
            self.check_task_constraints(Some(*id), to, *position)?;
        }
        for (id, _) in &moving {
            if let Some(row) = self.tasks.get_mut(id) {
                row.column = to;
                row.updated_at = next_updated_at(row.updated_at, now);
            }
        }
        Ok(u64::try_from(moving.len()).unwrap_or(u64::MAX))
    }

    pub(super) fn insert_comment(
        &mut self,
        input: &CommentInput,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedCommentData> {
        if !self.tasks.contains_key(&input.task) {
            return Err(violation(COMMENTS_TASK_FKEY));
        }
        let id = CommentId::new(next_value(&mut self.sequences.comments));
        let row = PersistedCommentData {
            id,
            text: input.text.clone(),
            task: input.task,
            created_at: now,
            updated_at: now,
        };
        self.comments.insert(id, row.clone());
        Ok(row)
    }

    pub(super) fn comment(&self, id: CommentId) -> StorageResult<PersistedCommentData> {
        self.comments.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    pub(super) fn comments(&self, demand: &CommentDemand) -> Vec<PersistedCommentData> {
        let task = demand.get(TASK_FILTER);
        let mut rows: Vec<_> = self
            .comments
            .values()
            .filter(|comment| matches_filter(task, comment.task.value()))
            .cloned()
            .collect();
        rows.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right.id.cmp(&left.id))
        });
        rows
    }

    pub(super) fn update_comment(
        &mut self,
        id: CommentId,
        changes: &CommentChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<PersistedCommentData> {
        let row = self.comments.get_mut(&id).ok_or(StorageError::NotFound)?;
        row.text.clone_from(&changes.text);
        row.updated_at = next_updated_at(row.updated_at, now);
        Ok(row.clone())
    }

    pub(super) fn delete_comment(&mut self, id: CommentId) -> StorageResult<()> {
        self.comments
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}
