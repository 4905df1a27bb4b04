//! Domain model for the task board.
//!
//! Boards own columns, columns own tasks and tasks own comments. The types
//! here carry no infrastructure concerns: identifiers are assigned by the
//! storage adapters and timestamps come from the services' clock.

mod board;
mod column;
mod comment;
mod demand;
mod ids;
mod task;
mod timestamps;

pub use board::{Board, BoardInput, PersistedBoardData};
pub use column::{
    Column, ColumnChanges, ColumnInput, DEFAULT_COLUMN_NAME, DEFAULT_POSITION, PersistedColumnData,
};
pub use comment::{Comment, CommentChanges, CommentInput, PersistedCommentData};
pub use demand::{
    BOARD_FILTER, COLUMN_FILTER, ColumnDemand, ColumnFilters, CommentDemand, CommentFilters,
    Demand, FilterNotAllowed, FilterSet, TASK_FILTER, TaskDemand, TaskFilters,
};
pub use ids::{BoardId, ColumnId, CommentId, TaskId};
pub use task::{PersistedTaskData, Task, TaskInput};
pub use timestamps::next_updated_at;
