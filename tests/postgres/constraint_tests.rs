//! Constraint violations reported by `PostgreSQL` map to storage errors.

use super::helpers::postgres_harness;
use chrono::Utc;
use rstest::rstest;
use taskboard::domain::{BoardId, BoardInput, ColumnId, ColumnInput, CommentInput, TaskId, TaskInput};
use taskboard::ports::{
    BoardRepository, ColumnRepository, CommentRepository, StorageError, TaskRepository,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_name_and_position_are_unique_per_board() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();
    let board = db.ports.boards.save(&BoardInput::new("Roadmap"), now).await?;
    db.ports
        .columns
        .save(&ColumnInput::new("Todo", board.id(), 1.0), now)
        .await?;

    let same_name = db
        .ports
        .columns
        .save(&ColumnInput::new("Todo", board.id(), 2.0), now)
        .await;
    assert!(matches!(same_name, Err(StorageError::NameDuplicate)));

    let same_position = db
        .ports
        .columns
        .save(&ColumnInput::new("Doing", board.id(), 1.0), now)
        .await;
    assert!(matches!(same_position, Err(StorageError::PositionDuplicate)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_parents_are_relation_errors() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();

    let column = db
        .ports
        .columns
        .save(&ColumnInput::new("Todo", BoardId::new(404), 1.0), now)
        .await;
    assert!(matches!(column, Err(StorageError::BoardRelation)));

    let task = db
        .ports
        .tasks
        .save(&TaskInput::new("Orphan", ColumnId::new(404), 1.0), now)
        .await;
    assert!(matches!(task, Err(StorageError::ColumnRelation)));

    let comment = db
        .ports
        .comments
        .save(&CommentInput::new("hello", TaskId::new(404)), now)
        .await;
    assert!(matches!(comment, Err(StorageError::TaskRelation)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_position_is_unique_per_column() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();
    let board = db.ports.boards.save(&BoardInput::new("Roadmap"), now).await?;
    let column = db
        .ports
        .columns
        .save(&ColumnInput::new("Todo", board.id(), 1.0), now)
        .await?;
    db.ports
        .tasks
        .save(&TaskInput::new("First", column.id(), 1.0), now)
        .await?;

    let clash = db
        .ports
        .tasks
        .save(&TaskInput::new("Second", column.id(), 1.0), now)
        .await;
    assert!(matches!(clash, Err(StorageError::PositionDuplicate)));
    Ok(())
}
