//! Multi-write service operations against `PostgreSQL`.

use super::helpers::postgres_harness;
use rstest::rstest;
use taskboard::domain::{
    BOARD_FILTER, BoardInput, ColumnDemand, ColumnId, ColumnInput, TaskDemand, TaskInput,
};
use taskboard::services::{ErrorKind, ServiceError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_creation_adds_default_column() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };

    let board = db
        .services
        .boards
        .create(&BoardInput::new("P").with_description("d"))
        .await?;

    assert_eq!(board.id().value(), 1);
    let columns = db
        .services
        .columns
        .find(&ColumnDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    let names: Vec<_> = columns.iter().map(|column| column.name()).collect();
    assert_eq!(names, vec!["Default"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leftmost_column_deletion_moves_tasks_right() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let board = db.services.boards.create(&BoardInput::new("P")).await?;
    db.services
        .columns
        .create(&ColumnInput::new("Doing", board.id(), 2000.0))
        .await?;
    db.services
        .columns
        .create(&ColumnInput::new("Done", board.id(), 3000.0))
        .await?;
    for position in [1.0, 2.0] {
        db.services
            .tasks
            .create(&TaskInput::new("Work", ColumnId::new(1), position))
            .await?;
    }

    db.services.columns.delete(ColumnId::new(1)).await?;

    let tasks = db
        .services
        .tasks
        .find(&TaskDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|task| task.column() == ColumnId::new(2)));
    let columns = db
        .services
        .columns
        .find(&ColumnDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    assert_eq!(columns.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_column_deletion_is_rejected() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    db.services.boards.create(&BoardInput::new("P")).await?;

    let result = db.services.columns.delete(ColumnId::new(1)).await;

    assert!(matches!(result, Err(ServiceError::LastColumn)));
    let columns = db
        .services
        .columns
        .find(&ColumnDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    assert_eq!(columns.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_conflict_rolls_back_the_deletion() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let board = db.services.boards.create(&BoardInput::new("P")).await?;
    let doing = db
        .services
        .columns
        .create(&ColumnInput::new("Doing", board.id(), 2000.0))
        .await?;
    db.services
        .tasks
        .create(&TaskInput::new("Existing", ColumnId::new(1), 1.0))
        .await?;
    db.services
        .tasks
        .create(&TaskInput::new("Clashing", doing.id(), 1.0))
        .await?;

    let err = db
        .services
        .columns
        .delete(doing.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("deletion should fail on the position clash"))?;

    assert_eq!(err.kind(), ErrorKind::PositionDuplicate);
    let still_there = db.services.columns.find_one_by_id(doing.id()).await?;
    assert_eq!(still_there.id(), doing.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_with_missing_column_is_not_inserted() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    db.services.boards.create(&BoardInput::new("P")).await?;

    let result = db
        .services
        .tasks
        .create(&TaskInput::new("Orphan", ColumnId::new(99), 1.0))
        .await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("task creation should fail"))?;
    assert_eq!(err.kind(), ErrorKind::ColumnRelation);
    let tasks = db
        .services
        .tasks
        .find(&TaskDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    assert!(tasks.is_empty());
    Ok(())
}
