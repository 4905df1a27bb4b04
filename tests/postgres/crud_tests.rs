//! Create, read, update and delete against `PostgreSQL`.

use super::helpers::postgres_harness;
use chrono::Utc;
use rstest::rstest;
use taskboard::domain::{
    BOARD_FILTER, BoardInput, ColumnChanges, ColumnDemand, ColumnInput, CommentChanges,
    CommentDemand, CommentInput, TASK_FILTER, TaskDemand, TaskInput,
};
use taskboard::ports::{
    BoardRepository, ColumnRepository, CommentRepository, StorageError, TaskRepository,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_round_trip() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();

    let board = db
        .ports
        .boards
        .save(&BoardInput::new("Roadmap").with_description("plan"), now)
        .await?;
    let fetched = db.ports.boards.find_one_by_id(board.id()).await?;
    assert_eq!(fetched.name(), "Roadmap");
    assert_eq!(fetched.description(), "plan");

    let updated = db
        .ports
        .boards
        .update(board.id(), &BoardInput::new("Plan"), now)
        .await?;
    assert_eq!(updated.name(), "Plan");
    assert!(updated.updated_at() > board.updated_at());
    assert_eq!(updated.created_at(), fetched.created_at());

    db.ports.boards.delete(board.id()).await?;
    let missing = db.ports.boards.find_one_by_id(board.id()).await;
    assert!(matches!(missing, Err(StorageError::NotFound)));
    let again = db.ports.boards.delete(board.id()).await;
    assert!(matches!(again, Err(StorageError::NotFound)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_are_listed_by_name() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();
    for name in ["Zeta", "Alpha", "Mid"] {
        db.ports.boards.save(&BoardInput::new(name), now).await?;
    }

    let names: Vec<_> = db
        .ports
        .boards
        .find()
        .await?
        .iter()
        .map(|board| board.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn columns_are_ordered_and_neighbours_found() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();
    let board = db.ports.boards.save(&BoardInput::new("Roadmap"), now).await?;
    let columns = &db.ports.columns;
    let done = columns
        .save(&ColumnInput::new("Done", board.id(), 3.0), now)
        .await?;
    let todo = columns
        .save(&ColumnInput::new("Todo", board.id(), 1.0), now)
        .await?;
    let doing = columns
        .save(&ColumnInput::new("Doing", board.id(), 2.0), now)
        .await?;

    let demand = ColumnDemand::new().with(BOARD_FILTER, 1)?;
    let ordered: Vec<_> = columns.find(&demand).await?.iter().map(|c| c.id()).collect();
    assert_eq!(ordered, vec![todo.id(), doing.id(), done.id()]);
    assert_eq!(columns.count_by_board(board.id()).await?, 3);

    let left = columns.find_left_neighbour(&doing).await?;
    assert_eq!(left.map(|c| c.id()), Some(todo.id()));
    let right = columns.find_right_neighbour(&doing).await?;
    assert_eq!(right.map(|c| c.id()), Some(done.id()));
    assert!(columns.find_left_neighbour(&todo).await?.is_none());

    let renamed = columns
        .update(doing.id(), &ColumnChanges::new("In progress", 2.5), now)
        .await?;
    assert_eq!(renamed.board(), board.id());
    assert_eq!(renamed.name(), "In progress");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_filter_by_board_and_move_between_columns() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let now = Utc::now();
    let board = db.ports.boards.save(&BoardInput::new("Roadmap"), now).await?;
    let other = db.ports.boards.save(&BoardInput::new("Other"), now).await?;
    let from = db
        .ports
        .columns
        .save(&ColumnInput::new("From", board.id(), 1.0), now)
        .await?;
    let to = db
        .ports
        .columns
        .save(&ColumnInput::new("To", board.id(), 2.0), now)
        .await?;
    let elsewhere = db
        .ports
        .columns
        .save(&ColumnInput::new("Elsewhere", other.id(), 1.0), now)
        .await?;
    let tasks = &db.ports.tasks;
    let first = tasks.save(&TaskInput::new("First", from.id(), 1.0), now).await?;
    tasks.save(&TaskInput::new("Second", from.id(), 2.0), now).await?;
    tasks
        .save(&TaskInput::new("Foreign", elsewhere.id(), 1.0), now)
        .await?;

    let on_board = tasks
        .find(&TaskDemand::new().with(BOARD_FILTER, 1)?)
        .await?;
    assert_eq!(on_board.len(), 2);

    let moved = tasks.move_to_column(from.id(), to.id(), now).await?;
    assert_eq!(moved, 2);
    let relocated = tasks.find_one_by_id(first.id()).await?;
    assert_eq!(relocated.column(), to.id());
    assert!(relocated.updated_at() > first.updated_at());
    assert_eq!(tasks.move_to_column(from.id(), to.id(), now).await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_listed_newest_first_and_cascade_with_tasks() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    let board = db
        .ports
        .boards
        .save(&BoardInput::new("Roadmap"), Utc::now())
        .await?;
    let column = db
        .ports
        .columns
        .save(&ColumnInput::new("Todo", board.id(), 1.0), Utc::now())
        .await?;
    let task = db
        .ports
        .tasks
        .save(&TaskInput::new("Ship", column.id(), 1.0), Utc::now())
        .await?;
    let comments = &db.ports.comments;
    let older = comments
        .save(&CommentInput::new("older", task.id()), Utc::now())
        .await?;
    let newer = comments
        .save(&CommentInput::new("newer", task.id()), Utc::now())
        .await?;

    let demand = CommentDemand::new().with(TASK_FILTER, 1)?;
    let listed: Vec<_> = comments.find(&demand).await?.iter().map(|c| c.id()).collect();
    assert_eq!(listed, vec![newer.id(), older.id()]);

    let edited = comments
        .update(older.id(), &CommentChanges::new("edited"), Utc::now())
        .await?;
    assert_eq!(edited.text(), "edited");

    db.ports.tasks.delete(task.id()).await?;
    assert!(comments.find(&demand).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_demand_values_match_nothing() -> eyre::Result<()> {
    let Some(db) = postgres_harness().await? else {
        return Ok(());
    };
    db.services.boards.create(&BoardInput::new("Roadmap")).await?;

    let demand = ColumnDemand::new().with(BOARD_FILTER, u64::MAX)?;
    assert!(db.ports.columns.find(&demand).await?.is_empty());
    Ok(())
}
