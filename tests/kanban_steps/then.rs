//! Then steps for kanban board scenarios.

use super::world::KanbanWorld;
use rstest_bdd_macros::then;
use taskboard::domain::ColumnId;
use taskboard::services::{ErrorKind, ServiceError};

#[then("the board is stored with id {id:i64}")]
fn board_stored_with_id(world: &KanbanWorld, id: i64) -> Result<(), eyre::Report> {
    let result = world
        .last_board_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing board result in scenario world"))?;
    let board = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected board creation failure: {err}"))?;
    if board.id().value() != id {
        return Err(eyre::eyre!("expected board id {id}, found {}", board.id()));
    }
    Ok(())
}

#[then("the board column count is {count:usize}")]
fn board_column_count(world: &KanbanWorld, count: usize) -> Result<(), eyre::Report> {
    let columns = world.board_columns()?;
    if columns.len() != count {
        return Err(eyre::eyre!(
            "expected {count} columns, found {}",
            columns.len()
        ));
    }
    Ok(())
}

#[then(r#"the only column is named "{name}""#)]
fn only_column_named(world: &KanbanWorld, name: String) -> Result<(), eyre::Report> {
    let columns = world.board_columns()?;
    let [column] = columns.as_slice() else {
        return Err(eyre::eyre!("expected one column, found {}", columns.len()));
    };
    if column.name() != name {
        return Err(eyre::eyre!(
            "expected column named {name}, found {}",
            column.name()
        ));
    }
    Ok(())
}

#[then("every task on the board is in column {column:i64}")]
fn every_task_in_column(world: &KanbanWorld, column: i64) -> Result<(), eyre::Report> {
    if let Some(Err(err)) = &world.last_delete_result {
        return Err(eyre::eyre!("column deletion failed: {err}"));
    }
    let tasks = world.board_tasks()?;
    if tasks.is_empty() {
        return Err(eyre::eyre!("expected tasks on the board, found none"));
    }
    let expected = ColumnId::new(column);
    if let Some(stray) = tasks.iter().find(|task| task.column() != expected) {
        return Err(eyre::eyre!(
            "task {} is in column {}, expected {expected}",
            stray.id(),
            stray.column()
        ));
    }
    Ok(())
}

#[then("the deletion is rejected because it is the last column")]
fn deletion_rejected_last_column(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_delete_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delete result in scenario world"))?;
    if !matches!(result, Err(ServiceError::LastColumn)) {
        return Err(eyre::eyre!("expected last column error, got {result:?}"));
    }
    Ok(())
}

#[then("task creation fails with a column relation error")]
fn task_creation_column_relation(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::ColumnRelation => Ok(()),
        other => Err(eyre::eyre!("expected column relation error, got {other:?}")),
    }
}

#[then("the board has no tasks")]
fn board_has_no_tasks(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let tasks = world.board_tasks()?;
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", tasks.len()));
    }
    Ok(())
}
