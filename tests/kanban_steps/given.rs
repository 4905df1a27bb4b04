//! Given steps for kanban board scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::domain::{BoardInput, ColumnId, ColumnInput, TaskInput};

#[given(r#"a board named "{name}""#)]
fn board_named(world: &mut KanbanWorld, name: String) -> Result<(), eyre::Report> {
    let board = run_async(world.services.boards.create(&BoardInput::new(name)))
        .wrap_err("create board for scenario")?;
    world.board = Some(board);
    Ok(())
}

#[given(r#"a column named "{name}" at position {position:u32}"#)]
fn column_at_position(
    world: &mut KanbanWorld,
    name: String,
    position: u32,
) -> Result<(), eyre::Report> {
    let board = world.current_board()?.id();
    let input = ColumnInput::new(name, board, f64::from(position));
    run_async(world.services.columns.create(&input)).wrap_err("create column for scenario")?;
    Ok(())
}

#[given(r#"a task named "{name}" in column {column:i64} at position {position:u32}"#)]
fn task_in_column(
    world: &mut KanbanWorld,
    name: String,
    column: i64,
    position: u32,
) -> Result<(), eyre::Report> {
    let input = TaskInput::new(name, ColumnId::new(column), f64::from(position));
    run_async(world.services.tasks.create(&input)).wrap_err("create task for scenario")?;
    Ok(())
}
