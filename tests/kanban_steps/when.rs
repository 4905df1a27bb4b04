//! When steps for kanban board scenarios.

use super::world::{KanbanWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::domain::{BoardInput, ColumnId, TaskInput};

#[when(r#"a board named "{name}" with description "{description}" is created"#)]
fn create_board(world: &mut KanbanWorld, name: String, description: String) {
    let input = BoardInput::new(name).with_description(description);
    let result = run_async(world.services.boards.create(&input));
    if let Ok(board) = &result {
        world.board = Some(board.clone());
    }
    world.last_board_result = Some(result);
}

#[when("column {column:i64} is deleted")]
fn delete_column(world: &mut KanbanWorld, column: i64) {
    world.last_delete_result = Some(run_async(
        world.services.columns.delete(ColumnId::new(column)),
    ));
}

#[when(r#"a task named "{name}" is created in column {column:i64} at position {position:u32}"#)]
fn create_task(world: &mut KanbanWorld, name: String, column: i64, position: u32) {
    let input = TaskInput::new(name, ColumnId::new(column), f64::from(position));
    world.last_task_result = Some(run_async(world.services.tasks.create(&input)));
}
