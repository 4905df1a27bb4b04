//! Behaviour tests for board structure and column deletion.

mod kanban_steps;

use kanban_steps::world::{KanbanWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/kanban_board.feature",
    name = "Creating a board adds its default column"
)]
#[tokio::test(flavor = "multi_thread")]
async fn board_creation_adds_default_column(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_board.feature",
    name = "Deleting the leftmost column moves its tasks to the right"
)]
#[tokio::test(flavor = "multi_thread")]
async fn leftmost_column_deletion_moves_tasks_right(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_board.feature",
    name = "Deleting a column moves its tasks to the left neighbour"
)]
#[tokio::test(flavor = "multi_thread")]
async fn column_deletion_moves_tasks_left(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_board.feature",
    name = "The last column of a board cannot be deleted"
)]
#[tokio::test(flavor = "multi_thread")]
async fn last_column_deletion_is_rejected(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_board.feature",
    name = "A task cannot reference a missing column"
)]
#[tokio::test(flavor = "multi_thread")]
async fn task_with_missing_column_is_rejected(world: KanbanWorld) {
    let _ = world;
}
