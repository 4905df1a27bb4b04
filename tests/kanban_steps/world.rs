//! Shared world state for kanban board scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::adapters::memory::{InMemoryBackend, InMemoryStore};
use taskboard::domain::{BOARD_FILTER, Board, Column, ColumnDemand, Task, TaskDemand};
use taskboard::services::{KanbanServices, ServiceResult};

/// Services used by the scenarios.
pub type TestServices = KanbanServices<InMemoryBackend, DefaultClock>;

/// Scenario world for kanban board behaviour tests.
pub struct KanbanWorld {
    pub services: TestServices,
    pub board: Option<Board>,
    pub last_board_result: Option<ServiceResult<Board>>,
    pub last_delete_result: Option<ServiceResult<()>>,
    pub last_task_result: Option<ServiceResult<Task>>,
}

impl KanbanWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        Self {
            services: KanbanServices::new(&store.ports(), &Arc::new(DefaultClock)),
            board: None,
            last_board_result: None,
            last_delete_result: None,
            last_task_result: None,
        }
    }

    /// Returns the board the scenario is working on.
    pub fn current_board(&self) -> Result<&Board, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Lists the current board's columns in position order.
    pub fn board_columns(&self) -> Result<Vec<Column>, eyre::Report> {
        let board = board_filter(self.current_board()?)?;
        let demand = ColumnDemand::new().with(BOARD_FILTER, board)?;
        run_async(self.services.columns.find(&demand)).map_err(|err| eyre::eyre!("{err}"))
    }

    /// Lists every task on the current board.
    pub fn board_tasks(&self) -> Result<Vec<Task>, eyre::Report> {
        let board = board_filter(self.current_board()?)?;
        let demand = TaskDemand::new().with(BOARD_FILTER, board)?;
        run_async(self.services.tasks.find(&demand)).map_err(|err| eyre::eyre!("{err}"))
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn board_filter(board: &Board) -> Result<u64, eyre::Report> {
    Ok(u64::try_from(board.id().value())?)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
