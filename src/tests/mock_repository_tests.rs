//! Service behaviour against scripted repositories.
//!
//! The scripted ports wrap the in-memory ones and route `save` through a
//! mockall double, so tests can fail a single write or assert that no
//! write happened at all.

use crate::adapters::memory::{
    InMemoryBoardRepository, InMemoryColumnRepository, InMemoryCommentRepository, InMemoryStore,
    InMemoryTaskRepository, InMemoryTransaction,
};
use crate::domain::{
    BoardId, BoardInput, Column, ColumnChanges, ColumnDemand, ColumnId, ColumnInput, Comment,
    CommentChanges, CommentDemand, CommentId, CommentInput, PersistedCommentData, TaskId,
};
use crate::ports::{
    ColumnRepository, CommentRepository, StorageBackend, StorageError, StoragePorts,
    StorageResult, TransactionScoped,
};
use crate::services::{BoardService, CommentService, ErrorKind, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use mockall::automock;
use rstest::rstest;
use std::sync::Arc;

#[automock]
trait ColumnSaves {
    fn save(&self, input: &ColumnInput) -> StorageResult<Column>;
}

#[automock]
trait CommentSaves {
    fn save(&self, input: &CommentInput) -> StorageResult<Comment>;
}

struct ScriptedColumns {
    inner: InMemoryColumnRepository,
    saves: Arc<MockColumnSaves>,
}

impl TransactionScoped for ScriptedColumns {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            inner: self.inner.with_transaction(transaction),
            saves: Arc::clone(&self.saves),
        }
    }
}

#[async_trait]
impl ColumnRepository for ScriptedColumns {
    async fn save(&self, input: &ColumnInput, _now: DateTime<Utc>) -> StorageResult<Column> {
        self.saves.save(input)
    }

    async fn find_one_by_id(&self, id: ColumnId) -> StorageResult<Column> {
        self.inner.find_one_by_id(id).await
    }

    async fn find(&self, demand: &ColumnDemand) -> StorageResult<Vec<Column>> {
        self.inner.find(demand).await
    }

    async fn update(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Column> {
        self.inner.update(id, changes, now).await
    }

    async fn delete(&self, id: ColumnId) -> StorageResult<()> {
        self.inner.delete(id).await
    }

    async fn count_by_board(&self, board: BoardId) -> StorageResult<u64> {
        self.inner.count_by_board(board).await
    }

    async fn find_left_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        self.inner.find_left_neighbour(column).await
    }

    async fn find_right_neighbour(&self, column: &Column) -> StorageResult<Option<Column>> {
        self.inner.find_right_neighbour(column).await
    }
}

struct ScriptedComments {
    inner: InMemoryCommentRepository,
    saves: Arc<MockCommentSaves>,
}

impl TransactionScoped for ScriptedComments {
    type Transaction = InMemoryTransaction;

    fn with_transaction(&self, transaction: &InMemoryTransaction) -> Self {
        Self {
            inner: self.inner.with_transaction(transaction),
            saves: Arc::clone(&self.saves),
        }
    }
}

#[async_trait]
impl CommentRepository for ScriptedComments {
    async fn save(&self, input: &CommentInput, _now: DateTime<Utc>) -> StorageResult<Comment> {
        self.saves.save(input)
    }

    async fn find_one_by_id(&self, id: CommentId) -> StorageResult<Comment> {
        self.inner.find_one_by_id(id).await
    }

    async fn find(&self, demand: &CommentDemand) -> StorageResult<Vec<Comment>> {
        self.inner.find(demand).await
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<Comment> {
        self.inner.update(id, changes, now).await
    }

    async fn delete(&self, id: CommentId) -> StorageResult<()> {
        self.inner.delete(id).await
    }
}

struct ScriptedBackend;

impl StorageBackend for ScriptedBackend {
    type Transaction = InMemoryTransaction;
    type Coordinator = InMemoryStore;
    type Boards = InMemoryBoardRepository;
    type Columns = ScriptedColumns;
    type Tasks = InMemoryTaskRepository;
    type Comments = ScriptedComments;
}

fn scripted_ports(
    store: &InMemoryStore,
    column_saves: MockColumnSaves,
    comment_saves: MockCommentSaves,
) -> StoragePorts<ScriptedBackend> {
    StoragePorts::new(
        store.clone(),
        InMemoryBoardRepository::new(store),
        ScriptedColumns {
            inner: InMemoryColumnRepository::new(store),
            saves: Arc::new(column_saves),
        },
        InMemoryTaskRepository::new(store),
        ScriptedComments {
            inner: InMemoryCommentRepository::new(store),
            saves: Arc::new(comment_saves),
        },
    )
}

fn stored_comment(input: &CommentInput) -> Comment {
    let now = Utc::now();
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::new(1),
        text: input.text.clone(),
        task: input.task,
        created_at: now,
        updated_at: now,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_is_rolled_back_when_default_column_fails() {
    let store = InMemoryStore::new();
    let mut column_saves = MockColumnSaves::new();
    column_saves
        .expect_save()
        .times(1)
        .returning(|_| Err(StorageError::persistence(std::io::Error::other("disk full"))));
    let service = BoardService::new(
        scripted_ports(&store, column_saves, MockCommentSaves::new()),
        Arc::new(DefaultClock),
    );

    let err = service
        .create(&BoardInput::new("Roadmap"))
        .await
        .expect_err("column write fails");

    assert_eq!(err.kind(), ErrorKind::Internal);
    let boards = service.find().await.expect("listing should succeed");
    assert!(boards.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_column_is_saved_for_the_new_board() {
    let store = InMemoryStore::new();
    let mut column_saves = MockColumnSaves::new();
    column_saves
        .expect_save()
        .withf(|input| input.name == "Default" && input.board == BoardId::new(1))
        .times(1)
        .returning(|_| Err(StorageError::BoardRelation));
    let service = BoardService::new(
        scripted_ports(&store, column_saves, MockCommentSaves::new()),
        Arc::new(DefaultClock),
    );

    let err = service
        .create(&BoardInput::new("Roadmap"))
        .await
        .expect_err("scripted column write fails");

    assert!(matches!(
        err,
        ServiceError::Storage(StorageError::BoardRelation)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_comment_never_reaches_storage() {
    let store = InMemoryStore::new();
    let mut comment_saves = MockCommentSaves::new();
    comment_saves.expect_save().never();
    let service = CommentService::new(
        scripted_ports(&store, MockColumnSaves::new(), comment_saves),
        Arc::new(DefaultClock),
    );

    let err = service
        .create(&CommentInput::new("", TaskId::new(1)))
        .await
        .expect_err("empty text is invalid");

    let errors = err.validation_errors().expect("validation errors attached");
    assert_eq!(errors.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storage_errors_pass_through_unchanged() {
    let store = InMemoryStore::new();
    let mut comment_saves = MockCommentSaves::new();
    comment_saves
        .expect_save()
        .times(1)
        .returning(|_| Err(StorageError::TaskRelation));
    let service = CommentService::new(
        scripted_ports(&store, MockColumnSaves::new(), comment_saves),
        Arc::new(DefaultClock),
    );

    let err = service
        .create(&CommentInput::new("hello", TaskId::new(8)))
        .await
        .expect_err("scripted relation failure");

    assert!(matches!(err, ServiceError::Storage(StorageError::TaskRelation)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn valid_comment_is_handed_to_storage_as_given() {
    let store = InMemoryStore::new();
    let mut comment_saves = MockCommentSaves::new();
    comment_saves
        .expect_save()
        .withf(|input| input.text == "hello" && input.task == TaskId::new(8))
        .times(1)
        .returning(|input| Ok(stored_comment(input)));
    let service = CommentService::new(
        scripted_ports(&store, MockColumnSaves::new(), comment_saves),
        Arc::new(DefaultClock),
    );

    let comment = service
        .create(&CommentInput::new("hello", TaskId::new(8)))
        .await
        .expect("scripted save succeeds");

    assert_eq!(comment.text(), "hello");
    assert_eq!(comment.task(), TaskId::new(8));
}
