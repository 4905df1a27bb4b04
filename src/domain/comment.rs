//! Comment entity and its input records.

use super::{CommentId, TaskId};
use crate::validation::{FieldRules, Rule, Validatable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text note attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    text: String,
    task: TaskId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Storage-assigned identifier.
    pub id: CommentId,
    /// Comment body.
    pub text: String,
    /// Task the comment belongs to.
    pub task: TaskId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            task: data.task,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Fields required to create a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentInput {
    /// Comment body, 1 to 5000 characters.
    pub text: String,
    /// Task the comment belongs to.
    pub task: TaskId,
}

impl CommentInput {
    /// Creates a comment input.
    #[must_use]
    pub fn new(text: impl Into<String>, task: TaskId) -> Self {
        Self {
            text: text.into(),
            task,
        }
    }
}

impl Validatable for CommentInput {
    const RULES: &'static [FieldRules] = &[
        FieldRules::new("text", &[Rule::MinLength(1), Rule::MaxLength(5000)]),
        FieldRules::new("task", &[Rule::NumericRequired]),
    ];
}

/// Replacement text for an existing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentChanges {
    /// New comment body, 1 to 5000 characters.
    pub text: String,
}

impl CommentChanges {
    /// Creates a comment replacement.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Validatable for CommentChanges {
    const RULES: &'static [FieldRules] = &[FieldRules::new(
        "text",
        &[Rule::MinLength(1), Rule::MaxLength(5000)],
    )];
}
