//! Surrogate identifiers for persisted kanban records.
//!
//! Every table is keyed by a storage-assigned integer. The newtypes keep a
//! column identifier from being passed where a task identifier is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a storage-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(
    /// Identifier of a board.
    BoardId
);

surrogate_id!(
    /// Identifier of a column.
    ColumnId
);

surrogate_id!(
    /// Identifier of a task.
    TaskId
);

surrogate_id!(
    /// Identifier of a comment.
    CommentId
);
