//! Allow-listed equality filters scoping `find` queries.
//!
//! A demand maps a filter key to an unsigned integer. Each entity declares a
//! closed set of keys; anything else is rejected when it is added, so storage
//! adapters only ever see keys they know how to translate.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use thiserror::Error;

/// Filter key selecting records that belong to a board.
pub const BOARD_FILTER: &str = "board";

/// Filter key selecting records that belong to a column.
pub const COLUMN_FILTER: &str = "column";

/// Filter key selecting records that belong to a task.
pub const TASK_FILTER: &str = "task";

/// Error returned when a filter key is outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter demand is not allowed")]
pub struct FilterNotAllowed {
    key: String,
}

impl FilterNotAllowed {
    /// Returns the rejected key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Closed set of filter keys accepted for one entity type.
pub trait FilterSet {
    /// Keys accepted by [`Demand::add`].
    const ALLOWED: &'static [&'static str];
}

/// Filters accepted when listing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFilters;

impl FilterSet for ColumnFilters {
    const ALLOWED: &'static [&'static str] = &[BOARD_FILTER];
}

/// Filters accepted when listing tasks. `board` is resolved through the
/// task's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilters;

impl FilterSet for TaskFilters {
    const ALLOWED: &'static [&'static str] = &[BOARD_FILTER, COLUMN_FILTER];
}

/// Filters accepted when listing comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentFilters;

impl FilterSet for CommentFilters {
    const ALLOWED: &'static [&'static str] = &[TASK_FILTER];
}

/// Equality constraints for a `find` query over one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demand<F> {
    constraints: BTreeMap<&'static str, u64>,
    filters: PhantomData<F>,
}

/// Demand accepted by column listings.
pub type ColumnDemand = Demand<ColumnFilters>;

/// Demand accepted by task listings.
pub type TaskDemand = Demand<TaskFilters>;

/// Demand accepted by comment listings.
pub type CommentDemand = Demand<CommentFilters>;

impl<F: FilterSet> Demand<F> {
    /// Creates an empty demand matching every record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            constraints: BTreeMap::new(),
            filters: PhantomData,
        }
    }

    /// Builds a demand from raw key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`FilterNotAllowed`] for the first key outside the allow-list.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, FilterNotAllowed>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut demand = Self::new();
        for (key, value) in pairs {
            demand.add(key.as_ref(), value)?;
        }
        Ok(demand)
    }

    /// Adds an equality constraint, replacing any previous value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterNotAllowed`] when `key` is not in the allow-list.
    pub fn add(&mut self, key: &str, value: u64) -> Result<(), FilterNotAllowed> {
        let allowed = F::ALLOWED
            .iter()
            .copied()
            .find(|candidate| *candidate == key)
            .ok_or_else(|| FilterNotAllowed {
                key: key.to_owned(),
            })?;
        self.constraints.insert(allowed, value);
        Ok(())
    }

    /// Chaining form of [`Demand::add`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterNotAllowed`] when `key` is not in the allow-list.
    pub fn with(mut self, key: &str, value: u64) -> Result<Self, FilterNotAllowed> {
        self.add(key, value)?;
        Ok(self)
    }

    /// Returns the constraint value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.constraints.get(key).copied()
    }

    /// Returns `true` when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates constraints in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.constraints.iter().map(|(key, value)| (*key, *value))
    }
}

impl<F: FilterSet> Default for Demand<F> {
    fn default() -> Self {
        Self::new()
    }
}
