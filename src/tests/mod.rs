//! Unit tests for the task board crate.
//!
//! Services run against the in-memory backend; scripted repositories cover
//! the failure paths the in-memory tables cannot produce on demand.

mod mock_repository_tests;
