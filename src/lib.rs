//! Taskboard: transactional services for a Kanban-style task board.
//!
//! Boards contain columns, columns contain tasks and tasks contain
//! comments. This crate validates input, persists the four entities and
//! keeps multi-entity writes consistent under one unit of work.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: entities, input records and demand filters
//! - **Ports**: repository and transaction traits
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: validation, orchestration and error classification
//!
//! # Modules
//!
//! - [`validation`]: declarative field rules and the validator
//! - [`services`]: board, column, task and comment services
//! - [`config`]: environment-driven storage configuration

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
