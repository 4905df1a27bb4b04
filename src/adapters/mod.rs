//! Storage adapters implementing the persistence ports.

pub mod constraints;
pub mod memory;
pub mod postgres;
