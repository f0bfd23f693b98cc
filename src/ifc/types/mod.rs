//! Foundational data structures, error types, and the reference model.

pub mod error;
pub mod models;
pub mod records;
pub mod reference;
pub mod sorts;
