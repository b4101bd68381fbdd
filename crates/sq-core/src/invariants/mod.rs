//! Invariant traits for verified data structures.
//!
//! Each module defines the properties that implementations must satisfy.

pub mod seq_list;

pub use seq_list::{ListHistory, ListOpType, ListOperation, ListProperties, ListPropertyChecker};
