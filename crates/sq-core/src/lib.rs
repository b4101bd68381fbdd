//! # sq-core
//!
//! Core types shared by the sequential list crates:
//!
//! - [`ListError`]: why an insert, delete or positional read was rejected
//! - [`PropertyResult`] / [`PropertyChecker`]: invariant checking vocabulary
//! - [`Counterexample`]: replayable description of a violation
//! - [`invariants`]: the properties every sequential list must satisfy

pub mod counterexample;
pub mod error;
pub mod invariants;
pub mod property;

pub use counterexample::{Counterexample, StateSnapshot};
pub use error::{ListError, ListResult};
pub use invariants::{
    ListHistory, ListOpType, ListOperation, ListProperties, ListPropertyChecker,
};
pub use property::{PropertyChecker, PropertyResult, PropertySummary};

/// Capacity used when none is given explicitly.
pub const DEFAULT_CAPACITY: usize = 50;

/// Sentinel returned by value search when no element matches.
///
/// Unambiguous because logical positions start at 1.
pub const NOT_FOUND: usize = 0;
