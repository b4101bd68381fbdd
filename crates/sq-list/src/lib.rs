//! # sq-list
//!
//! Fixed-capacity sequential list of integers with 1-based positional
//! operations.
//!
//! - [`SequentialList`]: the list itself (`SqList` is the 50-slot default)
//! - [`TrackedList`]: wrapper that records every operation so the
//!   invariants from `sq-core` can be checked against it

pub mod sequential_list;
pub mod tracked;

pub use sequential_list::{SequentialList, SqList};
pub use tracked::TrackedList;
