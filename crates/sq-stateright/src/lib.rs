//! # sq-stateright
//!
//! Stateright model that checks the sequential list exhaustively against
//! a reference `Vec`, for small capacities and value sets.

pub mod seq_list;

pub use seq_list::{ListAction, ListModel, ListState};
