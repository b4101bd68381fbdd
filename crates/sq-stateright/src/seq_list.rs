//! Stateright model for the sequential list.
//!
//! Every state pairs a real [`SequentialList`] with a reference `Vec<i32>`
//! that is updated with `Vec::insert` / `Vec::remove` only when the
//! operation is valid. Actions cover valid *and* invalid positions, so the
//! checker explores every accept/reject path up to the capacity.

use sq_core::ListError;
use sq_list::SequentialList;
use stateright::Model;

/// State of the list model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListState<const N: usize> {
    /// The implementation under test
    pub list: SequentialList<N>,
    /// What the list should contain
    pub reference: Vec<i32>,
    /// Rejection reason of the most recent action, if it was rejected
    pub last_error: Option<ListError>,
    /// Set once a rejected action modified the list
    pub rejection_mutated: bool,
    /// Set once a delete returned something other than the stored element
    pub delete_mismatched: bool,
}

impl<const N: usize> ListState<N> {
    /// Empty list and empty reference.
    pub fn new() -> Self {
        Self {
            list: SequentialList::new(),
            reference: Vec::new(),
            last_error: None,
            rejection_mutated: false,
            delete_mismatched: false,
        }
    }

    // ========== Invariants ==========

    /// The list holds exactly the reference contents.
    pub fn matches_reference(&self) -> bool {
        self.list.as_slice() == self.reference.as_slice()
    }

    pub fn length_within_capacity(&self) -> bool {
        self.list.len() <= N
    }

    /// Search returns the first matching reference position, or 0.
    pub fn locate_finds_first(&self, values: &[i32]) -> bool {
        values.iter().all(|&v| {
            let expected = self
                .reference
                .iter()
                .position(|&x| x == v)
                .map_or(0, |i| i + 1);
            self.list.locate_elem(v) == expected
        })
    }

    /// Combined invariant check.
    pub fn invariants_hold(&self, values: &[i32]) -> bool {
        self.matches_reference()
            && self.length_within_capacity()
            && self.locate_finds_first(values)
            && !self.rejection_mutated
            && !self.delete_mismatched
    }
}

impl<const N: usize> Default for ListState<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Operations the model can apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListAction {
    Init,
    Insert { position: usize, value: i32 },
    Delete { position: usize },
}

/// Model for bounded model checking of a list with capacity `N`.
pub struct ListModel<const N: usize> {
    /// Values that may be inserted
    pub values: Vec<i32>,
    /// Largest position tried; anything past `len + 1` is invalid
    pub position_max: usize,
}

impl<const N: usize> ListModel<N> {
    /// Create a model inserting the given values.
    ///
    /// Positions range over `0..=N + 1`, which includes both invalid ends.
    pub fn new(values: Vec<i32>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(N <= 6, "Model checking large capacities is slow");

        Self {
            values,
            position_max: N + 1,
        }
    }
}

impl<const N: usize> Model for ListModel<N> {
    type State = ListState<N>;
    type Action = ListAction;

    fn init_states(&self) -> Vec<Self::State> {
        vec![ListState::new()]
    }

    fn actions(&self, _state: &Self::State, actions: &mut Vec<Self::Action>) {
        actions.push(ListAction::Init);
        for position in 0..=self.position_max {
            for &value in &self.values {
                actions.push(ListAction::Insert { position, value });
            }
            actions.push(ListAction::Delete { position });
        }
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        let mut next = state.clone();
        let before = state.list.clone();
        let len = next.reference.len();

        match action {
            ListAction::Init => {
                next.list.init();
                next.reference.clear();
                next.last_error = None;
            }

            ListAction::Insert { position, value } => {
                match next.list.insert(position, value) {
                    Ok(()) => next.last_error = None,
                    Err(e) => {
                        next.last_error = Some(e);
                        next.rejection_mutated |= next.list != before;
                    }
                }
                if (1..=len + 1).contains(&position) && len < N {
                    next.reference.insert(position - 1, value);
                }
            }

            ListAction::Delete { position } => {
                let expected = if (1..=len).contains(&position) {
                    Some(next.reference.remove(position - 1))
                } else {
                    None
                };
                match next.list.delete(position) {
                    Ok(removed) => {
                        next.last_error = None;
                        next.delete_mismatched |= expected != Some(removed);
                    }
                    Err(e) => {
                        next.last_error = Some(e);
                        next.rejection_mutated |= next.list != before;
                    }
                }
            }
        }

        Some(next)
    }

    fn properties(&self) -> Vec<stateright::Property<Self>> {
        vec![
            stateright::Property::always("MatchesReference", |_model: &Self, state: &Self::State| {
                state.matches_reference()
            }),
            stateright::Property::always(
                "LengthWithinCapacity",
                |_model: &Self, state: &Self::State| state.length_within_capacity(),
            ),
            stateright::Property::always(
                "RejectionsLeaveStateUnchanged",
                |_model: &Self, state: &Self::State| !state.rejection_mutated,
            ),
            stateright::Property::always(
                "DeleteReturnsStored",
                |_model: &Self, state: &Self::State| !state.delete_mismatched,
            ),
            stateright::Property::always("LocateFindsFirst", |model: &Self, state: &Self::State| {
                state.locate_finds_first(&model.values)
            }),
            stateright::Property::sometimes("ReachesCapacity", |_model: &Self, state: &Self::State| {
                state.list.is_full()
            }),
            stateright::Property::sometimes(
                "RejectsOnFullList",
                |_model: &Self, state: &Self::State| {
                    matches!(state.last_error, Some(ListError::CapacityExhausted { .. }))
                },
            ),
        ]
    }
}
