//! History-recording wrapper around [`SequentialList`].

use std::ops::Deref;

use sq_core::{ListHistory, ListProperties, ListResult};

use crate::sequential_list::SequentialList;

/// A [`SequentialList`] that records every mutation, accepted or rejected.
///
/// Read access goes through `Deref`; mutation only through the recording
/// methods, so the history always covers every change to the list.
#[derive(Debug, Clone, Default)]
pub struct TrackedList<const CAPACITY: usize> {
    list: SequentialList<CAPACITY>,
    history: ListHistory,
}

impl<const CAPACITY: usize> TrackedList<CAPACITY> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: SequentialList::new(),
            history: ListHistory::new(),
        }
    }

    pub fn init(&mut self) {
        self.list.init();
        self.history.record_init();
    }

    pub fn insert(&mut self, position: usize, value: i32) -> ListResult<()> {
        let outcome = self.list.insert(position, value);
        self.history.record_insert(position, value, outcome);
        outcome
    }

    pub fn delete(&mut self, position: usize) -> ListResult<i32> {
        let outcome = self.list.delete(position);
        self.history.record_delete(position, outcome);
        outcome
    }

    /// The underlying list.
    #[must_use]
    pub fn list(&self) -> &SequentialList<CAPACITY> {
        &self.list
    }
}

impl<const CAPACITY: usize> Deref for TrackedList<CAPACITY> {
    type Target = SequentialList<CAPACITY>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl<const CAPACITY: usize> ListProperties for TrackedList<CAPACITY> {
    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn current_contents(&self) -> Vec<i32> {
        self.list.as_slice().to_vec()
    }

    fn history(&self) -> &ListHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_core::{ListError, ListOpType, ListPropertyChecker, PropertyChecker};

    #[test]
    fn test_records_accepted_and_rejected() {
        let mut tracked = TrackedList::<2>::new();
        tracked.insert(1, 1).unwrap();
        tracked.insert(2, 2).unwrap();
        assert_eq!(
            tracked.insert(1, 3),
            Err(ListError::CapacityExhausted { capacity: 2 })
        );
        assert_eq!(tracked.delete(1), Ok(1));

        let ops: Vec<ListOpType> = tracked
            .history()
            .operations
            .iter()
            .map(|op| op.op_type)
            .collect();
        assert_eq!(
            ops,
            vec![
                ListOpType::Insert,
                ListOpType::Insert,
                ListOpType::InsertRejected,
                ListOpType::Delete,
            ]
        );
        assert_eq!(tracked.history().operations[3].value, Some(1));
    }

    #[test]
    fn test_reference_scenario_passes_all() {
        let mut tracked = TrackedList::<50>::new();
        for i in 1..=10 {
            tracked.insert(i, i as i32).unwrap();
        }
        tracked.insert(3, 1).unwrap();
        assert_eq!(tracked.delete(3), Ok(1));
        assert!(tracked.delete(11).is_err());

        // Read access through Deref.
        assert_eq!(tracked.len(), 10);
        assert_eq!(tracked.locate_elem(10), 10);

        let checker = ListPropertyChecker::new(&tracked);
        assert!(checker.all_hold(), "{}", checker.summary().format_report());
    }

    #[test]
    fn test_init_recorded() {
        let mut tracked = TrackedList::<4>::new();
        tracked.insert(1, 5).unwrap();
        tracked.init();
        assert!(tracked.is_empty());
        assert_eq!(tracked.delete(1), Err(ListError::Empty));

        let checker = ListPropertyChecker::new(&tracked);
        assert!(checker.all_hold(), "{}", checker.summary().format_report());
    }
}
