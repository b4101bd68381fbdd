//! Fixed-capacity sequential list.
//!
//! Elements live in an inline `[i32; CAPACITY]` array. Callers address them
//! by 1-based logical position; the translation `index = position - 1`
//! happens at the API boundary and nowhere else.
//!
//! # Example
//!
//! ```rust
//! use sq_list::SqList;
//!
//! let mut list = SqList::new();
//! for i in 1..=10 {
//!     list.insert(i, i as i32).unwrap();
//! }
//! list.insert(3, 1).unwrap();
//! assert_eq!(list.delete(3), Ok(1));
//! assert_eq!(list.to_string(), "1 2 3 4 5 6 7 8 9 10");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use sq_core::{ListError, ListResult, DEFAULT_CAPACITY, NOT_FOUND};
use tracing::trace;

/// Ordered sequence of at most `CAPACITY` integers.
///
/// Positions `[0, len)` of the backing array are valid; the rest is stale
/// and never observable (equality, hashing and formatting see only the
/// valid prefix).
#[derive(Clone)]
pub struct SequentialList<const CAPACITY: usize> {
    data: [i32; CAPACITY],
    length: usize,
}

/// Sequential list with the default capacity of 50.
pub type SqList = SequentialList<DEFAULT_CAPACITY>;

impl<const CAPACITY: usize> SequentialList<CAPACITY> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; CAPACITY],
            length: 0,
        }
    }

    /// Build a list holding `values` in order.
    ///
    /// # Errors
    ///
    /// `CapacityExhausted` if `values` does not fit.
    pub fn from_slice(values: &[i32]) -> ListResult<Self> {
        if values.len() > CAPACITY {
            return Err(ListError::CapacityExhausted { capacity: CAPACITY });
        }
        let mut list = Self::new();
        list.data[..values.len()].copy_from_slice(values);
        list.length = values.len();
        Ok(list)
    }

    /// Reset to the empty list. Stale storage is left in place.
    pub fn init(&mut self) {
        self.length = 0;
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.length == CAPACITY
    }

    /// Valid elements in position order.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.data[..self.length]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.as_slice().iter()
    }

    /// Insert `value` so that it ends up at logical `position`.
    ///
    /// Elements at `position..=len` move up one slot. Valid positions are
    /// `1..=len + 1`; `len + 1` appends.
    ///
    /// # Errors
    ///
    /// - `PositionOutOfRange` if `position` is outside `1..=len + 1`
    /// - `CapacityExhausted` if the list is full
    ///
    /// The list is unchanged on error.
    pub fn insert(&mut self, position: usize, value: i32) -> ListResult<()> {
        if position < 1 || position > self.length + 1 {
            trace!(position, length = self.length, "insert rejected: position out of range");
            return Err(ListError::PositionOutOfRange {
                position,
                valid_max: self.length + 1,
            });
        }
        if self.length == CAPACITY {
            trace!(position, capacity = CAPACITY, "insert rejected: list full");
            return Err(ListError::CapacityExhausted { capacity: CAPACITY });
        }

        let index = position - 1;
        self.data.copy_within(index..self.length, index + 1);
        self.data[index] = value;
        self.length += 1;

        debug_assert!(self.length <= CAPACITY);
        Ok(())
    }

    /// Remove and return the element at logical `position`.
    ///
    /// Elements after it move down one slot.
    ///
    /// # Errors
    ///
    /// - `Empty` if there is nothing to delete
    /// - `PositionOutOfRange` if `position` is outside `1..=len`
    ///
    /// The list is unchanged on error.
    pub fn delete(&mut self, position: usize) -> ListResult<i32> {
        if self.length == 0 {
            trace!(position, "delete rejected: list empty");
            return Err(ListError::Empty);
        }
        if position < 1 || position > self.length {
            trace!(position, length = self.length, "delete rejected: position out of range");
            return Err(ListError::PositionOutOfRange {
                position,
                valid_max: self.length,
            });
        }

        let index = position - 1;
        let removed = self.data[index];
        self.data.copy_within(position..self.length, index);
        self.length -= 1;

        Ok(removed)
    }

    /// Element at logical `position`.
    ///
    /// # Errors
    ///
    /// `PositionOutOfRange` if `position` is outside `1..=len`.
    pub fn get_elem(&self, position: usize) -> ListResult<i32> {
        position
            .checked_sub(1)
            .and_then(|index| self.as_slice().get(index))
            .copied()
            .ok_or(ListError::PositionOutOfRange {
                position,
                valid_max: self.length,
            })
    }

    /// 1-based position of the first element equal to `value`.
    #[must_use]
    pub fn position_of(&self, value: i32) -> Option<usize> {
        self.iter().position(|&x| x == value).map(|index| index + 1)
    }

    /// Like [`position_of`](Self::position_of), but returns
    /// [`NOT_FOUND`] (0) when `value` is absent.
    #[must_use]
    pub fn locate_elem(&self, value: i32) -> usize {
        self.position_of(value).unwrap_or(NOT_FOUND)
    }
}

impl<const CAPACITY: usize> Default for SequentialList<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> PartialEq for SequentialList<CAPACITY> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const CAPACITY: usize> Eq for SequentialList<CAPACITY> {}

impl<const CAPACITY: usize> Hash for SequentialList<CAPACITY> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<const CAPACITY: usize> fmt::Debug for SequentialList<CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialList")
            .field("capacity", &CAPACITY)
            .field("elements", &self.as_slice())
            .finish()
    }
}

/// Space-separated elements, e.g. `1 2 3`.
impl<const CAPACITY: usize> fmt::Display for SequentialList<CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<'a, const CAPACITY: usize> IntoIterator for &'a SequentialList<CAPACITY> {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_ten() -> SqList {
        let mut list = SqList::new();
        for i in 1..=10 {
            list.insert(i, i as i32).unwrap();
        }
        list
    }

    #[test]
    fn test_new_is_empty() {
        let list = SqList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(!list.is_full());
        assert_eq!(list.capacity(), 50);
        assert_eq!(list.as_slice(), &[] as &[i32]);
    }

    #[test]
    fn test_reference_scenario() {
        let mut list = one_to_ten();
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(list.len(), 10);

        list.insert(3, 1).unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 1, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(list.len(), 11);

        let removed = list.delete(3).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn test_insert_head_middle_tail() {
        let mut list = SequentialList::<8>::from_slice(&[2, 4]).unwrap();

        list.insert(1, 1).unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 4]);

        list.insert(3, 3).unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 3, 4]);

        list.insert(5, 5).unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);

        for position in 1..=list.len() {
            assert_eq!(list.get_elem(position), Ok(position as i32));
        }
    }

    #[test]
    fn test_insert_rejects_bad_position() {
        let mut list = SequentialList::<4>::from_slice(&[7, 8]).unwrap();
        let before = list.clone();

        assert_eq!(
            list.insert(0, 1),
            Err(ListError::PositionOutOfRange {
                position: 0,
                valid_max: 3
            })
        );
        assert_eq!(
            list.insert(4, 1),
            Err(ListError::PositionOutOfRange {
                position: 4,
                valid_max: 3
            })
        );
        assert_eq!(list, before);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_insert_rejects_when_full() {
        let mut list = SequentialList::<3>::from_slice(&[1, 2, 3]).unwrap();
        assert!(list.is_full());

        for position in 1..=4 {
            assert_eq!(
                list.insert(position, 9),
                Err(ListError::CapacityExhausted { capacity: 3 })
            );
        }
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_position_checked_before_capacity() {
        let mut list = SequentialList::<2>::from_slice(&[1, 2]).unwrap();
        assert_eq!(
            list.insert(9, 0),
            Err(ListError::PositionOutOfRange {
                position: 9,
                valid_max: 3
            })
        );
    }

    #[test]
    fn test_delete_head_middle_tail() {
        let mut list = SequentialList::<8>::from_slice(&[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(list.delete(1), Ok(1));
        assert_eq!(list.as_slice(), &[2, 3, 4, 5]);

        assert_eq!(list.delete(2), Ok(3));
        assert_eq!(list.as_slice(), &[2, 4, 5]);

        assert_eq!(list.delete(3), Ok(5));
        assert_eq!(list.as_slice(), &[2, 4]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_delete_rejects() {
        let mut empty = SequentialList::<4>::new();
        assert_eq!(empty.delete(1), Err(ListError::Empty));
        assert_eq!(empty.delete(0), Err(ListError::Empty));

        let mut list = SequentialList::<4>::from_slice(&[1, 2]).unwrap();
        assert_eq!(
            list.delete(0),
            Err(ListError::PositionOutOfRange {
                position: 0,
                valid_max: 2
            })
        );
        assert_eq!(
            list.delete(3),
            Err(ListError::PositionOutOfRange {
                position: 3,
                valid_max: 2
            })
        );
        assert_eq!(list.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_insert_then_delete_round_trip() {
        let original = SequentialList::<6>::from_slice(&[10, 20, 30]).unwrap();

        for position in 1..=original.len() + 1 {
            let mut list = original.clone();
            list.insert(position, 99).unwrap();
            assert_eq!(list.get_elem(position), Ok(99));
            assert_eq!(list.delete(position), Ok(99));
            assert_eq!(list, original);
        }
    }

    #[test]
    fn test_get_elem_bounds() {
        let list = SequentialList::<4>::from_slice(&[5, 6]).unwrap();
        assert_eq!(list.get_elem(1), Ok(5));
        assert_eq!(list.get_elem(2), Ok(6));
        assert_eq!(
            list.get_elem(0),
            Err(ListError::PositionOutOfRange {
                position: 0,
                valid_max: 2
            })
        );
        // Slot 3 exists in storage but is not a valid element.
        assert!(list.get_elem(3).is_err());
    }

    #[test]
    fn test_locate_elem() {
        let list = SequentialList::<8>::from_slice(&[4, 7, 4, 9]).unwrap();
        assert_eq!(list.locate_elem(4), 1);
        assert_eq!(list.locate_elem(9), 4);
        assert_eq!(list.locate_elem(5), NOT_FOUND);
        assert_eq!(list.position_of(7), Some(2));
        assert_eq!(list.position_of(5), None);
    }

    #[test]
    fn test_locate_ignores_stale_slots() {
        let mut list = SequentialList::<4>::from_slice(&[1, 2, 3]).unwrap();
        list.delete(3).unwrap();
        assert_eq!(list.locate_elem(3), NOT_FOUND);
    }

    #[test]
    fn test_init_resets_length() {
        let mut list = one_to_ten();
        list.init();
        assert!(list.is_empty());
        assert_eq!(list.locate_elem(1), NOT_FOUND);
        assert_eq!(list, SqList::new());

        list.insert(1, 42).unwrap();
        assert_eq!(list.as_slice(), &[42]);
    }

    #[test]
    fn test_equality_ignores_stale_storage() {
        let mut a = SequentialList::<4>::from_slice(&[1, 2, 3]).unwrap();
        a.delete(3).unwrap();
        let b = SequentialList::<4>::from_slice(&[1, 2]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_capacity() {
        let mut list = SequentialList::<0>::new();
        assert!(list.is_full());
        assert_eq!(
            list.insert(1, 1),
            Err(ListError::CapacityExhausted { capacity: 0 })
        );
        assert_eq!(list.delete(1), Err(ListError::Empty));
    }

    #[test]
    fn test_from_slice_too_long() {
        let result = SequentialList::<2>::from_slice(&[1, 2, 3]);
        assert_eq!(result, Err(ListError::CapacityExhausted { capacity: 2 }));
    }

    #[test]
    fn test_display_and_debug() {
        let list = SequentialList::<4>::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(list.to_string(), "1 2 3");
        assert_eq!(SequentialList::<4>::new().to_string(), "");
        assert_eq!(
            format!("{:?}", list),
            "SequentialList { capacity: 4, elements: [1, 2, 3] }"
        );
    }

    #[test]
    fn test_iter() {
        let list = SequentialList::<4>::from_slice(&[3, 1, 2]).unwrap();
        let collected: Vec<i32> = (&list).into_iter().copied().collect();
        assert_eq!(collected, vec![3, 1, 2]);
        assert_eq!(list.iter().sum::<i32>(), 6);
    }
}
