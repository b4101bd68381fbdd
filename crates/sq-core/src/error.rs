//! Errors returned by sequential list operations.

/// Reason a list operation was rejected.
///
/// A rejected operation never modifies the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ListError {
    #[error("position {position} out of range 1..={valid_max}")]
    PositionOutOfRange { position: usize, valid_max: usize },

    #[error("list is full (capacity {capacity})")]
    CapacityExhausted { capacity: usize },

    #[error("list is empty")]
    Empty,
}

/// Result alias for list operations.
pub type ListResult<T> = Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ListError::PositionOutOfRange {
            position: 7,
            valid_max: 3,
        };
        assert_eq!(err.to_string(), "position 7 out of range 1..=3");

        let err = ListError::CapacityExhausted { capacity: 50 };
        assert_eq!(err.to_string(), "list is full (capacity 50)");

        assert_eq!(ListError::Empty.to_string(), "list is empty");
    }
}
