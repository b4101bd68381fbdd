//! Sequential list invariants.
//!
//! | Property | Description |
//! |----------|-------------|
//! | LengthWithinCapacity | `0 <= length <= capacity` |
//! | HistoryReplay | Replaying accepted operations into a `Vec` yields the current contents |
//! | RejectionsWereInvalid | Every rejected operation violated a precondition, with the matching reason |
//! | DeleteReturnsStored | Every delete returned the element stored at that position |

use crate::counterexample::{Counterexample, StateSnapshot};
use crate::error::ListError;
use crate::property::{PropertyChecker, PropertyResult};

/// Properties that any sequential list implementation must expose.
///
/// The checker verifies invariants against this state.
pub trait ListProperties {
    /// Fixed capacity of the list.
    fn capacity(&self) -> usize;

    /// Valid elements, in logical position order.
    fn current_contents(&self) -> Vec<i32>;

    /// Operation history, starting from an empty list.
    fn history(&self) -> &ListHistory;
}

/// History of list operations, in the order they were applied.
#[derive(Debug, Clone, Default)]
pub struct ListHistory {
    pub operations: Vec<ListOperation>,
}

/// A single recorded list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOperation {
    /// Step number for ordering
    pub step: u64,
    /// Type of operation
    pub op_type: ListOpType,
    /// 1-based logical position passed by the caller (0 for `Init`)
    pub position: usize,
    /// Inserted value, attempted value, or removed value
    pub value: Option<i32>,
    /// Rejection reason for rejected operations
    pub error: Option<ListError>,
}

/// Type of list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOpType {
    Init,
    Insert,
    InsertRejected,
    Delete,
    DeleteRejected,
}

impl ListOperation {
    /// Short human-readable form, e.g. `insert(3, 1) accepted`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.op_type {
            ListOpType::Init => "init".to_string(),
            ListOpType::Insert => format!(
                "insert({}, {}) accepted",
                self.position,
                self.value.unwrap_or_default()
            ),
            ListOpType::InsertRejected => format!(
                "insert({}, {}) rejected: {}",
                self.position,
                self.value.unwrap_or_default(),
                self.error.map(|e| e.to_string()).unwrap_or_default()
            ),
            ListOpType::Delete => format!(
                "delete({}) accepted, returned {}",
                self.position,
                self.value.unwrap_or_default()
            ),
            ListOpType::DeleteRejected => format!(
                "delete({}) rejected: {}",
                self.position,
                self.error.map(|e| e.to_string()).unwrap_or_default()
            ),
        }
    }
}

impl ListHistory {
    /// Create a new empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    fn step_next(&self) -> u64 {
        self.operations.len() as u64 + 1
    }

    /// Record a re-initialisation (length reset to 0).
    pub fn record_init(&mut self) {
        let step = self.step_next();
        self.operations.push(ListOperation {
            step,
            op_type: ListOpType::Init,
            position: 0,
            value: None,
            error: None,
        });
    }

    /// Record an insert attempt and its outcome.
    pub fn record_insert(&mut self, position: usize, value: i32, outcome: Result<(), ListError>) {
        let step = self.step_next();
        self.operations.push(ListOperation {
            step,
            op_type: if outcome.is_ok() {
                ListOpType::Insert
            } else {
                ListOpType::InsertRejected
            },
            position,
            value: Some(value),
            error: outcome.err(),
        });
    }

    /// Record a delete attempt and its outcome.
    pub fn record_delete(&mut self, position: usize, outcome: Result<i32, ListError>) {
        let step = self.step_next();
        let (value, error) = match outcome {
            Ok(removed) => (Some(removed), None),
            Err(e) => (None, Some(e)),
        };
        self.operations.push(ListOperation {
            step,
            op_type: if error.is_none() {
                ListOpType::Delete
            } else {
                ListOpType::DeleteRejected
            },
            position,
            value,
            error,
        });
    }

    /// Number of accepted inserts and deletes.
    #[must_use]
    pub fn accepted_count(&self) -> u64 {
        self.operations
            .iter()
            .filter(|op| matches!(op.op_type, ListOpType::Insert | ListOpType::Delete))
            .count() as u64
    }

    /// Number of rejected inserts and deletes.
    #[must_use]
    pub fn rejected_count(&self) -> u64 {
        self.operations
            .iter()
            .filter(|op| {
                matches!(
                    op.op_type,
                    ListOpType::InsertRejected | ListOpType::DeleteRejected
                )
            })
            .count() as u64
    }
}

/// Reason an insert must be rejected on a reference list of `len` elements.
fn expected_insert_rejection(len: usize, capacity: usize, position: usize) -> Option<ListError> {
    if position < 1 || position > len + 1 {
        Some(ListError::PositionOutOfRange {
            position,
            valid_max: len + 1,
        })
    } else if len == capacity {
        Some(ListError::CapacityExhausted { capacity })
    } else {
        None
    }
}

/// Reason a delete must be rejected on a reference list of `len` elements.
fn expected_delete_rejection(len: usize, position: usize) -> Option<ListError> {
    if len == 0 {
        Some(ListError::Empty)
    } else if position < 1 || position > len {
        Some(ListError::PositionOutOfRange {
            position,
            valid_max: len,
        })
    } else {
        None
    }
}

/// Property checker for sequential list implementations.
pub struct ListPropertyChecker<'a, T: ListProperties> {
    list: &'a T,
    dst_seed: Option<u64>,
}

impl<'a, T: ListProperties> ListPropertyChecker<'a, T> {
    /// Create a new checker for the given list.
    #[must_use]
    pub fn new(list: &'a T) -> Self {
        Self {
            list,
            dst_seed: None,
        }
    }

    /// Set DST seed for counterexample reproduction.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        debug_assert!(seed != 0, "DST seed should not be zero");
        self.dst_seed = Some(seed);
        self
    }

    fn counterexample(&self) -> Counterexample {
        match self.dst_seed {
            Some(seed) => Counterexample::with_seed(seed),
            None => Counterexample::new(),
        }
    }

    /// Replay the history against a reference `Vec`.
    ///
    /// `visit` sees each operation together with the reference contents
    /// *before* the operation is applied; returning `Some(violation)` stops
    /// the replay and turns it into a failing result for `name`.
    fn replay<F>(&self, name: &'static str, mut visit: F) -> Result<Vec<i32>, PropertyResult>
    where
        F: FnMut(&ListOperation, &[i32], usize) -> Option<String>,
    {
        let capacity = self.list.capacity();
        let mut model: Vec<i32> = Vec::with_capacity(capacity);

        for op in &self.list.history().operations {
            if let Some(violation) = visit(op, &model, capacity) {
                let mut ce = self.counterexample();
                ce.add_state(StateSnapshot {
                    step: op.step,
                    description: op.describe(),
                    variables: vec![
                        ("reference".to_string(), format!("{:?}", model)),
                        ("capacity".to_string(), capacity.to_string()),
                    ],
                });
                return Err(PropertyResult::fail(name, violation, Some(ce)));
            }

            match op.op_type {
                ListOpType::Init => model.clear(),
                ListOpType::Insert => {
                    if expected_insert_rejection(model.len(), capacity, op.position).is_none() {
                        model.insert(op.position - 1, op.value.unwrap_or_default());
                    }
                }
                ListOpType::Delete => {
                    if expected_delete_rejection(model.len(), op.position).is_none() {
                        model.remove(op.position - 1);
                    }
                }
                ListOpType::InsertRejected | ListOpType::DeleteRejected => {}
            }
        }

        Ok(model)
    }

    /// The list never holds more elements than its capacity.
    fn check_length_within_capacity(&self) -> PropertyResult {
        let length = self.list.current_contents().len();
        let capacity = self.list.capacity();

        if length > capacity {
            return PropertyResult::fail(
                "LengthWithinCapacity",
                format!("length {} exceeds capacity {}", length, capacity),
                None,
            );
        }

        PropertyResult::pass("LengthWithinCapacity")
    }

    /// Accepted operations were valid, and replaying them reproduces the
    /// current contents element for element.
    fn check_history_replay(&self) -> PropertyResult {
        let replayed = self.replay("HistoryReplay", |op, model, capacity| match op.op_type {
            ListOpType::Insert => expected_insert_rejection(model.len(), capacity, op.position)
                .map(|e| format!("accepted an insert that should fail: {}", e)),
            ListOpType::Delete => expected_delete_rejection(model.len(), op.position)
                .map(|e| format!("accepted a delete that should fail: {}", e)),
            _ => None,
        });

        let model = match replayed {
            Ok(model) => model,
            Err(result) => return result,
        };

        let contents = self.list.current_contents();
        if contents != model {
            let mut ce = self.counterexample();
            ce.add_state(StateSnapshot {
                step: self.list.history().operations.len() as u64,
                description: "end of history".to_string(),
                variables: vec![
                    ("contents".to_string(), format!("{:?}", contents)),
                    ("reference".to_string(), format!("{:?}", model)),
                ],
            });

            let violation = match contents.iter().zip(&model).position(|(a, b)| a != b) {
                Some(index) => format!(
                    "position {} holds {}, replay expects {}",
                    index + 1,
                    contents[index],
                    model[index]
                ),
                None => format!(
                    "length is {}, replay expects {}",
                    contents.len(),
                    model.len()
                ),
            };
            return PropertyResult::fail("HistoryReplay", violation, Some(ce));
        }

        PropertyResult::pass("HistoryReplay")
    }

    /// Rejected operations carried the reason the reference model predicts.
    fn check_rejections_were_invalid(&self) -> PropertyResult {
        let replayed = self.replay("RejectionsWereInvalid", |op, model, capacity| {
            let expected = match op.op_type {
                ListOpType::InsertRejected => {
                    expected_insert_rejection(model.len(), capacity, op.position)
                }
                ListOpType::DeleteRejected => expected_delete_rejection(model.len(), op.position),
                _ => return None,
            };

            match (expected, op.error) {
                (Some(want), Some(got)) if want == got => None,
                (None, _) => Some(format!("rejected a valid operation: {}", op.describe())),
                (Some(want), got) => Some(format!("rejected with {:?}, expected {:?}", got, want)),
            }
        });

        match replayed {
            Ok(_) => PropertyResult::pass("RejectionsWereInvalid"),
            Err(result) => result,
        }
    }

    /// Every accepted delete returned the element stored at its position.
    fn check_delete_returns_stored(&self) -> PropertyResult {
        let replayed = self.replay("DeleteReturnsStored", |op, model, _capacity| {
            if op.op_type != ListOpType::Delete {
                return None;
            }
            let stored = op.position.checked_sub(1).and_then(|i| model.get(i))?;
            match op.value {
                Some(removed) if removed == *stored => None,
                other => Some(format!(
                    "returned {:?}, position {} held {}",
                    other, op.position, stored
                )),
            }
        });

        match replayed {
            Ok(_) => PropertyResult::pass("DeleteReturnsStored"),
            Err(result) => result,
        }
    }
}

impl<T: ListProperties> PropertyChecker for ListPropertyChecker<'_, T> {
    fn check_all(&self) -> Vec<PropertyResult> {
        vec![
            self.check_length_within_capacity(),
            self.check_history_replay(),
            self.check_rejections_were_invalid(),
            self.check_delete_returns_stored(),
        ]
    }
}
