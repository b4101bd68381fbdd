//! Counterexamples for property violations.
//!
//! A counterexample is the sequence of list states leading up to a
//! violation, plus the DST seed (if any) that reproduces it.

use std::fmt::Write as _;

/// Snapshot of the list at one step of a counterexample trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Step number (1-based, in history order)
    pub step: u64,
    /// What happened at this step
    pub description: String,
    /// Named values observed at this step
    pub variables: Vec<(String, String)>,
}

/// Trace showing how to reach a property violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counterexample {
    /// Seed that reproduces the run, when it came from a DST run
    pub dst_seed: Option<u64>,
    /// States in step order
    pub states: Vec<StateSnapshot>,
}

/// Upper bound on recorded states; longer traces keep only the tail.
const STATES_COUNT_MAX: usize = 1_000;

impl Counterexample {
    /// Create an empty counterexample with no seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dst_seed: None,
            states: Vec::new(),
        }
    }

    /// Create an empty counterexample reproducible via `DST_SEED=<seed>`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            dst_seed: Some(seed),
            states: Vec::new(),
        }
    }

    /// Append a state to the trace.
    pub fn add_state(&mut self, state: StateSnapshot) {
        debug_assert!(
            self.states.last().map_or(true, |s| s.step <= state.step),
            "States must be added in step order"
        );

        if self.states.len() == STATES_COUNT_MAX {
            self.states.remove(0);
        }
        self.states.push(state);
    }

    /// Render the trace as a step diagram.
    ///
    /// ```text
    /// DST_SEED=42
    /// [step 3] insert(3, 1) accepted
    ///     contents = [1, 2, 1]
    /// ```
    #[must_use]
    pub fn render_diagram(&self) -> String {
        let mut out = String::new();

        if let Some(seed) = self.dst_seed {
            let _ = writeln!(out, "DST_SEED={seed}");
        }

        for state in &self.states {
            let _ = writeln!(out, "[step {}] {}", state.step, state.description);
            for (name, value) in &state.variables {
                let _ = writeln!(out, "    {name} = {value}");
            }
        }

        out
    }
}
