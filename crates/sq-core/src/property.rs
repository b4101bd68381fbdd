//! Property verification types.
//!
//! Every invariant checked against a list produces a [`PropertyResult`];
//! checkers bundle them behind the [`PropertyChecker`] trait.

use crate::counterexample::Counterexample;

/// Result of checking a single property.
#[derive(Debug, Clone)]
pub struct PropertyResult {
    /// Human-readable property name (e.g., "HistoryReplay")
    pub name: &'static str,

    /// Whether the property holds
    pub holds: bool,

    /// Description of violation if property doesn't hold
    pub violation: Option<String>,

    /// Trace showing how to reproduce the violation
    pub counterexample: Option<Counterexample>,
}

impl PropertyResult {
    /// Create a passing property result.
    #[must_use]
    pub fn pass(name: &'static str) -> Self {
        debug_assert!(!name.is_empty(), "Property name must not be empty");

        Self {
            name,
            holds: true,
            violation: None,
            counterexample: None,
        }
    }

    /// Create a failing property result.
    #[must_use]
    pub fn fail(
        name: &'static str,
        violation: String,
        counterexample: Option<Counterexample>,
    ) -> Self {
        debug_assert!(!name.is_empty(), "Property name must not be empty");
        debug_assert!(!violation.is_empty(), "Violation description must not be empty");

        Self {
            name,
            holds: false,
            violation: Some(violation),
            counterexample,
        }
    }

    /// History step at which the violation was observed, if traced.
    #[must_use]
    pub fn failing_step(&self) -> Option<u64> {
        self.counterexample
            .as_ref()
            .and_then(|ce| ce.states.last())
            .map(|state| state.step)
    }

    /// Format as a single-line status for logging, e.g.
    /// `[FAIL] HistoryReplay at step 4: position 2 holds 7, replay expects 1`.
    #[must_use]
    pub fn format_status(&self) -> String {
        if self.holds {
            return format!("[PASS] {}", self.name);
        }

        let violation = self.violation.as_deref().unwrap_or("unknown");
        match self.failing_step() {
            Some(step) => format!("[FAIL] {} at step {}: {}", self.name, step, violation),
            None => format!("[FAIL] {}: {}", self.name, violation),
        }
    }
}

/// Trait for verifying properties against a state.
///
/// Implementations provide the set of invariants that must hold
/// for a given data structure.
pub trait PropertyChecker {
    /// Check all properties and return results.
    ///
    /// Even passing properties are included for completeness.
    fn check_all(&self) -> Vec<PropertyResult>;

    /// Verify all properties, returning the first failure.
    fn verify_all(&self) -> Result<(), PropertyResult> {
        for result in self.check_all() {
            if !result.holds {
                return Err(result);
            }
        }
        Ok(())
    }

    /// Check if all properties hold.
    fn all_hold(&self) -> bool {
        self.check_all().iter().all(|r| r.holds)
    }

    /// Get a summary of all property check results.
    fn summary(&self) -> PropertySummary {
        let results = self.check_all();
        let passed = results.iter().filter(|r| r.holds).count() as u64;
        let failed = results.iter().filter(|r| !r.holds).count() as u64;
        let total = results.len() as u64;

        debug_assert!(passed + failed == total);

        PropertySummary {
            passed,
            failed,
            total,
            results,
        }
    }
}

/// Summary of property check results.
#[derive(Debug, Clone)]
pub struct PropertySummary {
    /// Number of properties that passed
    pub passed: u64,
    /// Number of properties that failed
    pub failed: u64,
    /// Total number of properties checked
    pub total: u64,
    /// Individual results
    pub results: Vec<PropertyResult>,
}

impl PropertySummary {
    /// Format as a report string.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = format!(
            "Property Check Summary: {}/{} passed\n",
            self.passed, self.total
        );

        for result in &self.results {
            report.push_str(&result.format_status());
            report.push('\n');
        }

        if let Some(failure) = self.results.iter().find(|r| !r.holds) {
            if let Some(ref ce) = failure.counterexample {
                report.push_str("\nCounterexample:\n");
                report.push_str(&ce.render_diagram());
            }
        }

        report
    }
}
