//! Reference scenario: fill a 50-slot list with 1..=10, insert 1 at
//! position 3, then delete position 3 again.

use std::process::ExitCode;

use serde::Serialize;
use sq_core::ListResult;
use sq_list::SqList;

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub action: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub length: usize,
    pub contents: Vec<i32>,
}

impl StepReport {
    fn new<T>(action: String, list: &SqList, outcome: ListResult<T>, removed: Option<i32>) -> Self {
        Self {
            action,
            ok: outcome.is_ok(),
            removed,
            error: outcome.err().map(|e| e.to_string()),
            length: list.len(),
            contents: list.as_slice().to_vec(),
        }
    }
}

/// Execute the scenario and return a report per step.
pub fn steps() -> Vec<StepReport> {
    let mut list = SqList::new();
    let mut reports = Vec::new();

    for i in 1..=10 {
        let outcome = list.insert(i, i as i32);
        reports.push(StepReport::new(format!("insert({i}, {i})"), &list, outcome, None));
    }

    let outcome = list.insert(3, 1);
    reports.push(StepReport::new("insert(3, 1)".to_string(), &list, outcome, None));

    let outcome = list.delete(3);
    reports.push(StepReport::new(
        "delete(3)".to_string(),
        &list,
        outcome,
        outcome.ok(),
    ));

    reports
}

pub fn run(json: bool) -> ExitCode {
    let reports = steps();

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            let contents: Vec<String> = report.contents.iter().map(i32::to_string).collect();
            match (report.removed, &report.error) {
                (_, Some(error)) => println!("{:<14} FAILED: {}", report.action, error),
                (Some(removed), None) => println!(
                    "{:<14} -> {} | {}",
                    report.action,
                    removed,
                    contents.join(" ")
                ),
                (None, None) => println!("{:<14} | {}", report.action, contents.join(" ")),
            }
        }
    }

    if reports.iter().all(|r| r.ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_steps() {
        let reports = steps();
        assert_eq!(reports.len(), 12);
        assert!(reports.iter().all(|r| r.ok));

        assert_eq!(reports[9].contents, (1..=10).collect::<Vec<i32>>());
        assert_eq!(reports[10].contents, vec![1, 2, 1, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(reports[10].length, 11);

        let last = &reports[11];
        assert_eq!(last.action, "delete(3)");
        assert_eq!(last.removed, Some(1));
        assert_eq!(last.contents, (1..=10).collect::<Vec<i32>>());
        assert_eq!(last.length, 10);
    }

    #[test]
    fn test_report_json_shape() {
        let reports = steps();
        let value = serde_json::to_value(&reports[11]).unwrap();
        assert_eq!(value["action"], "delete(3)");
        assert_eq!(value["removed"], 1);
        assert!(value.get("error").is_none());
    }
}
