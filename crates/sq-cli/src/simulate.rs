//! Seeded simulation run against a 50-slot tracked list.

use std::process::ExitCode;

use serde::Serialize;
use sq_core::{ListPropertyChecker, PropertyChecker, PropertySummary, DEFAULT_CAPACITY};
use sq_dst::{
    generate_seed, iterations_from_env, seed_from_env, DstEnv, DstStats, FaultConfig, SeedError,
    SimOp,
};
use sq_list::TrackedList;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub stats: DstStats,
    pub faults: FaultConfig,
    pub accepted: u64,
    pub rejected: u64,
    pub properties_passed: u64,
    pub properties_failed: u64,
    pub violations: Vec<String>,
    pub final_contents: Vec<i32>,
}

/// Apply `ops_count` generated operations to a fresh list.
pub fn simulate(
    seed: u64,
    ops_count: u64,
    config: FaultConfig,
) -> (TrackedList<DEFAULT_CAPACITY>, DstEnv) {
    let mut env = DstEnv::with_fault_config(seed, config);
    let mut list = TrackedList::<DEFAULT_CAPACITY>::new();

    for _ in 0..ops_count {
        let op = env.next_op(list.len(), DEFAULT_CAPACITY);
        match op {
            SimOp::Init => list.init(),
            SimOp::Insert { position, value } => {
                if let Err(e) = list.insert(position, value) {
                    debug!(?op, error = %e, "insert rejected");
                }
            }
            SimOp::Delete { position } => {
                if let Err(e) = list.delete(position) {
                    debug!(?op, error = %e, "delete rejected");
                }
            }
            SimOp::GetElem { position } => {
                let result = list.get_elem(position);
                debug!(?op, ?result, "get_elem");
            }
            SimOp::LocateElem { value } => {
                let found = list.locate_elem(value);
                debug!(?op, found, "locate_elem");
            }
        }
    }

    (list, env)
}

fn report(
    list: &TrackedList<DEFAULT_CAPACITY>,
    env: &DstEnv,
    config: FaultConfig,
    summary: &PropertySummary,
) -> SimulationReport {
    let history = sq_core::ListProperties::history(list);
    SimulationReport {
        stats: env.stats(),
        faults: config,
        accepted: history.accepted_count(),
        rejected: history.rejected_count(),
        properties_passed: summary.passed,
        properties_failed: summary.failed,
        violations: summary
            .results
            .iter()
            .filter(|r| !r.holds)
            .map(|r| r.format_status())
            .collect(),
        final_contents: list.as_slice().to_vec(),
    }
}

/// The `--seed` flag, else `DST_SEED`, else a random seed.
///
/// Zero is rejected whichever source it came from.
fn resolve_seed(flag: Option<u64>) -> Result<u64, SeedError> {
    let seed = match flag {
        Some(seed) => seed,
        None => match seed_from_env()? {
            Some(seed) => seed,
            None => generate_seed(),
        },
    };
    if seed == 0 {
        return Err(SeedError::Zero);
    }
    Ok(seed)
}

pub fn run(seed: Option<u64>, ops: Option<u64>, faults: &str, json: bool) -> ExitCode {
    let config = match FaultConfig::from_preset(faults) {
        Some(config) => config,
        None => {
            eprintln!("Error: unknown fault preset '{}'", faults);
            eprintln!("Expected one of: none, default, aggressive");
            return ExitCode::FAILURE;
        }
    };

    let seed = match resolve_seed(seed) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let ops_count = ops.unwrap_or_else(iterations_from_env);

    info!(seed, ops_count, faults, "starting simulation");
    let (list, env) = simulate(seed, ops_count, config.clone());

    let checker = ListPropertyChecker::new(&list).with_seed(seed);
    let summary = checker.summary();
    let report = report(&list, &env, config, &summary);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", summary.format_report());
        println!("{}", report.stats);
        println!(
            "accepted={} rejected={} final_length={}",
            report.accepted,
            report.rejected,
            list.len()
        );
        println!("{}", list.list());
    }

    if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        warn!(seed, failed = summary.failed, "invariant violation");
        ExitCode::FAILURE
    }
}
