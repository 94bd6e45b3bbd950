//! Integration tests driving the CLI scenario layer against the
//! scheduler components.

use sched_cli::{list_scenarios, run_scenario, CliError};

#[test]
fn every_listed_scenario_produces_a_trace() {
    for name in list_scenarios() {
        let lines = run_scenario(name, scheduler::DEFAULT_MAX_DEPTH).unwrap();
        assert!(!lines.is_empty(), "scenario '{}' produced no trace", name);
    }
}

#[test]
fn scenario_traces_are_deterministic_across_runs() {
    for name in list_scenarios() {
        let first = run_scenario(name, scheduler::DEFAULT_MAX_DEPTH).unwrap();
        let second = run_scenario(name, scheduler::DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(first, second, "scenario '{}' was not deterministic", name);
    }
}

#[test]
fn ordering_scenario_shows_continuation_priority() {
    let lines = run_scenario("ordering", scheduler::DEFAULT_MAX_DEPTH).unwrap();
    let timer_position = lines.iter().position(|l| l.contains("timer")).unwrap();
    assert_eq!(timer_position, lines.len() - 1);
}

#[test]
fn unknown_scenario_reports_its_name() {
    let err = run_scenario("no-such", scheduler::DEFAULT_MAX_DEPTH).unwrap_err();
    match err {
        CliError::UnknownScenario(name) => assert_eq!(name, "no-such"),
    }
}

#[test]
fn scenarios_run_under_a_tight_stack_limit() {
    // None of the demonstration scenarios nest deeply; a small stack is
    // enough, and no unhandled fault lines appear in the traces.
    for name in list_scenarios() {
        let lines = run_scenario(name, 8).unwrap();
        assert!(lines.iter().all(|l| !l.contains("unhandled fault")));
    }
}
