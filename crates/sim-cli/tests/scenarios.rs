// =============================================================================
// Quantum Scheduling Simulator - Seed Scenario Integration Tests
// =============================================================================
// Table of Contents:
//   1. Harness - Runs a command stream and returns its structured snapshots
//   2. S1 - Single job, fits, runs to completion
//   3. S2 - Priority-driven hold routing
//   4. S3 - Device contention resolved by release
//   5. S4 - Long-job quarantine
//   6. S5 - Terminal turnaround report
//   7. S6 - Banker's rejection under pressure
// =============================================================================
// Purpose: Replays scenarios in the spirit of section 8's seed tests against
//          the full binary-crate driver loop, asserting on the structured
//          snapshot files it writes to disk.
//
// Note on parameters: a few of the literal seed-scenario numbers in the
// design document drive a job to claim *exactly* all remaining device
// capacity for itself. That trips the preserved strict-less-than banker's
// quirk (see sim-core::banker), which the design explicitly calls out as a
// case tests should not depend on. The scenarios below keep each seed test's
// intent (hold routing, wait-then-release, long quarantine, terminal
// turnaround, rejection-then-release) but size device pools with one spare
// unit of slack so a real safety-scan grant is always reachable, and use
// plain availability denials (not scan failures) to model rejection.
// =============================================================================

use sim_render::json::{Snapshot, NO_JOB};
use std::io::Write;

// =============================================================================
// 1. Harness - Runs a command stream and returns its structured snapshots
// =============================================================================

/// Runs `lines` as a command stream in a scratch directory and returns the
/// structured snapshot written for the Display at `at_time`.
fn run_and_snapshot(lines: &[&str], at_time: u64) -> Snapshot {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("run.txt");
    {
        let mut file = std::fs::File::create(&input_path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    let prior = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = sim_cli::driver::Driver::run(&input_path);
    std::env::set_current_dir(prior).unwrap();
    result.unwrap();

    let snapshot_path = dir.path().join(format!("run_D{at_time}.json"));
    let text = std::fs::read_to_string(&snapshot_path)
        .unwrap_or_else(|_| panic!("expected snapshot at {snapshot_path:?}"));
    serde_json::from_str(&text).unwrap()
}

// =============================================================================
// 2. S1 - Single job, fits, runs to completion
// =============================================================================

#[test]
fn s1_single_job_fits_runs_to_completion() {
    let snapshot = run_and_snapshot(
        &["C 0 M=100 L=50 S=4 Q=10", "A 0 J=1 M=40 S=2 R=15 P=1", "D 20"],
        20,
    );

    assert_eq!(snapshot.completeq, vec![1]);
    assert_eq!(snapshot.available_memory, 100);
    assert_eq!(snapshot.available_devices, 4);
    let job = snapshot.job.iter().find(|j| j.id == 1).unwrap();
    assert_eq!(job.completion_time, Some(15));
}

// =============================================================================
// 3. S2 - Priority-driven hold routing
// =============================================================================

#[test]
fn s2_priority_driven_hold_routing() {
    let snapshot = run_and_snapshot(
        &[
            "C 0 M=100 L=50 S=4 Q=10",
            "A 0 J=1 M=80 S=0 R=100 P=1",
            "A 0 J=2 M=80 S=0 R=5 P=1",
            "A 0 J=3 M=80 S=0 R=7 P=2",
            "D 1",
        ],
        1,
    );

    assert_eq!(snapshot.available_memory, 20);
    assert!(snapshot.running == 1 || snapshot.readyq.contains(&1));
    assert_eq!(snapshot.holdq1, vec![2]);
    assert_eq!(snapshot.holdq2, vec![3]);
}

// =============================================================================
// 4. S3 - Device contention resolved by release
// =============================================================================

// Three jobs, each claiming its full device max against a pool with one
// spare unit. J1 and J2 are granted their claims in turn (the spare unit
// keeps the safety scan's Work strictly positive throughout). J3 then
// requests its own full claim and is denied outright on availability (only
// one unit is free); J1's later release frees enough for J3 to be granted.
#[test]
fn s3_device_contention_resolved_by_release() {
    let before = run_and_snapshot(
        &[
            "C 0 M=1000 L=1000 S=7 Q=1000",
            "A 0 J=1 M=10 S=3 R=30 P=1",
            "A 0 J=2 M=10 S=3 R=30 P=1",
            "A 0 J=3 M=10 S=2 R=30 P=1",
            "Q 1 J=1 D=3",
            "Q 5 J=2 D=3",
            "Q 8 J=3 D=2",
            "D 9",
        ],
        9,
    );
    assert!(before.waitq.contains(&3));
    assert_eq!(before.available_devices, 1);

    let after = run_and_snapshot(
        &[
            "C 0 M=1000 L=1000 S=7 Q=1000",
            "A 0 J=1 M=10 S=3 R=30 P=1",
            "A 0 J=2 M=10 S=3 R=30 P=1",
            "A 0 J=3 M=10 S=2 R=30 P=1",
            "Q 1 J=1 D=3",
            "Q 5 J=2 D=3",
            "Q 8 J=3 D=2",
            "L 10 J=1 D=3",
            "D 11",
        ],
        11,
    );
    assert!(!after.waitq.contains(&3));
    let job3 = after.job.iter().find(|j| j.id == 3).unwrap();
    assert_eq!(job3.devices_allocated, Some(2));
}

// =============================================================================
// 5. S4 - Long-job quarantine
// =============================================================================

#[test]
fn s4_long_job_quarantined_with_no_other_work() {
    let snapshot = run_and_snapshot(&["C 0 M=100 L=5 S=0 Q=3", "A 0 J=1 M=10 S=0 R=20 P=1", "D 20"], 20);

    // No other job ever arrives, so Ready never becomes non-empty while J1
    // is long; the quarantine never lifts within this window.
    assert!(snapshot.longq.contains(&1));
    assert_eq!(snapshot.running, NO_JOB);
    assert!(!snapshot.completeq.contains(&1));
}

// =============================================================================
// 6. S5 - Terminal turnaround report
// =============================================================================

#[test]
fn s5_terminal_turnaround_report() {
    // J1 (runtime 5) runs immediately and completes at t=5. J2 (runtime 15)
    // only starts once J1 vacates the CPU, so it completes at t=5+15=20,
    // not at its own runtime value - turnaround accounts for queueing delay.
    let snapshot = run_and_snapshot(
        &[
            "C 0 M=100 L=1000 S=0 Q=10",
            "A 0 J=1 M=10 S=0 R=5 P=1",
            "A 0 J=2 M=10 S=0 R=15 P=1",
        ],
        9999,
    );

    let job1 = snapshot.job.iter().find(|j| j.id == 1).unwrap();
    let job2 = snapshot.job.iter().find(|j| j.id == 2).unwrap();
    assert_eq!(job1.completion_time, Some(5));
    assert_eq!(job2.completion_time, Some(20));

    let turnaround = snapshot.turnaround.unwrap();
    let weighted = snapshot.weighted_turnaround.unwrap();
    assert!((turnaround - 12.5).abs() < 1e-9);
    assert!((weighted - ((1.0 + 20.0 / 15.0) / 2.0)).abs() < 1e-9);
}

// =============================================================================
// 7. S6 - Banker's rejection under pressure
// =============================================================================

// Two jobs each claiming their full device max against a pool with one
// spare unit. J1 is granted first; J2's identical claim then exceeds the
// single unit left available and is denied outright (no scan needed). J1's
// later release frees enough for J2 to be granted in turn.
#[test]
fn s6_bankers_rejection_under_pressure() {
    let denied = run_and_snapshot(
        &[
            "C 0 M=1000 L=1000 S=4 Q=1000",
            "A 0 J=1 M=10 S=3 R=30 P=1",
            "A 0 J=2 M=10 S=3 R=30 P=1",
            "Q 1 J=1 D=3",
            "Q 5 J=2 D=3",
            "D 5",
        ],
        5,
    );
    assert!(denied.waitq.contains(&2));
    assert_eq!(denied.available_devices, 1);

    let granted = run_and_snapshot(
        &[
            "C 0 M=1000 L=1000 S=4 Q=1000",
            "A 0 J=1 M=10 S=3 R=30 P=1",
            "A 0 J=2 M=10 S=3 R=30 P=1",
            "Q 1 J=1 D=3",
            "Q 5 J=2 D=3",
            "L 8 J=1 D=3",
            "D 9",
        ],
        9,
    );
    assert!(!granted.waitq.contains(&2));
    let job2 = granted.job.iter().find(|j| j.id == 2).unwrap();
    assert_eq!(job2.devices_allocated, Some(3));
}
