use u_assign::directory::ReviewerDirectory;
use u_assign::engine::{AssignmentKpi, AutoAssigner};
use u_assign::models::{AssignmentLedger, PoolConfig, ReviewerPool};
use u_assign::reminder::{build_reminders, unreachable};
use u_assign::store::{assign_dataset, clear_dataset, LedgerStore, MemoryLedgerStore};
use u_assign::tracker::TrackerView;

fn pool(names: &[&str], count: i64) -> ReviewerPool {
    ReviewerPool::new(names.iter().copied()).with_reviewer_count(count)
}

#[test]
fn scenario_a_full_pairs() {
    let ledger = AutoAssigner::new()
        .run(&["P1", "P2"], &pool(&["Alice", "Bob"], 2), &AssignmentLedger::new())
        .unwrap();

    assert_eq!(ledger.reviewers_for("P1"), ["Alice", "Bob"]);
    assert_eq!(ledger.reviewers_for("P2"), ["Alice", "Bob"]);
    assert!(ledger.overflow().is_empty());
    assert_eq!(ledger.load_of("Alice"), 2);
    assert_eq!(ledger.load_of("Bob"), 2);
}

#[test]
fn scenario_b_single_reviewer_overflow() {
    let ledger = AutoAssigner::new()
        .run(&["P1"], &pool(&["Alice"], 2), &AssignmentLedger::new())
        .unwrap();

    assert_eq!(ledger.reviewers_for("P1"), ["Alice"]);
    assert_eq!(ledger.overflow().iter().collect::<Vec<_>>(), vec!["P1"]);
}

#[test]
fn scenario_c_empty_pool() {
    let ledger = AutoAssigner::new()
        .run(&["P1", "P2"], &pool(&[], 2), &AssignmentLedger::new())
        .unwrap();

    assert!(ledger.assignments().is_empty());
    assert_eq!(ledger.overflow().iter().collect::<Vec<_>>(), vec!["P1", "P2"]);
}

#[test]
fn scenario_d_perfect_balance() {
    let pool = pool(&["Alice", "Bob", "Carol"], 1);
    let ledger = AutoAssigner::new()
        .run(&["P1", "P2", "P3"], &pool, &AssignmentLedger::new())
        .unwrap();

    for p in ["P1", "P2", "P3"] {
        assert_eq!(ledger.reviewers_for(p).len(), 1);
    }
    let kpi = AssignmentKpi::calculate(&ledger, &pool, &["P1", "P2", "P3"]);
    assert_eq!(kpi.max_load, 1);
    assert_eq!(kpi.min_load, 1);
    assert!(ledger.overflow().is_empty());
}

#[test]
fn scenario_e_clear() {
    let mut ledger = AutoAssigner::new()
        .run(&["P1", "P2"], &pool(&["Alice"], 2), &AssignmentLedger::new())
        .unwrap();
    assert!(!ledger.is_empty());

    ledger.clear();
    assert!(ledger.assignments().is_empty());
    assert!(ledger.overflow().is_empty());
}

#[test]
fn admin_flow_end_to_end() {
    let config: PoolConfig = serde_json::from_str(
        r#"{"reviewerPool":["Alice","Bob","Carol"],"reviewerCount":2,"meetingDates":["Mar 4","Mar 11"]}"#,
    )
    .unwrap();
    let pool = ReviewerPool::from_config(&config);
    let directory = ReviewerDirectory::parse("Alice <alice@example.org>\nBob, bob@example.org");
    let mut store = MemoryLedgerStore::new();

    let outcome = assign_dataset(&mut store, "spring", &["P1", "P2", "P3"], &pool).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.picks, 6);

    // Manual tracker edit, then tag a meeting, then persist.
    let mut ledger = store.load("spring").unwrap();
    let first = ledger.reviewers_for("P1")[0].clone();
    assert!(ledger.manual_unassign("P1", &first));
    assert!(ledger.is_overflow("P1"));
    ledger.tag_meeting("P2", "Mar 11", &pool).unwrap();
    store.save("spring", &ledger).unwrap();

    // Rerun tops P1 back up and leaves the others alone.
    let rerun = assign_dataset(&mut store, "spring", &["P1", "P2", "P3"], &pool).unwrap();
    assert_eq!(rerun.carried_forward, vec!["P2", "P3"]);
    assert_eq!(rerun.picks, 1);
    assert!(rerun.ledger.overflow().is_empty());
    assert_eq!(rerun.ledger.meeting_for("P2"), Some("Mar 11"));

    let rows = TrackerView::new(&rerun.ledger).with_query("carol").rows();
    assert!(rows.iter().all(|r| r.reviewers.iter().any(|n| n == "Carol")));

    let reminders = build_reminders(&rerun.ledger, &directory);
    assert_eq!(reminders.len(), 3);
    assert_eq!(unreachable(&reminders), vec!["Carol"]);
    let total: usize = reminders.iter().map(|r| r.projects.len()).sum();
    assert_eq!(total, 6);

    let cleared = clear_dataset(&mut store, "spring").unwrap();
    assert!(cleared.is_empty());
    assert!(store.load("spring").unwrap().is_empty());
}

#[test]
fn persisted_payload_round_trips_through_json() {
    let pool = pool(&["Alice", "Bob"], 2);
    let ledger = AutoAssigner::new()
        .run(&["P1", "P2"], &pool, &AssignmentLedger::new())
        .unwrap();

    let json = serde_json::to_string(&ledger).unwrap();
    assert_eq!(
        json,
        r#"{"assignments":{"P1":["Alice","Bob"],"P2":["Alice","Bob"]},"overflow":[],"reviewerCount":2}"#
    );
    let back: AssignmentLedger = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ledger);
}
