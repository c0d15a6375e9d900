//! Dashboard state tests against an in-memory backend

mod common;

use common::{ids, record, two_records, FakeService, SERVER_STAMP};
use damaged_box_rust::api::RecordService;
use damaged_box_rust::dashboard::{Dashboard, NoticeLevel};
use damaged_box_rust::error::DashboardError;
use std::sync::atomic::Ordering;

async fn loaded(records: Vec<damaged_box_common::DamagedBox>) -> Dashboard<FakeService> {
    let mut dashboard = Dashboard::new(FakeService::with_records(records));
    dashboard.fetch_data().await.expect("fetch failed");
    dashboard
}

#[tokio::test]
async fn test_initial_fetch_shows_everything() {
    let dashboard = loaded(two_records()).await;

    assert!(!dashboard.is_loading());
    assert_eq!(ids(dashboard.filtered()), vec![1, 2]);
    assert_eq!(dashboard.summary().total_issues, 2);
    assert_eq!(dashboard.summary().total_qty, 8);
}

#[tokio::test]
async fn test_search_scenario() {
    let mut dashboard = loaded(two_records()).await;

    dashboard.set_search_term("a1");
    assert_eq!(ids(dashboard.filtered()), vec![1]);
    assert_eq!(dashboard.summary().total_qty, 5);
    assert_eq!(dashboard.summary().total_issues, 1);
}

#[tokio::test]
async fn test_issue_type_toggle_scenario() {
    let mut dashboard = loaded(two_records()).await;

    dashboard.select_issue_type("Shortage");
    assert_eq!(ids(dashboard.filtered()), vec![2]);
    assert_eq!(dashboard.summary().total_qty, 3);

    dashboard.select_issue_type("Shortage");
    assert_eq!(dashboard.criteria().issue_type, None);
    assert_eq!(ids(dashboard.filtered()), vec![1, 2]);
    assert_eq!(dashboard.summary().total_qty, 8);
}

#[tokio::test]
async fn test_summary_tracks_every_filter_state() {
    let mut records = two_records();
    records.push(record(3, "a1-77", 4, "Shortage"));
    records.push(record(4, "Z9", 0, "Damaged"));
    let mut dashboard = loaded(records).await;

    let states: [(&str, Option<&str>); 4] =
        [("", None), ("a1", None), ("", Some("Shortage")), ("A1", Some("Shortage"))];
    for (search, issue_type) in states {
        dashboard.set_search_term(search);
        dashboard.set_issue_type(issue_type.map(str::to_string));

        let filtered = dashboard.filtered();
        let summary = dashboard.summary();
        assert_eq!(summary.total_issues, filtered.len());
        assert_eq!(summary.total_qty, filtered.iter().map(|r| r.qty).sum::<u64>());
    }
    assert_eq!(ids(dashboard.filtered()), vec![3]);

    dashboard.clear_filters();
    assert_eq!(dashboard.summary().total_issues, 4);
}

#[tokio::test]
async fn test_counts_ignore_active_filter() {
    let mut dashboard = loaded(two_records()).await;
    dashboard.select_issue_type("Damaged");

    assert_eq!(dashboard.count_by_issue_type("Shortage"), 1);
    assert_eq!(
        dashboard.issue_type_counts(),
        vec![("Damaged".to_string(), 1), ("Shortage".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_refetch_replaces_list_and_keeps_filter() {
    let mut dashboard = loaded(two_records()).await;
    dashboard.select_issue_type("Damaged");

    dashboard
        .service()
        .set_records(vec![record(9, "N1", 2, "Damaged"), record(10, "N2", 7, "Damaged")]);
    dashboard.fetch_data().await.expect("fetch failed");

    assert_eq!(ids(dashboard.records()), vec![9, 10]);
    assert_eq!(ids(dashboard.filtered()), vec![9, 10]);
    assert_eq!(dashboard.summary().total_qty, 9);
}

#[tokio::test]
async fn test_fetch_failure_leaves_idle_state_with_notice() {
    let mut dashboard = loaded(two_records()).await;
    dashboard.take_notices();
    dashboard.service().fail_fetch.store(true, Ordering::SeqCst);

    let result = dashboard.fetch_data().await;

    assert!(matches!(result, Err(DashboardError::Retrieval)));
    assert!(!dashboard.is_loading());
    assert_eq!(ids(dashboard.records()), vec![1, 2]);
    let notices = dashboard.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_last_resolved_fetch_wins() {
    let mut dashboard = Dashboard::new(FakeService::with_records(vec![record(1, "OLD", 1, "Damaged")]));

    // first request issued against the old server state
    let first = dashboard.service().fetch_all().await;
    dashboard.service().set_records(vec![record(2, "NEW", 2, "Damaged")]);
    // second request issued later, sees the new state
    let second = dashboard.service().fetch_all().await;

    // the second response arrives first, the older one arrives last
    dashboard.apply_fetch_result(second).expect("apply failed");
    dashboard.apply_fetch_result(first).expect("apply failed");

    assert_eq!(ids(dashboard.records()), vec![1]);
}

#[tokio::test]
async fn test_refresh_tick_skips_while_editing() {
    let mut dashboard = loaded(two_records()).await;
    let calls = dashboard.service().fetch_calls();

    dashboard.start_edit(1).expect("start edit failed");
    assert!(!dashboard.refresh_tick().await);
    assert_eq!(dashboard.service().fetch_calls(), calls);

    dashboard.cancel_edit();
    assert!(dashboard.refresh_tick().await);
    assert_eq!(dashboard.service().fetch_calls(), calls + 1);
}

#[tokio::test]
async fn test_cancel_edit_has_no_network_effect() {
    let mut dashboard = loaded(two_records()).await;

    let edit = dashboard.start_edit(2).expect("start edit failed");
    edit.record_mut().qty = 99;
    dashboard.cancel_edit();

    assert!(!dashboard.is_editing());
    assert!(dashboard.service().updates.lock().unwrap().is_empty());
    assert_eq!(dashboard.records()[1].qty, 3);
}

#[tokio::test]
async fn test_edit_buffer_is_a_copy() {
    let mut dashboard = loaded(two_records()).await;

    dashboard.start_edit(1).expect("start edit failed").record_mut().qty = 42;

    assert_eq!(dashboard.records()[0].qty, 5);
    assert_eq!(dashboard.edit_buffer().map(|e| e.record().qty), Some(42));
}

#[tokio::test]
async fn test_save_update_refetches_server_state() {
    let mut dashboard = loaded(two_records()).await;
    let calls = dashboard.service().fetch_calls();

    dashboard.start_edit(1).expect("start edit failed").record_mut().qty = 10;
    dashboard.save_update().await.expect("save failed");

    assert!(!dashboard.is_editing());
    assert!(!dashboard.is_loading());
    assert_eq!(dashboard.service().fetch_calls(), calls + 1);

    let updated = &dashboard.records()[0];
    assert_eq!(updated.qty, 10);
    // came from the server, not from the local buffer
    assert_eq!(updated.created_at.as_deref(), Some(SERVER_STAMP));
    assert_eq!(dashboard.summary().total_qty, 13);
}

#[tokio::test]
async fn test_save_update_keeps_id_even_if_buffer_changed_it() {
    let mut dashboard = loaded(two_records()).await;

    let edit = dashboard.start_edit(2).expect("start edit failed");
    edit.record_mut().id = 77;
    edit.record_mut().qty = 1;
    dashboard.save_update().await.expect("save failed");

    let sent = dashboard.service().updates.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, 2);
}

#[tokio::test]
async fn test_save_update_failure_keeps_buffer() {
    let mut dashboard = loaded(two_records()).await;
    dashboard.take_notices();
    dashboard.service().fail_update.store(true, Ordering::SeqCst);
    let calls = dashboard.service().fetch_calls();

    dashboard.start_edit(1).expect("start edit failed").record_mut().qty = 10;
    let result = dashboard.save_update().await;

    assert!(matches!(result, Err(DashboardError::UpdateFailed { id: 1, .. })));
    assert!(!dashboard.is_loading());
    assert_eq!(dashboard.edit_buffer().map(|e| e.record().qty), Some(10));
    assert_eq!(dashboard.service().fetch_calls(), calls);

    let notices = dashboard.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_start_edit_unknown_id() {
    let mut dashboard = loaded(two_records()).await;

    assert!(matches!(
        dashboard.start_edit(404),
        Err(DashboardError::RecordNotFound(404))
    ));
    assert!(!dashboard.is_editing());
}

#[tokio::test]
async fn test_save_without_edit() {
    let mut dashboard = loaded(two_records()).await;
    assert!(matches!(
        dashboard.save_update().await,
        Err(DashboardError::NoEditInProgress)
    ));
}
