//! End-to-end roster flows: add, edit, derived views, removal.

mod common;

use assert_matches::assert_matches;
use civilcrm_core::error::CoreError;
use civilcrm_core::worker::{RoleSuggestions, WorkerSortKey};
use civilcrm_session::{SessionError, WorkerRoster};
use common::{init_tracing, store, today, worker_form, PROJECT};

#[tokio::test]
async fn added_worker_appears_in_the_live_view() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    roster
        .add(worker_form("Ramesh", "Mason", "500", false), today(), &mut roles)
        .await
        .unwrap();
    assert!(roster.changed().await);

    let view = roster.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].record.name, "Ramesh");
    assert_eq!(view.summary.total_workers, 1);
    assert_eq!(view.summary.total_daily_wage, 500.0);
}

#[tokio::test]
async fn invalid_form_never_touches_the_store() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    let err = roster
        .add(worker_form("Ramesh", "Mason", "-10", false), today(), &mut roles)
        .await
        .unwrap_err();
    assert_matches!(err, SessionError::Core(CoreError::Validation(_)));
    assert_eq!(err.user_message(), "Valid wage amount is required");
    assert!(roster.records().is_empty());
}

#[tokio::test]
async fn new_role_joins_the_suggestion_set() {
    init_tracing();
    let (_, store) = store();
    let roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    roster
        .add(worker_form("Suresh", "Scaffolder", "450", false), today(), &mut roles)
        .await
        .unwrap();
    assert!(roles.as_slice().iter().any(|r| r == "Scaffolder"));
}

#[tokio::test]
async fn summary_ignores_the_active_filter() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    roster
        .add(worker_form("Ramesh", "Mason", "500", false), today(), &mut roles)
        .await
        .unwrap();
    roster
        .add(worker_form("Suresh", "Helper", "300", false), today(), &mut roles)
        .await
        .unwrap();
    while roster.records().len() < 2 {
        assert!(roster.changed().await);
    }

    roster.view.filter.role = Some("Mason".to_string());
    let view = roster.view();
    assert_eq!(view.rows.len(), 1);
    // Aggregates always cover the whole roster.
    assert_eq!(view.summary.total_workers, 2);
    assert_eq!(view.summary.total_daily_wage, 800.0);
}

#[tokio::test]
async fn wage_sort_flips_on_reselect() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    roster
        .add(worker_form("Low", "Mason", "100", false), today(), &mut roles)
        .await
        .unwrap();
    roster
        .add(worker_form("High", "Mason", "900", false), today(), &mut roles)
        .await
        .unwrap();
    while roster.records().len() < 2 {
        assert!(roster.changed().await);
    }

    roster.view.select_sort(WorkerSortKey::Wage);
    let names: Vec<String> = roster.view().rows.iter().map(|k| k.record.name.clone()).collect();
    assert_eq!(names, vec!["Low", "High"]);

    roster.view.select_sort(WorkerSortKey::Wage);
    let names: Vec<String> = roster.view().rows.iter().map(|k| k.record.name.clone()).collect();
    assert_eq!(names, vec!["High", "Low"]);
}

#[tokio::test]
async fn removal_waits_for_confirmation() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    let id = roster
        .add(worker_form("Ramesh", "Mason", "500", false), today(), &mut roles)
        .await
        .unwrap();
    assert!(roster.changed().await);

    // Declining leaves the record alone.
    let request = roster.remove_request(&id).unwrap();
    assert_eq!(
        request.prompt(),
        "Are you sure you want to remove Ramesh from the workers list?"
    );
    request.decline();
    assert_eq!(roster.records().len(), 1);

    // Confirming deletes it.
    roster.remove_request(&id).unwrap().confirm().await.unwrap();
    assert!(roster.changed().await);
    assert!(roster.records().is_empty());
}

#[tokio::test]
async fn removing_an_unknown_worker_is_a_not_found_error() {
    init_tracing();
    let (_, store) = store();
    let roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let err = roster.remove_request("missing").unwrap_err();
    assert_matches!(err, SessionError::Core(CoreError::NotFound { entity: "worker", .. }));
}

#[tokio::test]
async fn update_overwrites_fields_in_place() {
    init_tracing();
    let (_, store) = store();
    let mut roster = WorkerRoster::open(store, PROJECT).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    let id = roster
        .add(worker_form("Ramesh", "Mason", "500", false), today(), &mut roles)
        .await
        .unwrap();
    assert!(roster.changed().await);

    roster
        .update(&id, worker_form("Ramesh", "Supervisor", "650", true), today())
        .await
        .unwrap();
    assert!(roster.changed().await);

    let records = roster.records();
    assert_eq!(records[0].record.role, "Supervisor");
    assert!(records[0].record.is_regular);
}
