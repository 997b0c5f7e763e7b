//! Project registry flows: creation, progress, live dashboard overview.

mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use civilcrm_core::error::CoreError;
use civilcrm_core::material::DEFAULT_LOW_STOCK_THRESHOLD;
use civilcrm_core::project::{Priority, ProjectForm, ProjectStatus};
use civilcrm_core::worker::RoleSuggestions;
use civilcrm_session::{
    AttendanceSheet, ProjectOverview, ProjectRegistry, SessionError, WorkerRoster,
};
use common::{init_tracing, store, today, worker_form};

fn project_form(name: &str, deadline: Option<NaiveDate>) -> ProjectForm {
    ProjectForm {
        name: name.to_string(),
        description: String::new(),
        priority: Priority::Medium,
        deadline,
    }
}

#[tokio::test]
async fn added_project_appears_with_its_creation_stamp() {
    init_tracing();
    let (_, store) = store();
    let mut registry = ProjectRegistry::open(store).await.unwrap();

    let id = registry
        .add(project_form("Site A", None), today())
        .await
        .unwrap();
    assert!(registry.changed().await);

    let project = registry.get(&id).unwrap();
    assert_eq!(project.record.name, "Site A");
    assert_eq!(project.record.created_at, Some(today()));
    assert_eq!(project.record.status(today()), ProjectStatus::JustStarted);
}

#[tokio::test]
async fn past_deadline_is_rejected_before_any_write() {
    init_tracing();
    let (_, store) = store();
    let registry = ProjectRegistry::open(store).await.unwrap();

    let yesterday = today().pred_opt().unwrap();
    let err = registry
        .add(project_form("Site A", Some(yesterday)), today())
        .await
        .unwrap_err();
    assert_matches!(err, SessionError::Core(CoreError::Validation(_)));
    assert!(registry.records().is_empty());
}

#[tokio::test]
async fn update_edits_fields_without_touching_progress() {
    init_tracing();
    let (_, store) = store();
    let mut registry = ProjectRegistry::open(store).await.unwrap();

    let id = registry
        .add(project_form("Site A", None), today())
        .await
        .unwrap();
    assert!(registry.changed().await);

    registry.set_task_progress(&id, 3, 10).await.unwrap();
    assert!(registry.changed().await);

    registry
        .update(
            &id,
            ProjectForm {
                priority: Priority::High,
                ..project_form("Site A East", None)
            },
            today(),
        )
        .await
        .unwrap();
    assert!(registry.changed().await);

    let project = registry.get(&id).unwrap();
    assert_eq!(project.record.name, "Site A East");
    assert_eq!(project.record.priority, Priority::High);
    // The merge left the counters and creation stamp alone.
    assert_eq!(project.record.tasks, 10);
    assert_eq!(project.record.completed_tasks, 3);
    assert_eq!(project.record.created_at, Some(today()));
}

#[tokio::test]
async fn task_progress_drives_the_derived_status() {
    init_tracing();
    let (_, store) = store();
    let mut registry = ProjectRegistry::open(store).await.unwrap();

    let id = registry
        .add(project_form("Site A", None), today())
        .await
        .unwrap();
    assert!(registry.changed().await);

    registry.set_task_progress(&id, 10, 10).await.unwrap();
    assert!(registry.changed().await);
    let project = registry.get(&id).unwrap();
    assert_eq!(project.record.status(today()), ProjectStatus::Completed);

    let err = registry.set_task_progress(&id, 11, 10).await.unwrap_err();
    assert_matches!(err, SessionError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn overview_is_assembled_from_live_collections() {
    init_tracing();
    let (_, store) = store();
    let mut registry = ProjectRegistry::open(store.clone()).await.unwrap();
    let project_id = registry
        .add(project_form("Site A", None), today())
        .await
        .unwrap();
    assert!(registry.changed().await);

    let mut roster = WorkerRoster::open(store.clone(), &project_id).await.unwrap();
    let mut sheet = AttendanceSheet::open(store, &project_id, today()).await.unwrap();
    let mut roles = RoleSuggestions::standard();

    roster
        .add(worker_form("Ramesh", "Mason", "500", true), today(), &mut roles)
        .await
        .unwrap();
    assert!(roster.changed().await);
    sheet.mark_all_regular(&roster.records()).await.unwrap();
    assert!(sheet.changed().await);

    let project = registry.get(&project_id).unwrap();
    let overview = ProjectOverview::assemble(
        &project.record,
        today(),
        &roster.records(),
        &[],
        &[],
        &sheet.entries(),
        DEFAULT_LOW_STOCK_THRESHOLD,
    );
    assert_eq!(overview.workers.total_workers, 1);
    assert_eq!(overview.status, ProjectStatus::JustStarted);
    assert_eq!(overview.attendance_today.total_liability, 500.0);
}

#[tokio::test]
async fn removal_waits_for_confirmation() {
    init_tracing();
    let (_, store) = store();
    let mut registry = ProjectRegistry::open(store).await.unwrap();

    let id = registry
        .add(project_form("Site A", None), today())
        .await
        .unwrap();
    assert!(registry.changed().await);

    let request = registry.remove_request(&id).unwrap();
    assert_eq!(
        request.prompt(),
        "Are you sure you want to remove Site A from the projects list?"
    );
    request.confirm().await.unwrap();
    assert!(registry.changed().await);
    assert!(registry.records().is_empty());
}
