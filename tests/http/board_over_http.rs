//! Board flows driven through the HTTP adapter.

use std::sync::Arc;

use super::helpers::{client, server, task_record, user_record};
use mockito::Matcher;
use serde_json::json;
use taskboard::board::{
    adapters::memory::RecordingNotifier,
    domain::{BoardColumn, CollaboratorLabel, TaskId},
    ports::{Notification, TaskApiError},
    services::{DropOutcome, TaskBoard},
};

#[tokio::test(flavor = "multi_thread")]
async fn refresh_then_drag_persists_over_http() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body(json!({"tasks": [task_record("t1", "pending", &["u1"])]}).to_string())
        .create_async()
        .await;
    let lookup = server
        .mock("POST", "/api/users/batch")
        .match_body(Matcher::Json(json!({"ids": ["u1"]})))
        .with_status(200)
        .with_body(json!({"users": [user_record("u1", "ana")]}).to_string())
        .expect(1)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/tasks/t1")
        .match_body(Matcher::PartialJson(json!({"status": "in_progress"})))
        .with_status(200)
        .create_async()
        .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let board = TaskBoard::new(Arc::new(client(&server)?), Arc::clone(&notifier));

    board.refresh().await?;
    board.begin_drag(&TaskId::from("t1"))?;
    let outcome = board.end_drag(Some("column-in_progress")).await?;

    lookup.assert_async().await;
    update.assert_async().await;
    eyre::ensure!(outcome.is_persisted(), "expected persisted, got {outcome:?}");
    let projection = board.projection()?;
    eyre::ensure!(
        projection.locate(&TaskId::from("t1")) == Some(BoardColumn::InProgress),
        "t1 should be in progress"
    );
    let labels = board.collaborator_labels(&TaskId::from("t1"))?;
    let names: Vec<&str> = labels.iter().map(CollaboratorLabel::display_name).collect();
    eyre::ensure!(names == ["ana"], "unexpected names {names:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_session_rolls_back_and_notifies() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body(json!({"tasks": [task_record("t1", "pending", &[])]}).to_string())
        .create_async()
        .await;
    server
        .mock("PUT", "/api/tasks/t1")
        .with_status(401)
        .create_async()
        .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let board = TaskBoard::new(Arc::new(client(&server)?), Arc::clone(&notifier));
    board.refresh().await?;
    let before = board.snapshot()?;

    let outcome = board.mark_completed(&TaskId::from("t1")).await?;

    eyre::ensure!(
        outcome == DropOutcome::RolledBack(TaskApiError::Unauthorized),
        "unexpected outcome {outcome:?}"
    );
    eyre::ensure!(board.snapshot()? == before, "store was not restored");
    eyre::ensure!(
        notifier.notifications().last() == Some(&Notification::SessionExpired),
        "session expiry was not reported"
    );
    Ok(())
}
