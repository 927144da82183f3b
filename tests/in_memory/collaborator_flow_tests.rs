//! In-memory integration tests for collaborator selection and names.

use super::helpers::{BoardHarness, harness};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::ApiCall,
    domain::{CollaboratorLabel, CollaboratorSelection, NewTask, TaskId, TaskTitle, UserId},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn picked_collaborators_are_named_after_reload(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    harness.board.refresh().await?;
    let mut selection = CollaboratorSelection::new();
    for email in ["ana@example.com", "cy@example.com"] {
        for found in harness.board.search_users(email).await? {
            selection.add(found)?;
        }
    }

    let task = NewTask::new(TaskTitle::new("Pair on release")?).with_collaborators(selection);
    harness.board.create_task(&task).await?;

    let labels = harness.board.collaborator_labels(&TaskId::from("task-1"))?;
    let names: Vec<&str> = labels.iter().map(CollaboratorLabel::display_name).collect();
    eyre::ensure!(names == ["ana", "cy"], "unexpected names {names:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn names_are_looked_up_once_per_board(harness: BoardHarness) -> Result<(), eyre::Report> {
    harness.board.refresh().await?;
    harness.board.refresh().await?;

    let lookups: Vec<ApiCall> = harness
        .api
        .calls()
        .into_iter()
        .filter(|call| matches!(call, ApiCall::FetchUsers(_)))
        .collect();
    let expected = vec![ApiCall::FetchUsers(vec![
        UserId::from("u1"),
        UserId::from("u2"),
        UserId::from("u3"),
    ])];
    eyre::ensure!(lookups == expected, "unexpected lookups {lookups:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_the_board_forgets_names(harness: BoardHarness) -> Result<(), eyre::Report> {
    harness.board.refresh().await?;
    harness.board.close()?;
    harness.board.refresh().await?;

    let lookups = harness
        .api
        .calls()
        .iter()
        .filter(|call| matches!(call, ApiCall::FetchUsers(_)))
        .count();
    eyre::ensure!(lookups == 2, "expected a fresh lookup after close, got {lookups}");
    Ok(())
}
