//! Then steps for drag reconciliation BDD scenarios.

use super::world::DragWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    adapters::memory::ApiCall,
    domain::{BoardColumn, TaskId, TaskStatus},
    ports::Notification,
    services::DropOutcome,
};

#[then("the drop is persisted")]
fn drop_is_persisted(world: &DragWorld) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    if !outcome.is_persisted() {
        return Err(eyre::eyre!("expected a persisted drop, got {outcome:?}"));
    }
    Ok(())
}

#[then("the drop is rolled back")]
fn drop_is_rolled_back(world: &DragWorld) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    if !matches!(outcome, DropOutcome::RolledBack(_)) {
        return Err(eyre::eyre!("expected a rolled back drop, got {outcome:?}"));
    }
    Ok(())
}

#[then("the drop leaves the task unchanged")]
fn drop_is_unchanged(world: &DragWorld) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    if *outcome != DropOutcome::Unchanged {
        return Err(eyre::eyre!("expected an unchanged drop, got {outcome:?}"));
    }
    Ok(())
}

#[then("the drop is cancelled")]
fn drop_is_cancelled(world: &DragWorld) -> Result<(), eyre::Report> {
    let outcome = world.last_outcome()?;
    if *outcome != DropOutcome::Cancelled {
        return Err(eyre::eyre!("expected a cancelled drop, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"task "{task_id}" is shown in the "{column}" column"#)]
fn task_shown_in_column(
    world: &DragWorld,
    task_id: String,
    column: String,
) -> Result<(), eyre::Report> {
    let expected = BoardColumn::try_from(column.as_str())
        .map_err(|err| eyre::eyre!("invalid expected column in scenario: {err}"))?;
    let projection = world.loaded()?.board.projection()?;
    let found = projection.locate(&TaskId::from(task_id.as_str()));
    if found != Some(expected) {
        return Err(eyre::eyre!(
            "expected {task_id} in {expected}, found {found:?}"
        ));
    }
    Ok(())
}

#[then(r#"the backend holds task "{task_id}" as "{status}""#)]
fn backend_holds_task(
    world: &DragWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::from(status);
    let stored = world
        .loaded()?
        .api
        .tasks()
        .into_iter()
        .find(|task| task.id().as_str() == task_id)
        .ok_or_else(|| eyre::eyre!("backend lost task {task_id}"))?;
    if stored.status() != &expected {
        return Err(eyre::eyre!(
            "expected backend status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("no update was sent")]
fn no_update_sent(world: &DragWorld) -> Result<(), eyre::Report> {
    let updates = world
        .loaded()?
        .api
        .calls()
        .iter()
        .filter(|call| matches!(call, ApiCall::UpdateTask(_)))
        .count();
    if updates != 0 {
        return Err(eyre::eyre!("expected no updates, found {updates}"));
    }
    Ok(())
}

#[then(r#"a status update failure is reported for "{task_id}""#)]
fn failure_reported(world: &DragWorld, task_id: String) -> Result<(), eyre::Report> {
    let reported = world.loaded()?.notifier.notifications().iter().any(|notification| {
        matches!(
            notification,
            Notification::StatusUpdateFailed { task_id: failed, .. } if failed.as_str() == task_id
        )
    });
    if !reported {
        return Err(eyre::eyre!("no failure notification for {task_id}"));
    }
    Ok(())
}

#[then("the session is reported as expired")]
fn session_reported_expired(world: &DragWorld) -> Result<(), eyre::Report> {
    let notifications = world.loaded()?.notifier.notifications();
    if !notifications.contains(&Notification::SessionExpired) {
        return Err(eyre::eyre!("expected session expiry, got {notifications:?}"));
    }
    Ok(())
}
