//! Given steps for drag reconciliation BDD scenarios.

use std::sync::Arc;

use super::world::{DragWorld, LoadedBoard, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    adapters::memory::{InMemoryTaskApi, RecordingNotifier},
    domain::{Category, FinishBudget, Task, TaskData, TaskId, TaskStatus, TaskTitle},
    ports::TaskApiError,
    services::TaskBoard,
};

#[given(r#"a board with a "{status}" task "{task_id}""#)]
fn board_with_task(
    world: &mut DragWorld,
    status: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    let title = TaskTitle::new(format!("Task {task_id}")).wrap_err("build scenario title")?;
    world.seed.push(Task::from_data(TaskData {
        id: TaskId::new(task_id),
        title,
        description: None,
        status: TaskStatus::from(status),
        category: Category::new("work"),
        remind_me: false,
        time_until_finish: FinishBudget::default(),
        created_at: Utc::now(),
        collaborators: Vec::new(),
    }));
    Ok(())
}

#[given("the board has been loaded")]
fn board_loaded(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let api = InMemoryTaskApi::with_tasks(world.seed.clone());
    let notifier = Arc::new(RecordingNotifier::new());
    let board = TaskBoard::new(Arc::new(api.clone()), Arc::clone(&notifier));
    run_async(board.refresh()).wrap_err("load board for scenario")?;
    world.loaded = Some(LoadedBoard {
        api,
        notifier,
        board,
    });
    Ok(())
}

#[given("the backend rejects updates")]
fn backend_rejects_updates(world: &mut DragWorld) -> Result<(), eyre::Report> {
    world
        .loaded()?
        .api
        .fail_updates(TaskApiError::Transport("connection refused".to_owned()));
    Ok(())
}

#[given("the backend reports the session as expired")]
fn backend_reports_expired_session(world: &mut DragWorld) -> Result<(), eyre::Report> {
    world.loaded()?.api.fail_updates(TaskApiError::Unauthorized);
    Ok(())
}
