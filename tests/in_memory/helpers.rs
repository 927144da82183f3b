//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskApi, RecordingNotifier},
    domain::{
        Category, Collaborator, FinishBudget, Task, TaskData, TaskId, TaskStatus, TaskTitle,
        UserId,
    },
    services::TaskBoard,
};

/// Board wired to the in-memory backend.
pub type MemoryBoard = TaskBoard<InMemoryTaskApi, RecordingNotifier>;

/// Backend, notifier and board sharing one in-memory store.
pub struct BoardHarness {
    /// Backend the board talks to.
    pub api: InMemoryTaskApi,
    /// Notifications raised by the board.
    pub notifier: Arc<RecordingNotifier>,
    /// Board under test.
    pub board: MemoryBoard,
}

/// Builds a task record with the given status, category and collaborators.
///
/// # Panics
///
/// Panics if the fixture title is blank or the timestamp is out of range.
pub fn task(id: &str, status: &str, category: &str, collaborators: &[&str]) -> Task {
    Task::from_data(TaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(format!("Task {id}")).expect("fixture title is not blank"),
        description: None,
        status: TaskStatus::from(status),
        category: Category::new(category),
        remind_me: false,
        time_until_finish: FinishBudget::default(),
        created_at: DateTime::<Utc>::from_timestamp(1_735_689_600, 0)
            .expect("valid fixture timestamp"),
        collaborators: collaborators.iter().copied().map(UserId::from).collect(),
    })
}

/// Builds a collaborator with an `example.com` email.
pub fn user(id: &str, username: &str) -> Collaborator {
    Collaborator::new(UserId::from(id), username, format!("{username}@example.com"))
}

/// Provides a board over a backend with a handful of tasks and users.
#[fixture]
pub fn harness() -> BoardHarness {
    let api = InMemoryTaskApi::with_tasks([
        task("t1", "pending", "work", &["u1"]),
        task("t2", "in_progress", "personal", &[]),
        task("t3", "completed", "work", &["u2", "u3"]),
        task("t4", "archived", "other", &[]),
    ])
    .with_users([user("u1", "ana"), user("u2", "ben"), user("u3", "cy")]);
    let notifier = Arc::new(RecordingNotifier::new());
    let board = TaskBoard::new(Arc::new(api.clone()), Arc::clone(&notifier));
    BoardHarness {
        api,
        notifier,
        board,
    }
}
