//! Board service: task store, drag reconciliation and collaborator names.

use super::{
    BoardProjection, CollaboratorCache, DragPhase, DragStart, DropOutcome, TaskStore,
    collect_collaborator_ids,
};
use crate::board::{
    domain::{
        BoardColumn, Collaborator, CollaboratorLabel, CollaboratorSelection, DropTarget, NewTask,
        Task, TaskDomainError, TaskFilter, TaskId, TaskPatch, UserId,
    },
    ports::{Notification, Notifier, TaskApi, TaskApiError},
};
use std::collections::HashSet;
use std::mem;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] TaskApiError),
    /// The board state lock was poisoned.
    #[error("board state unavailable: {0}")]
    StateUnavailable(String),
    /// The request was rejected before reaching the backend.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// An edit violates a task invariant.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Default)]
struct BoardState {
    store: TaskStore,
    phase: DragPhase,
    collaborators: CollaboratorCache,
}

const ABANDONED_REASON: &str = "change abandoned before the backend replied";

#[derive(Debug, Clone, Copy)]
enum Change {
    Status,
    Edit,
}

/// Optimistic change waiting for backend confirmation.
struct PendingPersist {
    change: Change,
    updated: Task,
    snapshot: Vec<Task>,
    revision: u64,
}

enum Preparation {
    Ready(PendingPersist),
    Done(DropOutcome),
}

/// Optimistic change that has been neither confirmed nor rolled back.
///
/// Dropping an armed guard restores the snapshot, returns the board to idle
/// and reports the change as failed, so a reconcile future dropped while the
/// backend call is outstanding cannot leave the board in `Reconciling`.
struct ReconcileGuard<N: Notifier> {
    state: Arc<RwLock<BoardState>>,
    notifier: Arc<N>,
    change: Change,
    task_id: TaskId,
    snapshot: Vec<Task>,
    revision: u64,
    armed: bool,
}

impl<N: Notifier> ReconcileGuard<N> {
    fn settle(
        mut self,
        updated: Task,
        result: Result<(), TaskApiError>,
    ) -> BoardResult<DropOutcome> {
        let outcome = {
            let mut state = self
                .state
                .write()
                .map_err(|err| BoardError::StateUnavailable(err.to_string()))?;
            self.armed = false;
            state.phase = DragPhase::Idle;
            match result {
                Ok(()) => {
                    info!(task_id = %self.task_id, status = %updated.status(), "change persisted");
                    DropOutcome::Persisted(updated)
                }
                Err(err) => {
                    let snapshot = mem::take(&mut self.snapshot);
                    restore(&mut state, &self.task_id, snapshot, self.revision);
                    warn!(task_id = %self.task_id, error = %err, "change rolled back");
                    DropOutcome::RolledBack(err)
                }
            }
        };

        match &outcome {
            DropOutcome::Persisted(task) => self.notifier.notify(match self.change {
                Change::Status => Notification::StatusUpdated {
                    task_id: self.task_id.clone(),
                    status: task.status().clone(),
                },
                Change::Edit => Notification::TaskUpdated {
                    task_id: self.task_id.clone(),
                },
            }),
            DropOutcome::RolledBack(err) => {
                self.report_failure(err.to_string());
                if err.is_auth_failure() {
                    self.notifier.notify(Notification::SessionExpired);
                }
            }
            _ => {}
        }
        Ok(outcome)
    }

    fn report_failure(&self, reason: String) {
        let task_id = self.task_id.clone();
        self.notifier.notify(match self.change {
            Change::Status => Notification::StatusUpdateFailed { task_id, reason },
            Change::Edit => Notification::TaskUpdateFailed { task_id, reason },
        });
    }
}

impl<N: Notifier> Drop for ReconcileGuard<N> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.phase = DragPhase::Idle;
            let snapshot = mem::take(&mut self.snapshot);
            restore(&mut state, &self.task_id, snapshot, self.revision);
        }
        warn!(task_id = %self.task_id, reason = ABANDONED_REASON, "change rolled back");
        self.report_failure(ABANDONED_REASON.to_owned());
    }
}

/// Collaborator ids claimed for one batch lookup.
///
/// A claim dropped before it is settled hands its ids back, and a claim
/// taken before the board was closed never writes into the cleared cache.
struct LookupClaim {
    state: Arc<RwLock<BoardState>>,
    ids: Vec<UserId>,
    generation: u64,
}

impl LookupClaim {
    fn settle(mut self, users: Vec<Collaborator>) -> BoardResult<()> {
        let ids = mem::take(&mut self.ids);
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardError::StateUnavailable(err.to_string()))?;
        if state.collaborators.generation() == self.generation {
            state.collaborators.settle(&ids, users);
        } else {
            debug!(requested = ids.len(), "board closed during collaborator lookup, names discarded");
        }
        Ok(())
    }
}

impl Drop for LookupClaim {
    fn drop(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.collaborators.generation() == self.generation {
            state.collaborators.release(&self.ids);
        }
    }
}

/// Task board for one signed-in view.
///
/// All state lives behind a single lock that is never held across a backend
/// call. At most one drag gesture or reconciliation is active at a time;
/// further starts are rejected rather than queued.
pub struct TaskBoard<A, N>
where
    A: TaskApi,
    N: Notifier,
{
    api: Arc<A>,
    notifier: Arc<N>,
    state: Arc<RwLock<BoardState>>,
}

impl<A, N> Clone for TaskBoard<A, N>
where
    A: TaskApi,
    N: Notifier,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, N> TaskBoard<A, N>
where
    A: TaskApi,
    N: Notifier,
{
    /// Creates an empty board.
    #[must_use]
    pub fn new(api: Arc<A>, notifier: Arc<N>) -> Self {
        Self {
            api,
            notifier,
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    /// Replaces the store with the backend's task list and resolves any
    /// collaborator ids not seen before in one batch call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Api`] when the task list cannot be fetched; the
    /// store is left untouched in that case.
    pub async fn refresh(&self) -> BoardResult<()> {
        let tasks = match self.api.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "failed to fetch tasks");
                if err.is_auth_failure() {
                    self.notifier.notify(Notification::SessionExpired);
                } else {
                    self.notifier.notify(Notification::FetchFailed {
                        reason: err.to_string(),
                    });
                }
                return Err(err.into());
            }
        };

        let claim = {
            let mut state = self.write_state()?;
            state.store.load(tasks);
            let ids = collect_collaborator_ids(state.store.tasks());
            self.claim_lookup(&mut state, &ids)
        };
        info!(unresolved = claim.ids.len(), "task list loaded");
        self.resolve_collaborators(claim).await
    }

    fn claim_lookup(&self, state: &mut BoardState, ids: &[UserId]) -> LookupClaim {
        LookupClaim {
            state: Arc::clone(&self.state),
            ids: state.collaborators.claim_missing(ids),
            generation: state.collaborators.generation(),
        }
    }

    async fn resolve_collaborators(&self, claim: LookupClaim) -> BoardResult<()> {
        if claim.ids.is_empty() {
            return Ok(());
        }
        match self.api.fetch_users(&claim.ids).await {
            Ok(users) => {
                debug!(requested = claim.ids.len(), resolved = users.len(), "collaborators resolved");
                claim.settle(users)
            }
            Err(err) => {
                warn!(error = %err, "collaborator lookup failed, names left unresolved");
                Ok(())
            }
        }
    }

    /// Picks up a task card.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn begin_drag(&self, task_id: &TaskId) -> BoardResult<DragStart> {
        let mut state = self.write_state()?;
        if !state.phase.is_idle() {
            debug!(%task_id, "drag start rejected, another gesture is active");
            return Ok(DragStart::Rejected);
        }
        let Some(task) = state.store.get(task_id).cloned() else {
            warn!(%task_id, "drag started on a task missing from the store");
            return Ok(DragStart::UnknownTask);
        };
        state.phase = DragPhase::Dragging {
            task_id: task_id.clone(),
            preview: task.clone(),
        };
        Ok(DragStart::Started(task))
    }

    /// Abandons the current gesture without mutating anything.
    ///
    /// Returns `true` when a gesture was being dragged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn cancel_drag(&self) -> BoardResult<bool> {
        let mut state = self.write_state()?;
        if matches!(state.phase, DragPhase::Dragging { .. }) {
            state.phase = DragPhase::Idle;
            return Ok(true);
        }
        Ok(false)
    }

    /// Releases the current gesture over `over`, the drop-target identifier
    /// reported by the shell, if any.
    ///
    /// A drop onto a different column applies the status change at once,
    /// persists it and rolls back if the backend call fails.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned. Backend failures are reported as
    /// [`DropOutcome::RolledBack`].
    pub async fn end_drag(&self, over: Option<&str>) -> BoardResult<DropOutcome> {
        let preparation = {
            let mut state = self.write_state()?;
            let DragPhase::Dragging { task_id, .. } = &state.phase else {
                return Ok(DropOutcome::NotDragging);
            };
            let task_id = task_id.clone();
            state.phase = DragPhase::Idle;

            let Some(target) = over.and_then(parse_drop_target) else {
                debug!(%task_id, "drag released outside any column");
                return Ok(DropOutcome::Cancelled);
            };
            prepare(
                &mut state,
                &task_id,
                TaskPatch::status(target.column().status()),
                Change::Status,
            )
        };
        self.finish(preparation).await
    }

    /// Moves a task to a column through the same optimistic path as a drop.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub async fn move_task(&self, task_id: &TaskId, column: BoardColumn) -> BoardResult<DropOutcome> {
        let preparation = {
            let mut state = self.write_state()?;
            if !state.phase.is_idle() {
                debug!(%task_id, "move rejected, another gesture is active");
                return Ok(DropOutcome::Busy);
            }
            prepare(
                &mut state,
                task_id,
                TaskPatch::status(column.status()),
                Change::Status,
            )
        };
        self.finish(preparation).await
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub async fn mark_completed(&self, task_id: &TaskId) -> BoardResult<DropOutcome> {
        self.move_task(task_id, BoardColumn::Completed).await
    }

    /// Edits a task through the same optimistic path as a status move.
    ///
    /// The edit is applied to the store at once, sent to the backend and
    /// rolled back if the call fails. Collaborators named by the edit that
    /// are not cached yet are resolved once the backend confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] when the patch names more than
    /// [`CollaboratorSelection::MAX`] collaborators or repeats one, and
    /// [`BoardError::StateUnavailable`] when the state lock is poisoned.
    /// Backend failures are reported as [`DropOutcome::RolledBack`].
    pub async fn edit_task(&self, task_id: &TaskId, patch: TaskPatch) -> BoardResult<DropOutcome> {
        if let Some(ids) = &patch.collaborators {
            check_collaborators(ids)?;
        }
        let preparation = {
            let mut state = self.write_state()?;
            if !state.phase.is_idle() {
                debug!(%task_id, "edit rejected, another gesture is active");
                return Ok(DropOutcome::Busy);
            }
            prepare(&mut state, task_id, patch, Change::Edit)
        };
        let outcome = self.finish(preparation).await?;

        if let DropOutcome::Persisted(task) = &outcome {
            let claim = {
                let mut state = self.write_state()?;
                self.claim_lookup(&mut state, task.collaborators())
            };
            self.resolve_collaborators(claim).await?;
        }
        Ok(outcome)
    }

    async fn finish(&self, preparation: Preparation) -> BoardResult<DropOutcome> {
        match preparation {
            Preparation::Done(outcome) => Ok(outcome),
            Preparation::Ready(pending) => self.persist(pending).await,
        }
    }

    async fn persist(&self, pending: PendingPersist) -> BoardResult<DropOutcome> {
        let PendingPersist {
            change,
            updated,
            snapshot,
            revision,
        } = pending;
        let guard = ReconcileGuard {
            state: Arc::clone(&self.state),
            notifier: Arc::clone(&self.notifier),
            change,
            task_id: updated.id().clone(),
            snapshot,
            revision,
            armed: true,
        };
        let result = self.api.update_task(&updated).await;
        guard.settle(updated, result)
    }

    /// Creates a task and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Api`] when creation or the following reload
    /// fails.
    pub async fn create_task(&self, task: &NewTask) -> BoardResult<()> {
        if let Err(err) = self.api.create_task(task).await {
            self.report_request_failure(&err);
            return Err(err.into());
        }
        self.notifier.notify(Notification::TaskCreated);
        self.refresh().await
    }

    /// Deletes a task and reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Api`] when deletion or the following reload
    /// fails.
    pub async fn delete_task(&self, task_id: &TaskId) -> BoardResult<()> {
        if let Err(err) = self.api.delete_task(task_id).await {
            self.report_request_failure(&err);
            return Err(err.into());
        }
        self.notifier.notify(Notification::TaskDeleted {
            task_id: task_id.clone(),
        });
        self.refresh().await
    }

    fn report_request_failure(&self, err: &TaskApiError) {
        warn!(error = %err, "task request failed");
        self.notifier.notify(Notification::RequestFailed {
            reason: err.to_string(),
        });
        if err.is_auth_failure() {
            self.notifier.notify(Notification::SessionExpired);
        }
    }

    /// Searches users by email for the collaborator picker.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidRequest`] for a blank query or
    /// [`BoardError::Api`] when the search fails.
    pub async fn search_users(&self, email: &str) -> BoardResult<Vec<Collaborator>> {
        let query = email.trim();
        if query.is_empty() {
            return Err(BoardError::InvalidRequest(
                "email search query must not be empty".to_owned(),
            ));
        }
        Ok(self.api.search_users(query).await?)
    }

    /// Returns the current three-column projection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn projection(&self) -> BoardResult<BoardProjection> {
        Ok(BoardProjection::project(self.read_state()?.store.tasks()))
    }

    /// Returns the projection of the tasks that pass `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn filtered_projection(&self, filter: &TaskFilter) -> BoardResult<BoardProjection> {
        Ok(BoardProjection::project_filtered(
            self.read_state()?.store.tasks(),
            filter,
        ))
    }

    /// Returns the collaborator labels of a task, in task order.
    ///
    /// Returns an empty list for unknown tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn collaborator_labels(&self, task_id: &TaskId) -> BoardResult<Vec<CollaboratorLabel>> {
        let state = self.read_state()?;
        Ok(state
            .store
            .get(task_id)
            .map(|task| state.collaborators.labels_for(task))
            .unwrap_or_default())
    }

    /// Returns a task from the store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn task(&self, task_id: &TaskId) -> BoardResult<Option<Task>> {
        Ok(self.read_state()?.store.get(task_id).cloned())
    }

    /// Returns a copy of the store contents.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn snapshot(&self) -> BoardResult<Vec<Task>> {
        Ok(self.read_state()?.store.snapshot())
    }

    /// Returns the store's change counter.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn revision(&self) -> BoardResult<u64> {
        Ok(self.read_state()?.store.revision())
    }

    /// Returns the current drag phase.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn phase(&self) -> BoardResult<DragPhase> {
        Ok(self.read_state()?.phase.clone())
    }

    /// Evicts the store and collaborator cache when the view goes away.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn close(&self) -> BoardResult<()> {
        let mut state = self.write_state()?;
        state.store.clear();
        state.collaborators.clear();
        if matches!(state.phase, DragPhase::Dragging { .. }) {
            state.phase = DragPhase::Idle;
        }
        Ok(())
    }

    fn read_state(&self) -> BoardResult<RwLockReadGuard<'_, BoardState>> {
        self.state
            .read()
            .map_err(|err| BoardError::StateUnavailable(err.to_string()))
    }

    fn write_state(&self) -> BoardResult<RwLockWriteGuard<'_, BoardState>> {
        self.state
            .write()
            .map_err(|err| BoardError::StateUnavailable(err.to_string()))
    }
}

fn parse_drop_target(raw: &str) -> Option<DropTarget> {
    raw.parse()
        .map_err(|err| debug!(error = %err, "ignoring drop target"))
        .ok()
}

fn check_collaborators(ids: &[UserId]) -> Result<(), TaskDomainError> {
    if ids.len() > CollaboratorSelection::MAX {
        return Err(TaskDomainError::TooManyCollaborators {
            max: CollaboratorSelection::MAX,
        });
    }
    let mut seen = HashSet::new();
    match ids.iter().find(|id| !seen.insert(*id)) {
        Some(repeated) => Err(TaskDomainError::DuplicateCollaborator(repeated.clone())),
        None => Ok(()),
    }
}

fn restore(state: &mut BoardState, task_id: &TaskId, snapshot: Vec<Task>, revision: u64) {
    if state.store.revision() == revision {
        state.store.replace_all(snapshot);
    } else {
        warn!(%task_id, "store replaced while persisting, skipping rollback");
    }
}

/// Applies the optimistic half of a change under the state lock.
fn prepare(
    state: &mut BoardState,
    task_id: &TaskId,
    patch: TaskPatch,
    change: Change,
) -> Preparation {
    let Some(current) = state.store.get(task_id) else {
        warn!(%task_id, "changed task is missing from the store");
        return Preparation::Done(DropOutcome::Cancelled);
    };
    let mut candidate = current.clone();
    candidate.apply(patch.clone());
    if candidate == *current {
        debug!(%task_id, ?change, "change leaves the task as it is");
        return Preparation::Done(DropOutcome::Unchanged);
    }

    let from = current.status().clone();
    let snapshot = state.store.snapshot();
    let updated = state
        .store
        .patch(task_id, patch)
        .and_then(|_| state.store.get(task_id).cloned());
    let Some(updated) = updated else {
        return Preparation::Done(DropOutcome::Cancelled);
    };

    debug!(%task_id, ?change, %from, to = %updated.status(), "applied optimistic change");
    state.phase = DragPhase::Reconciling {
        task_id: task_id.clone(),
    };
    Preparation::Ready(PendingPersist {
        change,
        updated,
        snapshot,
        revision: state.store.revision(),
    })
}
