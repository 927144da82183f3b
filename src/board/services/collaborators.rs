//! Batched collaborator resolution.

use crate::board::domain::{Collaborator, CollaboratorLabel, Task, UserId};
use std::collections::{HashMap, HashSet};

/// Collects collaborator ids across tasks, de-duplicated in first-seen order.
#[must_use]
pub fn collect_collaborator_ids(tasks: &[Task]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .flat_map(Task::collaborators)
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

/// Resolved collaborators keyed by user id.
///
/// Lives as long as the board that owns it; entries are never refreshed.
/// Ids handed out by [`CollaboratorCache::claim_missing`] stay in flight until
/// settled or released, so overlapping lookups never request them twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorCache {
    entries: HashMap<UserId, Collaborator>,
    in_flight: HashSet<UserId>,
    generation: u64,
}

impl CollaboratorCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores resolved collaborators.
    pub fn insert_all(&mut self, collaborators: impl IntoIterator<Item = Collaborator>) {
        for collaborator in collaborators {
            self.entries.insert(collaborator.id().clone(), collaborator);
        }
    }

    /// Returns the ids from `ids` that are not cached yet.
    #[must_use]
    pub fn missing(&self, ids: &[UserId]) -> Vec<UserId> {
        ids.iter()
            .filter(|id| !self.entries.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Returns the ids from `ids` that are neither cached nor already being
    /// looked up, and marks them as in flight.
    pub fn claim_missing(&mut self, ids: &[UserId]) -> Vec<UserId> {
        let claimed: Vec<UserId> = self
            .missing(ids)
            .into_iter()
            .filter(|id| !self.in_flight.contains(id))
            .collect();
        self.in_flight.extend(claimed.iter().cloned());
        claimed
    }

    /// Stores the result of a claimed lookup and clears its ids from flight.
    pub fn settle(
        &mut self,
        requested: &[UserId],
        resolved: impl IntoIterator<Item = Collaborator>,
    ) {
        self.release(requested);
        self.insert_all(resolved);
    }

    /// Hands claimed ids back without resolving them.
    pub fn release(&mut self, requested: &[UserId]) {
        for id in requested {
            self.in_flight.remove(id);
        }
    }

    /// Returns the number of ids currently being looked up.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns a counter that changes every time the cache is cleared.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a cached collaborator.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<&Collaborator> {
        self.entries.get(id)
    }

    /// Returns one label per collaborator id on the task, in task order.
    #[must_use]
    pub fn labels_for(&self, task: &Task) -> Vec<CollaboratorLabel> {
        task.collaborators()
            .iter()
            .map(|id| {
                self.get(id).map_or_else(
                    || CollaboratorLabel::Unresolved(id.clone()),
                    |collaborator| CollaboratorLabel::Resolved(collaborator.clone()),
                )
            })
            .collect()
    }

    /// Returns the number of cached collaborators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and forgets outstanding lookups.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
