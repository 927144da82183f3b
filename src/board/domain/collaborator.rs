//! Collaborator references and the editing-time selection rules.

use super::{TaskDomainError, UserId};
use serde::{Deserialize, Serialize};

/// Lightweight user reference resolved from a collaborator id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collaborator {
    id: UserId,
    username: String,
    #[serde(default)]
    email: String,
}

impl Collaborator {
    /// Creates a collaborator reference.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Display label for one collaborator slot on a task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorLabel {
    /// The id was resolved by a batch lookup.
    Resolved(Collaborator),
    /// The id is unknown to the backend or the lookup failed.
    Unresolved(UserId),
}

impl CollaboratorLabel {
    /// Placeholder shown for ids that could not be resolved.
    pub const UNRESOLVED_NAME: &'static str = "unknown user";

    /// Returns the name to render on the card.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(collaborator) => collaborator.username(),
            Self::Unresolved(_) => Self::UNRESOLVED_NAME,
        }
    }

    /// Returns the underlying user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        match self {
            Self::Resolved(collaborator) => collaborator.id(),
            Self::Unresolved(id) => id,
        }
    }
}

/// Collaborators picked while editing a task.
///
/// Holds at most [`CollaboratorSelection::MAX`] distinct users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorSelection {
    members: Vec<Collaborator>,
}

impl CollaboratorSelection {
    /// Maximum number of collaborators on one task.
    pub const MAX: usize = 3;

    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Adds a collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TooManyCollaborators`] when the selection is
    /// full or [`TaskDomainError::DuplicateCollaborator`] when the user is
    /// already selected.
    pub fn add(&mut self, collaborator: Collaborator) -> Result<(), TaskDomainError> {
        if self.members.len() >= Self::MAX {
            return Err(TaskDomainError::TooManyCollaborators { max: Self::MAX });
        }
        if self.contains(collaborator.id()) {
            return Err(TaskDomainError::DuplicateCollaborator(
                collaborator.id().clone(),
            ));
        }
        self.members.push(collaborator);
        Ok(())
    }

    /// Removes a collaborator, returning whether it was selected.
    pub fn remove(&mut self, id: &UserId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.id() != id);
        self.members.len() != before
    }

    /// Returns `true` when the user is selected.
    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.members.iter().any(|member| member.id() == id)
    }

    /// Returns `true` when no more collaborators can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= Self::MAX
    }

    /// Returns the selected collaborators in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Collaborator] {
        &self.members
    }

    /// Returns the selected user ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<UserId> {
        self.members.iter().map(|member| member.id().clone()).collect()
    }
}
