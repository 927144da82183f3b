//! Request payload for creating a task on the backend.

use super::{Category, CollaboratorSelection, FinishBudget, TaskStatus, TaskTitle};

/// Fields submitted when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    category: Category,
    status: TaskStatus,
    time_until_finish: FinishBudget,
    remind_me: bool,
    collaborators: CollaboratorSelection,
}

impl NewTask {
    /// Creates a pending task request with the required title.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            category: Category::default(),
            status: TaskStatus::Pending,
            time_until_finish: FinishBudget::default(),
            remind_me: false,
            collaborators: CollaboratorSelection::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the completion budget in whole hours.
    #[must_use]
    pub fn with_budget_hours(mut self, hours: u32) -> Self {
        self.time_until_finish = FinishBudget::from_hours(hours);
        self
    }

    /// Enables the reminder badge.
    #[must_use]
    pub const fn with_reminder(mut self, remind_me: bool) -> Self {
        self.remind_me = remind_me;
        self
    }

    /// Sets the collaborators.
    #[must_use]
    pub fn with_collaborators(mut self, collaborators: CollaboratorSelection) -> Self {
        self.collaborators = collaborators;
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the completion budget.
    #[must_use]
    pub const fn time_until_finish(&self) -> FinishBudget {
        self.time_until_finish
    }

    /// Returns whether the reminder badge is enabled.
    #[must_use]
    pub const fn remind_me(&self) -> bool {
        self.remind_me
    }

    /// Returns the selected collaborators.
    #[must_use]
    pub const fn collaborators(&self) -> &CollaboratorSelection {
        &self.collaborators
    }
}
