//! Task record and its field value types.

use super::{CollaboratorSelection, TaskDomainError, TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task classification label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Categories offered by the task form.
    pub const KNOWN: [&'static str; 6] =
        ["work", "personal", "shopping", "health", "education", "other"];

    /// Wraps a category label.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for labels from the client-known set.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time budget granted to a task, measured from `created_at`, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinishBudget(i64);

impl FinishBudget {
    /// Nanoseconds in one hour.
    pub const NANOS_PER_HOUR: i64 = 3_600_000_000_000;

    /// Creates a budget from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Creates a budget from whole hours, saturating on overflow.
    #[must_use]
    pub fn from_hours(hours: u32) -> Self {
        Self(i64::from(hours).saturating_mul(Self::NANOS_PER_HOUR))
    }

    /// Returns the raw nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Returns `true` when no budget was set.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 <= 0
    }
}

/// Task record as held by the board.
///
/// Fields the board does not interpret (owner, group assignment, update
/// timestamps) are retained in `extra` and sent back unchanged when the
/// task is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(
        default,
        deserialize_with = "deserialize_description",
        serialize_with = "serialize_description"
    )]
    description: Option<String>,
    status: TaskStatus,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    remind_me: bool,
    #[serde(default)]
    time_until_finish: FinishBudget,
    created_at: DateTime<Utc>,
    #[serde(rename = "arr_collaborators", default, deserialize_with = "deserialize_ids")]
    collaborators: Vec<UserId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Parameter object for constructing a task outside of deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Backend identifier.
    pub id: TaskId,
    /// Display title.
    pub title: TaskTitle,
    /// Optional description markup.
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Classification label.
    pub category: Category,
    /// Reminder badge flag.
    pub remind_me: bool,
    /// Completion budget.
    pub time_until_finish: FinishBudget,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Collaborator identifiers in display order.
    pub collaborators: Vec<UserId>,
}

impl Task {
    /// Builds a task from its parts.
    #[must_use]
    pub fn from_data(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            category: data.category,
            remind_me: data.remind_me,
            time_until_finish: data.time_until_finish,
            created_at: data.created_at,
            collaborators: data.collaborators,
            extra: Map::new(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the category label.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns whether the reminder badge is shown.
    #[must_use]
    pub const fn remind_me(&self) -> bool {
        self.remind_me
    }

    /// Returns the completion budget.
    #[must_use]
    pub const fn time_until_finish(&self) -> FinishBudget {
        self.time_until_finish
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the collaborator identifiers.
    #[must_use]
    pub fn collaborators(&self) -> &[UserId] {
        &self.collaborators
    }

    /// Returns backend fields the board does not interpret.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Applies a shallow field-level update.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            status,
            category,
            remind_me,
            time_until_finish,
            collaborators,
        } = patch;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = remind_me {
            self.remind_me = value;
        }
        if let Some(value) = time_until_finish {
            self.time_until_finish = value;
        }
        if let Some(value) = collaborators {
            self.collaborators = value;
        }
    }
}

/// Shallow update of task fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement category.
    pub category: Option<Category>,
    /// Replacement reminder flag.
    pub remind_me: Option<bool>,
    /// Replacement completion budget.
    pub time_until_finish: Option<FinishBudget>,
    /// Replacement collaborator list.
    pub collaborators: Option<Vec<UserId>>,
}

impl TaskPatch {
    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Replaces the collaborator list with a capped selection.
    #[must_use]
    pub fn with_collaborators(mut self, selection: &CollaboratorSelection) -> Self {
        self.collaborators = Some(selection.ids());
        self
    }
}

fn deserialize_description<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|text| !text.trim().is_empty()))
}

// The backend ignores empty strings on update, so an absent description is
// sent as "" rather than omitted.
fn serialize_description<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<UserId>>::deserialize(deserializer)?.unwrap_or_default())
}
