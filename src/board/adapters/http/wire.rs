//! Wire payloads and response normalization for the REST backend.
//!
//! The backend wraps lists in an envelope (`{"tasks": [...]}`) but has also
//! been seen returning flat and nested arrays. Everything is flattened into
//! one canonical list here so the board never sees the variation.

use crate::board::domain::{Collaborator, NewTask, Task, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Normalizes a `GET tasks` body into task records.
pub fn normalize_tasks(body: Value) -> Vec<Task> {
    normalize_records(body, "tasks")
}

/// Normalizes a user lookup body into collaborator records.
pub fn normalize_users(body: Value) -> Vec<Collaborator> {
    normalize_records(body, "users")
}

fn normalize_records<T: DeserializeOwned>(body: Value, envelope: &str) -> Vec<T> {
    let payload = match body {
        Value::Object(mut fields) => fields.remove(envelope).unwrap_or(Value::Null),
        other => other,
    };
    let mut records = Vec::new();
    collect_records(payload, envelope, &mut records);
    records
}

fn collect_records<T: DeserializeOwned>(payload: Value, kind: &str, records: &mut Vec<T>) {
    match payload {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                if item.is_array() || item.is_null() {
                    collect_records(item, kind, records);
                    continue;
                }
                match serde_json::from_value(item) {
                    Ok(record) => records.push(record),
                    Err(err) => warn!(%kind, error = %err, "skipping malformed record"),
                }
            }
        }
        other => warn!(%kind, shape = %value_kind(&other), "unexpected response shape"),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extracts the human-readable message from an error body.
pub fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.or(parsed.message)
}

/// Request body of `POST users/batch`.
#[derive(Debug, Serialize)]
pub struct BatchUsersBody<'a> {
    /// Ids to resolve.
    pub ids: &'a [UserId],
}

/// Request body of `POST tasks`.
#[derive(Debug, Serialize)]
pub struct NewTaskBody<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    status: &'a str,
    time_until_finish: i64,
    remind_me: bool,
    arr_collaborators: Vec<UserId>,
}

impl<'a> From<&'a NewTask> for NewTaskBody<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            title: task.title().as_str(),
            description: task.description().unwrap_or_default(),
            category: task.category().as_str(),
            status: task.status().as_str(),
            time_until_finish: task.time_until_finish().as_nanos(),
            remind_me: task.remind_me(),
            arr_collaborators: task.collaborators().ids(),
        }
    }
}
