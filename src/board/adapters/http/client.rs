//! `reqwest` implementation of the task backend port.

use super::wire::{self, BatchUsersBody, NewTaskBody};
use crate::board::{
    domain::{Collaborator, NewTask, Task, TaskId, UserId},
    ports::{TaskApi, TaskApiError, TaskApiResult},
};
use crate::config::ApiConfig;
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Task backend reached over HTTP with the session's bearer token.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpTaskApi {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`TaskApiError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &ApiConfig, session: Session) -> TaskApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| TaskApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            session,
        })
    }

    /// Returns the session the client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> TaskApiResult<RequestBuilder> {
        let token = self
            .session
            .token()
            .ok_or(TaskApiError::MissingCredentials)?;
        Ok(request.bearer_auth(token.expose()))
    }

    async fn send(&self, request: RequestBuilder) -> TaskApiResult<Response> {
        let response = self
            .authorized(request)?
            .send()
            .await
            .map_err(|err| TaskApiError::Transport(err.to_string()))?;
        check_status(response).await
    }

    async fn send_for_json(&self, request: RequestBuilder) -> TaskApiResult<Value> {
        self.send(request)
            .await?
            .json::<Value>()
            .await
            .map_err(|err| TaskApiError::Decode(err.to_string()))
    }
}

async fn check_status(response: Response) -> TaskApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(TaskApiError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    let message = wire::error_message(&body).unwrap_or(body);
    Err(TaskApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn fetch_tasks(&self) -> TaskApiResult<Vec<Task>> {
        let body = self
            .send_for_json(self.client.get(self.url("tasks")))
            .await?;
        let tasks = wire::normalize_tasks(body);
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn update_task(&self, task: &Task) -> TaskApiResult<()> {
        let url = self.url(&format!("tasks/{}", task.id()));
        self.send(self.client.put(url).json(task)).await?;
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> TaskApiResult<()> {
        let body = NewTaskBody::from(task);
        self.send(self.client.post(self.url("tasks")).json(&body))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> TaskApiResult<()> {
        let url = self.url(&format!("tasks/{id}"));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn fetch_users(&self, ids: &[UserId]) -> TaskApiResult<Vec<Collaborator>> {
        let request = self
            .client
            .post(self.url("users/batch"))
            .json(&BatchUsersBody { ids });
        let body = self.send_for_json(request).await?;
        Ok(wire::normalize_users(body))
    }

    async fn search_users(&self, email: &str) -> TaskApiResult<Vec<Collaborator>> {
        let request = self
            .client
            .get(self.url("users/search"))
            .query(&[("email", email)]);
        let body = self.send_for_json(request).await?;
        Ok(wire::normalize_users(body))
    }
}
