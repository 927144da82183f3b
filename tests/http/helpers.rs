//! Shared helpers for HTTP adapter tests.

use mockito::ServerGuard;
use serde_json::{Value, json};
use taskboard::board::adapters::http::HttpTaskApi;
use taskboard::config::ApiConfig;
use taskboard::session::Session;

/// Token the mock backend expects.
pub const TOKEN: &str = "secret-token";

/// Authorization header value sent with [`TOKEN`].
pub const BEARER: &str = "Bearer secret-token";

/// Starts a mock backend.
pub async fn server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Builds a client for `server` using `session`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn client_with(server: &ServerGuard, session: Session) -> Result<HttpTaskApi, eyre::Report> {
    let config = ApiConfig {
        base_url: format!("{}/api/", server.url()),
        timeout_secs: Some(5),
        token: None,
    };
    Ok(HttpTaskApi::new(&config, session)?)
}

/// Builds an authenticated client for `server`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn client(server: &ServerGuard) -> Result<HttpTaskApi, eyre::Report> {
    client_with(server, Session::from_token(Some(TOKEN)))
}

/// Returns a backend task record, including fields the board does not read.
pub fn task_record(id: &str, status: &str, collaborators: &[&str]) -> Value {
    json!({
        "id": id,
        "user_id": "owner-1",
        "title": format!("Task {id}"),
        "description": "",
        "time_until_finish": 0,
        "remind_me": false,
        "status": status,
        "category": "work",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z",
        "arr_collaborators": collaborators
    })
}

/// Returns a backend user record.
pub fn user_record(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com")
    })
}
