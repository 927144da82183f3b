//! Task endpoint tests.

use super::helpers::{BEARER, client, client_with, server, task_record};
use mockito::Matcher;
use serde_json::json;
use taskboard::board::{
    domain::{Category, NewTask, Task, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{TaskApi, TaskApiError},
};
use taskboard::session::Session;

#[tokio::test(flavor = "multi_thread")]
async fn fetch_tasks_sends_bearer_token_and_unwraps_envelope() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let body = json!({"tasks": [task_record("t1", "pending", &["u1"]), task_record("t2", "completed", &[])]});
    let mock = server
        .mock("GET", "/api/tasks")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let tasks = client(&server)?.fetch_tasks().await?;

    mock.assert_async().await;
    let ids: Vec<&str> = tasks.iter().map(|task| task.id().as_str()).collect();
    eyre::ensure!(ids == ["t1", "t2"], "unexpected ids {ids:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_tasks_flattens_nested_arrays() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let body = json!([[task_record("t1", "pending", &[])], [task_record("t2", "pending", &[])]]);
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let tasks = client(&server)?.fetch_tasks().await?;

    eyre::ensure!(tasks.len() == 2, "expected two tasks, got {}", tasks.len());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_task_puts_full_record_with_unknown_fields() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let record = task_record("t1", "pending", &["u1"]);
    let mut task = serde_json::from_value::<Task>(record)?;
    task.apply(TaskPatch::status(TaskStatus::Completed));
    let mock = server
        .mock("PUT", "/api/tasks/t1")
        .match_header("authorization", BEARER)
        .match_body(Matcher::PartialJson(json!({
            "id": "t1",
            "status": "completed",
            "user_id": "owner-1",
            "updated_at": "2025-01-01T00:00:00Z",
            "description": "",
            "arr_collaborators": ["u1"]
        })))
        .with_status(200)
        .with_body(r#"{"message": "Task updated successfully"}"#)
        .create_async()
        .await;

    client(&server)?.update_task(&task).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_posts_form_fields() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let mock = server
        .mock("POST", "/api/tasks")
        .match_body(Matcher::Json(json!({
            "title": "Gym",
            "description": "leg day",
            "category": "health",
            "status": "pending",
            "time_until_finish": 3_600_000_000_000_i64,
            "remind_me": false,
            "arr_collaborators": []
        })))
        .with_status(201)
        .with_body(r#"{"message": "Task created successfully"}"#)
        .create_async()
        .await;
    let task = NewTask::new(TaskTitle::new("Gym")?)
        .with_description("leg day")
        .with_category(Category::new("health"))
        .with_budget_hours(1);

    client(&server)?.create_task(&task).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_targets_task_path() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let mock = server
        .mock("DELETE", "/api/tasks/t9")
        .with_status(200)
        .create_async()
        .await;

    client(&server)?.delete_task(&TaskId::from("t9")).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_response_maps_to_auth_failure() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(401)
        .with_body(r#"{"error": "Unauthorized"}"#)
        .create_async()
        .await;

    let result = client(&server)?.fetch_tasks().await;

    eyre::ensure!(
        result == Err(TaskApiError::Unauthorized),
        "expected unauthorized, got {result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn error_body_message_is_surfaced() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("DELETE", "/api/tasks/t1")
        .with_status(404)
        .with_body(r#"{"error": "Task not found"}"#)
        .create_async()
        .await;

    let result = client(&server)?.delete_task(&TaskId::from("t1")).await;

    let expected = Err(TaskApiError::Rejected {
        status: 404,
        message: "Task not found".to_owned(),
    });
    eyre::ensure!(result == expected, "unexpected result {result:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn forbidden_is_not_an_auth_failure() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let result = client(&server)?.fetch_tasks().await;

    let Err(err) = result else {
        eyre::bail!("expected a rejected request");
    };
    eyre::ensure!(!err.is_auth_failure(), "403 must not expire the session");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_never_reaches_backend() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let mock = server
        .mock("GET", "/api/tasks")
        .expect(0)
        .create_async()
        .await;

    let result = client_with(&server, Session::anonymous())?
        .fetch_tasks()
        .await;

    mock.assert_async().await;
    eyre::ensure!(
        result == Err(TaskApiError::MissingCredentials),
        "expected missing credentials, got {result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_body_is_a_decode_error() -> Result<(), eyre::Report> {
    let mut server = server().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let result = client(&server)?.fetch_tasks().await;

    eyre::ensure!(
        matches!(result, Err(TaskApiError::Decode(_))),
        "expected decode error, got {result:?}"
    );
    Ok(())
}
