//! User lookup endpoint tests.

use super::helpers::{BEARER, client, server, user_record};
use mockito::Matcher;
use serde_json::json;
use taskboard::board::{domain::UserId, ports::TaskApi};

#[tokio::test(flavor = "multi_thread")]
async fn fetch_users_posts_id_batch() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let mock = server
        .mock("POST", "/api/users/batch")
        .match_header("authorization", BEARER)
        .match_body(Matcher::Json(json!({"ids": ["u1", "u2"]})))
        .with_status(200)
        .with_body(json!({"users": [user_record("u1", "ana"), user_record("u2", "ben")]}).to_string())
        .create_async()
        .await;

    let users = client(&server)?
        .fetch_users(&[UserId::from("u1"), UserId::from("u2")])
        .await?;

    mock.assert_async().await;
    let names: Vec<&str> = users.iter().map(|user| user.username()).collect();
    eyre::ensure!(names == ["ana", "ben"], "unexpected names {names:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn search_users_sends_email_query() -> Result<(), eyre::Report> {
    let mut server = server().await;
    let mock = server
        .mock("GET", "/api/users/search")
        .match_query(Matcher::UrlEncoded(
            "email".to_owned(),
            "ana@example.com".to_owned(),
        ))
        .with_status(200)
        .with_body(json!({"users": [user_record("u1", "ana")]}).to_string())
        .create_async()
        .await;

    let users = client(&server)?.search_users("ana@example.com").await?;

    mock.assert_async().await;
    let first = users
        .first()
        .ok_or_else(|| eyre::eyre!("expected one user"))?;
    eyre::ensure!(first.id().as_str() == "u1", "unexpected user {first:?}");
    Ok(())
}
