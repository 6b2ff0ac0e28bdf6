//! HTTP contract tests for the task API.
//!
//! Each test starts the full router, including CORS and tracing layers, on
//! an ephemeral port and talks to it with `reqwest`.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests use assertions for verification while returning Result for error propagation"
)]

mod test_helpers;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::WrapErr;
use reqwest::{Client, StatusCode};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskboard::api::{ErrorBody, ErrorCode, HealthReport, HealthStatus, TaskDto};
use taskboard::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use test_helpers::{TestServer, spawn_server, spawn_server_with};

#[fixture]
fn client() -> Client {
    Client::new()
}

async fn create(server: &TestServer, client: &Client, body: Value) -> eyre::Result<TaskDto> {
    let response = client
        .post(server.url("/tasks"))
        .json(&body)
        .send()
        .await
        .wrap_err("send create request")?;
    eyre::ensure!(
        response.status() == StatusCode::CREATED,
        "expected 201, got {}",
        response.status()
    );
    response.json().await.wrap_err("decode created task")
}

async fn error_code(response: reqwest::Response) -> eyre::Result<ErrorCode> {
    let body: ErrorBody = response.json().await.wrap_err("decode error body")?;
    Ok(body.code)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_empty_for_a_fresh_store(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client.get(server.url("/tasks")).send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<TaskDto> = response.json().await?;
    assert!(tasks.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_defaults_and_get_returns_the_same_object(
    client: Client,
) -> eyre::Result<()> {
    let server = spawn_server().await;

    let created = create(&server, &client, json!({ "title": "  X  " })).await?;
    let fetched: TaskDto = client
        .get(server.url(&format!("/tasks/{}", created.id)))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(created.title, "X");
    assert!(!created.is_completed);
    assert!(created.description.is_none());
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(fetched, created);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_not_found(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client.get(server.url("/tasks/999")).send().await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await?, ErrorCode::TaskNotFound);
    Ok(())
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-1")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_ids_are_bad_requests(client: Client, #[case] raw: &str) -> eyre::Result<()> {
    let server = spawn_server().await;

    let get = client.get(server.url(&format!("/tasks/{raw}"))).send().await?;
    let delete = client
        .delete(server.url(&format!("/tasks/{raw}")))
        .send()
        .await?;

    assert_eq!(get.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(get).await?, ErrorCode::InvalidId);
    assert_eq!(delete.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_id_does_not_alias_an_existing_task(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;
    let created = create(&server, &client, json!({ "title": "Only" })).await?;

    let response = client
        .get(server.url(&format!("/tasks/+{}", created.id)))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await?, ErrorCode::InvalidId);
    Ok(())
}

#[rstest]
#[case(json!({ "title": "" }))]
#[case(json!({ "title": "   " }))]
#[case(json!({}))]
#[case(json!({ "title": "a".repeat(201) }))]
#[case(json!({ "title": "ok", "description": "d".repeat(1001) }))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_bodies_are_validation_errors(
    client: Client,
    #[case] body: Value,
) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client.post(server.url("/tasks")).json(&body).send().await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await?, ErrorCode::ValidationError);
    let listed: Vec<TaskDto> = client.get(server.url("/tasks")).send().await?.json().await?;
    assert!(listed.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_an_invalid_body(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client
        .post(server.url("/tasks"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await?, ErrorCode::InvalidBody);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_changes_only_supplied_fields(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;
    let created = create(
        &server,
        &client,
        json!({ "title": "X", "description": "keep me" }),
    )
    .await?;

    let response = client
        .patch(server.url(&format!("/tasks/{}", created.id)))
        .json(&json!({ "isCompleted": true, "title": null }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: TaskDto = response.json().await?;
    assert!(updated.is_completed);
    assert_eq!(updated.title, "X");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_with_empty_title_is_rejected_and_changes_nothing(
    client: Client,
) -> eyre::Result<()> {
    let server = spawn_server().await;
    let created = create(&server, &client, json!({ "title": "X" })).await?;
    let url = server.url(&format!("/tasks/{}", created.id));

    let response = client
        .patch(&url)
        .json(&json!({ "title": "", "isCompleted": true }))
        .send()
        .await?;
    let stored: TaskDto = client.get(&url).send().await?.json().await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await?, ErrorCode::ValidationError);
    assert_eq!(stored, created);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_of_unknown_task_is_not_found(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client
        .patch(server.url("/tasks/999"))
        .json(&json!({ "isCompleted": true }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_and_delete_again_are_not_found(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;
    let created = create(&server, &client, json!({ "title": "Short lived" })).await?;
    let url = server.url(&format!("/tasks/{}", created.id));

    let first = client.delete(&url).send().await?;
    let get = client.get(&url).send().await?;
    let second = client.delete(&url).send().await?;

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_newest_first(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;
    let mut created_ids = Vec::new();
    for title in ["one", "two", "three"] {
        created_ids.push(create(&server, &client, json!({ "title": title })).await?.id);
    }

    let listed: Vec<TaskDto> = client.get(server.url("/tasks")).send().await?.json().await?;
    let listed_ids: Vec<i64> = listed.iter().map(|task| task.id).collect();

    created_ids.reverse();
    assert_eq!(listed_ids, created_ids);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_a_reachable_store(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client.get(server.url("/health")).send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    let report: HealthReport = response.json().await?;
    assert_eq!(report.status, HealthStatus::Healthy);
    assert_eq!(
        report.checks.first().map(|check| check.name.as_str()),
        Some("task_store")
    );
    Ok(())
}

struct UnreachableRepository;

#[async_trait]
impl TaskRepository for UnreachableRepository {
    async fn insert(&self, _task: &NewTask) -> TaskRepositoryResult<Task> {
        Err(unreachable_store())
    }

    async fn update(&self, _task: &Task) -> TaskRepositoryResult<()> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Err(unreachable_store())
    }

    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>> {
        Err(unreachable_store())
    }

    async fn remove(&self, _id: TaskId) -> TaskRepositoryResult<bool> {
        Err(unreachable_store())
    }

    async fn count(&self) -> TaskRepositoryResult<u64> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> TaskRepositoryResult<()> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_an_unreachable_store(client: Client) -> eyre::Result<()> {
    let server = spawn_server_with(Arc::new(UnreachableRepository)).await;

    let response = client.get(server.url("/health")).send().await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let report: HealthReport = response.json().await?;
    assert_eq!(report.status, HealthStatus::Unhealthy);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failures_are_opaque_internal_errors(client: Client) -> eyre::Result<()> {
    let server = spawn_server_with(Arc::new(UnreachableRepository)).await;

    let response = client.get(server.url("/tasks")).send().await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = response.json().await?;
    assert_eq!(body.code, ErrorCode::InternalError);
    assert!(!body.message.contains("connection refused"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_frontend_origin_is_allowed(client: Client) -> eyre::Result<()> {
    let server = spawn_server().await;

    let response = client
        .get(server.url("/tasks"))
        .header(reqwest::header::ORIGIN, "http://localhost:5173")
        .send()
        .await?;

    let allowed = response
        .headers()
        .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|value| value.to_str().ok());
    assert_eq!(allowed, Some("http://localhost:5173"));
    assert!(server.base_url().starts_with("http://127.0.0.1:"));
    Ok(())
}
