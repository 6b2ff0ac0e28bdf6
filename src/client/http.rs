//! `reqwest` implementation of the client transport.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{ClientError, ClientResult, TaskApi};
use crate::api::{CreateTaskDto, TaskDto, UpdateTaskDto};

/// Task API client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Creates a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client,
            base_url: base,
        }
    }

    /// Root URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

fn checked(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound)
    } else {
        tracing::debug!(status = status.as_u16(), "task API returned an error status");
        Err(ClientError::Status(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = checked(response)?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ClientResult<Vec<TaskDto>> {
        let response = self.client.get(self.tasks_url()).send().await?;
        decode(response).await
    }

    async fn get_task(&self, id: i64) -> ClientResult<TaskDto> {
        let response = self.client.get(self.task_url(id)).send().await?;
        decode(response).await
    }

    async fn create_task(&self, body: CreateTaskDto) -> ClientResult<TaskDto> {
        let response = self
            .client
            .post(self.tasks_url())
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    async fn update_task(&self, id: i64, patch: UpdateTaskDto) -> ClientResult<TaskDto> {
        let response = self
            .client
            .patch(self.task_url(id))
            .json(&patch)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_task(&self, id: i64) -> ClientResult<()> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        checked(response)?;
        Ok(())
    }
}
