//! Blocking HTTP implementation of [`BoardBackend`] over `ureq`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use taskboard_core::api::{AccessTarget, BoardScope, CategoryIds, Endpoint, TaskUpdate, Usernames};
use taskboard_core::config::ApiConfig;
use taskboard_core::error::BoardError;
use taskboard_core::model::board::{BoardPayload, CategoryPayload, PriorityPayload, StatusPayload};
use taskboard_core::model::{Board, Category, PriorityLevel, Status};
use taskboard_core::mutation::BoardBackend;
use tracing::debug;

pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(api: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("taskboard-cli/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            base_url: api.base_url.clone(),
            agent,
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn call(
        &self,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
    ) -> Result<ureq::Response, BoardError> {
        let url = self.url(endpoint);
        debug!(%endpoint, "backend request");
        let request = self
            .agent
            .request(endpoint.method().as_str(), &url)
            .set("Accept", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().ok();
                Err(api_error(endpoint, status, body.as_deref()))
            }
            Err(ureq::Error::Transport(transport)) => Err(BoardError::Transport {
                url,
                reason: transport.to_string(),
            }),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, BoardError> {
        self.call(endpoint, None)?
            .into_json::<T>()
            .map_err(|err| BoardError::Decode {
                what: endpoint.to_string(),
                reason: err.to_string(),
            })
    }

    fn send_json<B: Serialize>(&self, endpoint: &Endpoint, body: &B) -> Result<(), BoardError> {
        let body = serde_json::to_value(body).map_err(|err| BoardError::Decode {
            what: format!("request body for {endpoint}"),
            reason: err.to_string(),
        })?;
        self.call(endpoint, Some(body)).map(drop)
    }
}

/// Build the error for a non-2xx answer.
///
/// Prefers the body's `detail`, then `message`, then a generic line naming
/// the request.
fn api_error(endpoint: &Endpoint, status: u16, body: Option<&str>) -> BoardError {
    let message = body
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .and_then(|value| {
            ["detail", "message"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(serde_json::Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| {
            format!(
                "{} {} failed with {status}",
                endpoint.method(),
                endpoint.path()
            )
        });
    BoardError::Api { status, message }
}

impl BoardBackend for HttpBackend {
    fn fetch_board(&self, scope: BoardScope) -> Result<Board, BoardError> {
        self.get_json::<BoardPayload>(&Endpoint::Board(scope))
            .map(BoardPayload::into_board)
    }

    fn fetch_statuses(&self) -> Result<Vec<Status>, BoardError> {
        self.get_json::<StatusPayload>(&Endpoint::Statuses)
            .map(StatusPayload::into_statuses)
    }

    fn fetch_priorities(&self) -> Result<Vec<PriorityLevel>, BoardError> {
        self.get_json::<PriorityPayload>(&Endpoint::Priorities)
            .map(PriorityPayload::into_levels)
    }

    fn fetch_categories(&self) -> Result<Vec<Category>, BoardError> {
        self.get_json::<CategoryPayload>(&Endpoint::Categories)
            .map(CategoryPayload::into_categories)
    }

    fn update_task(
        &self,
        scope: BoardScope,
        task_id: i64,
        update: &TaskUpdate,
    ) -> Result<(), BoardError> {
        self.send_json(&Endpoint::UpdateTask { scope, task_id }, update)
    }

    fn attach_categories(
        &self,
        scope: BoardScope,
        task_id: i64,
        category_ids: &[i64],
    ) -> Result<(), BoardError> {
        self.send_json(
            &Endpoint::AttachCategories { scope, task_id },
            &CategoryIds { category_ids },
        )
    }

    fn detach_categories(
        &self,
        scope: BoardScope,
        task_id: i64,
        category_ids: &[i64],
    ) -> Result<(), BoardError> {
        self.send_json(
            &Endpoint::DetachCategories { scope, task_id },
            &CategoryIds { category_ids },
        )
    }

    fn add_members(&self, target: AccessTarget, usernames: &[String]) -> Result<(), BoardError> {
        self.send_json(&Endpoint::AddMembers(target), &Usernames { usernames })
    }

    fn remove_members(
        &self,
        target: AccessTarget,
        usernames: &[String],
    ) -> Result<(), BoardError> {
        self.send_json(&Endpoint::RemoveMembers(target), &Usernames { usernames })
    }
}
