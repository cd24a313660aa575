// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::errors::{HaError, HaResult};
use medisched_types::{EntityState, ScheduleCommand, ScheduleResponse};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Home Assistant REST API client
#[derive(Clone)]
pub struct HomeAssistantClient {
    base_url: String,
    token: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HomeAssistantClient {
    /// Create a new HA client with custom configuration
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> HaResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HaError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Create HA client using Supervisor API environment variables
    /// This is the standard method when running as an HA addon
    pub fn from_supervisor() -> HaResult<Self> {
        let base_url = "http://supervisor/core";
        let token = std::env::var("SUPERVISOR_TOKEN").map_err(|_| {
            HaError::ConfigError(
                "SUPERVISOR_TOKEN environment variable not set. Are you running as an HA addon?"
                    .to_owned(),
            )
        })?;

        info!("Initializing HA client using Supervisor API");
        Self::new(base_url, token)
    }

    /// Create HA client for development/testing with custom URL
    pub fn from_env() -> HaResult<Self> {
        let base_url =
            std::env::var("HA_BASE_URL").unwrap_or_else(|_| "http://localhost:8123".to_owned());
        let token = std::env::var("HA_TOKEN")
            .map_err(|_| HaError::ConfigError("HA_TOKEN environment variable not set".to_owned()))?;

        info!("Initializing HA client for development: {}", base_url);
        Self::new(base_url, token)
    }

    /// Fetch the full medication schedule from the integration.
    ///
    /// Sends the tagged `medical_assistant/get_schedule` command to the
    /// integration's message endpoint. A response without a `schedule`
    /// field decodes as an empty list.
    pub async fn get_schedule(&self) -> HaResult<ScheduleResponse> {
        let url = format!("{}/api/medical_assistant/ws", self.base_url);
        debug!("🔍 [HA QUERY] Fetching medication schedule");
        debug!("   URL: {}", url);

        let response = self
            .retry_request(|| async {
                self.client
                    .post(&url)
                    .bearer_auth(&self.token)
                    .json(&ScheduleCommand::GetSchedule)
                    .send()
                    .await
            })
            .await?;

        match response.status() {
            StatusCode::OK => {
                let schedule = response
                    .json::<ScheduleResponse>()
                    .await
                    .map_err(|e| HaError::InvalidResponse(e.to_string()))?;
                debug!(
                    "✅ [HA RESULT] Schedule with {} record(s)",
                    schedule.schedule.len()
                );
                Ok(schedule)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [HA ERROR] Authentication failed fetching schedule");
                Err(HaError::AuthenticationFailed)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("❌ [HA ERROR] Status {}: {}", status, error_text);
                Err(HaError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }

    /// Get the state of a specific entity
    pub async fn get_state(&self, entity_id: &str) -> HaResult<EntityState> {
        let url = format!(
            "{}/api/states/{}",
            self.base_url,
            urlencoding::encode(entity_id)
        );
        debug!("🔍 [HA QUERY] Getting state for entity: {}", entity_id);
        debug!("   URL: {}", url);

        let response = self
            .retry_request(|| async { self.client.get(&url).bearer_auth(&self.token).send().await })
            .await?;

        match response.status() {
            StatusCode::OK => {
                let state = response
                    .json::<EntityState>()
                    .await
                    .map_err(|e| HaError::InvalidResponse(e.to_string()))?;
                debug!("✅ [HA RESULT] Entity: {} = '{}'", entity_id, state.state);
                Ok(state)
            }
            StatusCode::NOT_FOUND => {
                error!("❌ [HA ERROR] Entity not found: {}", entity_id);
                Err(HaError::EntityNotFound(entity_id.to_owned()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(
                    "❌ [HA ERROR] Authentication failed for entity: {}",
                    entity_id
                );
                Err(HaError::AuthenticationFailed)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("❌ [HA ERROR] Status {}: {}", status, error_text);
                Err(HaError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }

    /// Call a Home Assistant service
    ///
    /// # Arguments
    /// * `service` - Service name in format "domain.service"
    ///   (e.g., "medical_assistant.add_medication")
    /// * `data` - JSON data to send with the service call
    pub async fn call_service(&self, service: &str, data: Value) -> HaResult<()> {
        let parts: Vec<&str> = service.split('.').collect();
        if parts.len() != 2 {
            error!("❌ [HA ERROR] Invalid service format: {}", service);
            return Err(HaError::ServiceCallFailed {
                service: service.to_owned(),
                reason: "Invalid service format, expected 'domain.service'".to_owned(),
            });
        }

        let url = format!("{}/api/services/{}/{}", self.base_url, parts[0], parts[1]);
        info!("📞 [HA SERVICE] Calling: {}", service);
        debug!(
            "   Data: {}",
            serde_json::to_string(&data).unwrap_or_else(|_| format!("{:?}", data))
        );
        debug!("   URL: {}", url);

        let response = self
            .retry_request(|| async {
                self.client
                    .post(&url)
                    .bearer_auth(&self.token)
                    .json(&data)
                    .send()
                    .await
            })
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                info!("✅ [HA SERVICE] Success: {}", service);
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [HA SERVICE] Authentication failed for: {}", service);
                Err(HaError::AuthenticationFailed)
            }
            _status => {
                let error_msg = response.text().await.unwrap_or_default();
                error!("❌ [HA SERVICE] Failed: {} (status: {})", service, status);
                error!("   Error: {}", error_msg);
                Err(HaError::ServiceCallFailed {
                    service: service.to_owned(),
                    reason: error_msg,
                })
            }
        }
    }

    /// Health check - ping HA API
    pub async fn ping(&self) -> HaResult<bool> {
        let url = format!("{}/api/", self.base_url);
        debug!("Performing health check");

        match self.client.get(&url).bearer_auth(&self.token).send().await {
            Ok(response) => {
                let is_ok = response.status().is_success();
                if is_ok {
                    debug!("Health check passed");
                } else {
                    warn!("Health check failed: status {}", response.status());
                }
                Ok(is_ok)
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                Ok(false) // Don't error on health check failure
            }
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> HaResult<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                Err(e) if attempts >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempts, e);
                    return Err(HaError::HttpError(e));
                }
                Err(e) => {
                    warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
            }
        }
    }

    /// Set custom retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_schedule_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/medical_assistant/ws")
            .match_header("authorization", "Bearer test_token")
            .match_body(Matcher::Json(json!({
                "type": "medical_assistant/get_schedule"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "schedule": [
                        {
                            "id": "med-1",
                            "day": "Monday",
                            "time": "09:00:00",
                            "name": "Aspirin",
                            "strength": "100mg"
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let response = client.get_schedule().await.unwrap();

        assert_eq!(response.schedule.len(), 1);
        assert_eq!(response.schedule[0].name, "Aspirin");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_schedule_missing_field_is_empty() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/medical_assistant/ws")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let response = client.get_schedule().await.unwrap();

        assert!(response.schedule.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_schedule_unauthorized() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/medical_assistant/ws")
            .with_status(401)
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "bad_token").unwrap();
        let result = client.get_schedule().await;

        assert!(matches!(result, Err(HaError::AuthenticationFailed)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_state_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/states/sensor.medical_assistant_monday_schedule")
            .match_header("authorization", "Bearer test_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "entity_id": "sensor.medical_assistant_monday_schedule",
                    "state": "2",
                    "attributes": {"medications": []},
                    "last_changed": "2026-08-24T10:00:00Z",
                    "last_updated": "2026-08-24T10:00:00Z"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let state = client
            .get_state("sensor.medical_assistant_monday_schedule")
            .await
            .unwrap();

        assert_eq!(state.entity_id, "sensor.medical_assistant_monday_schedule");
        assert_eq!(state.state, "2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_state_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/states/sensor.nonexistent")
            .match_header("authorization", "Bearer test_token")
            .with_status(404)
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let result = client.get_state("sensor.nonexistent").await;

        assert!(matches!(result, Err(HaError::EntityNotFound(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_service_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/services/medical_assistant/add_medication")
            .match_header("authorization", "Bearer test_token")
            .match_body(Matcher::Json(json!({
                "day": "Monday",
                "medication_name": "Aspirin",
                "strength": "100mg",
                "time": "09:00:00"
            })))
            .with_status(200)
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let result = client
            .call_service(
                "medical_assistant.add_medication",
                json!({
                    "day": "Monday",
                    "medication_name": "Aspirin",
                    "strength": "100mg",
                    "time": "09:00:00"
                }),
            )
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_service_invalid_format() {
        let client = HomeAssistantClient::new("http://localhost", "token").unwrap();
        let result = client.call_service("invalid", json!({})).await;

        assert!(matches!(result, Err(HaError::ServiceCallFailed { .. })));
    }

    #[tokio::test]
    async fn test_call_service_rejection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/services/medical_assistant/remove_medication")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let result = client
            .call_service("medical_assistant.remove_medication", json!({"id": "x"}))
            .await;

        assert!(matches!(result, Err(HaError::ServiceCallFailed { .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ping_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/")
            .match_header("authorization", "Bearer test_token")
            .with_status(200)
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token").unwrap();
        let result = client.ping().await.unwrap();

        assert!(result);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retry_logic() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/api/medical_assistant/ws")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"schedule": []}).to_string())
            .expect_at_least(1)
            .create_async()
            .await;

        let client = HomeAssistantClient::new(server.url(), "test_token")
            .unwrap()
            .with_retry_config(3, Duration::from_millis(10));

        let result = client.get_schedule().await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retry_exhaustion_on_transport_error() {
        // Bind a port, then release it so connections are refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HomeAssistantClient::new(format!("http://127.0.0.1:{}", port), "test_token")
            .unwrap()
            .with_retry_config(2, Duration::from_millis(1));

        let result = client.get_schedule().await;
        assert!(matches!(result, Err(HaError::HttpError(_))));
    }
}
