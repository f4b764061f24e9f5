//! HTTP backend using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Backend;
use crate::config::Settings;
use crate::data::{AuditEvent, FaultKind};
use crate::error::ApiError;

/// Talks to the demo service and the AutoHeal engine over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    demo_api: String,
    autoheal_api: String,
    description: String,
}

impl HttpBackend {
    /// Build a backend from resolved settings.
    ///
    /// A request timeout is installed only if `settings.request_timeout` is set.
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, &settings.demo_api, &settings.autoheal_api))
    }

    /// Build a backend around an existing client.
    pub fn with_client(client: Client, demo_api: &str, autoheal_api: &str) -> Self {
        let demo_api = demo_api.trim_end_matches('/').to_string();
        let autoheal_api = autoheal_api.trim_end_matches('/').to_string();
        let description = format!("demo: {} | autoheal: {}", demo_api, autoheal_api);
        Self {
            client,
            demo_api,
            autoheal_api,
            description,
        }
    }

    pub fn demo_api(&self) -> &str {
        &self.demo_api
    }

    pub fn autoheal_api(&self) -> &str {
        &self.autoheal_api
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_audit(&self) -> Result<Vec<AuditEvent>, ApiError> {
        let url = format!("{}/audit", self.autoheal_api);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let events: Vec<AuditEvent> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        debug!(count = events.len(), "fetched audit events");
        Ok(events)
    }

    async fn probe_health(&self) -> Result<u16, ApiError> {
        let url = format!("{}/health", self.demo_api);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().as_u16())
    }

    async fn generate_traffic(&self) -> Result<(), ApiError> {
        let url = format!("{}/", self.demo_api);
        self.client.get(&url).send().await?;
        Ok(())
    }

    async fn toggle_fault(&self, kind: FaultKind) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/fault/{}", self.demo_api, kind.path_segment());
        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_trimmed() {
        let backend =
            HttpBackend::with_client(Client::new(), "http://demo:5000/", "http://engine:8000//");
        assert_eq!(backend.demo_api(), "http://demo:5000");
        assert_eq!(backend.autoheal_api(), "http://engine:8000");
        assert_eq!(
            backend.description(),
            "demo: http://demo:5000 | autoheal: http://engine:8000"
        );
    }

    #[test]
    fn test_new_from_settings() {
        let settings = Settings::default();
        let backend = HttpBackend::new(&settings).unwrap();
        assert_eq!(backend.demo_api(), settings.demo_api);
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let backend = HttpBackend::with_client(Client::new(), &base, &base);
        assert!(matches!(backend.probe_health().await, Err(ApiError::Connection(_))));
        assert!(backend.fetch_audit().await.is_err());
    }
}
