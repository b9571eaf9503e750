//! HTTP implementation of [`TrafficApi`] over reqwest.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::TrafficApi;
use crate::config::ServerConfig;
use crate::error::{ClientError, ClientResult};
use crate::model::{
    endpoints, ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse,
    SourceStatus, SwitchSourceRequest,
};

/// REST client for the traffic analytics backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for the configured backend
    pub fn new(config: &ServerConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a JSON body regardless of status; the backend reports
    /// failures in the body, usually with HTTP 200.
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ClientError::HttpStatus {
                status: status.as_u16(),
            }),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl TrafficApi for HttpClient {
    async fn snapshot(&self) -> ClientResult<SnapshotResponse> {
        let response = self.client.get(self.url(endpoints::SNAPSHOT)).send().await?;
        Self::decode(response).await
    }

    async fn control_signal(&self, request: &SignalRequest) -> ClientResult<SignalTiming> {
        tracing::debug!(level = %request.cluster_level, "Configuring signal");

        let response = self
            .client
            .post(self.url(endpoints::CONTROL_SIGNAL))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn generate_graph(&self) -> ClientResult<GraphResponse> {
        let response = self
            .client
            .get(self.url(endpoints::GENERATE_GRAPH))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn upload_video(&self, file_name: &str, data: Vec<u8>) -> ClientResult<ActionResponse> {
        let part = Part::bytes(data).file_name(file_name.to_string());
        let form = Form::new().part(endpoints::UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.url(endpoints::UPLOAD_VIDEO))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_video(&self) -> ClientResult<ActionResponse> {
        let response = self
            .client
            .post(self.url(endpoints::DELETE_VIDEO))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn switch_to_webcam(&self) -> ClientResult<ActionResponse> {
        let response = self
            .client
            .post(self.url(endpoints::SWITCH_SOURCE))
            .json(&SwitchSourceRequest::webcam())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn source_status(&self) -> ClientResult<SourceStatus> {
        let response = self.client.get(self.url(endpoints::STATUS)).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let config = ServerConfig {
            base_url: "http://traffic.local:5000/".to_string(),
            request_timeout_secs: 5,
        };
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://traffic.local:5000");
        assert_eq!(
            client.url(endpoints::SNAPSHOT),
            "http://traffic.local:5000/api/traffic_snapshot"
        );
    }
}
