use crate::domain::ports::RpcGateway;
use crate::error::{Result, SessionError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

/// Remote procedure gateway over the backend's HTTP method endpoint.
///
/// Calls are posted as JSON to `{base_url}/api/method/{method}`; the payload
/// returned by the method sits under the `message` key of the response.
pub struct HttpRpcGateway {
    pub base_url: String,
    pub timeout: Duration,
    pub client: reqwest::Client,
}

impl HttpRpcGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.base_url.trim_end_matches('/'), method)
    }
}

#[async_trait]
impl RpcGateway for HttpRpcGateway {
    async fn call(&self, method: &str, args: Map<String, Value>) -> Result<Value> {
        let url = self.method_url(method);
        tracing::debug!(url = %url, "calling remote method");

        let resp = self
            .client
            .post(url)
            .json(&args)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SessionError::RemoteError {
                method: method.to_string(),
                reason: format!("HTTP {}: {}", status.as_u16(), body.chars().take(200).collect::<String>()),
            });
        }

        let mut body: Value = resp.json().await?;
        Ok(body
            .get_mut("message")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}
