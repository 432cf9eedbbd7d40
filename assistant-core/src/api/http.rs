use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::ApiError,
    model::{CheckedPayload, Forecast, Health, Payload, Query, Recommendation},
};

use super::AssistantApi;

/// Assistant backend reached over plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    http: Client,
}

impl HttpApi {
    /// `timeout` of `None` means requests may wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Url { url: base_url.clone(), reason: e.to_string() })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self { base_url, http: builder.build()? })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let parsed = if params.is_empty() { Url::parse(&raw) } else { Url::parse_with_params(&raw, params) };
        parsed.map_err(|e| ApiError::Url { url: raw.clone(), reason: e.to_string() })
    }

    /// Shared request helper for every endpoint.
    ///
    /// A body that cannot be read or is not JSON is masked: on success it becomes
    /// [`Payload::Unreadable`], on failure it carries no `detail`. Non-2xx responses
    /// fail with the body's `detail`, or `Request failed (<status>)` when there is none.
    /// A JSON body of the wrong shape fails to decode.
    async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<Payload<T>, ApiError>
    where
        T: DeserializeOwned + CheckedPayload,
    {
        let url = self.endpoint(path, params)?;
        debug!(%url, "GET");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = match res.bytes().await {
            Ok(bytes) => parse_body(path, &bytes),
            Err(err) => {
                warn!(path, error = %err, "failed to read response body");
                None
            }
        };

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body.as_ref()));
        }

        let Some(body) = body else {
            return Ok(Payload::Unreadable);
        };

        let parsed: T = serde_json::from_value(body)
            .map_err(|source| ApiError::Decode { path: path.to_string(), source })?;
        parsed
            .check()
            .map_err(|reason| ApiError::Invalid { path: path.to_string(), reason })?;

        Ok(Payload::Parsed(parsed))
    }
}

#[async_trait]
impl AssistantApi for HttpApi {
    async fn forecast(&self, query: &Query) -> Result<Payload<Forecast>, ApiError> {
        self.get_json("/forecast", &[("city", query.location.as_str()), ("date", query.date.as_str())])
            .await
    }

    async fn recommend(&self, query: &Query) -> Result<Payload<Recommendation>, ApiError> {
        self.get_json("/recommend", &[("city", query.location.as_str()), ("date", query.date.as_str())])
            .await
    }

    async fn health(&self) -> Result<Health, ApiError> {
        match self.get_json("/health", &[]).await? {
            Payload::Parsed(health) => Ok(health),
            Payload::Unreadable => Err(ApiError::Invalid {
                path: "/health".to_string(),
                reason: "body is not JSON".to_string(),
            }),
        }
    }
}

fn parse_body(path: &str, bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes)
        .map_err(|err| warn!(path, error = %err, "response body is not JSON"))
        .ok()
}

fn status_error(status: u16, body: Option<&Value>) -> ApiError {
    let message = match body.and_then(|b| b.get("detail")) {
        Some(detail) if !is_falsy(detail) => match detail {
            Value::String(text) => text.clone(),
            // e.g. validation errors come back as a list of objects
            other => other.to_string(),
        },
        _ => format!("Request failed ({status})"),
    };

    ApiError::Status { status, message }
}

/// Values a `detail || fallback` check would skip.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
