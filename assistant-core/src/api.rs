use crate::{
    Config,
    api::http::HttpApi,
    error::ApiError,
    model::{Forecast, Health, Payload, Query, Recommendation},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod http;

/// Default origin of the assistant backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// The remote forecast and recommendation service.
#[async_trait]
pub trait AssistantApi: Send + Sync + Debug {
    async fn forecast(&self, query: &Query) -> Result<Payload<Forecast>, ApiError>;

    async fn recommend(&self, query: &Query) -> Result<Payload<Recommendation>, ApiError>;

    async fn health(&self) -> Result<Health, ApiError>;
}

/// Construct the HTTP client described by `config`.
pub fn api_from_config(config: &Config) -> anyhow::Result<Arc<dyn AssistantApi>> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    let api = HttpApi::new(&config.base_url, timeout)?;
    Ok(Arc::new(api))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_from_default_config_works() {
        let cfg = Config::default();
        assert!(api_from_config(&cfg).is_ok());
    }

    #[test]
    fn api_from_config_rejects_bad_base_url() {
        let cfg = Config { base_url: "not a url".into(), ..Config::default() };
        let err = api_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid API URL"));
    }
}
