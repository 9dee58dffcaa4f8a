use crate::core::query::filter_query_params;
use crate::domain::model::{FilterState, PortfolioSnapshot};
use crate::utils::error::{DashboardError, Result};
use reqwest::Client;
use std::time::Duration;

/// portfolio API 客戶端。
/// Bearer 憑證在建構時注入一次，之後的每個請求共用，
/// 不會在呼叫時重新去讀任何外部狀態。
pub struct PortfolioClient {
    endpoint: String,
    token: String,
    timeout: Option<Duration>,
    client: Client,
}

impl PortfolioClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            timeout: None,
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 以目前的過濾器狀態 GET /api/portfolio。
    /// 非 2xx 一律視為同一種失敗，不看回應內容，也不重試。
    pub async fn fetch_portfolio(&self, filters: &FilterState) -> Result<PortfolioSnapshot> {
        let params = filter_query_params(filters);

        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .bearer_auth(&self.token);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("📡 Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        tracing::debug!("📡 API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DashboardError::ApiStatusError {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let snapshot: PortfolioSnapshot = serde_json::from_str(&body)?;
        Ok(snapshot)
    }
}
